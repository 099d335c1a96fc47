//! Key handling for every screen.
//!
//! Local state changes happen here; anything that needs the backend or the
//! save file is handed back to `main` as an `InputResult`.

use crate::ui::achievement_browser_scene::AchievementBrowserState;
use crate::ui::fishing_scene::FishingSceneState;
use crate::ui::leaderboard_scene::LeaderboardView;
use crate::ui::menu_scene::{skill_for_key, MenuItem, MenuState};
use crate::ui::settings_scene::SettingsState;
use crate::ui::shop_scene::{describe_shop_error, ShopAction, ShopState};
use crate::ui::stage_select_scene::StageSelectState;
use crate::ui::tacklebox_scene::TackleboxViewState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gofish::core::game_loop::{FishingGame, GameLoop};
use gofish::fishing::data::{lure, rod};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    StageSelect,
    Fishing,
    Shop,
    Tacklebox,
    Leaderboard,
    Achievements,
    Settings,
}

/// Modal dialogs drawn over the current screen. At most one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    PrestigeConfirm,
}

/// Per-screen cursor state.
pub struct UiState {
    pub screen: Screen,
    pub overlay: Overlay,
    pub menu: MenuState,
    pub stage_select: StageSelectState,
    pub fishing: FishingSceneState,
    pub shop: ShopState,
    pub tacklebox: TackleboxViewState,
    pub leaderboard: LeaderboardView,
    pub achievements: AchievementBrowserState,
    pub settings: SettingsState,
}

impl UiState {
    pub fn new(current_stage: usize) -> Self {
        Self {
            screen: Screen::Menu,
            overlay: Overlay::None,
            menu: MenuState::new(),
            stage_select: StageSelectState::new(current_stage),
            fishing: FishingSceneState::new(),
            shop: ShopState::new(),
            tacklebox: TackleboxViewState::new(),
            leaderboard: LeaderboardView::Loaded(Vec::new()),
            achievements: AchievementBrowserState::new(),
            settings: SettingsState::new(),
        }
    }
}

/// Result of handling one key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
    /// The fishing screen was left; the session score is due
    LeftFishing,
    /// Fetch the leaderboard for display
    LoadLeaderboard,
    LureBought(usize),
    Prestiged,
    /// Settings toggles changed
    SaveSettings,
    /// Profile changed outside a tick
    NeedsSave,
}

pub fn handle_key(
    key: KeyEvent,
    ui: &mut UiState,
    game: &mut FishingGame,
    rng: &mut impl Rng,
) -> InputResult {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputResult::Quit;
    }
    if ui.overlay == Overlay::PrestigeConfirm {
        return handle_prestige_confirm(key, ui, game);
    }

    match ui.screen {
        Screen::Menu => handle_menu(key, ui, game),
        Screen::StageSelect => handle_stage_select(key, ui, game, rng),
        Screen::Fishing => handle_fishing(key, ui, game, rng),
        Screen::Shop => handle_shop(key, ui, game),
        Screen::Tacklebox => {
            let len = game.state().tacklebox.query(&ui.tacklebox.filter).len();
            let view = &mut ui.tacklebox;
            match key.code {
                KeyCode::Esc => ui.screen = Screen::Menu,
                KeyCode::Up => view.move_up(),
                KeyCode::Down => view.move_down(len),
                KeyCode::Char('s') | KeyCode::Char('S') => view.cycle_sort(),
                KeyCode::Char('f') | KeyCode::Char('F') => view.cycle_rarity(),
                KeyCode::Char('g') | KeyCode::Char('G') => view.cycle_stage(),
                _ => {}
            }
            InputResult::Continue
        }
        Screen::Leaderboard => match key.code {
            KeyCode::Esc => {
                ui.screen = Screen::Menu;
                InputResult::Continue
            }
            KeyCode::Char('r') | KeyCode::Char('R') => InputResult::LoadLeaderboard,
            _ => InputResult::Continue,
        },
        Screen::Achievements => {
            let browser = &mut ui.achievements;
            match key.code {
                KeyCode::Esc => ui.screen = Screen::Menu,
                KeyCode::Left | KeyCode::Char('<') => browser.prev_category(),
                KeyCode::Right | KeyCode::Char('>') => browser.next_category(),
                KeyCode::Up => browser.move_up(),
                KeyCode::Down => browser.move_down(),
                _ => {}
            }
            InputResult::Continue
        }
        Screen::Settings => handle_settings(key, ui, game),
    }
}

fn handle_menu(key: KeyEvent, ui: &mut UiState, game: &mut FishingGame) -> InputResult {
    match key.code {
        KeyCode::Up => ui.menu.move_up(),
        KeyCode::Down => ui.menu.move_down(),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return InputResult::Quit,
        KeyCode::Char(c) => {
            if let Some(skill) = skill_for_key(c) {
                if game.state_mut().experience.spend_skill_point(skill) {
                    return InputResult::NeedsSave;
                }
            }
        }
        KeyCode::Enter => match ui.menu.current() {
            MenuItem::Play => {
                ui.stage_select = StageSelectState::new(game.state().current_stage);
                ui.screen = Screen::StageSelect;
            }
            MenuItem::Shop => {
                ui.shop.status = None;
                ui.screen = Screen::Shop;
            }
            MenuItem::Tacklebox => ui.screen = Screen::Tacklebox,
            MenuItem::Leaderboard => {
                ui.screen = Screen::Leaderboard;
                return InputResult::LoadLeaderboard;
            }
            MenuItem::Achievements => ui.screen = Screen::Achievements,
            MenuItem::Settings => {
                ui.settings = SettingsState::new();
                ui.screen = Screen::Settings;
            }
            MenuItem::Prestige => {
                if game.can_prestige() {
                    ui.overlay = Overlay::PrestigeConfirm;
                }
            }
            MenuItem::Quit => return InputResult::Quit,
        },
        _ => {}
    }
    InputResult::Continue
}

fn handle_stage_select(
    key: KeyEvent,
    ui: &mut UiState,
    game: &mut FishingGame,
    rng: &mut impl Rng,
) -> InputResult {
    match key.code {
        KeyCode::Esc => ui.screen = Screen::Menu,
        KeyCode::Up => ui.stage_select.move_up(),
        KeyCode::Down => ui.stage_select.move_down(),
        KeyCode::Enter => {
            game.start(ui.stage_select.selected, rng);
            ui.fishing.clear();
            ui.fishing.push("Press Space to cast.");
            ui.screen = Screen::Fishing;
        }
        _ => {}
    }
    InputResult::Continue
}

fn handle_fishing(
    key: KeyEvent,
    ui: &mut UiState,
    game: &mut FishingGame,
    rng: &mut impl Rng,
) -> InputResult {
    if game.cutscene().map_or(false, |c| !c.is_complete()) {
        game.skip_cutscene();
        return InputResult::Continue;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
            game.stop();
            ui.screen = Screen::Menu;
            InputResult::LeftFishing
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            if !game.cast() && !game.reel(rng) && game.state().rod_durability == 0 {
                ui.fishing.push("Your rod is broken. Repair it in the shop.");
            }
            InputResult::Continue
        }
        _ => InputResult::Continue,
    }
}

fn handle_shop(key: KeyEvent, ui: &mut UiState, game: &mut FishingGame) -> InputResult {
    let shop = &mut ui.shop;
    let action = match key.code {
        KeyCode::Esc => {
            ui.screen = Screen::Menu;
            return InputResult::Continue;
        }
        KeyCode::Tab | KeyCode::Left | KeyCode::Right => {
            shop.switch_tab();
            return InputResult::Continue;
        }
        KeyCode::Up => {
            shop.move_up();
            return InputResult::Continue;
        }
        KeyCode::Down => {
            shop.move_down();
            return InputResult::Continue;
        }
        KeyCode::Enter => shop.activate(game.state()),
        KeyCode::Char('r') | KeyCode::Char('R') => ShopAction::Repair,
        _ => return InputResult::Continue,
    };

    let state = game.state_mut();
    match action {
        ShopAction::SelectRod(index) => {
            state.select_rod(index);
            shop.status = Some(format!("Equipped {}.", rod(index).name));
            InputResult::NeedsSave
        }
        ShopAction::SelectLure(index) => {
            state.select_lure(index);
            shop.status = Some(format!("Equipped {}.", lure(index).name));
            InputResult::NeedsSave
        }
        ShopAction::Repair => {
            state.repair_rod();
            shop.status = Some("Rod repaired.".to_string());
            InputResult::NeedsSave
        }
        ShopAction::BuyLure(index) => match game.buy_lure(index) {
            Ok(()) => {
                game.state_mut().select_lure(index);
                shop.status = Some(format!("Bought {}!", lure(index).name));
                InputResult::LureBought(index)
            }
            Err(e) => {
                shop.status = Some(describe_shop_error(&e));
                InputResult::Continue
            }
        },
    }
}

fn handle_settings(key: KeyEvent, ui: &mut UiState, game: &mut FishingGame) -> InputResult {
    let step = match key.code {
        KeyCode::Esc => {
            ui.screen = Screen::Menu;
            return InputResult::Continue;
        }
        KeyCode::Up => {
            ui.settings.move_up();
            return InputResult::Continue;
        }
        KeyCode::Down => {
            ui.settings.move_down();
            return InputResult::Continue;
        }
        KeyCode::Left => -1,
        KeyCode::Right => 1,
        KeyCode::Enter | KeyCode::Char(' ') => 0,
        _ => return InputResult::Continue,
    };
    if ui.settings.activate(game.state_mut(), step) {
        InputResult::SaveSettings
    } else {
        InputResult::NeedsSave
    }
}

fn handle_prestige_confirm(key: KeyEvent, ui: &mut UiState, game: &mut FishingGame) -> InputResult {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            ui.overlay = Overlay::None;
            if game.can_prestige() {
                game.prestige();
                ui.screen = Screen::Menu;
                return InputResult::Prestiged;
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            ui.overlay = Overlay::None;
        }
        _ => {}
    }
    InputResult::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use gofish::core::game_loop::FishingPhase;
    use gofish::core::game_state::GameState;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn setup() -> (UiState, FishingGame, ChaCha8Rng) {
        let game = FishingGame::new(GameState::new("term_test".to_string()));
        (UiState::new(0), game, ChaCha8Rng::seed_from_u64(12345))
    }

    #[test]
    fn test_menu_to_fishing_and_back() {
        let (mut ui, mut game, mut rng) = setup();
        assert_eq!(handle_key(press(KeyCode::Enter), &mut ui, &mut game, &mut rng), InputResult::Continue);
        assert_eq!(ui.screen, Screen::StageSelect);

        handle_key(press(KeyCode::Down), &mut ui, &mut game, &mut rng);
        handle_key(press(KeyCode::Enter), &mut ui, &mut game, &mut rng);
        assert_eq!(ui.screen, Screen::Fishing);
        assert!(game.state().playing);
        assert_eq!(game.state().current_stage, 1);

        handle_key(press(KeyCode::Char(' ')), &mut ui, &mut game, &mut rng);
        assert_eq!(game.phase(), FishingPhase::Casting);

        let result = handle_key(press(KeyCode::Esc), &mut ui, &mut game, &mut rng);
        assert_eq!(result, InputResult::LeftFishing);
        assert_eq!(ui.screen, Screen::Menu);
        assert!(!game.state().playing);
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let (mut ui, mut game, mut rng) = setup();
        ui.screen = Screen::Shop;
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(key, &mut ui, &mut game, &mut rng), InputResult::Quit);
    }

    #[test]
    fn test_shop_refuses_then_sells_lure() {
        let (mut ui, mut game, mut rng) = setup();
        ui.screen = Screen::Shop;
        handle_key(press(KeyCode::Tab), &mut ui, &mut game, &mut rng);
        handle_key(press(KeyCode::Down), &mut ui, &mut game, &mut rng);

        assert_eq!(handle_key(press(KeyCode::Enter), &mut ui, &mut game, &mut rng), InputResult::Continue);
        assert_eq!(ui.shop.status.as_deref(), Some("Reach level 5 first."));

        game.state_mut().set_level(5);
        game.state_mut().add_score(600);
        assert_eq!(
            handle_key(press(KeyCode::Enter), &mut ui, &mut game, &mut rng),
            InputResult::LureBought(1)
        );
        assert_eq!(game.state().selected_lure, 1);
        assert_eq!(game.state().score, 100);
    }

    #[test]
    fn test_skill_keys_spend_points() {
        let (mut ui, mut game, mut rng) = setup();
        assert_eq!(handle_key(press(KeyCode::Char('1')), &mut ui, &mut game, &mut rng), InputResult::Continue);

        game.state_mut().experience.skill_points = 1;
        assert_eq!(handle_key(press(KeyCode::Char('1')), &mut ui, &mut game, &mut rng), InputResult::NeedsSave);
        assert_eq!(game.state().experience.skills.casting, 1);
    }

    #[test]
    fn test_prestige_dialog_needs_level() {
        let (mut ui, mut game, mut rng) = setup();
        ui.menu.selected = MenuItem::ALL.iter().position(|m| *m == MenuItem::Prestige).unwrap();
        handle_key(press(KeyCode::Enter), &mut ui, &mut game, &mut rng);
        assert_eq!(ui.overlay, Overlay::None);

        game.state_mut().set_level(50);
        handle_key(press(KeyCode::Enter), &mut ui, &mut game, &mut rng);
        assert_eq!(ui.overlay, Overlay::PrestigeConfirm);
        assert_eq!(handle_key(press(KeyCode::Char('y')), &mut ui, &mut game, &mut rng), InputResult::Prestiged);
        assert_eq!(game.state().prestige, 1);
        assert_eq!(game.state().level, 1);
    }
}
