mod input;
mod ui;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use gofish::api::{BackendSync, GameApi, HttpApi, SyncEvent, SyncJob, SyncSnapshot, SyncWorker};
use gofish::backend::{weather_source, LocalBackend};
use gofish::config::Config;
use gofish::core::constants::TICK_INTERVAL_MS;
use gofish::core::game_loop::{frame_dt_ms, FishingGame, GameLoop, TickResult};
use gofish::core::game_state::GameState;
use gofish::save::{SaveManager, Settings};
use gofish::utils::build_info::version_string;
use gofish::utils::device::{load_or_create_device_id, new_device_id};
use gofish::utils::logging::{self, parse_level};
use input::{handle_key, InputResult, Overlay, Screen, UiState};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use ui::leaderboard_scene::{LeaderboardView, LEADERBOARD_LIMIT};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

fn print_help() {
    println!("GO FISH! - terminal fishing\n");
    println!("Usage: gofish [options]\n");
    println!("Options:");
    println!("  --offline  Play without contacting the backend");
    println!("  --version  Show version information");
    println!("  --help     Show this help message");
}

fn main() -> io::Result<()> {
    let mut offline = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("{}", version_string());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--offline" => offline = true,
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'gofish --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let mut config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: could not read config ({}), using defaults", e);
        Config::default()
    });
    config.offline |= offline;
    if let Err(e) = logging::init(parse_level(&config.log_level)) {
        eprintln!("Warning: logging disabled ({})", e);
    }
    log::info!("{} starting (offline: {})", version_string(), config.offline);

    let device_id = load_or_create_device_id().unwrap_or_else(|e| {
        log::warn!("device id not persisted: {}", e);
        new_device_id()
    });
    let save_manager = SaveManager::new()?;
    let mut state = GameState::restore(
        save_manager.load(),
        device_id,
        config.difficulty,
        Settings::load,
    );
    log::info!("profile for {} ready", state.username);

    let api: Box<dyn GameApi> = if config.offline {
        Box::new(LocalBackend::new(weather_source(
            config.live_weather,
            config.request_timeout(),
        )))
    } else {
        Box::new(HttpApi::new(&config.backend_url, config.request_timeout()))
    };
    let mut sync = BackendSync::new(api);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut steps = vec![format!("Welcome back, {}.", state.username)];
    draw_loading(&mut terminal, &steps)?;
    steps.push(if config.offline {
        "Playing offline.".to_string()
    } else {
        format!("Contacting {}...", config.backend_url)
    });
    draw_loading(&mut terminal, &steps)?;

    let report = sync.bootstrap(&mut state);
    steps.push(match &report.user_id {
        Some(_) => "Signed in.".to_string(),
        None => "Backend unavailable, progress stays local.".to_string(),
    });
    draw_loading(&mut terminal, &steps)?;

    let mut game = FishingGame::new(state);
    let worker = SyncWorker::spawn(sync);

    let result = run(&mut terminal, &mut game, &worker, &save_manager, &config);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    save(&save_manager, &game);
    if let Err(e) = game.state().settings.save() {
        log::warn!("settings not saved: {}", e);
    }
    // Lets queued pushes reach the backend before exiting
    worker.shutdown();
    log::info!("goodbye");
    result
}

fn save(manager: &SaveManager, game: &FishingGame) {
    if let Err(e) = manager.save(&game.state().to_profile()) {
        log::error!("save failed: {}", e);
    }
}

fn draw_loading(terminal: &mut Term, steps: &[String]) -> io::Result<()> {
    let version = version_string();
    terminal.draw(|frame| {
        let area = frame.size();
        ui::loading_scene::draw_loading(frame, area, steps, &version);
    })?;
    Ok(())
}

fn run(
    terminal: &mut Term,
    game: &mut FishingGame,
    worker: &SyncWorker,
    save_manager: &SaveManager,
    config: &Config,
) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let mut ui = UiState::new(game.state().current_stage);
    let autosave = Duration::from_secs(config.autosave_interval_seconds.max(1));
    let mut last_tick = Instant::now();
    let mut last_save = Instant::now();

    loop {
        for event in worker.poll() {
            match event {
                SyncEvent::Leaderboard(Ok(entries)) => {
                    ui.leaderboard = LeaderboardView::Loaded(entries)
                }
                SyncEvent::Leaderboard(Err(e)) => {
                    ui.leaderboard = LeaderboardView::Unavailable(e.to_string())
                }
                SyncEvent::SessionSubmitted(score) => {
                    log::info!("session score {} submitted", score.score)
                }
                SyncEvent::Prestige(prestige) => log::info!("server prestige {}", prestige),
            }
        }

        terminal.draw(|frame| draw(frame, &ui, game))?;

        if event::poll(Duration::from_millis(TICK_INTERVAL_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match handle_key(key, &mut ui, game, &mut rng) {
                        InputResult::Continue => {}
                        InputResult::Quit => {
                            if game.state().playing {
                                game.stop();
                                submit_session(worker, game);
                            }
                            return Ok(());
                        }
                        InputResult::LeftFishing => {
                            submit_session(worker, game);
                            save(save_manager, game);
                        }
                        InputResult::LoadLeaderboard => {
                            ui.leaderboard = LeaderboardView::Loading;
                            worker.submit(SyncJob::Leaderboard(LEADERBOARD_LIMIT));
                        }
                        InputResult::LureBought(index) => {
                            worker.submit(SyncJob::Lure(snapshot(game), index));
                            save(save_manager, game);
                        }
                        InputResult::Prestiged => {
                            worker.submit(SyncJob::Prestige(snapshot(game)));
                            save(save_manager, game);
                        }
                        InputResult::SaveSettings => {
                            if let Err(e) = game.state().settings.save() {
                                log::warn!("settings not saved: {}", e);
                            }
                        }
                        InputResult::NeedsSave => save(save_manager, game),
                    }
                }
            }
        }

        let now = Instant::now();
        let dt_ms = frame_dt_ms(now.duration_since(last_tick));
        last_tick = now;

        let result = game.tick(dt_ms, &mut rng);
        if ui.screen == Screen::Fishing {
            ui.fishing.record(&result);
        }
        if result.bite && game.state().settings.vibration_enabled {
            let mut out = io::stdout();
            let _ = out.write_all(b"\x07");
            let _ = out.flush();
        }
        push_tick(worker, game, &result);

        if last_save.elapsed() >= autosave {
            save(save_manager, game);
            last_save = Instant::now();
        }
    }
}

fn snapshot(game: &FishingGame) -> SyncSnapshot {
    SyncSnapshot::from(game.state())
}

/// Queues a tick's progress for the backend.
fn push_tick(worker: &SyncWorker, game: &FishingGame, result: &TickResult) {
    if let Some(report) = &result.caught {
        worker.submit(SyncJob::Catch(snapshot(game), report.item.clone()));
    }
    if !result.achievements_unlocked.is_empty() {
        worker.submit(SyncJob::Achievements(
            snapshot(game),
            result.achievements_unlocked.clone(),
        ));
    }
    if result.level_up.is_some() {
        worker.submit(SyncJob::Level(snapshot(game)));
    }
    if result.daily_completed.is_some() {
        worker.submit(SyncJob::CompleteDaily(snapshot(game)));
    }
}

fn submit_session(worker: &SyncWorker, game: &FishingGame) {
    worker.submit(SyncJob::SessionScore(snapshot(game)));
}

fn draw(frame: &mut Frame, ui: &UiState, game: &FishingGame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(frame.size());
    let state = game.state();
    ui::draw_status_bar(frame, chunks[0], state);

    let area = chunks[1];
    match ui.screen {
        Screen::Menu => ui::menu_scene::draw_menu(frame, area, state, &ui.menu),
        Screen::StageSelect => {
            ui::stage_select_scene::draw_stage_select(frame, area, &ui.stage_select)
        }
        Screen::Fishing => {
            ui::fishing_scene::render_fishing_scene(frame, area, game, &ui.fishing);
            if let Some(cutscene) = game.cutscene() {
                ui::cutscene_overlay::draw_cutscene(frame, cutscene);
            }
        }
        Screen::Shop => ui::shop_scene::draw_shop(frame, area, state, &ui.shop),
        Screen::Tacklebox => {
            ui::tacklebox_scene::draw_tacklebox(frame, area, &state.tacklebox, &ui.tacklebox)
        }
        Screen::Leaderboard => ui::leaderboard_scene::draw_leaderboard(
            frame,
            area,
            &ui.leaderboard,
            &state.username,
        ),
        Screen::Achievements => ui::achievement_browser_scene::render_achievement_browser(
            frame,
            area,
            &state.achievements,
            &ui.achievements,
        ),
        Screen::Settings => ui::settings_scene::draw_settings(frame, area, state, &ui.settings),
    }

    if ui.overlay == Overlay::PrestigeConfirm {
        ui::prestige_confirm::draw_prestige_confirm(frame, state);
    }
}
