//! Settings: toggles, difficulty and a guarded progress reset.

use super::draw_key_hints;
use gofish::core::game_state::GameState;
use gofish::fishing::data::{difficulty, DIFFICULTY_LEVELS};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    Sound,
    Music,
    Vibration,
    AutoReel,
    Difficulty,
    ResetProgress,
}

impl SettingsRow {
    pub const ALL: [SettingsRow; 6] = [
        SettingsRow::Sound,
        SettingsRow::Music,
        SettingsRow::Vibration,
        SettingsRow::AutoReel,
        SettingsRow::Difficulty,
        SettingsRow::ResetProgress,
    ];
}

pub struct SettingsState {
    pub selected: usize,
    /// Reset needs a second Enter
    pub reset_armed: bool,
}

impl SettingsState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            reset_armed: false,
        }
    }

    pub fn current(&self) -> SettingsRow {
        SettingsRow::ALL[self.selected.min(SettingsRow::ALL.len() - 1)]
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.reset_armed = false;
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < SettingsRow::ALL.len() {
            self.selected += 1;
        }
        self.reset_armed = false;
    }

    /// Applies Enter (or Left/Right with `step`) to the selected row.
    /// Returns true when the settings file should be rewritten.
    pub fn activate(&mut self, state: &mut GameState, step: i32) -> bool {
        match self.current() {
            SettingsRow::Sound => state.toggle_sound(),
            SettingsRow::Music => state.toggle_music(),
            SettingsRow::Vibration => state.toggle_vibration(),
            SettingsRow::AutoReel => state.toggle_auto_reel(),
            SettingsRow::Difficulty => {
                let len = DIFFICULTY_LEVELS.len() as i32;
                let delta = if step < 0 { -1 } else { 1 };
                let next = (state.difficulty as i32 + delta).rem_euclid(len) as usize;
                state.set_difficulty(next);
                log::info!("difficulty set to {}", difficulty(next).name);
                return false;
            }
            SettingsRow::ResetProgress => {
                if self.reset_armed {
                    state.full_reset();
                    self.reset_armed = false;
                    log::warn!("progress reset by player");
                } else {
                    self.reset_armed = true;
                }
                return false;
            }
        }
        true
    }
}

impl Default for SettingsState {
    fn default() -> Self {
        Self::new()
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "ON"
    } else {
        "OFF"
    }
}

pub fn draw_settings(frame: &mut Frame, area: Rect, state: &GameState, ui: &SettingsState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(2)])
        .split(area);

    let settings = &state.settings;
    let items: Vec<ListItem> = SettingsRow::ALL
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let (label, value) = match row {
                SettingsRow::Sound => ("Sound effects", on_off(settings.sound_enabled).to_string()),
                SettingsRow::Music => ("Music", on_off(settings.music_enabled).to_string()),
                SettingsRow::Vibration => ("Bell on bite", on_off(settings.vibration_enabled).to_string()),
                SettingsRow::AutoReel => ("Auto reel", on_off(settings.auto_reel).to_string()),
                SettingsRow::Difficulty => {
                    let d = difficulty(state.difficulty);
                    ("Difficulty", format!("< {} > ({} fish/level)", d.name, d.fish_per_level))
                }
                SettingsRow::ResetProgress => (
                    "Reset progress",
                    if ui.reset_armed {
                        "Press Enter again to confirm".to_string()
                    } else {
                        String::new()
                    },
                ),
            };
            let selected = i == ui.selected;
            let style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let value_style = if *row == SettingsRow::ResetProgress {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Cyan)
            };
            ListItem::new(Line::from(vec![
                Span::styled(if selected { "> " } else { "  " }, style),
                Span::styled(format!("{:<16}", label), style),
                Span::styled(value, value_style),
            ]))
        })
        .collect();

    frame.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title(" Settings ")),
        chunks[0],
    );
    draw_key_hints(
        frame,
        chunks[1],
        &[("Up/Down", "Select"), ("Enter", "Toggle"), ("Left/Right", "Change"), ("Esc", "Back")],
    );
}
