//! Fishing scene UI rendering.
//!
//! Sky and water are drawn cell by cell from the simulated surface, with the
//! bobber placed by cast distance and boats or the whale layered on top.

use super::throbber::waiting_message;
use super::{draw_key_hints, hex_color};
use gofish::achievements::get_achievement_def;
use gofish::core::game_loop::{FishingGame, FishingPhase, GameLoop, TickResult};
use gofish::fishing::data::{lure, rod, stage, BOAT_TYPES};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use std::collections::VecDeque;

const LOG_CAPACITY: usize = 6;
const SKY_ROWS: usize = 4;
/// Cast distance that reaches the far edge of the screen
const MAX_DRAWN_DISTANCE: f64 = 400.0;

/// Scrolling message log below the water.
pub struct FishingSceneState {
    pub log: VecDeque<String>,
}

impl FishingSceneState {
    pub fn new() -> Self {
        Self {
            log: VecDeque::with_capacity(LOG_CAPACITY),
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        if self.log.len() == LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(message.into());
    }

    pub fn clear(&mut self) {
        self.log.clear();
    }

    /// Turns a tick's events into log lines.
    pub fn record(&mut self, result: &TickResult) {
        for message in &result.messages {
            self.push(message.clone());
        }
        if result.nibble {
            self.push("A nibble... not yet.");
        }
        if let Some(report) = &result.caught {
            if report.combo > 1 {
                self.push(format!("Combo x{}", report.combo));
            }
        }
        for level_up in &result.angler_level_ups {
            self.push(format!(
                "Angler level {} (+{} skill points)",
                level_up.level, level_up.skill_points
            ));
        }
        for id in &result.achievements_unlocked {
            if let Some(def) = get_achievement_def(*id) {
                self.push(format!("Achievement: {} {}", def.icon, def.name));
            }
        }
        if let Some(reward) = result.daily_completed {
            self.push(format!("Daily challenge complete! +{} pts", reward));
        }
    }
}

impl Default for FishingSceneState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render_fishing_scene(frame: &mut Frame, area: Rect, game: &FishingGame, ui: &FishingSceneState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Stage and conditions
            Constraint::Min(8),    // Sky and water
            Constraint::Length(3), // Tension or phase
            Constraint::Length(LOG_CAPACITY as u16 + 2),
            Constraint::Length(2), // Hints
        ])
        .split(area);

    draw_header(frame, chunks[0], game);
    draw_scene(frame, chunks[1], game);
    draw_phase_bar(frame, chunks[2], game);
    draw_log(frame, chunks[3], ui);

    let hints: &[(&str, &str)] = match game.phase() {
        FishingPhase::Idle => &[("Space", "Cast"), ("Esc", "Menu")],
        FishingPhase::Bite => &[("Space", "Hook it!"), ("Esc", "Menu")],
        FishingPhase::Reeling => &[("Space", "Reel (tap)"), ("Esc", "Menu")],
        _ => &[("Esc", "Menu")],
    };
    draw_key_hints(frame, chunks[4], hints);
}

fn draw_header(frame: &mut Frame, area: Rect, game: &FishingGame) {
    let state = game.state();
    let weather = game.weather_system();
    let stage = stage(state.current_stage);
    let label = Style::default().fg(Color::DarkGray);

    let mut spans = vec![
        Span::styled(
            stage.name,
            Style::default()
                .fg(hex_color(stage.water_colors[0]))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ", label),
        Span::raw(weather.current.name()),
    ];
    if let Some(report) = &state.weather {
        spans.push(Span::raw(format!(
            " {} {:.0}°C {:.0} km/h",
            report.condition.icon(),
            report.temperature,
            report.wind_speed
        )));
    }
    spans.extend([
        Span::styled("  ", label),
        Span::raw(game.day_night().period().name()),
        Span::styled("  Rod ", label),
        Span::styled(rod(state.selected_rod).name, Style::default().fg(hex_color(rod(state.selected_rod).color))),
        Span::styled(format!(" ({}%)", state.rod_durability), label),
        Span::styled("  Lure ", label),
        Span::styled(
            lure(state.selected_lure).name,
            Style::default().fg(hex_color(lure(state.selected_lure).color)),
        ),
        Span::styled("  Combo ", label),
        Span::styled(
            format!("x{}", state.combo),
            Style::default().fg(if state.combo > 1 { Color::Yellow } else { Color::White }),
        ),
        Span::styled(format!("  Session {} / {} pts", state.session_catches, state.session_score), label),
    ]);

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// One drawable cell.
type Cell = (char, Style);

fn draw_scene(frame: &mut Frame, area: Rect, game: &FishingGame) {
    let width = area.width as usize;
    let height = area.height as usize;
    if width < 4 || height <= SKY_ROWS {
        return;
    }
    let state = game.state();
    let stage = stage(state.current_stage);
    let session = game.session();
    let events = game.events();
    let tick = (game.clock_ms().max(0) / 120) as usize;

    let sky_bg = if events.lightning_active() {
        Color::White
    } else {
        hex_color(stage.sky_colors[0])
    };
    let water_bg = hex_color(stage.water_colors[1]);
    let sky = Style::default().bg(sky_bg);
    let water = Style::default().fg(hex_color(stage.water_colors[0])).bg(water_bg);

    let mut rows: Vec<Vec<Cell>> = (0..height)
        .map(|y| vec![(' ', if y < SKY_ROWS { sky } else { water }); width])
        .collect();

    // Rain streaks
    let raining = stage.features.rain || game.weather_system().state.rain_intensity > 0.1;
    if raining {
        for (y, row) in rows.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                if (x * 7 + y * 13 + tick) % 11 == 0 {
                    cell.0 = if y < SKY_ROWS { '\'' } else { '.' };
                }
            }
        }
    }

    // Surface line from the simulated heights
    for (x, cell) in rows[SKY_ROWS].iter_mut().enumerate() {
        let h = game.water().height_at(x as f64 / width as f64);
        cell.0 = surface_char(h);
    }

    if stage.features.lily {
        for x in (5..width).step_by(17) {
            rows[SKY_ROWS][x] = ('@', water.fg(Color::Green));
        }
    }

    // Schooling fish below the surface
    let school = game.school();
    let water_rows = height.saturating_sub(SKY_ROWS + 2);
    if water_rows > 0 {
        for member in &school.members {
            let x = ((member.position.x / school.width) * width as f64) as usize;
            let y = SKY_ROWS + 2 + ((member.position.y / school.depth) * (water_rows - 1) as f64) as usize;
            let glyph = if member.velocity.x < 0.0 { '<' } else { '>' };
            if let Some(cell) = rows.get_mut(y).and_then(|row| row.get_mut(x)) {
                *cell = (glyph, water.fg(Color::DarkGray));
            }
        }
    }

    if let Some(boat) = events.boat {
        let x = (boat.progress() * width as f64) as usize;
        let name = BOAT_TYPES.get(boat.kind).map_or("boat", |b| b.name);
        put_text(&mut rows[SKY_ROWS - 2], x, "__|\\__", sky.fg(Color::White));
        put_text(&mut rows[SKY_ROWS - 1], x, "\\_____/", sky.fg(Color::Rgb(139, 69, 19)));
        put_text(&mut rows[0], x, name, sky.fg(Color::Gray));
    }

    if events.whale_visible() {
        let x = width * 3 / 4;
        put_text(&mut rows[SKY_ROWS - 1], x, " .:'. ", sky.fg(Color::LightBlue));
        put_text(&mut rows[SKY_ROWS], x, "(_____)>", water.fg(Color::Gray));
    }

    // Rod tip in the top-left corner
    put_text(&mut rows[0], 0, "\\", sky.fg(hex_color(rod(state.selected_rod).color)));

    let bobber_x = |fraction: f64| ((fraction.clamp(0.0, 1.0) * (width - 2) as f64) as usize) + 1;
    match session.phase {
        FishingPhase::Casting => {
            let target = rod(state.selected_rod).cast_distance / MAX_DRAWN_DISTANCE;
            let x = bobber_x(session.cast_progress * target);
            // Parabolic arc across the sky
            let arc = 4.0 * session.cast_progress * (1.0 - session.cast_progress);
            let y = SKY_ROWS - 1 - ((arc * (SKY_ROWS - 1) as f64) as usize).min(SKY_ROWS - 1);
            rows[y][x] = ('o', sky.fg(Color::Red).add_modifier(Modifier::BOLD));
        }
        FishingPhase::Waiting | FishingPhase::Bite | FishingPhase::Reeling => {
            let x = bobber_x(session.cast_distance / MAX_DRAWN_DISTANCE);
            let biting = session.phase == FishingPhase::Bite;
            let bob = if biting && tick % 2 == 0 { SKY_ROWS + 1 } else { SKY_ROWS };
            rows[bob.min(height - 1)][x] = ('o', water.fg(Color::Red).add_modifier(Modifier::BOLD));
            if biting {
                rows[SKY_ROWS - 1][x] = ('!', sky.fg(Color::Yellow).add_modifier(Modifier::BOLD));
            }
            for row in rows.iter_mut().take(height).skip(bob + 1).take(2) {
                row[x] = ('|', water.fg(Color::Gray));
            }
            if let (FishingPhase::Reeling, Some(fish)) = (session.phase, &session.fish) {
                let depth = (bob + 3).min(height - 1);
                let fx = x.saturating_sub(1);
                put_text(&mut rows[depth], fx, "><>", water.fg(hex_color(&fish.color)).add_modifier(Modifier::BOLD));
            }
        }
        _ => {}
    }

    let lines: Vec<Line> = rows
        .into_iter()
        .map(|row| Line::from(row.into_iter().map(|(c, s)| Span::styled(c.to_string(), s)).collect::<Vec<_>>()))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn surface_char(height: f64) -> char {
    if height > 0.6 {
        '^'
    } else if height > 0.2 {
        '~'
    } else if height > -0.2 {
        '-'
    } else {
        '_'
    }
}

fn put_text(row: &mut [Cell], x: usize, text: &str, style: Style) {
    for (i, c) in text.chars().enumerate() {
        if let Some(cell) = row.get_mut(x + i) {
            *cell = (c, style);
        }
    }
}

fn draw_phase_bar(frame: &mut Frame, area: Rect, game: &FishingGame) {
    let session = game.session();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", session.phase.label()));

    if session.phase == FishingPhase::Reeling {
        let tension = session.tension.clamp(0.0, 1.0);
        let color = if tension < 0.6 {
            Color::Green
        } else if tension < 0.85 {
            Color::Yellow
        } else {
            Color::Red
        };
        let gauge = Gauge::default()
            .block(block)
            .gauge_style(Style::default().fg(color))
            .ratio(tension)
            .label(format!("Tension {:.0}%", tension * 100.0));
        frame.render_widget(gauge, area);
        return;
    }

    let text = match session.phase {
        FishingPhase::Idle if game.state().rod_durability == 0 => {
            "Your rod is broken. Repair it in the shop.".to_string()
        }
        FishingPhase::Idle => "Press Space to cast.".to_string(),
        FishingPhase::Casting => format!("Casting... {:.0}%", session.cast_progress * 100.0),
        FishingPhase::Waiting => waiting_message(game.clock_ms().max(0) as u64 / 4000).to_string(),
        FishingPhase::Bite => "BITE! Hit Space!".to_string(),
        FishingPhase::Caught => "Landed!".to_string(),
        FishingPhase::Lost => "It got away...".to_string(),
        FishingPhase::Reeling => String::new(),
    };
    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn draw_log(frame: &mut Frame, area: Rect, ui: &FishingSceneState) {
    let lines: Vec<Line> = ui
        .log
        .iter()
        .rev()
        .enumerate()
        .map(|(i, m)| {
            let style = if i == 0 {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(m.clone(), style))
        })
        .collect();
    let log = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Log "));
    frame.render_widget(log, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use gofish::core::game_state::GameState;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_log_keeps_latest_messages() {
        let mut ui = FishingSceneState::new();
        for i in 0..10 {
            ui.push(format!("message {}", i));
        }
        assert_eq!(ui.log.len(), LOG_CAPACITY);
        assert_eq!(ui.log.back().map(String::as_str), Some("message 9"));
        assert_eq!(ui.log.front().map(String::as_str), Some("message 4"));
    }

    #[test]
    fn test_record_catch_and_nibble() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let mut game = FishingGame::new(GameState::new("term_test".to_string()));
        game.state_mut().settings.auto_reel = true;
        game.start(0, &mut rng);
        assert!(game.cast());

        let mut ui = FishingSceneState::new();
        for _ in 0..2000 {
            let result = game.tick(50, &mut rng);
            ui.record(&result);
            if result.caught.is_some() {
                break;
            }
        }
        assert!(ui.log.iter().any(|m| m.starts_with("Caught a")));

        let nibble = TickResult {
            nibble: true,
            ..TickResult::default()
        };
        ui.record(&nibble);
        assert_eq!(ui.log.back().map(String::as_str), Some("A nibble... not yet."));
    }

    #[test]
    fn test_surface_char_bands() {
        assert_eq!(surface_char(1.0), '^');
        assert_eq!(surface_char(0.3), '~');
        assert_eq!(surface_char(0.0), '-');
        assert_eq!(surface_char(-1.0), '_');
    }
}
