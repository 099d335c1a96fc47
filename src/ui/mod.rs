//! Terminal scenes. Each scene owns its cursor state and draws from the
//! game state it is handed; `main` routes keys and switches scenes.

pub mod achievement_browser_scene;
pub mod cutscene_overlay;
pub mod fishing_scene;
pub mod leaderboard_scene;
pub mod loading_scene;
pub mod menu_scene;
pub mod prestige_confirm;
pub mod settings_scene;
pub mod shop_scene;
pub mod stage_select_scene;
pub mod tacklebox_scene;
mod throbber;

use gofish::core::game_state::GameState;
use gofish::fishing::data::{difficulty, stage};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Parses `#RRGGBB`; anything else renders white.
pub fn hex_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 {
        return Color::White;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::White,
    }
}

/// A `width` x `height` rectangle centred in `area`, clipped to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    )
}

/// One-line status bar shared by every scene.
pub fn draw_status_bar(frame: &mut Frame, area: Rect, state: &GameState) {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let mut spans = vec![
        Span::styled(" GO FISH! ", Style::default().fg(Color::Black).bg(Color::Cyan)),
        Span::styled("  Score ", label),
        Span::styled(state.score.to_string(), value),
        Span::styled("  Best ", label),
        Span::styled(state.high_score.to_string(), value),
        Span::styled("  Lv ", label),
        Span::styled(state.level.to_string(), value),
        Span::styled(format!(" ({} to go)", state.remaining), label),
        Span::styled("  ", label),
        Span::styled(
            difficulty(state.difficulty).name,
            Style::default().fg(Color::Magenta),
        ),
    ];
    if state.prestige > 0 {
        spans.push(Span::styled(
            format!("  P{}", state.prestige),
            Style::default().fg(Color::Yellow),
        ));
    }
    if state.playing {
        spans.push(Span::styled(
            format!("  @ {}", stage(state.current_stage).name),
            Style::default().fg(Color::Cyan),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Key hints along the bottom edge.
pub fn draw_key_hints(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}  ", action),
            Style::default().fg(Color::Gray),
        ));
    }
    let hints = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(hints, area);
}
