use super::centered_rect;
use gofish::core::game_state::GameState;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Draws the prestige confirmation dialog as an overlay
pub fn draw_prestige_confirm(frame: &mut Frame, game_state: &GameState) {
    let dialog_area = centered_rect(52, 18, frame.size());
    frame.render_widget(Clear, dialog_area);

    let xp = &game_state.experience;
    let highlight = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let current = Style::default().fg(Color::Cyan);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Prestiging will reset:",
            Style::default().fg(Color::Red),
        )),
        Line::from(format!("  - Level {} and score {}", game_state.level, game_state.score)),
        Line::from(format!("  - {} fish in the tacklebox", game_state.tacklebox.len())),
    ];
    if xp.can_prestige() {
        lines.push(Line::from(format!("  - Angler level {} and XP", xp.level)));
    }
    lines.extend([
        Line::from(""),
        Line::from(Span::styled(
            "You will keep lures, achievements and records.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "You will gain:",
            Style::default().fg(Color::Green),
        )),
        Line::from(vec![
            Span::raw("  - Prestige: "),
            Span::styled(game_state.prestige.to_string(), current),
            Span::raw(" -> "),
            Span::styled((game_state.prestige + 1).to_string(), highlight),
        ]),
    ]);
    if xp.can_prestige() {
        lines.push(Line::from(vec![
            Span::raw("  - XP Multiplier: "),
            Span::styled(format!("{:.2}x", xp.multipliers.xp), current),
            Span::raw(" -> "),
            Span::styled(format!("{:.2}x", xp.multipliers.xp + 0.05), highlight),
        ]));
        lines.push(Line::from(vec![
            Span::raw("  - Coin Multiplier: "),
            Span::styled(format!("{:.2}x", xp.multipliers.coins), current),
            Span::raw(" -> "),
            Span::styled(format!("{:.2}x", xp.multipliers.coins + 0.05), highlight),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("      "),
        Span::styled(
            "[Y] Yes, Prestige",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled(
            "[N] Cancel",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(Line::from(Span::styled(" Confirm Prestige ", highlight)))
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, dialog_area);
}
