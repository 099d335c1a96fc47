//! Title card shown while the profile loads and the backend is contacted.

use super::throbber::spinner_char;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const TITLE: [&str; 5] = [
    "  ____  ___    _____ ___ ____  _   _ _ ",
    " / ___|/ _ \\  |  ___|_ _/ ___|| | | | |",
    "| |  _| | | | | |_   | |\\___ \\| |_| | |",
    "| |_| | |_| | |  _|  | | ___) |  _  |_|",
    " \\____|\\___/  |_|   |___|____/|_| |_(_)",
];

pub fn draw_loading(frame: &mut Frame, area: Rect, steps: &[String], version: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(TITLE.len() as u16 + 2),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let title: Vec<Line> = TITLE
        .iter()
        .map(|row| {
            Line::from(Span::styled(
                *row,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
        })
        .collect();
    frame.render_widget(
        Paragraph::new(title).alignment(Alignment::Center),
        chunks[1],
    );

    let mut lines: Vec<Line> = steps
        .iter()
        .map(|s| Line::from(Span::styled(s.clone(), Style::default().fg(Color::Gray))))
        .collect();
    lines.push(Line::from(Span::styled(
        format!("{} ", spinner_char()),
        Style::default().fg(Color::Yellow),
    )));
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        chunks[2],
    );

    frame.render_widget(
        Paragraph::new(Span::styled(version, Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Right),
        chunks[3],
    );
}
