//! Global leaderboard, fetched when the screen opens.

use super::draw_key_hints;
use gofish::api::LeaderboardEntry;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

pub const LEADERBOARD_LIMIT: usize = 20;

pub enum LeaderboardView {
    Loading,
    Loaded(Vec<LeaderboardEntry>),
    Unavailable(String),
}

pub fn draw_leaderboard(frame: &mut Frame, area: Rect, view: &LeaderboardView, username: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(2)])
        .split(area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Leaderboard ")
        .border_style(Style::default().fg(Color::Yellow));

    match view {
        LeaderboardView::Unavailable(reason) => {
            let text = vec![
                Line::from(""),
                Line::from("The leaderboard is unavailable."),
                Line::from(reason.as_str()),
            ];
            frame.render_widget(
                Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block),
                chunks[0],
            );
        }
        LeaderboardView::Loading => {
            frame.render_widget(
                Paragraph::new("Fetching scores...")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block),
                chunks[0],
            );
        }
        LeaderboardView::Loaded(entries) if entries.is_empty() => {
            frame.render_widget(
                Paragraph::new("No scores yet. Be the first!")
                    .alignment(Alignment::Center)
                    .block(block),
                chunks[0],
            );
        }
        LeaderboardView::Loaded(entries) => {
            let rows: Vec<Row> = entries
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    let style = if entry.username == username {
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else if i < 3 {
                        Style::default().fg(Color::Yellow)
                    } else {
                        Style::default()
                    };
                    let date = entry.timestamp.get(..10).unwrap_or(&entry.timestamp);
                    Row::new(vec![
                        format!("#{}", i + 1),
                        entry.username.clone(),
                        entry.score.to_string(),
                        entry.level.to_string(),
                        entry.catches.to_string(),
                        date.to_string(),
                    ])
                    .style(style)
                })
                .collect();
            let table = Table::new(
                rows,
                [
                    Constraint::Length(4),
                    Constraint::Min(12),
                    Constraint::Length(9),
                    Constraint::Length(6),
                    Constraint::Length(8),
                    Constraint::Length(11),
                ],
            )
            .header(
                Row::new(vec!["", "Angler", "Score", "Level", "Catches", "Date"])
                    .style(Style::default().fg(Color::DarkGray)),
            )
            .block(block);
            frame.render_widget(table, chunks[0]);
        }
    }

    draw_key_hints(frame, chunks[1], &[("R", "Refresh"), ("Esc", "Back")]);
}
