//! Main menu with the angler panel: experience, skills and challenges.

use super::draw_key_hints;
use chrono::Local;
use gofish::core::game_state::GameState;
use gofish::progression::{Skill, MAX_SKILL_RANK, PRESTIGE_MIN_LEVEL};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Play,
    Shop,
    Tacklebox,
    Leaderboard,
    Achievements,
    Settings,
    Prestige,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 8] = [
        MenuItem::Play,
        MenuItem::Shop,
        MenuItem::Tacklebox,
        MenuItem::Leaderboard,
        MenuItem::Achievements,
        MenuItem::Settings,
        MenuItem::Prestige,
        MenuItem::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Play => "Go Fishing",
            MenuItem::Shop => "Tackle Shop",
            MenuItem::Tacklebox => "Tacklebox",
            MenuItem::Leaderboard => "Leaderboard",
            MenuItem::Achievements => "Achievements",
            MenuItem::Settings => "Settings",
            MenuItem::Prestige => "Prestige",
            MenuItem::Quit => "Quit",
        }
    }
}

pub struct MenuState {
    pub selected: usize,
}

impl MenuState {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    pub fn current(&self) -> MenuItem {
        MenuItem::ALL[self.selected.min(MenuItem::ALL.len() - 1)]
    }

    pub fn move_up(&mut self) {
        self.selected = (self.selected + MenuItem::ALL.len() - 1) % MenuItem::ALL.len();
    }

    pub fn move_down(&mut self) {
        self.selected = (self.selected + 1) % MenuItem::ALL.len();
    }
}

impl Default for MenuState {
    fn default() -> Self {
        Self::new()
    }
}

/// Skill bound to the number keys 1-5 on the menu.
pub fn skill_for_key(c: char) -> Option<Skill> {
    let index = c.to_digit(10)?.checked_sub(1)? as usize;
    Skill::ALL.get(index).copied()
}

pub fn draw_menu(frame: &mut Frame, area: Rect, state: &GameState, menu: &MenuState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(2)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(30)])
        .split(rows[0]);

    draw_menu_list(frame, columns[0], state, menu);
    draw_angler_panel(frame, columns[1], state);
    draw_key_hints(
        frame,
        rows[1],
        &[("Up/Down", "Select"), ("Enter", "Open"), ("1-5", "Train skill"), ("Q", "Quit")],
    );
}

fn draw_menu_list(frame: &mut Frame, area: Rect, state: &GameState, menu: &MenuState) {
    let items: Vec<ListItem> = MenuItem::ALL
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let selected = i == menu.selected;
            let enabled = *item != MenuItem::Prestige || state.can_prestige();
            let style = match (selected, enabled) {
                (true, true) => Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                (true, false) => Style::default().fg(Color::Yellow),
                (false, true) => Style::default().fg(Color::White),
                (false, false) => Style::default().fg(Color::DarkGray),
            };
            let label = if *item == MenuItem::Prestige && !enabled {
                format!("Prestige (Lv {})", PRESTIGE_MIN_LEVEL)
            } else {
                item.label().to_string()
            };
            ListItem::new(Line::from(vec![
                Span::styled(if selected { "> " } else { "  " }, style),
                Span::styled(label, style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Menu ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(list, area);
}

fn draw_angler_panel(frame: &mut Frame, area: Rect, state: &GameState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // XP gauge
            Constraint::Length(7), // Skills
            Constraint::Min(4),    // Challenges
        ])
        .split(area);

    let xp = &state.experience;
    let next = xp
        .xp_for_next_level()
        .map_or_else(|| "max".to_string(), |n| n.to_string());
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} - Angler Lv {} ", state.username, xp.level)),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(xp.level_progress().clamp(0.0, 1.0))
        .label(format!("{} / {} XP", xp.total_experience, next));
    frame.render_widget(gauge, chunks[0]);

    let skill_lines: Vec<Line> = Skill::ALL
        .iter()
        .enumerate()
        .map(|(i, skill)| {
            let rank = xp.skills.get(*skill);
            Line::from(vec![
                Span::styled(format!("[{}] ", i + 1), Style::default().fg(Color::Yellow)),
                Span::raw(format!("{:<9}", skill.name())),
                Span::styled(
                    format!("{:>2}/{}", rank, MAX_SKILL_RANK),
                    Style::default().fg(Color::Cyan),
                ),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(skill_lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Skills ({} points) ", xp.skill_points)),
        ),
        chunks[1],
    );

    let mut lines = Vec::new();
    if let Some(daily) = &state.daily.challenge {
        let (mark, style) = if state.daily.completed {
            ("[X]", Style::default().fg(Color::Green))
        } else {
            ("[ ]", Style::default().fg(Color::Yellow))
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{} Today: ", mark), style),
            Span::raw(daily.description.clone()),
            Span::styled(
                format!(" {}/{} (+{})", state.daily.progress.min(daily.target), daily.target, daily.reward),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }
    for challenge in state.challenges.all() {
        let style = if challenge.completed {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(if challenge.completed { "[X] " } else { "[ ] " }, style),
            Span::styled(challenge.description(), style),
            Span::styled(
                format!(" {:.0}%", challenge.progress_fraction() * 100.0),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }
    let (daily_ms, weekly_ms) = state.challenges.reset_in(&Local::now());
    let title = format!(
        " Challenges (daily {}h, weekly {}d) ",
        daily_ms / 3_600_000,
        weekly_ms / 86_400_000
    );
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Go fishing to roll today's challenges.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(title)),
        chunks[2],
    );
}
