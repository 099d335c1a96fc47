//! Achievement browser.
//!
//! Tabs per category, a list on the left and a detail panel with reward,
//! tier and unlock status on the right.

use gofish::achievements::{get_achievements_by_category, AchievementCategory, Achievements};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Cursor state for the browser.
pub struct AchievementBrowserState {
    pub selected_category: AchievementCategory,
    pub selected_index: usize,
}

impl AchievementBrowserState {
    pub fn new() -> Self {
        Self {
            selected_category: AchievementCategory::Catching,
            selected_index: 0,
        }
    }

    fn category_position(&self) -> usize {
        AchievementCategory::ALL
            .iter()
            .position(|c| *c == self.selected_category)
            .unwrap_or(0)
    }

    pub fn next_category(&mut self) {
        let i = (self.category_position() + 1) % AchievementCategory::ALL.len();
        self.selected_category = AchievementCategory::ALL[i];
        self.selected_index = 0;
    }

    pub fn prev_category(&mut self) {
        let len = AchievementCategory::ALL.len();
        let i = (self.category_position() + len - 1) % len;
        self.selected_category = AchievementCategory::ALL[i];
        self.selected_index = 0;
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let max_items = get_achievements_by_category(self.selected_category).len();
        if self.selected_index + 1 < max_items {
            self.selected_index += 1;
        }
    }
}

impl Default for AchievementBrowserState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render_achievement_browser(
    frame: &mut Frame,
    area: Rect,
    achievements: &Achievements,
    ui_state: &AchievementBrowserState,
) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(
            " Achievements ({}/{}, {:.1}%) ",
            achievements.unlocked_count(),
            achievements.total_count(),
            achievements.unlock_percentage()
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Category tabs
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Help
        ])
        .split(inner);

    render_category_tabs(frame, chunks[0], achievements, ui_state);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    render_achievement_list(frame, content_chunks[0], achievements, ui_state);
    render_achievement_detail(frame, content_chunks[1], achievements, ui_state);

    let help = Paragraph::new("[</>] Category  [Up/Down] Select  [Esc] Back")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[2]);
}

fn render_category_tabs(
    frame: &mut Frame,
    area: Rect,
    achievements: &Achievements,
    ui_state: &AchievementBrowserState,
) {
    let spans: Vec<Span> = AchievementCategory::ALL
        .iter()
        .map(|cat| {
            let (unlocked, total) = achievements.count_by_category(*cat);
            let style = if *cat == ui_state.selected_category {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Span::styled(format!(" {} ({}/{}) ", cat.name(), unlocked, total), style)
        })
        .collect();

    let tabs = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(tabs, area);
}

fn render_achievement_list(
    frame: &mut Frame,
    area: Rect,
    achievements: &Achievements,
    ui_state: &AchievementBrowserState,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let items: Vec<ListItem> = get_achievements_by_category(ui_state.selected_category)
        .iter()
        .enumerate()
        .map(|(i, def)| {
            let is_unlocked = achievements.is_unlocked(def.id);
            let is_selected = i == ui_state.selected_index;
            let icon = if is_unlocked || !def.secret { def.icon } else { "?" };

            let style = if is_unlocked {
                Style::default().fg(Color::Green)
            } else if is_selected {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            ListItem::new(Line::from(vec![
                Span::styled(if is_selected { "> " } else { "  " }, style),
                Span::styled(if is_unlocked { "[X] " } else { "[ ] " }, style),
                Span::raw(format!("{} ", icon)),
                Span::styled(def.display_name(is_unlocked), style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

fn render_achievement_detail(
    frame: &mut Frame,
    area: Rect,
    achievements: &Achievements,
    ui_state: &AchievementBrowserState,
) {
    let category_achievements = get_achievements_by_category(ui_state.selected_category);
    let Some(def) = category_achievements.get(ui_state.selected_index) else {
        return;
    };

    let is_unlocked = achievements.is_unlocked(def.id);
    let block = Block::default()
        .title(format!(" {} ", def.display_name(is_unlocked)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if is_unlocked {
            Color::Green
        } else {
            Color::DarkGray
        }));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(
            def.display_description(is_unlocked),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Tier: ", Style::default().fg(Color::DarkGray)),
            Span::styled(def.tier.name(), Style::default().fg(Color::Magenta)),
        ]),
    ];
    if is_unlocked || !def.secret {
        lines.push(Line::from(vec![
            Span::styled("Reward: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} coins, {} XP", def.reward.coins, def.reward.xp),
                Style::default().fg(Color::Yellow),
            ),
        ]));
    }
    lines.push(Line::from(""));

    match achievements.unlocked.get(&def.id) {
        Some(record) => {
            let timestamp = chrono::DateTime::from_timestamp(record.unlocked_at, 0)
                .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            lines.push(Line::from(Span::styled(
                format!("[X] Unlocked: {}", timestamp),
                Style::default().fg(Color::Green),
            )));
            if let Some(ref username) = record.username {
                lines.push(Line::from(Span::styled(
                    format!("    By: {}", username),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        None => {
            lines.push(Line::from(Span::styled(
                "[ ] Not yet unlocked",
                Style::default().fg(Color::Red),
            )));
            if let Some(progress) = achievements.get_progress(def.id) {
                let percent = if progress.target > 0 {
                    (progress.current as f64 / progress.target as f64 * 100.0) as u32
                } else {
                    0
                };
                lines.push(Line::from(Span::styled(
                    format!(
                        "    Progress: {}/{} ({}%)",
                        progress.current, progress.target, percent
                    ),
                    Style::default().fg(Color::Yellow),
                )));
            }
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}
