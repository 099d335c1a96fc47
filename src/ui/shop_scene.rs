//! Tackle shop: rods, lures and rod repair.

use super::{draw_key_hints, hex_color};
use gofish::core::game_state::{GameState, ShopError};
use gofish::fishing::data::{LURES, RODS};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopTab {
    Rods,
    Lures,
}

/// What the player asked the shop to do; `main` applies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopAction {
    SelectRod(usize),
    SelectLure(usize),
    BuyLure(usize),
    Repair,
}

pub struct ShopState {
    pub tab: ShopTab,
    pub selected: usize,
    pub status: Option<String>,
}

impl ShopState {
    pub fn new() -> Self {
        Self {
            tab: ShopTab::Rods,
            selected: 0,
            status: None,
        }
    }

    fn len(&self) -> usize {
        match self.tab {
            ShopTab::Rods => RODS.len(),
            ShopTab::Lures => LURES.len(),
        }
    }

    pub fn switch_tab(&mut self) {
        self.tab = match self.tab {
            ShopTab::Rods => ShopTab::Lures,
            ShopTab::Lures => ShopTab::Rods,
        };
        self.selected = 0;
        self.status = None;
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.len() {
            self.selected += 1;
        }
    }

    /// Enter on the highlighted row: select what is owned, buy what is not.
    pub fn activate(&self, state: &GameState) -> ShopAction {
        match self.tab {
            ShopTab::Rods => ShopAction::SelectRod(self.selected),
            ShopTab::Lures if state.unlocked_lures.contains(&self.selected) => {
                ShopAction::SelectLure(self.selected)
            }
            ShopTab::Lures => ShopAction::BuyLure(self.selected),
        }
    }
}

impl Default for ShopState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn describe_shop_error(err: &ShopError) -> String {
    match err {
        ShopError::LevelTooLow { required } => format!("Reach level {} first.", required),
        ShopError::NotEnoughPoints { price } => format!("You need {} points.", price),
        other => other.to_string(),
    }
}

pub fn draw_shop(frame: &mut Frame, area: Rect, state: &GameState, shop: &ShopState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .split(area);

    let tab_style = |tab: ShopTab| {
        if shop.tab == tab {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };
    let tabs = Paragraph::new(Line::from(vec![
        Span::styled(" Rods ", tab_style(ShopTab::Rods)),
        Span::raw(" | "),
        Span::styled(" Lures ", tab_style(ShopTab::Lures)),
        Span::styled(
            format!("    Points: {}", state.score),
            Style::default().fg(Color::Cyan),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Tackle Shop "));
    frame.render_widget(tabs, chunks[0]);

    let items: Vec<ListItem> = match shop.tab {
        ShopTab::Rods => RODS
            .iter()
            .enumerate()
            .map(|(i, rod)| {
                let equipped = i == state.selected_rod;
                row(
                    i == shop.selected,
                    rod.name,
                    rod.color,
                    format!(
                        "cast {:.0}  reel {:.1}x",
                        rod.cast_distance, rod.reel_speed
                    ),
                    if equipped { "EQUIPPED" } else { "" }.to_string(),
                )
            })
            .collect(),
        ShopTab::Lures => LURES
            .iter()
            .enumerate()
            .map(|(i, lure)| {
                let tag = if i == state.selected_lure {
                    "EQUIPPED".to_string()
                } else if state.unlocked_lures.contains(&i) {
                    "OWNED".to_string()
                } else {
                    match state.can_buy_lure(i) {
                        Ok(price) => format!("{} pts", price),
                        Err(ShopError::LevelTooLow { required }) => format!("Lv {}", required),
                        Err(_) => format!("{} pts", lure.price),
                    }
                };
                row(
                    i == shop.selected,
                    lure.name,
                    lure.color,
                    format!("attract {:.1}x  wobble {:.1}", lure.attraction, lure.wobble),
                    tag,
                )
            })
            .collect(),
    };
    frame.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL)),
        chunks[1],
    );

    let durability_color = match state.rod_durability {
        0 => Color::Red,
        1..=30 => Color::Yellow,
        _ => Color::Green,
    };
    let mut status = vec![
        Span::raw("Rod durability: "),
        Span::styled(
            format!("{}%", state.rod_durability),
            Style::default().fg(durability_color),
        ),
    ];
    if let Some(message) = &shop.status {
        status.push(Span::styled(
            format!("   {}", message),
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(status)).block(Block::default().borders(Borders::ALL)),
        chunks[2],
    );

    draw_key_hints(
        frame,
        chunks[3],
        &[("Tab", "Rods/Lures"), ("Enter", "Buy/Equip"), ("R", "Repair"), ("Esc", "Back")],
    );
}

fn row(selected: bool, name: &str, color: &str, stats: String, tag: String) -> ListItem<'static> {
    let marker = if selected { "> " } else { "  " };
    ListItem::new(Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("{:<12}", name),
            Style::default()
                .fg(hex_color(color))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{:<28}", stats), Style::default().fg(Color::Gray)),
        Span::styled(tag, Style::default().fg(Color::Cyan)),
    ]))
}
