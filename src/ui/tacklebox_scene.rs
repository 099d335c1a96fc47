//! Tacklebox browser: sortable, filterable catch list and collection stats.

use super::{draw_key_hints, hex_color};
use gofish::fishing::data::{stage, STAGES};
use gofish::tacklebox::{SortBy, Tacklebox, TackleboxFilter};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

const MAX_RARITY: u8 = 3;

pub struct TackleboxViewState {
    pub filter: TackleboxFilter,
    pub selected: usize,
}

impl TackleboxViewState {
    pub fn new() -> Self {
        Self {
            filter: TackleboxFilter {
                sort_by: Some(SortBy::Recent),
                ..TackleboxFilter::default()
            },
            selected: 0,
        }
    }

    pub fn cycle_sort(&mut self) {
        self.filter.sort_by = Some(self.filter.sort_by.unwrap_or_default().next());
        self.selected = 0;
    }

    /// Any rarity, then at least uncommon, rare, legendary.
    pub fn cycle_rarity(&mut self) {
        self.filter.min_rarity = match self.filter.min_rarity {
            None => Some(1),
            Some(r) if r < MAX_RARITY => Some(r + 1),
            Some(_) => None,
        };
        self.selected = 0;
    }

    pub fn cycle_stage(&mut self) {
        self.filter.stage = match self.filter.stage {
            None => Some(0),
            Some(s) if s + 1 < STAGES.len() => Some(s + 1),
            Some(_) => None,
        };
        self.selected = 0;
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }
}

impl Default for TackleboxViewState {
    fn default() -> Self {
        Self::new()
    }
}

fn rarity_color(rarity: u8) -> Color {
    match rarity {
        0 => Color::White,
        1 => Color::Green,
        2 => Color::Blue,
        _ => Color::Magenta,
    }
}

pub fn draw_tacklebox(frame: &mut Frame, area: Rect, tacklebox: &Tacklebox, view: &TackleboxViewState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(2)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[0]);

    let items = tacklebox.query(&view.filter);
    let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| {
            let caught = chrono::DateTime::from_timestamp_millis(item.caught_at)
                .map(|dt| dt.format("%m-%d %H:%M").to_string())
                .unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<16}", item.name),
                    Style::default().fg(hex_color(&item.color)),
                ),
                Span::raw(format!("{:>4} cm ", item.size)),
                Span::styled(
                    format!("{:>5} pts ", item.points),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    if item.is_perfect { "* " } else { "  " },
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(caught, Style::default().fg(Color::DarkGray)),
            ]))
            .style(Style::default().fg(rarity_color(item.rarity)))
        })
        .collect();

    let rarity = view
        .filter
        .min_rarity
        .map_or_else(|| "any".to_string(), |r| format!(">={}", r));
    let stage_name = view.filter.stage.map_or("all stages", |s| stage(s).name);
    let title = format!(
        " {} fish | sort {} | rarity {} | {} ",
        items.len(),
        view.filter.sort_by.unwrap_or_default().name(),
        rarity,
        stage_name
    );
    let list = List::new(list_items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut list_state = ListState::default();
    if !items.is_empty() {
        list_state.select(Some(view.selected.min(items.len() - 1)));
    }
    frame.render_stateful_widget(list, columns[0], &mut list_state);

    draw_stats(frame, columns[1], tacklebox);
    draw_key_hints(
        frame,
        rows[1],
        &[("S", "Sort"), ("F", "Rarity"), ("G", "Stage"), ("Esc", "Back")],
    );
}

fn draw_stats(frame: &mut Frame, area: Rect, tacklebox: &Tacklebox) {
    let stats = tacklebox.stats();
    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Stored      ", label),
            Span::raw(format!("{}/{}", stats.total_items, stats.capacity)),
        ]),
        Line::from(vec![
            Span::styled("Caught ever ", label),
            Span::raw(stats.total_fish_caught.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Rare        ", label),
            Span::raw(stats.rare_fish_count.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Value       ", label),
            Span::raw(format!("{} pts", stats.total_value)),
        ]),
        Line::from(vec![
            Span::styled("Species     ", label),
            Span::raw(stats.unique_types.to_string()),
        ]),
    ];
    if let Some(largest) = &stats.largest_fish {
        lines.push(Line::from(vec![
            Span::styled("Largest     ", label),
            Span::raw(format!("{} {} cm", largest.name, largest.size)),
        ]));
    }
    if let Some(smallest) = &stats.smallest_fish {
        lines.push(Line::from(vec![
            Span::styled("Smallest    ", label),
            Span::raw(format!("{} {} cm", smallest.name, smallest.size)),
        ]));
    }
    lines.push(Line::from(""));
    for (name, count) in &stats.fish_by_type {
        lines.push(Line::from(format!("  {:<14} x{}", name, count)));
    }
    for (stage_index, count) in &stats.fish_by_stage {
        lines.push(Line::from(Span::styled(
            format!("  {:<20} x{}", stage(*stage_index).name, count),
            label,
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Stats ")),
        area,
    );
}
