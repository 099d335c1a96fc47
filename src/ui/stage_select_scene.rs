//! Stage picker shown before fishing.

use super::{draw_key_hints, hex_color};
use gofish::fishing::data::STAGES;
use gofish::fishing::types::Stage;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub struct StageSelectState {
    pub selected: usize,
}

impl StageSelectState {
    pub fn new(current: usize) -> Self {
        Self {
            selected: current.min(STAGES.len() - 1),
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < STAGES.len() {
            self.selected += 1;
        }
    }
}

fn features(stage: &Stage) -> Vec<&'static str> {
    let mut out = Vec::new();
    if stage.features.lily {
        out.push("lily pads");
    }
    if stage.features.boat {
        out.push("river boats");
    }
    if stage.features.rain {
        out.push("rain");
    }
    if stage.features.lightning {
        out.push("lightning");
    }
    out
}

pub fn draw_stage_select(frame: &mut Frame, area: Rect, ui: &StageSelectState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(2)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[0]);

    let items: Vec<ListItem> = STAGES
        .iter()
        .enumerate()
        .map(|(i, stage)| {
            let selected = i == ui.selected;
            let style = Style::default().fg(hex_color(stage.sky_colors[0]));
            let style = if selected {
                style.add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                style
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!(" {}. ", i + 1)),
                Span::styled(stage.name, style),
            ]))
        })
        .collect();
    frame.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title(" Choose a spot ")),
        columns[0],
    );

    let stage = &STAGES[ui.selected.min(STAGES.len() - 1)];
    let features = features(stage);
    let mut lines = vec![
        Line::from(Span::styled(
            stage.name,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Time: {}", stage.time_of_day.name())),
        Line::from(format!(
            "Features: {}",
            if features.is_empty() {
                "calm water".to_string()
            } else {
                features.join(", ")
            }
        )),
        Line::from(""),
    ];
    for color in stage.sky_colors {
        lines.push(Line::from(Span::styled(
            "                    ",
            Style::default().bg(hex_color(color)),
        )));
    }
    for color in stage.water_colors {
        lines.push(Line::from(Span::styled(
            "~~~~~~~~~~~~~~~~~~~~",
            Style::default().fg(Color::White).bg(hex_color(color)),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
        columns[1],
    );

    draw_key_hints(frame, rows[1], &[("Up/Down", "Select"), ("Enter", "Fish here"), ("Esc", "Back")]);
}
