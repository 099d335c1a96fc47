//! Catch celebration drawn over the fishing scene.

use super::{centered_rect, hex_color};
use gofish::cutscene::{CatchCutscene, CutscenePhase};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
    Frame,
};

const RARITY_NAMES: [&str; 4] = ["Common", "Uncommon", "Rare", "Legendary"];

/// Particles, positioned in percent of the overlay.
struct ParticleField<'a> {
    cutscene: &'a CatchCutscene,
}

impl Widget for ParticleField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for p in &self.cutscene.particles {
            if p.opacity() < 0.2 || !(0.0..100.0).contains(&p.x) || !(0.0..100.0).contains(&p.y) {
                continue;
            }
            let x = area.x + (p.x / 100.0 * area.width as f64) as u16;
            let y = area.y + (p.y / 100.0 * area.height as f64) as u16;
            if x < area.right() && y < area.bottom() {
                buf.get_mut(x, y)
                    .set_char(p.shape.glyph())
                    .set_fg(hex_color(p.color));
            }
        }
    }
}

pub fn draw_cutscene(frame: &mut Frame, cutscene: &CatchCutscene) {
    if cutscene.phase == CutscenePhase::Start || cutscene.is_complete() {
        return;
    }
    let area = centered_rect(46, 11, frame.size());
    frame.render_widget(Clear, area);

    let border = if cutscene.is_perfect {
        Color::Yellow
    } else {
        Color::Cyan
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(ParticleField { cutscene }, inner);

    let fish = &cutscene.fish;
    let fish_style = Style::default()
        .fg(hex_color(&fish.color))
        .add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("><(((('>", fish_style)),
        Line::from(""),
    ];
    if cutscene.show_text() {
        let headline = if cutscene.is_perfect {
            "PERFECT CATCH!"
        } else {
            "FISH CAUGHT!"
        };
        lines.push(Line::from(Span::styled(
            headline,
            Style::default()
                .fg(border)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(vec![
            Span::styled(fish.name.clone(), fish_style),
            Span::raw(format!("  {} cm  ", fish.size)),
            Span::styled(
                RARITY_NAMES[(fish.rarity as usize).min(RARITY_NAMES.len() - 1)],
                Style::default().fg(Color::Magenta),
            ),
        ]));
    }
    if cutscene.show_points() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("+{} points", cutscene.points),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    }
    let mut text = Paragraph::new(lines).alignment(Alignment::Center);
    if cutscene.phase == CutscenePhase::FadeOut {
        text = text.style(Style::default().add_modifier(Modifier::DIM));
    }
    frame.render_widget(text, inner);
}
