use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Widget};

use crate::engine::proficiency::{MASTERY_THRESHOLD, ProficiencyTracker};
use crate::morse::alphabet;
use crate::ui::theme::Theme;

const COLUMNS: u16 = 7;

/// One cell per supported symbol, each with a mini mastery bar. Negative
/// scores show as an empty bar with the label tinted.
pub struct ProficiencyGrid<'a> {
    tracker: &'a ProficiencyTracker,
    theme: &'a Theme,
}

impl<'a> ProficiencyGrid<'a> {
    pub fn new(tracker: &'a ProficiencyTracker, theme: &'a Theme) -> Self {
        Self { tracker, theme }
    }
}

impl Widget for ProficiencyGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let total = self.tracker.iter().count();
        let mastered_count = self
            .tracker
            .iter()
            .filter(|(_, score)| *score >= MASTERY_THRESHOLD)
            .count();
        let block = Block::bordered()
            .title(format!(" Proficiency {mastered_count}/{total} "))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let cell_w = inner.width / COLUMNS;
        if cell_w < 5 {
            return;
        }
        let bar_w = cell_w.saturating_sub(3).min(8);

        for (i, symbol) in alphabet::symbols().enumerate() {
            let row = i as u16 / COLUMNS;
            let col = i as u16 % COLUMNS;
            if inner.y + row >= inner.bottom() {
                break;
            }
            let x = inner.x + col * cell_w;
            let y = inner.y + row;

            let score = self.tracker.score(symbol);
            let mastered = self.tracker.is_mastered(symbol);

            let label_style = if mastered {
                Style::default()
                    .fg(colors.mastered())
                    .add_modifier(Modifier::BOLD)
            } else if score < 0.0 {
                Style::default().fg(colors.incorrect())
            } else {
                Style::default().fg(colors.fg())
            };
            buf.set_string(x, y, symbol.to_string(), label_style);

            let ratio = (score / MASTERY_THRESHOLD).clamp(0.0, 1.0);
            let filled = (ratio * bar_w as f64).round() as u16;
            for dx in 0..bar_w {
                let style = if dx < filled {
                    Style::default().bg(if mastered {
                        colors.mastered()
                    } else {
                        colors.bar_filled()
                    })
                } else {
                    Style::default().bg(colors.bar_empty())
                };
                buf[(x + 2 + dx, y)].set_style(style);
            }
        }
    }
}
