use std::time::Instant;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Widget};

use crate::session::machine::{DrillMachine, DrillPhase, GuessOutcome};
use crate::ui::theme::{Theme, ThemeColors};

/// The big center panel: the current placeholder or feedback line, with the
/// level's unlock message underneath. A wrong letter flashes the whole
/// panel.
pub struct ItemDisplay<'a> {
    machine: &'a DrillMachine,
    now: Instant,
    theme: &'a Theme,
}

impl<'a> ItemDisplay<'a> {
    pub fn new(machine: &'a DrillMachine, now: Instant, theme: &'a Theme) -> Self {
        Self {
            machine,
            now,
            theme,
        }
    }

    fn headline(&self, colors: &ThemeColors) -> (String, Style) {
        match self.machine.phase() {
            DrillPhase::Idle => (
                "Press any key to begin".to_string(),
                Style::default().fg(colors.dim()),
            ),
            DrillPhase::AwaitingInput => (
                self.machine.display_text(),
                Style::default()
                    .fg(colors.fg())
                    .add_modifier(Modifier::BOLD),
            ),
            DrillPhase::Answered => {
                let color = match self.machine.last_outcome() {
                    Some(GuessOutcome::Incorrect) => colors.incorrect(),
                    _ => colors.correct(),
                };
                (
                    self.machine.display_text(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )
            }
            DrillPhase::LevelComplete | DrillPhase::AllLevelsComplete => (
                self.machine.display_text(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
        }
    }

    fn subtitle(&self) -> Option<String> {
        match self.machine.phase() {
            DrillPhase::AwaitingInput | DrillPhase::Answered => {
                let message = self.machine.level_message();
                (!message.is_empty()).then(|| message.to_string())
            }
            DrillPhase::LevelComplete => Some("Press Enter for the next level".to_string()),
            DrillPhase::AllLevelsComplete => Some("Every level cleared".to_string()),
            DrillPhase::Idle => None,
        }
    }
}

impl Widget for ItemDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let flash = self.machine.incorrect_flash_active(self.now);

        let block = Block::bordered()
            .border_style(Style::default().fg(if flash {
                colors.incorrect()
            } else {
                colors.border()
            }))
            .style(Style::default().bg(if flash {
                colors.incorrect_bg()
            } else {
                colors.bg()
            }));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let (text, style) = self.headline(colors);
        let center_y = inner.y + inner.height / 2;
        let text_width = (text.chars().count() as u16).min(inner.width);
        let text_x = inner.x + (inner.width - text_width) / 2;
        buf.set_stringn(
            text_x,
            center_y.saturating_sub(1),
            &text,
            inner.width as usize,
            style,
        );

        if let Some(message) = self.subtitle() {
            if center_y + 1 < inner.bottom() {
                let msg_width = (message.chars().count() as u16).min(inner.width);
                let msg_x = inner.x + (inner.width - msg_width) / 2;
                buf.set_stringn(
                    msg_x,
                    center_y + 1,
                    &message,
                    inner.width as usize,
                    Style::default().fg(colors.dim()),
                );
            }
        }
    }
}
