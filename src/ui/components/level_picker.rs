use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Widget};

use crate::engine::curriculum;
use crate::ui::theme::Theme;

pub fn next_index(selected: usize) -> usize {
    (selected + 1) % curriculum::level_count()
}

pub fn prev_index(selected: usize) -> usize {
    if selected > 0 {
        selected - 1
    } else {
        curriculum::level_count() - 1
    }
}

/// Popup list of every level with a preview of its items. Any level can be
/// jumped to directly.
pub struct LevelPicker<'a> {
    selected: usize,
    current_level: usize,
    theme: &'a Theme,
}

impl<'a> LevelPicker<'a> {
    pub fn new(selected: usize, current_level: usize, theme: &'a Theme) -> Self {
        Self {
            selected,
            current_level,
            theme,
        }
    }
}

impl Widget for LevelPicker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Levels ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        // Keep the selected row visible on terminals too short for the
        // whole list.
        let visible = inner.height as usize;
        let offset = (self.selected + 1).saturating_sub(visible);

        for (line, index) in (offset..curriculum::level_count()).enumerate() {
            if line >= visible {
                break;
            }
            let level = index + 1;
            let preview = if curriculum::is_terminal(level) {
                "finish".to_string()
            } else {
                curriculum::items_for_level(level).unwrap_or(&[]).join(" ")
            };

            let is_selected = index == self.selected;
            let indicator = if is_selected { ">" } else { " " };
            let marker = if level == self.current_level { "*" } else { " " };
            let text = format!(" {indicator} {level:>2}{marker} {preview}");

            let style = if is_selected {
                Style::default()
                    .fg(colors.accent())
                    .bg(colors.accent_dim())
                    .add_modifier(Modifier::BOLD)
            } else if level == self.current_level {
                Style::default().fg(colors.fg())
            } else {
                Style::default().fg(colors.dim())
            };

            buf.set_stringn(
                inner.x,
                inner.y + line as u16,
                &text,
                inner.width as usize,
                style,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_wraps_both_directions() {
        let last = curriculum::level_count() - 1;
        assert_eq!(next_index(last), 0);
        assert_eq!(prev_index(0), last);
        assert_eq!(next_index(3), 4);
        assert_eq!(prev_index(4), 3);
    }
}
