use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct DrillLayout {
    pub header: Rect,
    pub main: Rect,
    pub grid: Option<Rect>,
    pub footer: Rect,
}

impl DrillLayout {
    /// The proficiency grid gives way first on short terminals; the item
    /// display and footer always fit.
    pub fn new(area: Rect) -> Self {
        if area.height >= 20 {
            let vertical = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(8),
                    Constraint::Length(6),
                    Constraint::Length(3),
                ])
                .split(area);

            Self {
                header: vertical[0],
                main: vertical[1],
                grid: Some(vertical[2]),
                footer: vertical[3],
            }
        } else {
            let vertical = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(8),
                    Constraint::Length(3),
                ])
                .split(area);

            Self {
                header: vertical[0],
                main: vertical[1],
                grid: None,
                footer: vertical[2],
            }
        }
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 44;
    const MIN_POPUP_HEIGHT: u16 = 18;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_hidden_on_short_terminals() {
        let tall = DrillLayout::new(Rect::new(0, 0, 80, 24));
        assert!(tall.grid.is_some());

        let short = DrillLayout::new(Rect::new(0, 0, 80, 16));
        assert!(short.grid.is_none());
    }

    #[test]
    fn test_centered_rect_stays_within_area() {
        let area = Rect::new(0, 0, 30, 10);
        let popup = centered_rect(60, 60, area);
        assert!(popup.width <= area.width);
        assert!(popup.height <= area.height);
        assert!(popup.right() <= area.right());
        assert!(popup.bottom() <= area.bottom());
    }
}
