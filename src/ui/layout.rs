//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout: demo tabs, the stage, and a bottom status bar.
pub struct AppLayout {
    pub tabs_area: Rect,
    pub stage_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // demo tabs
                Constraint::Min(3),    // stage (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            tabs_area: chunks[0],
            stage_area: chunks[1],
            status_area: chunks[2],
        }
    }

    /// Stage area inside its border.
    pub fn stage_inner(&self) -> Rect {
        inset(self.stage_area)
    }
}

/// Shrink a rect by one cell on every side.
pub fn inset(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}

/// Is the cell at (`col`, `row`) inside `area`?
pub fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Round a fractional cell offset and clamp it into `i32` range.
pub fn cells(value: f64) -> i32 {
    value.round().clamp(i32::MIN as f64, i32::MAX as f64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_fills_between_bars() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.tabs_area, Rect::new(0, 0, 80, 1));
        assert_eq!(layout.stage_area, Rect::new(0, 1, 80, 22));
        assert_eq!(layout.status_area, Rect::new(0, 23, 80, 1));
        assert_eq!(layout.stage_inner(), Rect::new(1, 2, 78, 20));
    }

    #[test]
    fn point_hits_are_half_open() {
        let r = Rect::new(2, 2, 3, 3);
        assert!(point_in_rect(r, 2, 2));
        assert!(point_in_rect(r, 4, 4));
        assert!(!point_in_rect(r, 5, 4));
        assert!(!point_in_rect(r, 1, 3));
    }
}
