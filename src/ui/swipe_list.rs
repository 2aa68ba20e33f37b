//! Swipe-to-delete list: each row slides left over a red action strip.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
};

use crate::core::swipe_row::SwipeList;

use super::layout::cells;
use super::theme::Theme;

/// Terminal rows per list item (title + detail).
pub const ROW_HEIGHT: u16 = 2;

/// Index of the item drawn at terminal `row`, if any.
pub fn row_at(area: Rect, row: u16, len: usize) -> Option<usize> {
    if row < area.y || row >= area.y + area.height {
        return None;
    }
    let index = (row - area.y) / ROW_HEIGHT;
    // Rows that do not fit whole are never drawn.
    let fits = area.y + (index + 1) * ROW_HEIGHT <= area.y + area.height;
    (fits && usize::from(index) < len).then_some(usize::from(index))
}

/// Distance of `col` from the right edge of `area`, in cells.
pub fn from_right(area: Rect, col: u16) -> f64 {
    f64::from(area.x + area.width) - f64::from(col) - 1.0
}

pub struct SwipeListWidget<'a> {
    pub list: &'a SwipeList,
    pub selected: usize,
}

impl<'a> Widget for SwipeListWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.list.is_empty() {
            let hint = "Inbox zero. Press r to restore.";
            buf.set_string(area.x + 1, area.y, hint, Theme::dim_style());
            return;
        }

        for (i, (item, row)) in self.list.iter().enumerate() {
            let y = area.y + i as u16 * ROW_HEIGHT;
            if y + ROW_HEIGHT > area.y + area.height {
                break;
            }
            let shift = (-cells(row.offset())).clamp(0, i32::from(area.width)) as u16;
            let body_width = area.width - shift;
            let base = if i == self.selected {
                Theme::selected_style()
            } else {
                Style::default()
            };

            // Row body, shifted left by the drag offset and clipped.
            for (line, text) in [(0, item.title.as_str()), (1, item.detail.as_str())] {
                let padded: String = format!(" {text}").chars().skip(shift as usize).collect();
                let style = if line == 1 { base.patch(Theme::dim_style()) } else { base };
                let w = body_width as usize;
                buf.set_stringn(area.x, y + line, format!("{padded:<w$}"), w, style);
            }

            // Exposed action strip on the right.
            if shift > 0 {
                let x = area.x + body_width;
                let label = if shift >= 8 { "Delete" } else { "" };
                for line in 0..ROW_HEIGHT {
                    let text = if line == 0 { label } else { "" };
                    let w = shift as usize;
                    buf.set_stringn(
                        x,
                        y + line,
                        format!("{text:^w$}"),
                        w,
                        Theme::delete_action_style(),
                    );
                }
            }
        }
    }
}
