//! Odometer-style countdown: six digit strips seen through fixed windows.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::countdown::Countdown;
use crate::core::digit_roller::DigitRoller;

use super::layout::cells;
use super::theme::Theme;

/// Columns per digit slot.
const SLOT_WIDTH: u16 = 3;
/// Columns for a `:` separator.
const SEP_WIDTH: u16 = 2;

pub struct CountdownWidget<'a> {
    pub countdown: &'a Countdown,
}

impl<'a> CountdownWidget<'a> {
    fn total_width() -> u16 {
        SLOT_WIDTH * 6 + SEP_WIDTH * 2
    }
}

impl<'a> Widget for CountdownWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let slots = self.countdown.slots();
        let Some(first) = slots.first() else {
            return;
        };
        let glyph = (cells(first.glyph_height()).max(1)) as u16;
        if area.height < glyph + 2 || area.width < Self::total_width() {
            return;
        }

        let x0 = area.x + (area.width - Self::total_width()) / 2;
        let y0 = area.y + (area.height - glyph - 2) / 2;
        let window = Rect::new(x0, y0, SLOT_WIDTH, glyph);

        let mut x = x0;
        for (i, slot) in slots.iter().enumerate() {
            if i == 2 || i == 4 {
                let mid = y0 + glyph / 2;
                buf.set_string(x, mid, ":", Theme::digit_style());
                x += SEP_WIDTH;
            }
            render_window(slot, Rect { x, ..window }, glyph, buf);
            x += SLOT_WIDTH;
        }

        let caption = if self.countdown.is_finished() {
            "Time's up!".to_string()
        } else {
            format!("until {}", self.countdown.target().format("%H:%M:%S"))
        };
        let width = (caption.chars().count() as u16).min(area.width);
        let line = Line::from(Span::styled(caption, Theme::dim_style()));
        buf.set_line(
            area.x + (area.width - width) / 2,
            y0 + glyph + 1,
            &line,
            width,
        );
    }
}

/// Draw the part of `slot`'s strip that its translate brings into `window`.
/// Each glyph occupies `glyph` rows with the digit on the middle one.
fn render_window(slot: &DigitRoller, window: Rect, glyph: u16, buf: &mut Buffer) {
    let strip = slot.strip();
    let offset = cells(slot.offset());
    let glyph = i32::from(glyph);
    for row in 0..window.height {
        let strip_row = i32::from(row) - offset;
        if strip_row < 0 {
            continue;
        }
        let index = (strip_row / glyph) as usize;
        if strip_row % glyph != glyph / 2 {
            continue;
        }
        if let Some(&digit) = strip.get(index) {
            let text = format!("{:^width$}", digit, width = window.width as usize);
            buf.set_string(window.x, window.y + row, text, Theme::digit_style());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use std::time::Duration;

    fn row_text(buf: &Buffer, y: u16) -> String {
        let area = buf.area;
        (area.x..area.x + area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn resting_digits_sit_in_the_middle_row() {
        let countdown =
            Countdown::starting_in(
                3 * 3600 + 25 * 60 + 7,
                Local::now(),
                3.0,
                Duration::from_millis(300),
            );
        let area = Rect::new(0, 0, 30, 7);
        let mut buf = Buffer::empty(area);
        CountdownWidget {
            countdown: &countdown,
        }
        .render(area, &mut buf);

        // Windows start at row 1; the middle glyph row is row 2.
        let digits: String = row_text(&buf, 2).chars().filter(|c| c.is_ascii_digit()).collect();
        assert_eq!(digits, "032507");
        assert!(row_text(&buf, 1).trim().is_empty());
    }
}
