//! Full-page sections that slide in one wheel notch at a time.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::core::section_pager::{Direction, SectionPager};

use super::layout::cells;
use super::theme::Theme;

const PALETTE: &[Color] = &[
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Red,
    Color::LightBlue,
    Color::LightMagenta,
    Color::LightGreen,
];

pub struct PagerWidget<'a> {
    pub pager: &'a SectionPager,
}

impl<'a> Widget for PagerWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 10 {
            return;
        }
        let pager = self.pager;
        let page = Rect {
            y: area.y + 1,
            height: area.height - 1,
            ..area
        };

        // Incoming section enters from below going forward, from above
        // going back.
        let remaining = f64::from(page.height) * (1.0 - pager.progress());
        let shift = match pager.direction() {
            Direction::Forward => cells(remaining),
            Direction::Backward => -cells(remaining),
        };
        let color = PALETTE[pager.index() % PALETTE.len()];
        let fill = Style::default().bg(color);
        for row in 0..page.height {
            let y = i32::from(page.y + row) + shift;
            if y < i32::from(page.y) || y >= i32::from(page.y + page.height) {
                continue;
            }
            let blank = " ".repeat(page.width as usize);
            buf.set_string(page.x, y as u16, blank, fill);
            if row == page.height / 2 {
                let label = format!("Section {}", pager.index() + 1);
                let x = page.x + page.width.saturating_sub(label.len() as u16) / 2;
                buf.set_string(
                    x,
                    y as u16,
                    label,
                    fill.fg(Color::Black).add_modifier(Modifier::BOLD),
                );
            }
        }

        // Position dots along the right edge.
        let dots_top = page.y + page.height.saturating_sub(pager.count() as u16) / 2;
        for i in 0..pager.count().min(page.height as usize) {
            let dot = if i == pager.index() { "●" } else { "○" };
            buf.set_string(
                page.x + page.width - 2,
                dots_top + i as u16,
                dot,
                Style::default().fg(Color::White),
            );
        }

        let header = if pager.header_visible() { " ◆ Highlights" } else { "" };
        let bar = format!("{header:<w$}", w = area.width as usize);
        buf.set_stringn(area.x, area.y, bar, area.width as usize, Theme::status_bar_style());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn settled_section_fills_the_page() {
        let mut pager = SectionPager::new(3, Duration::ZERO);
        pager.wheel(1.0, Duration::ZERO);
        let area = Rect::new(0, 0, 30, 9);
        let mut buf = Buffer::empty(area);
        PagerWidget { pager: &pager }.render(area, &mut buf);

        assert!(row(&buf, 0).contains("Highlights"));
        assert!(row(&buf, 5).contains("Section 2"));
        assert_eq!(buf[(0, 1)].style().bg, Some(Color::Magenta));
    }

    #[test]
    fn entering_section_starts_below() {
        let mut pager = SectionPager::new(3, Duration::from_millis(800));
        pager.wheel(1.0, Duration::ZERO);
        let area = Rect::new(0, 0, 30, 9);
        let mut buf = Buffer::empty(area);
        PagerWidget { pager: &pager }.render(area, &mut buf);
        assert_ne!(buf[(0, 1)].style().bg, Some(Color::Magenta));
    }
}
