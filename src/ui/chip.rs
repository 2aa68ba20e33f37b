//! Chip button that grows, shows its label, and shrinks back.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::core::chip::ChipSequence;

use super::layout::{cells, point_in_rect};
use super::theme::Theme;

const LABEL: &str = " ✦ New features inside ";

/// Rect the chip occupies inside `area` at its current width.
pub fn chip_rect(area: Rect, chip: &ChipSequence) -> Rect {
    let width = (cells(chip.width()).max(1) as u16).min(area.width);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + area.height / 2,
        width,
        1.min(area.height),
    )
}

pub fn hits_chip(area: Rect, chip: &ChipSequence, col: u16, row: u16) -> bool {
    point_in_rect(chip_rect(area, chip), col, row)
}

pub struct ChipWidget<'a> {
    pub chip: &'a ChipSequence,
}

impl<'a> Widget for ChipWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width < 4 {
            return;
        }
        let rect = chip_rect(area, self.chip);
        let width = rect.width as usize;

        let label_style = Theme::fade(self.chip.label_opacity())
            .map(|fade| Theme::chip_style().patch(fade));
        let text: String = match label_style {
            Some(_) => LABEL.chars().take(width).collect(),
            None => String::new(),
        };
        buf.set_stringn(
            rect.x,
            rect.y,
            format!("{text:<width$}"),
            width,
            label_style.unwrap_or_else(Theme::chip_style),
        );

        // Highlight sweep: a short bright band moving left to right.
        if self.chip.sweep_opacity() > 0.2 {
            let center = cells(self.chip.sweep_position() * rect.width as f64);
            for dx in -1..=1 {
                let x = i32::from(rect.x) + center + dx;
                if x >= i32::from(rect.x) && x < i32::from(rect.x + rect.width) {
                    buf[(x as u16, rect.y)].set_style(Theme::sweep_style());
                }
            }
        }

        let hint = "click the chip or press Enter to replay";
        let hint_width = (hint.len() as u16).min(area.width);
        if rect.y + 2 < area.y + area.height {
            buf.set_stringn(
                area.x + (area.width - hint_width) / 2,
                rect.y + 2,
                hint,
                hint_width as usize,
                Theme::dim_style(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn chip_grows_around_its_center() {
        let mut chip = ChipSequence::new(4.0, 24.0);
        let area = Rect::new(0, 0, 40, 9);
        assert_eq!(chip_rect(area, &chip), Rect::new(18, 4, 4, 1));

        chip.start(Duration::ZERO);
        chip.tick(Duration::from_millis(600));
        assert_eq!(chip_rect(area, &chip), Rect::new(8, 4, 24, 1));
        assert!(hits_chip(area, &chip, 8, 4));
        assert!(!hits_chip(area, &chip, 7, 4));
    }

    #[test]
    fn label_shows_once_expanded() {
        let mut chip = ChipSequence::new(4.0, 24.0);
        chip.start(Duration::ZERO);
        chip.tick(Duration::from_millis(600));
        let area = Rect::new(0, 0, 40, 9);
        let mut buf = Buffer::empty(area);
        ChipWidget { chip: &chip }.render(area, &mut buf);
        let row: String = (0..40).map(|x| buf[(x, 4)].symbol().to_string()).collect();
        assert!(row.contains("New features inside"));
    }
}
