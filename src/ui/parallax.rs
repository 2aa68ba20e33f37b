//! Parallax header with a lower list that slides up and takes over the
//! scroll once the hero has been scrolled past.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::app::demo::ParallaxDemo;

use super::layout::cells;
use super::theme::Theme;

const HERO_PATTERN: &[&str] = &["░▒▓▒", "▒▓▒░", "▓▒░▒", "▒░▒▓"];

pub struct ParallaxWidget<'a> {
    pub demo: &'a ParallaxDemo,
}

impl<'a> Widget for ParallaxWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 {
            return;
        }
        let scroll = &self.demo.scroll;
        let header = Rect { height: 1, ..area };
        let page = Rect {
            y: area.y + 1,
            height: area.height - 1,
            ..area
        };
        let page_bottom = i32::from(page.y + page.height);

        // ── hero, drifting up by the parallax offset ─────────────
        let hero_point = scroll.boundary().point().unwrap_or(self.demo.header_height);
        let hero_height = cells(hero_point).max(1);
        let hero_top = i32::from(page.y) + cells(scroll.parallax_offset());
        for r in 0..hero_height {
            let y = hero_top + r;
            if y < i32::from(page.y) || y >= page_bottom {
                continue;
            }
            let tile = HERO_PATTERN[r as usize % HERO_PATTERN.len()];
            let fill: String = tile.chars().cycle().take(page.width as usize).collect();
            buf.set_string(page.x, y as u16, fill, Theme::hero_style());
            if r == hero_height / 2 {
                let title = " S E A S O N   O N E ";
                let x = page.x + page.width.saturating_sub(title.len() as u16) / 2;
                let style = Style::default().add_modifier(Modifier::BOLD);
                buf.set_stringn(x, y as u16, title, page.width as usize, style);
            }
        }

        // ── lower region, sliding up over the hero ──────────────
        let lower_top = i32::from(page.y) + cells(scroll.slide_offset());
        let first = scroll.inner_rendered().floor().max(0.0) as usize;
        let width = page.width as usize;
        let mut y = lower_top.max(i32::from(page.y));
        if y == lower_top {
            let divider = format!("{:─^width$}", " Episodes ");
            buf.set_stringn(page.x, y as u16, divider, width, Theme::border_style());
            y += 1;
        }
        for item in self.demo.items.iter().skip(first) {
            if y >= page_bottom {
                break;
            }
            buf.set_stringn(
                page.x,
                y as u16,
                format!(" ▸ {item:<width$}"),
                width,
                Style::default(),
            );
            y += 1;
        }

        // ── sticky header ───────────────────────────────────────
        let title = if scroll.boundary().header_title_visible() {
            "Episodes"
        } else {
            ""
        };
        let bar = format!(" ◂ Back   {title:<width$}", width = width);
        buf.set_stringn(header.x, header.y, bar, header.width as usize, Theme::status_bar_style());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::demo::{Demo, DemoKind};
    use crate::app::event::channel;
    use crate::config::EffectConfig;
    use std::time::Duration;

    fn text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn header_title_appears_once_scrolled_past_hero() {
        let (tx, _rx) = channel();
        let mut demo = Demo::mount(
            DemoKind::Parallax,
            &EffectConfig::default(),
            60,
            &tx,
            Duration::ZERO,
        );
        let area = Rect::new(0, 0, 40, 20);
        demo.measure(area);
        demo.measure(area);
        let Demo::Parallax(d) = &mut demo else {
            panic!("wrong demo mounted");
        };

        let mut buf = Buffer::empty(area);
        ParallaxWidget { demo: d }.render(area, &mut buf);
        assert!(!text(&buf, 0).contains("Episodes"));
        // The lower region starts below the hero.
        assert!(text(&buf, 9).contains("Episodes"));

        for _ in 0..8 {
            d.scroll.wheel(1.0);
        }
        for _ in 0..120 {
            d.scroll.tick(1.0 / 60.0);
        }
        let mut buf = Buffer::empty(area);
        ParallaxWidget { demo: d }.render(area, &mut buf);
        assert!(text(&buf, 0).contains("Episodes"));
        assert!(text(&buf, 1).contains("Episodes"));
    }
}
