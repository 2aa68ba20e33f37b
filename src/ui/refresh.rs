//! Feed with pull-to-refresh and a search bar that lifts into the header.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

use crate::app::demo::RefreshDemo;

use super::layout::cells;
use super::spinner::RefreshIndicator;
use super::theme::Theme;

/// Where each part of the refresh stage lands this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshGeometry {
    pub header: Rect,
    pub search: Rect,
    pub cancel: Rect,
    pub indicator: Rect,
    pub feed: Rect,
}

impl RefreshGeometry {
    pub fn new(area: Rect, demo: &RefreshDemo) -> Self {
        let header = Rect { height: 1.min(area.height), ..area };
        let search_y = (i32::from(area.y) + 1 + cells(demo.search.lift()))
            .clamp(i32::from(area.y), i32::from(area.y + area.height.saturating_sub(1)));
        let shrink = (cells(demo.search.shrink()).max(0) as u16).min(area.width);
        let search = Rect::new(area.x, search_y as u16, area.width - shrink, 1.min(area.height));
        let cancel = Rect::new(
            area.x + area.width - shrink,
            search_y as u16,
            shrink,
            search.height,
        );

        let below_search = area.y + 2;
        let indicator_rows = (cells(demo.pull.indicator_height()).max(0) as u16)
            .min(area.height.saturating_sub(2));
        let indicator = Rect::new(area.x, below_search, area.width, indicator_rows);
        let feed_y = below_search + indicator_rows;
        let feed = Rect::new(
            area.x,
            feed_y,
            area.width,
            (area.y + area.height).saturating_sub(feed_y),
        );
        Self {
            header,
            search,
            cancel,
            indicator,
            feed,
        }
    }
}

pub struct RefreshWidget<'a> {
    pub demo: &'a RefreshDemo,
    pub rotation: f64,
}

impl<'a> Widget for RefreshWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 4 || area.width < 20 {
            return;
        }
        let demo = self.demo;
        let geo = RefreshGeometry::new(area, demo);

        // ── feed ────────────────────────────────────────────────
        for (i, story) in demo.feed.iter().skip(demo.scroll).enumerate() {
            if i as u16 >= geo.feed.height {
                break;
            }
            let line = format!(" • {story}");
            buf.set_stringn(
                geo.feed.x,
                geo.feed.y + i as u16,
                line,
                geo.feed.width as usize,
                Style::default(),
            );
        }

        RefreshIndicator {
            rotation: self.rotation,
            opacity: if demo.pull.is_refreshing() { 1.0 } else { demo.pull.opacity() },
            scale: demo.pull.scale(),
            message: demo.pull.message(),
        }
        .render(geo.indicator, buf);

        // ── header (hidden while searching) ─────────────────────
        if demo.search.header_visible() {
            let title = format!("{:<w$}", " Today's News", w = geo.header.width as usize);
            buf.set_stringn(
                geo.header.x,
                geo.header.y,
                title,
                geo.header.width as usize,
                Theme::title_style(),
            );
        }

        // ── search bar ──────────────────────────────────────────
        let placeholder = demo.search.query().is_empty() && !demo.search.is_searching();
        let (text, style) = if placeholder {
            (" ⌕ Search".to_string(), Theme::dim_style())
        } else {
            (format!(" ⌕ {}▏", demo.search.query()), Theme::input_style())
        };
        let text = format!("{text:<w$}", w = geo.search.width as usize);
        buf.set_stringn(
            geo.search.x,
            geo.search.y,
            text,
            geo.search.width as usize,
            style.add_modifier(Modifier::UNDERLINED),
        );
        if let Some(style) = Theme::fade(demo.search.cancel_opacity()) {
            buf.set_stringn(
                geo.cancel.x,
                geo.cancel.y,
                "  Cancel",
                geo.cancel.width as usize,
                style,
            );
        }

        // ── results popup over the feed ─────────────────────────
        if demo.search.popup_opacity() > 0.05 && geo.feed.height > 2 {
            let popup = Rect {
                y: geo.search.y + 1,
                height: (area.y + area.height).saturating_sub(geo.search.y + 1),
                ..area
            };
            Clear.render(popup, buf);
            let border = Theme::fade(demo.search.popup_opacity()).unwrap_or_default();
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border);
            let inner = block.inner(popup);
            block.render(popup, buf);

            if let Some(style) = Theme::fade(demo.search.popup_content_opacity()) {
                let results = demo.results();
                let lines: Vec<String> = if demo.search.query().is_empty() {
                    vec!["Type to search today's stories".into()]
                } else if results.is_empty() {
                    vec![format!("No results for \"{}\"", demo.search.query())]
                } else {
                    results.iter().map(|r| format!("• {r}")).collect()
                };
                for (i, line) in lines.into_iter().enumerate().take(inner.height as usize) {
                    buf.set_stringn(inner.x, inner.y + i as u16, line, inner.width as usize, style);
                }
            }
        }
    }
}
