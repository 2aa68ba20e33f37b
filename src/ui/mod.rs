//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer reads the derived parameters the engines expose and turns them
//! into cells on the terminal.  No engine state is mutated here.

pub mod chip;
pub mod countdown;
pub mod layout;
pub mod pager;
pub mod parallax;
pub mod popup;
pub mod refresh;
pub mod spinner;
pub mod swipe_list;
pub mod theme;

use std::time::Duration;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::demo::{Demo, DemoKind};
use crate::app::state::AppState;

use self::layout::AppLayout;
use self::theme::Theme;

/// Text of one demo tab; shared by drawing and hit-testing.
fn tab_label(index: usize, kind: DemoKind) -> String {
    format!(" {} {} ", index + 1, kind.label())
}

/// Which demo tab, if any, sits under (`col`, `row`).
pub fn tab_at(tabs: Rect, col: u16, row: u16) -> Option<DemoKind> {
    if !layout::point_in_rect(tabs, col, row) {
        return None;
    }
    let mut x = tabs.x;
    for (i, &kind) in DemoKind::ALL.iter().enumerate() {
        let width = tab_label(i, kind).chars().count() as u16;
        if col >= x && col < x + width {
            return Some(kind);
        }
        // One blank column between tabs.
        x += width + 1;
    }
    None
}

/// Draw one full frame.
pub fn draw(frame: &mut Frame, state: &AppState, now: Duration) {
    let layout = AppLayout::from_area(frame.area());

    // ── demo tabs ─────────────────────────────────────────────
    let current = state.demo.kind();
    let mut spans = Vec::new();
    for (i, &kind) in DemoKind::ALL.iter().enumerate() {
        let style = if kind == current {
            Theme::active_tab_style()
        } else {
            Theme::tab_style()
        };
        spans.push(Span::styled(tab_label(i, kind), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), layout.tabs_area);

    // ── stage ─────────────────────────────────────────────────
    let block = Block::default()
        .title(format!(" {} ", current.label()))
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(Theme::border_style());
    frame.render_widget(block, layout.stage_area);

    let stage = layout.stage_inner();
    match &state.demo {
        Demo::Countdown(d) => frame.render_widget(
            countdown::CountdownWidget {
                countdown: &d.countdown,
            },
            stage,
        ),
        Demo::Swipe(d) => frame.render_widget(
            swipe_list::SwipeListWidget {
                list: &d.list,
                selected: d.selected,
            },
            stage,
        ),
        Demo::Parallax(d) => frame.render_widget(parallax::ParallaxWidget { demo: d }, stage),
        Demo::Refresh(d) => frame.render_widget(
            refresh::RefreshWidget {
                demo: d,
                rotation: d.pull.rotation(now),
            },
            stage,
        ),
        Demo::Pager(d) => frame.render_widget(pager::PagerWidget { pager: &d.pager }, stage),
        Demo::Chip(d) => frame.render_widget(chip::ChipWidget { chip: &d.chip }, stage),
    }

    // ── status bar ────────────────────────────────────────────
    let hint = state.config.status_bar_hint();
    let text = match &state.status_message {
        Some(message) => format!(" {} │ {message}", state.demo.flags()),
        None => format!(" {} │ {hint}", state.demo.flags()),
    };
    frame.render_widget(
        Paragraph::new(text).style(Theme::status_bar_style()),
        layout.status_area,
    );

    if state.show_help {
        frame.render_widget(
            popup::HelpPopup {
                config: &state.config,
            },
            frame.area(),
        );
    }
}
