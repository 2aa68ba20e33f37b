//! Input handling: maps key/mouse events to engine signals.
//!
//! Every handler takes the frame clock `now` so gestures that start
//! transitions stamp them with the same time the engines are ticked with.

use std::time::Duration;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::config::Action;
use crate::ui::layout::{point_in_rect, AppLayout};
use crate::ui::{chip, refresh::RefreshGeometry, swipe_list, tab_at};

use super::demo::{Demo, DemoKind, RefreshDemo, SwipeDemo};
use super::state::AppState;

/// Pointer travel used when the keyboard simulates a full pull.
const KEYBOARD_PULL: f64 = 1_000.0;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent, now: Duration) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits, even while typing a query.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    if state.show_help {
        match state.config.match_key(key) {
            Some(Action::Quit) => state.should_quit = true,
            Some(Action::Help | Action::Cancel) => state.show_help = false,
            _ => {}
        }
        return;
    }

    if let Demo::Refresh(d) = &mut state.demo {
        if d.search.is_searching() && handle_query_key(d, key, now) {
            return;
        }
    }

    // Number keys jump straight to a demo tab.
    if let KeyCode::Char(c @ '1'..='9') = key.code {
        let index = c as usize - '1' as usize;
        if let Some(&kind) = DemoKind::ALL.get(index) {
            state.mount(kind, now);
        }
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    match action {
        Action::Quit => state.should_quit = true,
        Action::Help => state.show_help = true,
        Action::NextDemo => state.mount(state.demo.kind().next(), now),
        Action::PrevDemo => state.mount(state.demo.kind().prev(), now),
        Action::Restart => state.restart(now),
        other => handle_demo_action(state, other, now),
    }
}

/// Keys typed while the search box has focus.  Returns `true` if consumed.
fn handle_query_key(d: &mut RefreshDemo, key: KeyEvent, now: Duration) -> bool {
    match key.code {
        KeyCode::Esc => d.search.cancel(now),
        KeyCode::Backspace => d.search.pop_char(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => d.search.clear(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            d.search.push_char(c)
        }
        _ => return false,
    }
    true
}

fn handle_demo_action(state: &mut AppState, action: Action, now: Duration) {
    let message = match &mut state.demo {
        Demo::Countdown(_) => None,
        Demo::Swipe(d) => swipe_action(d, action, now),
        Demo::Parallax(d) => {
            match action {
                Action::Up => {
                    d.scroll.wheel(-1.0);
                }
                Action::Down => {
                    d.scroll.wheel(1.0);
                }
                _ => {}
            }
            None
        }
        Demo::Refresh(d) => refresh_action(d, action, now),
        Demo::Pager(d) => {
            match action {
                Action::Up => {
                    d.pager.wheel(-1.0, now);
                }
                Action::Down | Action::Activate => {
                    d.pager.wheel(1.0, now);
                }
                _ => {}
            }
            None
        }
        Demo::Chip(d) => {
            if action == Action::Activate {
                d.chip.start(now);
            }
            None
        }
    };
    if message.is_some() {
        state.status_message = message;
    }
}

fn swipe_action(d: &mut SwipeDemo, action: Action, now: Duration) -> Option<String> {
    match action {
        Action::Up => d.selected = d.selected.saturating_sub(1),
        Action::Down => {
            if d.selected + 1 < d.list.len() {
                d.selected += 1;
            }
        }
        Action::Activate => d.list.toggle(d.selected, now),
        Action::Delete => {
            let removed = d.list.delete_if_open(d.selected)?;
            d.clamp_selection();
            return Some(format!("Deleted \"{}\"", removed.title));
        }
        _ => {}
    }
    None
}

fn refresh_action(d: &mut RefreshDemo, action: Action, now: Duration) -> Option<String> {
    match action {
        Action::Up => d.scroll = d.scroll.saturating_sub(1),
        Action::Down => d.scroll = (d.scroll + 1).min(d.feed.len().saturating_sub(1)),
        Action::Search => d.search.focus(now),
        Action::Cancel => d.search.cancel(now),
        Action::Activate => {
            let (at_top, blocked) = (d.at_top(), d.search.is_searching());
            d.pull.touch_start(0.0, at_top, blocked);
            d.pull.touch_move(KEYBOARD_PULL, at_top);
            if d.pull.touch_end(now) {
                return Some("Refreshing…".into());
            }
        }
        _ => {}
    }
    None
}

// ───────────────────────────────────────── mouse ─────────────

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, now: Duration) {
    if state.show_help {
        if let MouseEventKind::Down(_) = mouse.kind {
            state.show_help = false;
        }
        return;
    }

    let layout = AppLayout::from_area(state.terminal_area);
    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
        if let Some(kind) = tab_at(layout.tabs_area, mouse.column, mouse.row) {
            state.mount(kind, now);
            return;
        }
    }

    let stage = layout.stage_inner();
    let message = match &mut state.demo {
        Demo::Countdown(_) => None,
        Demo::Swipe(d) => swipe_mouse(d, stage, mouse, now),
        Demo::Parallax(d) => {
            if point_in_rect(stage, mouse.column, mouse.row) {
                match mouse.kind {
                    MouseEventKind::ScrollUp => {
                        d.scroll.wheel(-1.0);
                    }
                    MouseEventKind::ScrollDown => {
                        d.scroll.wheel(1.0);
                    }
                    _ => {}
                }
            }
            None
        }
        Demo::Refresh(d) => refresh_mouse(d, stage, mouse, now),
        Demo::Pager(d) => {
            if point_in_rect(stage, mouse.column, mouse.row) {
                match mouse.kind {
                    MouseEventKind::ScrollUp => {
                        d.pager.wheel(-1.0, now);
                    }
                    MouseEventKind::ScrollDown => {
                        d.pager.wheel(1.0, now);
                    }
                    _ => {}
                }
            }
            None
        }
        Demo::Chip(d) => {
            if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                if chip::hits_chip(stage, &d.chip, mouse.column, mouse.row) {
                    d.chip.start(now);
                }
            }
            None
        }
    };
    if message.is_some() {
        state.status_message = message;
    }
}

fn swipe_mouse(d: &mut SwipeDemo, stage: Rect, mouse: MouseEvent, now: Duration) -> Option<String> {
    let pointer = f64::from(mouse.column);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let index = swipe_list::row_at(stage, mouse.row, d.list.len())?;
            d.selected = index;
            let from_right = swipe_list::from_right(stage, mouse.column);
            if let Some(removed) = d.list.tap(index, from_right) {
                d.clamp_selection();
                return Some(format!("Deleted \"{}\"", removed.title));
            }
            d.list.begin_drag(index, pointer);
        }
        MouseEventKind::Drag(MouseButton::Left) => d.list.drag_to(pointer),
        MouseEventKind::Up(MouseButton::Left) => d.list.end_drag(now),
        MouseEventKind::ScrollUp => d.selected = d.selected.saturating_sub(1),
        MouseEventKind::ScrollDown => {
            if d.selected + 1 < d.list.len() {
                d.selected += 1;
            }
        }
        _ => {}
    }
    None
}

fn refresh_mouse(
    d: &mut RefreshDemo,
    stage: Rect,
    mouse: MouseEvent,
    now: Duration,
) -> Option<String> {
    let geo = RefreshGeometry::new(stage, d);
    let (col, row) = (mouse.column, mouse.row);
    let pointer = f64::from(row);
    let at_top = d.at_top();
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if d.search.is_searching() && point_in_rect(geo.cancel, col, row) {
                d.search.cancel(now);
            } else if point_in_rect(geo.search, col, row) {
                d.search.focus(now);
            } else if point_in_rect(stage, col, row) {
                let blocked = d.search.is_searching();
                d.pull.touch_start(pointer, at_top, blocked);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => d.pull.touch_move(pointer, at_top),
        MouseEventKind::Up(MouseButton::Left) => {
            if d.pull.touch_end(now) {
                return Some("Refreshing…".into());
            }
        }
        MouseEventKind::ScrollUp => d.scroll = d.scroll.saturating_sub(1),
        MouseEventKind::ScrollDown => {
            d.scroll = (d.scroll + 1).min(d.feed.len().saturating_sub(1))
        }
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::event::channel;
    use crate::config::AppConfig;
    use crate::core::transition::TransitionState;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn state(kind: DemoKind) -> AppState {
        let (tx, _rx) = channel();
        let mut state = AppState::new(kind, AppConfig::default(), 60, tx, Duration::ZERO);
        state.terminal_area = Rect::new(0, 0, 80, 24);
        state
    }

    fn press(state: &mut AppState, code: KeyCode, now: Duration) {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE), now);
    }

    fn mouse(state: &mut AppState, kind: MouseEventKind, column: u16, row: u16, now: Duration) {
        let event = MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(state, event, now);
    }

    #[test]
    fn tab_and_number_keys_switch_demos() {
        let mut s = state(DemoKind::Swipe);
        press(&mut s, KeyCode::Tab, ms(0));
        assert_eq!(s.demo.kind(), DemoKind::Parallax);
        press(&mut s, KeyCode::Char('5'), ms(0));
        assert_eq!(s.demo.kind(), DemoKind::Pager);
        handle_key(
            &mut s,
            KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            ms(0),
        );
        assert_eq!(s.demo.kind(), DemoKind::Refresh);
        press(&mut s, KeyCode::Char('q'), ms(0));
        assert!(s.should_quit);
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let mut s = state(DemoKind::Swipe);
        press(&mut s, KeyCode::Char('?'), ms(0));
        assert!(s.show_help);
        press(&mut s, KeyCode::Tab, ms(0));
        assert_eq!(s.demo.kind(), DemoKind::Swipe);
        press(&mut s, KeyCode::Esc, ms(0));
        assert!(!s.show_help);
    }

    #[test]
    fn swipe_drag_then_tap_deletes() {
        let mut s = state(DemoKind::Swipe);
        // Stage inner starts at (1, 2); first item spans rows 2-3.
        mouse(&mut s, MouseEventKind::Down(MouseButton::Left), 70, 2, ms(0));
        mouse(&mut s, MouseEventKind::Drag(MouseButton::Left), 50, 2, ms(10));
        mouse(&mut s, MouseEventKind::Up(MouseButton::Left), 50, 2, ms(20));
        s.demo.tick(ms(1000), 0.0);

        let Demo::Swipe(d) = &s.demo else {
            panic!("wrong demo mounted");
        };
        assert!(d.list.row(0).is_some_and(|r| r.is_open()));
        let before = d.list.len();

        mouse(&mut s, MouseEventKind::Down(MouseButton::Left), 78, 3, ms(1100));
        let Demo::Swipe(d) = &s.demo else {
            panic!("wrong demo mounted");
        };
        assert_eq!(d.list.len(), before - 1);
        assert!(s.status_message.as_deref().is_some_and(|m| m.starts_with("Deleted")));
    }

    #[test]
    fn keyboard_delete_needs_an_open_row() {
        let mut s = state(DemoKind::Swipe);
        press(&mut s, KeyCode::Char('d'), ms(0));
        let Demo::Swipe(d) = &s.demo else {
            panic!("wrong demo mounted");
        };
        assert_eq!(d.list.len(), 8);

        press(&mut s, KeyCode::Down, ms(0));
        press(&mut s, KeyCode::Enter, ms(0));
        press(&mut s, KeyCode::Char('d'), ms(400));
        let Demo::Swipe(d) = &s.demo else {
            panic!("wrong demo mounted");
        };
        assert_eq!(d.list.len(), 7);
        assert_eq!(d.list.iter().nth(1).map(|(item, _)| item.id), Some(3));
    }

    #[test]
    fn pulling_the_feed_starts_a_refresh() {
        let mut s = state(DemoKind::Refresh);
        mouse(&mut s, MouseEventKind::Down(MouseButton::Left), 10, 6, ms(0));
        mouse(&mut s, MouseEventKind::Drag(MouseButton::Left), 10, 16, ms(10));
        mouse(&mut s, MouseEventKind::Up(MouseButton::Left), 10, 16, ms(20));

        let Demo::Refresh(d) = &s.demo else {
            panic!("wrong demo mounted");
        };
        assert_eq!(d.pull.state(), TransitionState::Locked);
        assert_eq!(s.status_message.as_deref(), Some("Refreshing…"));
    }

    #[test]
    fn typing_goes_to_the_query_while_searching() {
        let mut s = state(DemoKind::Refresh);
        press(&mut s, KeyCode::Char('/'), ms(0));
        press(&mut s, KeyCode::Char('q'), ms(10));
        press(&mut s, KeyCode::Char('x'), ms(20));
        press(&mut s, KeyCode::Backspace, ms(30));
        assert!(!s.should_quit);
        let Demo::Refresh(d) = &s.demo else {
            panic!("wrong demo mounted");
        };
        assert_eq!(d.search.query(), "q");

        press(&mut s, KeyCode::Esc, ms(40));
        let Demo::Refresh(d) = &s.demo else {
            panic!("wrong demo mounted");
        };
        assert!(!d.search.is_searching());
        assert_eq!(d.search.query(), "");
    }

    #[test]
    fn ctrl_u_clears_the_query_but_keeps_focus() {
        let mut s = state(DemoKind::Refresh);
        press(&mut s, KeyCode::Char('/'), ms(0));
        press(&mut s, KeyCode::Char('l'), ms(10));
        press(&mut s, KeyCode::Char('i'), ms(20));
        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        handle_key(&mut s, ctrl_u, ms(30));
        let Demo::Refresh(d) = &s.demo else {
            panic!("wrong demo mounted");
        };
        assert_eq!(d.search.query(), "");
        assert!(d.search.is_searching());
    }

    #[test]
    fn pull_is_blocked_while_searching() {
        let mut s = state(DemoKind::Refresh);
        press(&mut s, KeyCode::Char('/'), ms(0));
        // Enter is not consumed by the query, so it reaches the pull.
        press(&mut s, KeyCode::Enter, ms(10));
        let Demo::Refresh(d) = &s.demo else {
            panic!("wrong demo mounted");
        };
        assert!(!d.pull.is_refreshing());
    }

    #[test]
    fn pager_wheel_is_locked_mid_swap() {
        let mut s = state(DemoKind::Pager);
        mouse(&mut s, MouseEventKind::ScrollDown, 10, 10, ms(0));
        mouse(&mut s, MouseEventKind::ScrollDown, 10, 10, ms(100));
        let Demo::Pager(d) = &s.demo else {
            panic!("wrong demo mounted");
        };
        assert_eq!(d.pager.index(), 1);
    }

    #[test]
    fn clicking_a_tab_mounts_it() {
        let mut s = state(DemoKind::Swipe);
        // " 1 Countdown " " " " 2 Swipe " " " " 3 Parallax "
        mouse(&mut s, MouseEventKind::Down(MouseButton::Left), 26, 0, ms(0));
        assert_eq!(s.demo.kind(), DemoKind::Parallax);
    }
}
