//! Core motion engines: signal mapping, transitions, and gesture controllers.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Time is
//! always passed in as a `Duration` since an arbitrary origin, so every
//! controller can be stepped deterministically from tests.

pub mod chip;
pub mod countdown;
pub mod digit_roller;
pub mod easing;
pub mod mapper;
pub mod pull_refresh;
pub mod scroll_boundary;
pub mod search_bar;
pub mod section_pager;
pub mod smoothing;
pub mod swipe_row;
pub mod transition;
