//! Application orchestration: state management, event loop plumbing, and
//! input handling.

pub mod demo;
pub mod event;
pub mod handler;
pub mod state;
pub mod ticker;
