//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn tab_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn active_tab_style() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dim_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // ── demos ──────────────────────────────────────────────────
    pub fn digit_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn delete_action_style() -> Style {
        Style::default()
            .bg(Color::Red)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn hero_style() -> Style {
        Style::default().fg(Color::Magenta)
    }

    pub fn input_style() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn chip_style() -> Style {
        Style::default().bg(Color::Blue).fg(Color::White)
    }

    pub fn sweep_style() -> Style {
        Style::default().bg(Color::LightBlue).fg(Color::White)
    }

    /// Text colour standing in for CSS opacity.  Returns `None` when the
    /// element is effectively invisible.
    pub fn fade(opacity: f64) -> Option<Style> {
        let fg = match opacity {
            o if o < 0.05 => return None,
            o if o < 0.4 => Color::DarkGray,
            o if o < 0.8 => Color::Gray,
            _ => Color::White,
        };
        Some(Style::default().fg(fg))
    }
}
