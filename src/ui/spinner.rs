//! Pull-to-refresh indicator: a spinner glyph, a status line, and a height
//! that grows with the pull.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Widget,
};

use super::theme::Theme;

/// Braille-dot spinner frames, one per 36° of rotation.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Frame for a rotation angle in degrees.
pub fn frame_for(rotation: f64) -> &'static str {
    let step = (rotation.rem_euclid(360.0) / 36.0) as usize;
    SPINNER_FRAMES[step.min(SPINNER_FRAMES.len() - 1)]
}

/// Rendered into the indicator slot above the feed.  The slot itself is
/// sized by the caller from the pull distance.
pub struct RefreshIndicator<'a> {
    pub rotation: f64,
    pub opacity: f64,
    /// 0.5 → 1.0; below full scale the label is dropped.
    pub scale: f64,
    pub message: Option<&'a str>,
}

impl<'a> Widget for RefreshIndicator<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width < 4 {
            return;
        }
        let Some(style) = Theme::fade(self.opacity) else {
            return;
        };

        let label = match self.message {
            Some(message) => format!(" {} {message}… ", frame_for(self.rotation)),
            None if self.scale >= 1.0 => {
                format!(" {} release to refresh ", frame_for(self.rotation))
            }
            None => format!(" {} ", frame_for(self.rotation)),
        };
        let width = (label.chars().count() as u16).min(area.width);
        let x = area.x + (area.width - width) / 2;
        let y = area.y + area.height.saturating_sub(1) / 2;

        let line = Line::from(Span::styled(label, style.add_modifier(Modifier::BOLD)));
        buf.set_line(x, y, &line, width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_follow_rotation() {
        assert_eq!(frame_for(0.0), "⠋");
        assert_eq!(frame_for(40.0), "⠙");
        assert_eq!(frame_for(359.0), "⠏");
        assert_eq!(frame_for(360.0), "⠋");
        assert_eq!(frame_for(-36.0), "⠏");
    }

    #[test]
    fn invisible_at_zero_opacity() {
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        RefreshIndicator {
            rotation: 0.0,
            opacity: 0.0,
            scale: 0.5,
            message: None,
        }
        .render(area, &mut buf);
        assert!(buf.content().iter().all(|c| c.symbol() == " "));
    }
}
