//! Label Widget: Static, possibly multi-line text.

use super::traits::{draw_str, str_width, Widget};
use crate::actor::{KeyEvent, MouseEvent};
use crate::buffer::Style;
use crate::layout::Rect;
use crate::terminal::Surface;

/// Horizontal alignment of each line inside the label's rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Flush left.
    #[default]
    Left,
    /// Centered, extra column on the right.
    Center,
    /// Flush right.
    Right,
}

/// A text label. Lines are separated by `\n`; anything that does not fit
/// the rect is clipped.
#[derive(Debug, Clone, Default)]
pub struct Label {
    /// The text to show.
    pub text: String,
    /// Per-line alignment.
    pub align: Align,
    /// Text colors.
    pub style: Style,
}

impl Label {
    /// Create a left-aligned label in the default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the alignment (builder pattern).
    #[must_use]
    pub const fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Set the style (builder pattern).
    #[must_use]
    pub const fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Replace the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }
}

impl Widget for Label {
    fn set_focused(&mut self, _focused: bool) {}

    fn handle_key(&mut self, _event: &KeyEvent) -> bool {
        false
    }

    fn handle_mouse(&mut self, _rect: Rect, _event: &MouseEvent) -> bool {
        false
    }

    fn draw(&self, rect: Rect, surface: &mut dyn Surface) {
        for (row, line) in (0..rect.height).zip(self.lines()) {
            let width = str_width(line).min(rect.width);
            let offset = match self.align {
                Align::Left => 0,
                Align::Center => (rect.width - width) / 2,
                Align::Right => rect.width - width,
            };
            draw_str(
                surface,
                rect.x.saturating_add(offset),
                rect.y.saturating_add(row),
                line,
                self.style,
                rect.width - offset,
            );
        }
    }

    fn display_size(&self, _width: u16, _height: u16) -> (u16, u16) {
        let width = self.lines().map(str_width).max().unwrap_or(0);
        let height = u16::try_from(self.lines().count()).unwrap_or(u16::MAX);
        (width, height)
    }
}
