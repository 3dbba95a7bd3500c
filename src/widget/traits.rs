//! Widget trait: The contract every node of the UI tree implements.

use crate::actor::{KeyEvent, MouseEvent};
use crate::buffer::Style;
use crate::layout::Rect;
use crate::terminal::Surface;

/// A UI component that can be drawn to a surface and handle input.
///
/// Geometry is passed in on every call instead of being stored, because
/// the surface may have been resized since the previous call. A widget
/// must only draw and hit-test inside the rect it was given.
///
/// Focus is a property of the widget itself. The runtime only ever focuses
/// the root; containers decide which child, if any, inherits it.
pub trait Widget {
    /// Tell the widget it became (or stopped being) the keyboard target.
    fn set_focused(&mut self, focused: bool);

    /// Handle a key press.
    ///
    /// Returns `true` if the event was consumed. Containers that do not
    /// consume the key themselves forward it and return the child's answer.
    fn handle_key(&mut self, event: &KeyEvent) -> bool;

    /// Handle a pointer event. `rect` is the area this widget occupies.
    ///
    /// Returns `true` if the event was consumed.
    fn handle_mouse(&mut self, rect: Rect, event: &MouseEvent) -> bool;

    /// Draw the widget inside `rect`.
    fn draw(&self, rect: Rect, surface: &mut dyn Surface);

    /// Natural size inside a `width` x `height` area.
    ///
    /// Containers use this to lay out children. By default a widget wants
    /// all the space it is offered.
    fn display_size(&self, width: u16, height: u16) -> (u16, u16) {
        (width, height)
    }
}

impl<T: Widget + ?Sized> Widget for Box<T> {
    fn set_focused(&mut self, focused: bool) {
        (**self).set_focused(focused);
    }

    fn handle_key(&mut self, event: &KeyEvent) -> bool {
        (**self).handle_key(event)
    }

    fn handle_mouse(&mut self, rect: Rect, event: &MouseEvent) -> bool {
        (**self).handle_mouse(rect, event)
    }

    fn draw(&self, rect: Rect, surface: &mut dyn Surface) {
        (**self).draw(rect, surface);
    }

    fn display_size(&self, width: u16, height: u16) -> (u16, u16) {
        (**self).display_size(width, height)
    }
}

/// Draw `text` on one row starting at (x, y), using at most `max_width`
/// columns. A wide character that would not fit entirely is not drawn.
///
/// Returns the number of columns used.
pub fn draw_str(
    surface: &mut dyn Surface,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
    max_width: u16,
) -> u16 {
    let mut used = 0u16;
    for ch in text.chars() {
        #[allow(clippy::cast_possible_truncation)]
        let width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0) as u16;
        if width == 0 {
            continue;
        }
        let Some(end) = used.checked_add(width).filter(|&end| end <= max_width) else {
            break;
        };
        surface.set_content(x.saturating_add(used), y, ch, style);
        used = end;
    }
    used
}

/// Display width of `text` in columns.
pub fn str_width(text: &str) -> u16 {
    let width = unicode_width::UnicodeWidthStr::width(text);
    u16::try_from(width).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Log, RecordingSurface};

    #[test]
    fn test_draw_str_stops_at_max_width() {
        let (mut surface, _events) = RecordingSurface::new(8, 1, &Log::default());
        assert_eq!(draw_str(&mut surface, 1, 0, "a日bc", Style::DEFAULT, 4), 4);
        assert_eq!(surface.buffer().row_text(0), " a日b   ");
    }

    #[test]
    fn test_draw_str_unbounded_width_does_not_overflow() {
        let (mut surface, _events) = RecordingSurface::new(4, 1, &Log::default());
        let text = "a".repeat(usize::from(u16::MAX) + 2);
        assert_eq!(draw_str(&mut surface, 0, 0, &text, Style::DEFAULT, u16::MAX), u16::MAX);
        assert_eq!(surface.buffer().row_text(0), "aaaa");
    }
}
