//! Center: A single-child container that centers its child.

use super::traits::Widget;
use crate::actor::{KeyEvent, MouseEvent};
use crate::layout::Rect;
use crate::terminal::Surface;

/// Centers its child inside whatever rect it is given.
///
/// The child gets a sub-rect of its natural size (see
/// [`Widget::display_size`]), placed at `floor((available - size) / 2)` on
/// each axis. On an axis where the child is larger than the rect it gets
/// the full extent. Focus, keys and mouse events go to the child.
#[derive(Debug, Default)]
pub struct Center<W> {
    child: W,
}

impl<W: Widget> Center<W> {
    /// Wrap `child`.
    pub const fn new(child: W) -> Self {
        Self { child }
    }

    /// The wrapped widget.
    pub const fn child(&self) -> &W {
        &self.child
    }

    /// The wrapped widget, mutably. Callbacks reach the child through this.
    pub fn child_mut(&mut self) -> &mut W {
        &mut self.child
    }

    /// Unwrap the child.
    pub fn into_inner(self) -> W {
        self.child
    }

    /// The rect the child occupies when this container is given `rect`.
    pub fn child_rect(&self, rect: Rect) -> Rect {
        let (width, height) = self.child.display_size(rect.width, rect.height);
        rect.centered(width, height)
    }
}

impl<W: Widget> Widget for Center<W> {
    fn set_focused(&mut self, focused: bool) {
        self.child.set_focused(focused);
    }

    fn handle_key(&mut self, event: &KeyEvent) -> bool {
        self.child.handle_key(event)
    }

    fn handle_mouse(&mut self, rect: Rect, event: &MouseEvent) -> bool {
        let child_rect = self.child_rect(rect);
        self.child.handle_mouse(child_rect, event)
    }

    fn draw(&self, rect: Rect, surface: &mut dyn Surface) {
        self.child.draw(self.child_rect(rect), surface);
    }

    fn display_size(&self, width: u16, height: u16) -> (u16, u16) {
        (width, height)
    }
}
