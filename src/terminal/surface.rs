//! Surface and EventSource: The capabilities the runtime consumes.
//!
//! The runtime never looks inside a surface. It clears, fills, asks widgets
//! to draw, flushes, and finally releases it. Event acquisition is split
//! into its own [`EventSource`] so it can block on another thread while the
//! surface stays owned by the UI thread.

use crate::actor::Event;
use crate::buffer::Style;

/// A character-cell display.
///
/// Drawing calls go to an off-screen cell buffer; nothing reaches the
/// display until [`show`](Surface::show) or [`sync`](Surface::sync).
pub trait Surface {
    /// Start reporting mouse events.
    fn enable_mouse(&mut self);

    /// Start reporting bracketed paste as a single event.
    fn enable_paste(&mut self);

    /// Reset every cell to an empty, default-styled space.
    fn clear(&mut self);

    /// Set every cell to `ch` in `style`.
    fn fill(&mut self, ch: char, style: Style);

    /// Put `ch` at (x, y). Returns the columns used, 0 when off-surface.
    fn set_content(&mut self, x: u16, y: u16, ch: char, style: Style) -> u16;

    /// Current size as `(width, height)`.
    fn size(&self) -> (u16, u16);

    /// Repaint every cell on the display, ignoring what it already shows.
    fn sync(&mut self);

    /// Write the cells that changed since the last flush to the display.
    fn show(&mut self);

    /// Release the display. Must be safe to call more than once. After
    /// this, event sources handed out by the surface return `None`.
    fn finalize(&mut self);

    /// A handle that blocks for the next event from this surface.
    fn event_source(&mut self) -> Box<dyn EventSource>;
}

/// Blocking event acquisition.
pub trait EventSource: Send {
    /// Block until the next event arrives.
    ///
    /// Returns `None` once the surface has been finalized; that is the
    /// normal end of the stream, not an error.
    fn poll_event(&mut self) -> Option<Event>;
}
