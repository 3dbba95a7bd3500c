//! Layout module: Geometry handed down the widget tree.
//!
//! Widgets receive a fresh [`Rect`] on every draw and hit-test call.

mod rect;

pub use rect::Rect;
