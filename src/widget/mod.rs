//! Widgets: The UI tree the runtime draws and routes input to.
//!
//! Every node implements [`Widget`]. Composite widgets own their children
//! and delegate to them, computing a sub-rect for each child on every call.
//!
//! # Example
//!
//! ```rust
//! use dos::widget::{Center, Label};
//! use dos::Rect;
//!
//! let root = Center::new(Label::new("hi"));
//! assert_eq!(root.child_rect(Rect::from_size(20, 5)), Rect::new(9, 2, 2, 1));
//! ```

mod center;
mod label;
mod traits;

pub use center::Center;
pub use label::{Align, Label};
pub use traits::{draw_str, str_width, Widget};
