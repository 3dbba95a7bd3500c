//! # dos
//!
//! A minimal terminal-UI runtime.
//!
//! `dos` owns a character-cell surface, routes input events to a tree of
//! widgets, and lets timers and background threads change UI state without
//! ever touching a widget from the wrong thread.
//!
//! ## Core Concepts
//!
//! - **Single UI thread**: Widgets and the surface are only ever touched by
//!   the thread running [`App::run`]
//! - **Callback bridge**: Other threads post `FnOnce(&mut Root)` closures
//!   that the loop runs between events
//! - **Event pump**: Terminal input is read on its own thread and handed
//!   over one event at a time
//! - **Redraw per item**: Every callback and event is followed by exactly
//!   one clear, fill, draw, flush pass
//!
//! ## Example
//!
//! ```rust,no_run
//! use dos::{bridge, App, CancelToken, Center, Label, Ticker};
//! use std::time::Duration;
//!
//! let cancel = CancelToken::new();
//! let (tx, rx) = bridge::<Center<Label>>();
//!
//! let ticker = Ticker::spawn(Duration::from_millis(500), tx, cancel.clone(), |n| {
//!     move |root: &mut Center<Label>| root.child_mut().set_text(format!("tick {n}"))
//! });
//!
//! let quit = cancel.clone();
//! let mut app = App::new(Center::new(Label::new("starting")))
//!     .with_callbacks(rx)
//!     .on_key(move |_key| {
//!         quit.cancel();
//!         true
//!     });
//!
//! app.run_terminal(&cancel)?;
//! ticker.join();
//! # Ok::<(), dos::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod app;
pub mod buffer;
pub mod error;
pub mod layout;
pub mod terminal;
pub mod widget;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use actor::{
    bridge, bridge_bounded, Callback, CallbackReceiver, CallbackSender, CancelToken, Event,
    EventPump, KeyCode, KeyEvent, KeyModifiers, MouseButtons, MouseEvent, Ticker,
};
pub use app::{default_loop, App};
pub use buffer::{Buffer, Cell, Rgb, Style};
pub use error::{Error, Result};
pub use layout::Rect;
pub use terminal::{EventSource, Surface, SurfaceConfig, TerminalSurface};
pub use widget::{Align, Center, Label, Widget};
