//! Actor Model: The threads around the runtime loop and how they talk to it.
//!
//! - **Event pump**: Blocks on the terminal, republishes events to the loop
//! - **Callback bridge**: Lets producer threads schedule work on the loop
//! - **Ticker**: A stock producer that posts a callback on every tick
//! - **Cancel token**: The one shutdown signal everybody observes
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐       Event         ┌──────────────┐
//! │  Event Pump  │ ─────────────────▶  │              │
//! └──────────────┘                     │ Runtime Loop │──▶ widgets, surface
//!                                      │  (UI thread) │
//! ┌──────────────┐     Callback<W>     │              │
//! │ Ticker / any │ ─────────────────▶  │              │
//! │  producer    │                     └──────────────┘
//! └──────────────┘                            ▲
//!                                             │ CancelToken
//! ```

mod bridge;
mod cancel;
mod input;
mod messages;
mod ticker;

pub use bridge::{bridge, bridge_bounded, CallbackReceiver, CallbackSender};
pub use cancel::CancelToken;
pub use input::EventPump;
pub use messages::{Callback, Event, KeyCode, KeyEvent, KeyModifiers, MouseButtons, MouseEvent};
pub use ticker::Ticker;
