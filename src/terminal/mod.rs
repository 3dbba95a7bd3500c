//! Terminal module: The display capability and its crossterm implementation.
//!
//! - [`Surface`] / [`EventSource`]: what the runtime needs from a terminal
//! - [`TerminalSurface`]: double-buffered crossterm surface (or headless,
//!   over any `io::Write`)

mod backend;
mod convert;
mod surface;

pub use backend::{SurfaceConfig, SurfaceStats, TerminalSurface};
pub use convert::convert_event;
pub use surface::{EventSource, Surface};
