//! Buffer module: The cell grid behind a terminal surface.
//!
//! This module contains:
//! - [`Cell`]: One character plus its [`Style`]
//! - [`Buffer`]: A grid of cells representing the terminal screen
//! - [`Rgb`]: True-color representation
//! - [`diff`]: Diffing engine for generating minimal ANSI sequences

mod cell;
#[allow(clippy::module_inception)]
mod buffer;
pub mod diff;

pub use cell::{Cell, Rgb, Style};
pub use buffer::Buffer;
