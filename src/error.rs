//! Error types.
//!
//! Only two things in the runtime can fail in a way the caller sees:
//! bringing up the terminal, and posting to a bridge whose loop is gone.
//! Hooks, callbacks and widgets have no error channel back to the loop.

use std::io;
use thiserror::Error;

/// Errors reported by the runtime.
#[derive(Debug, Error)]
pub enum Error {
    /// The terminal surface could not be created (size query, stdout).
    #[error("failed to create terminal surface: {0}")]
    SurfaceCreate(#[source] io::Error),

    /// The terminal surface could not be initialized (raw mode, screen switch).
    #[error("failed to initialize terminal surface: {0}")]
    SurfaceInit(#[source] io::Error),

    /// The receiving end of a callback bridge has been dropped.
    #[error("callback bridge closed")]
    BridgeClosed,
}

/// Result alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;
