//! Ticker: A timer thread that feeds the callback bridge.
//!
//! The runtime has no timers of its own. Anything periodic (animation,
//! clocks, polling a background job, timeouts) is a producer that posts a
//! callback on each tick, and the loop redraws after running it.

use super::bridge::CallbackSender;
use super::cancel::CancelToken;
use crossbeam_channel::{select, tick};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Handle to a ticker thread.
pub struct Ticker {
    handle: Option<JoinHandle<u64>>,
}

impl Ticker {
    /// Spawn a ticker that posts `make(frame)` every `interval`.
    ///
    /// `frame` counts ticks from 0. The thread stops when `cancel` fires or
    /// the bridge's receiving side is dropped. A full bounded bridge makes
    /// the ticker wait; missed ticks are not replayed.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the ticker thread.
    pub fn spawn<W, F, C>(
        interval: Duration,
        sender: CallbackSender<W>,
        cancel: CancelToken,
        mut make: F,
    ) -> Self
    where
        W: 'static,
        F: FnMut(u64) -> C + Send + 'static,
        C: FnOnce(&mut W) + Send + 'static,
    {
        let handle = thread::Builder::new()
            .name("dos-ticker".to_string())
            .spawn(move || {
                let ticks = tick(interval);
                let mut frame = 0u64;
                loop {
                    select! {
                        recv(ticks) -> _ => {
                            if sender.post(make(frame)).is_err() {
                                tracing::debug!(frame, "bridge closed, ticker exiting");
                                break;
                            }
                            frame += 1;
                        }
                        recv(cancel.receiver()) -> _ => break,
                    }
                }
                frame
            })
            .expect("Failed to spawn ticker thread");

        Self {
            handle: Some(handle),
        }
    }

    /// Wait for the ticker to stop. Returns the number of callbacks posted.
    pub fn join(mut self) -> u64 {
        self.handle
            .take()
            .and_then(|handle| handle.join().ok())
            .unwrap_or(0)
    }
}

impl std::fmt::Debug for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ticker")
            .field("running", &self.handle.as_ref().is_some_and(|h| !h.is_finished()))
            .finish()
    }
}
