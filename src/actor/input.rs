//! Event pump: Dedicated thread that moves terminal events into the loop.
//!
//! The pump blocks on [`EventSource::poll_event`] so the runtime loop never
//! blocks on terminal I/O. Each event is handed over through a rendezvous
//! channel, so at most one event is in flight and a busy loop throttles
//! acquisition.

use super::cancel::CancelToken;
use super::messages::Event;
use crate::terminal::EventSource;
use crossbeam_channel::{bounded, select, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// Handle to a running event pump.
pub struct EventPump {
    handle: Option<JoinHandle<()>>,
    events: Receiver<Event>,
}

impl EventPump {
    /// Spawn the pump thread.
    ///
    /// The thread exits when the source returns `None`, when `cancel`
    /// fires while it is handing an event over, or when the receiver side
    /// has been dropped.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the thread.
    pub fn spawn(source: Box<dyn EventSource>, cancel: CancelToken) -> Self {
        let (tx, rx) = bounded::<Event>(0);

        let handle = thread::Builder::new()
            .name("dos-events".to_string())
            .spawn(move || Self::run_loop(source, &tx, &cancel))
            .expect("Failed to spawn event pump thread");

        Self {
            handle: Some(handle),
            events: rx,
        }
    }

    /// The channel events are republished on.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<Event> {
        &self.events
    }

    /// Check whether the pump thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the pump thread to exit.
    ///
    /// Only returns once the source stops blocking, i.e. after the surface
    /// is finalized or the token is cancelled.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop(mut source: Box<dyn EventSource>, tx: &Sender<Event>, cancel: &CancelToken) {
        loop {
            let Some(event) = source.poll_event() else {
                tracing::debug!("event source closed, pump exiting");
                return;
            };

            select! {
                send(tx, event) -> res => {
                    if res.is_err() {
                        tracing::debug!("event receiver dropped, pump exiting");
                        return;
                    }
                }
                recv(cancel.receiver()) -> _ => {
                    tracing::debug!("cancelled while publishing, pump exiting");
                    return;
                }
            }
        }
    }
}

impl std::fmt::Debug for EventPump {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventPump")
            .field("finished", &self.is_finished())
            .finish()
    }
}
