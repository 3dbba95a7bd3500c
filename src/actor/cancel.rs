//! Cancel token: The single shared shutdown signal.
//!
//! The token is observed two ways. Threads that poll check
//! [`CancelToken::is_cancelled`]; threads that block include
//! [`CancelToken::receiver`] in a `select!`, which becomes ready (as a
//! disconnect) the moment the token is cancelled.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

struct Shared {
    cancelled: AtomicBool,
    /// Dropped on cancel, which disconnects every receiver clone.
    trigger: Mutex<Option<Sender<()>>>,
}

/// A cloneable, idempotent cancellation signal.
#[derive(Clone)]
pub struct CancelToken {
    shared: Arc<Shared>,
    rx: Receiver<()>,
}

impl CancelToken {
    /// Create a token that is not yet cancelled.
    pub fn new() -> Self {
        let (tx, rx) = bounded(0);
        Self {
            shared: Arc::new(Shared {
                cancelled: AtomicBool::new(false),
                trigger: Mutex::new(Some(tx)),
            }),
            rx,
        }
    }

    /// Cancel the token. Calling this more than once has no further effect.
    pub fn cancel(&self) {
        // The flag goes first so anyone woken by the disconnect sees it set.
        self.shared.cancelled.store(true, Ordering::SeqCst);
        let trigger = self
            .shared
            .trigger
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if trigger.is_some() {
            tracing::debug!("cancel token fired");
        }
    }

    /// Check whether the token has been cancelled.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.shared.cancelled.load(Ordering::SeqCst)
    }

    /// A receiver that never yields a value and disconnects on cancel.
    ///
    /// Use it as a `select!` arm: `recv(token.receiver()) -> _ => ...`.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<()> {
        &self.rx
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{select, RecvTimeoutError};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_cancel_is_idempotent() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        token.cancel();
        token.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_receiver_blocks_until_cancel() {
        let token = CancelToken::new();
        assert_eq!(
            token.receiver().recv_timeout(Duration::from_millis(20)),
            Err(RecvTimeoutError::Timeout)
        );

        token.cancel();
        assert_eq!(
            token.receiver().recv_timeout(Duration::from_millis(20)),
            Err(RecvTimeoutError::Disconnected)
        );
    }

    #[test]
    fn test_clone_observes_cancel_from_other_thread() {
        let token = CancelToken::new();
        let remote = token.clone();

        let handle = thread::spawn(move || {
            select! {
                recv(remote.receiver()) -> _ => remote.is_cancelled(),
                default(Duration::from_secs(5)) => false,
            }
        });

        thread::sleep(Duration::from_millis(10));
        token.cancel();
        assert!(handle.join().unwrap());
    }
}
