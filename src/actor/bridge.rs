//! Callback bridge: Schedule work onto the runtime loop from any thread.
//!
//! Producers never touch widgets directly. They post a closure, and the
//! loop runs it on the UI thread with `&mut` access to the root widget,
//! followed by a redraw pass. Callbacks run in the order they were posted.

use super::messages::Callback;
use crate::error::{Error, Result};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};

/// Producer half of the bridge. Cheap to clone, `Send` + `Sync`.
pub struct CallbackSender<W> {
    tx: Sender<Callback<W>>,
}

/// Consumer half of the bridge, handed to [`App::with_callbacks`].
///
/// [`App::with_callbacks`]: crate::App::with_callbacks
pub struct CallbackReceiver<W> {
    rx: Receiver<Callback<W>>,
}

/// Create a bridge whose queue grows without bound.
pub fn bridge<W>() -> (CallbackSender<W>, CallbackReceiver<W>) {
    let (tx, rx) = unbounded();
    (CallbackSender { tx }, CallbackReceiver { rx })
}

/// Create a bridge holding at most `capacity` pending callbacks.
///
/// [`CallbackSender::post`] blocks while the queue is full. A capacity of
/// zero makes every post wait until the loop takes the callback.
pub fn bridge_bounded<W>(capacity: usize) -> (CallbackSender<W>, CallbackReceiver<W>) {
    let (tx, rx) = bounded(capacity);
    (CallbackSender { tx }, CallbackReceiver { rx })
}

impl<W> CallbackSender<W> {
    /// Schedule `f` to run on the UI thread.
    ///
    /// Fails with [`Error::BridgeClosed`] once the receiving half is gone.
    pub fn post<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut W) + Send + 'static,
    {
        self.tx.send(Box::new(f)).map_err(|_| Error::BridgeClosed)
    }

    /// Number of callbacks waiting to run.
    pub fn pending(&self) -> usize {
        self.tx.len()
    }
}

impl<W> Clone for CallbackSender<W> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<W> CallbackReceiver<W> {
    /// The underlying channel, for use in custom loops.
    pub const fn channel(&self) -> &Receiver<Callback<W>> {
        &self.rx
    }

    pub(crate) fn into_channel(self) -> Receiver<Callback<W>> {
        self.rx
    }
}

impl<W> std::fmt::Debug for CallbackSender<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackSender")
            .field("pending", &self.tx.len())
            .finish()
    }
}

impl<W> std::fmt::Debug for CallbackReceiver<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackReceiver")
            .field("pending", &self.rx.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_callbacks_run_in_post_order() {
        let (tx, rx) = bridge::<Vec<u32>>();
        for i in 0..5 {
            tx.post(move |log: &mut Vec<u32>| log.push(i)).unwrap();
        }
        assert_eq!(tx.pending(), 5);

        let mut log = Vec::new();
        while let Ok(cb) = rx.channel().try_recv() {
            cb(&mut log);
        }
        assert_eq!(log, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_post_after_receiver_dropped() {
        let (tx, rx) = bridge::<u32>();
        drop(rx);
        assert!(matches!(tx.post(|_| {}), Err(Error::BridgeClosed)));
    }

    #[test]
    fn test_posts_from_many_threads() {
        let (tx, rx) = bridge::<u32>();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let tx = tx.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        tx.post(|n: &mut u32| *n += 1).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut total = 0;
        while let Ok(cb) = rx.channel().try_recv() {
            cb(&mut total);
        }
        assert_eq!(total, 100);
    }

    #[test]
    fn test_bounded_bridge_reports_capacity() {
        let (tx, rx) = bridge_bounded::<u32>(1);
        tx.post(|_| {}).unwrap();
        assert!(rx.channel().is_full());
    }
}
