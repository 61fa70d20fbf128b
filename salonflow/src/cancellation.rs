//! Cooperative cancellation for an abandoned registration flow.
//!
//! A wizard run is discarded when the applicant navigates away. The host
//! cancels the controller's token; async operations check it before they
//! start, and teardown callbacks run once with the reason. A delay already
//! in flight is never interrupted.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

type TeardownCallback = Box<dyn FnOnce(String) + Send>;

/// A token for cooperative cancellation.
///
/// Cancellation is idempotent; only the first reason is kept. Share it
/// behind an `Arc` between the host and the controller.
#[derive(Default)]
pub struct CancellationToken {
    cancelled: AtomicBool,
    reason: Mutex<Option<String>>,
    callbacks: Mutex<Vec<TeardownCallback>>,
}

impl CancellationToken {
    /// Creates a new, uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation with a reason.
    ///
    /// The first call wins; later calls are ignored. Teardown callbacks run
    /// once, in registration order, with panics logged and suppressed.
    pub fn cancel(&self, reason: impl Into<String>) {
        let reason = reason.into();
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        *self.reason.lock() = Some(reason.clone());

        let callbacks = std::mem::take(&mut *self.callbacks.lock());
        for callback in callbacks {
            let reason = reason.clone();
            if std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || callback(reason)))
                .is_err()
            {
                warn!("Teardown callback panicked during cancellation");
            }
        }
    }

    /// Registers a teardown callback.
    ///
    /// If the token is already cancelled, the callback runs immediately.
    pub fn on_cancel<F>(&self, callback: F)
    where
        F: FnOnce(String) + Send + 'static,
    {
        if self.is_cancelled() {
            let reason = self.reason().unwrap_or_default();
            callback(reason);
        } else {
            self.callbacks.lock().push(Box::new(callback));
        }
    }

    /// Returns whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Returns the cancellation reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        self.reason.lock().clone()
    }
}

impl std::fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .field("reason", &self.reason())
            .finish()
    }
}
