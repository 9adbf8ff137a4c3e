//! Session state broadcast.
//!
//! The request pipeline reports a rejected credential by invalidating the
//! session here; the composition root subscribes and decides what to show.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use janitor_domain::SessionState;
use tokio::sync::watch;

/// Observable session state shared by the pipeline and the application root.
#[derive(Debug, Clone)]
pub struct SessionMonitor {
    sender: Arc<watch::Sender<SessionState>>,
    invalidations: Arc<AtomicU64>,
}

impl Default for SessionMonitor {
    fn default() -> Self {
        Self::new(SessionState::default())
    }
}

impl SessionMonitor {
    /// Creates a monitor starting in `initial`.
    #[must_use]
    pub fn new(initial: SessionState) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
            invalidations: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        *self.sender.borrow()
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.sender.subscribe()
    }

    /// Marks the session authenticated.
    pub fn mark_authenticated(&self) {
        self.sender.send_replace(SessionState::Authenticated);
    }

    /// Marks the session unauthenticated after a credential was rejected
    /// or cleared. Subscribers are notified even if the state is unchanged.
    pub fn invalidate(&self) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
        self.sender.send_replace(SessionState::Unauthenticated);
    }

    /// Number of invalidations since creation.
    #[must_use]
    pub fn invalidations(&self) -> u64 {
        self.invalidations.load(Ordering::Relaxed)
    }
}
