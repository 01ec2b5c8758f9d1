//! One-shot debounce timer driving the deferred resort.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::sleep;
use tracing::{debug, trace};

use hublist_core::UserList;

/// Quiet period between the first identity-change notification and the
/// deferred resort.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(7);

/// Coalesces bursts of "identity changed" notifications into one deferred
/// full resort.
///
/// Exactly one timer instance exists at a time: [`mark_dirty`] while a
/// resort is pending neither stacks a second timer nor restarts the
/// running one. This is the only path that resorts the list outside an
/// explicit sort-control call.
///
/// [`mark_dirty`]: ResortScheduler::mark_dirty
pub struct ResortScheduler {
    list: Arc<RwLock<UserList>>,
    debounce: Duration,
    pending: Arc<AtomicBool>,
}

impl ResortScheduler {
    /// Create a scheduler with the default quiet period.
    pub fn new(list: Arc<RwLock<UserList>>) -> Self {
        Self::with_debounce(list, DEFAULT_DEBOUNCE)
    }

    /// Create a scheduler with a custom quiet period.
    pub fn with_debounce(list: Arc<RwLock<UserList>>, debounce: Duration) -> Self {
        Self {
            list,
            debounce,
            pending: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Note that some record's identity changed.
    ///
    /// Arms the one-shot timer if none is pending. When the timer expires
    /// the list is resorted under its current sort state and the pending
    /// flag clears, re-arming the scheduler for the next burst.
    pub fn mark_dirty(&self) {
        if self.pending.swap(true, Ordering::SeqCst) {
            trace!("resort already pending");
            return;
        }

        debug!(debounce = ?self.debounce, "deferred resort armed");

        let list = Arc::clone(&self.list);
        let pending = Arc::clone(&self.pending);
        let debounce = self.debounce;

        tokio::spawn(async move {
            sleep(debounce).await;
            list.write().await.resort();
            // Cleared only after the resort completes.
            pending.store(false, Ordering::SeqCst);
            debug!("deferred resort done");
        });
    }

    /// Whether a resort is currently pending.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }
}
