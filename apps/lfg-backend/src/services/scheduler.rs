//! Idle-timeout reclamation scheduler.
//!
//! A process-wide registry mapping a resource id to at most one pending
//! delayed action. `start` is idempotent per key and the registry entry is
//! taken through the dashmap entry lock, so interleaved membership events
//! for the same resource cannot double-arm a timer. Cancellation is
//! cooperative: once a timer has woken and removed its entry, a late
//! `cancel` no longer stops the action.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Clone, Default)]
pub struct ReclaimScheduler {
    tasks: Arc<DashMap<i64, JoinHandle<()>>>,
}

impl ReclaimScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a delayed action for `key`. Returns `false` without scheduling
    /// anything when a timer for `key` is already pending.
    ///
    /// After `delay` the task re-evaluates `condition`, since state may
    /// have changed during the wait, and only runs `action` if it holds.
    pub fn start<C, A>(&self, key: i64, delay: Duration, condition: C, action: A) -> bool
    where
        C: Future<Output = bool> + Send + 'static,
        A: Future<Output = ()> + Send + 'static,
    {
        match self.tasks.entry(key) {
            Entry::Occupied(_) => {
                debug!(key, "timer already armed, ignoring start");
                false
            }
            Entry::Vacant(slot) => {
                let tasks = Arc::clone(&self.tasks);
                let handle = tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    // Deregister before acting so the action itself may
                    // re-arm the same key.
                    tasks.remove(&key);
                    if condition.await {
                        action.await;
                    }
                });
                slot.insert(handle);
                debug!(key, delay_secs = delay.as_secs(), "timer armed");
                true
            }
        }
    }

    /// Stop a pending timer. Cancelling an absent key is a no-op.
    pub fn cancel(&self, key: i64) -> bool {
        if let Some((_, handle)) = self.tasks.remove(&key) {
            handle.abort();
            debug!(key, "timer cancelled");
            true
        } else {
            false
        }
    }

    pub fn is_armed(&self, key: i64) -> bool {
        self.tasks.contains_key(&key)
    }
}
