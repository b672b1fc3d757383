//! Reclaimable bucket tables.
//!
//! A [`SoftTable`] holds a lazily-built value that the owner of a
//! [`ReclaimHandle`] may evict at any time, from any thread. Eviction is
//! observed on the next access, which rebuilds the value from scratch.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared eviction trigger.
///
/// Cloning shares the trigger; one [`request`](Self::request) evicts every
/// table built on it.
#[derive(Clone, Debug, Default)]
pub struct ReclaimHandle {
    epoch: Arc<AtomicU64>,
}

impl ReclaimHandle {
    /// Create a fresh trigger with no reclaim requested.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every table sharing this handle to drop its contents.
    pub fn request(&self) {
        self.epoch.fetch_add(1, Ordering::Release);
    }

    /// Number of reclaims requested so far.
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }
}

/// A value that may be evicted through a [`ReclaimHandle`].
#[derive(Debug)]
pub struct SoftTable<V> {
    value: Option<V>,
    handle: ReclaimHandle,
    seen: u64,
}

impl<V> SoftTable<V> {
    /// Create an empty table tied to `handle`.
    pub fn new(handle: ReclaimHandle) -> Self {
        let seen = handle.epoch();
        Self {
            value: None,
            handle,
            seen,
        }
    }

    /// Apply any pending reclaim. Returns `true` if a value was evicted.
    pub fn refresh(&mut self) -> bool {
        let epoch = self.handle.epoch();
        if epoch == self.seen {
            return false;
        }
        self.seen = epoch;
        self.value.take().is_some()
    }

    /// The current value, building it with `init` if absent or evicted.
    pub fn get_or_insert_with(&mut self, init: impl FnOnce() -> V) -> &mut V {
        self.refresh();
        self.value.get_or_insert_with(init)
    }

    /// Drop the value now. Returns `true` if one was resident.
    pub fn reclaim(&mut self) -> bool {
        self.seen = self.handle.epoch();
        self.value.take().is_some()
    }

    /// Whether a value is resident and no reclaim is pending.
    pub fn is_resident(&self) -> bool {
        self.value.is_some() && self.handle.epoch() == self.seen
    }

    /// The trigger this table listens to.
    pub fn handle(&self) -> &ReclaimHandle {
        &self.handle
    }
}
