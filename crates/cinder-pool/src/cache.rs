//! Per-element-type array cache.
//!
//! An [`ArrayCache`] owns one [`Bucket`] per size class, built lazily
//! behind a [`SoftTable`] so a memory reclaimer can evict the whole table
//! between uses. Arrays are handed out and taken back through
//! [`ArrayRef`]s created with [`ArrayCache::new_ref`].
//!
//! The cache is confined to one rendering context: it uses interior
//! mutability without locking and is `Send` but not `Sync`. Only its
//! [`ReclaimHandle`] crosses threads.

use std::cell::RefCell;

use crossbeam_channel::Receiver;

use crate::bucket::{Bucket, PutOutcome};
use crate::config::CacheConfig;
use crate::diagnostic::{DiagnosticSink, PoolDiagnostic};
use crate::element::{create_array, PoolElement};
use crate::reference::ArrayRef;
use crate::sizes::{bucket_for, ARRAY_SIZES};
use crate::soft::{ReclaimHandle, SoftTable};
use crate::stats::CacheStats;

/// A bucketed, size-classed pool of `T` arrays.
///
/// Clean caches guarantee every array they hand out is zero-filled; dirty
/// caches do not. See [`CacheConfig`] for the tuning knobs.
#[derive(Debug)]
pub struct ArrayCache<T: PoolElement> {
    config: CacheConfig,
    name: String,
    table: RefCell<SoftTable<Vec<Bucket<T>>>>,
    stats: RefCell<Option<CacheStats>>,
    diagnostics: RefCell<DiagnosticSink>,
}

impl<T: PoolElement> ArrayCache<T> {
    /// Create a cache with its own reclaim trigger.
    pub fn new(clean: bool, bucket_capacity: usize) -> Self {
        Self::with_config(CacheConfig::new(clean, bucket_capacity))
    }

    /// Create a cache from a full configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self::with_reclaim(config, ReclaimHandle::new())
    }

    /// Create a cache whose bucket table is evicted whenever `handle` is
    /// triggered.
    pub fn with_reclaim(config: CacheConfig, handle: ReclaimHandle) -> Self {
        let name = format!(
            "{}ArrayCache<{}>",
            if config.clean { "Clean" } else { "Dirty" },
            T::NAME
        );
        let stats = config.stats.then(|| CacheStats::new(&name));
        Self {
            config,
            name,
            table: RefCell::new(SoftTable::new(handle)),
            stats: RefCell::new(stats),
            diagnostics: RefCell::new(DiagnosticSink::default()),
        }
    }

    /// Create a reference owning a fresh initial array of `initial_size`
    /// elements.
    pub fn new_ref(&self, initial_size: usize) -> ArrayRef<'_, T> {
        self.with_stats(|s| s.total_initial += initial_size as u64);
        ArrayRef::new(self, create_array(initial_size))
    }

    /// Whether arrays handed out are guaranteed zero-filled.
    pub fn is_clean(&self) -> bool {
        self.config.clean
    }

    /// Log prefix, e.g. `CleanArrayCache<i32>`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The configuration this cache was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// The trigger that evicts this cache's bucket table.
    pub fn reclaim_handle(&self) -> ReclaimHandle {
        self.table.borrow().handle().clone()
    }

    /// Drop the bucket table now. Returns `true` if one was resident.
    pub fn reclaim(&self) -> bool {
        let evicted = self.table.borrow_mut().reclaim();
        if evicted {
            log::debug!("{}: bucket table reclaimed", self.name);
        }
        evicted
    }

    /// Whether a bucket table is resident and no reclaim is pending.
    pub fn is_resident(&self) -> bool {
        self.table.borrow().is_resident()
    }

    /// Number of arrays currently pooled in size class `bucket`.
    ///
    /// Zero when the table is not resident or `bucket` is out of range.
    pub fn pooled_count(&self, bucket: usize) -> usize {
        let table = self.table.borrow();
        if !table.is_resident() {
            return 0;
        }
        drop(table);
        self.with_buckets(|buckets| buckets.get(bucket).map_or(0, Bucket::len))
    }

    /// Subscribe to misuse diagnostics. Replaces any earlier subscriber.
    pub fn diagnostics(&self) -> Receiver<PoolDiagnostic> {
        self.diagnostics.borrow_mut().subscribe()
    }

    /// Snapshot of the statistics, if enabled.
    ///
    /// The snapshot is detached from the cache, so it can be held across
    /// further acquires and releases.
    pub fn stats(&self) -> Option<CacheStats> {
        self.stats.borrow().clone()
    }

    /// Log the statistics at info level, if enabled.
    pub fn dump_stats(&self) {
        if let Some(stats) = self.stats.borrow().as_ref() {
            stats.dump();
        }
    }

    pub(crate) fn with_stats(&self, f: impl FnOnce(&mut CacheStats)) {
        if let Some(stats) = self.stats.borrow_mut().as_mut() {
            f(stats);
        }
    }

    pub(crate) fn emit(&self, diagnostic: PoolDiagnostic) {
        self.diagnostics.borrow_mut().emit(&self.name, diagnostic);
    }

    fn with_buckets<R>(&self, f: impl FnOnce(&mut Vec<Bucket<T>>) -> R) -> R {
        let mut table = self.table.borrow_mut();
        if table.refresh() {
            log::debug!("{}: bucket table evicted", self.name);
        }
        let capacity = self.config.bucket_capacity;
        let name = &self.name;
        let buckets = table.get_or_insert_with(|| {
            log::debug!("{name}: building bucket table");
            ARRAY_SIZES
                .iter()
                .map(|&size| Bucket::new(size, capacity))
                .collect()
        });
        f(buckets)
    }

    /// Take an array from size class `bucket`, allocating if it is empty.
    pub(crate) fn take_from_bucket(&self, bucket: usize) -> Box<[T]> {
        let (array, created) = self.with_buckets(|buckets| {
            let b = &mut buckets[bucket];
            match b.take() {
                Some(array) => (array, false),
                None => (b.create(), true),
            }
        });
        self.with_stats(|s| {
            let b = &mut s.buckets[bucket];
            b.get_op += 1;
            if created {
                b.create_op += 1;
            }
        });
        array
    }

    /// Return a pooled-range array to the bucket matching its length.
    pub(crate) fn put_to_bucket(&self, array: Box<[T]>) {
        let Some(bucket) = bucket_for(array.len()) else {
            return;
        };
        let outcome = self.with_buckets(|buckets| buckets[bucket].put(array));
        match outcome {
            PutOutcome::Stored { len } => self.with_stats(|s| {
                let b = &mut s.buckets[bucket];
                b.return_op += 1;
                b.max_size = b.max_size.max(len);
            }),
            PutOutcome::Full => {
                self.with_stats(|s| s.buckets[bucket].return_op += 1);
                self.emit(PoolDiagnostic::CapacityExceeded {
                    array_size: ARRAY_SIZES[bucket],
                });
            }
            PutOutcome::BadLength { expected, actual } => {
                self.emit(PoolDiagnostic::BadLength { expected, actual });
            }
        }
    }
}

impl<T: PoolElement> Default for ArrayCache<T> {
    fn default() -> Self {
        Self::with_config(CacheConfig::default())
    }
}
