//! Optional usage counters for array caches.

use indexmap::IndexMap;

use crate::sizes::{ARRAY_SIZES, BUCKETS};

/// Counters for one size class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BucketStats {
    /// Arrays requested from this bucket.
    pub get_op: u64,
    /// Requests that found the bucket empty and allocated.
    pub create_op: u64,
    /// Arrays returned to this bucket, including ones dropped as surplus.
    pub return_op: u64,
    /// Highest number of arrays the bucket has held at once.
    pub max_size: usize,
}

impl BucketStats {
    fn is_idle(&self) -> bool {
        self.get_op == 0 && self.return_op == 0
    }
}

/// Counters for one cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheStats {
    /// Cache name, e.g. `DirtyArrayCache<f64>`.
    pub name: String,
    /// Per-size-class counters, indexed like [`ARRAY_SIZES`].
    pub buckets: [BucketStats; BUCKETS],
    /// Requests larger than the largest size class.
    pub oversize: u64,
    /// Grow operations that actually reallocated.
    pub resize: u64,
    /// Total length of all initial arrays handed to references.
    pub total_initial: u64,
}

impl CacheStats {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            buckets: [BucketStats::default(); BUCKETS],
            oversize: 0,
            resize: 0,
            total_initial: 0,
        }
    }

    /// Counters of every bucket that saw traffic, keyed by array size in
    /// ascending order.
    pub fn bucket_report(&self) -> IndexMap<usize, BucketStats> {
        ARRAY_SIZES
            .iter()
            .zip(self.buckets.iter())
            .filter(|(_, stats)| !stats.is_idle())
            .map(|(&size, &stats)| (size, stats))
            .collect()
    }

    /// Whether nothing has been counted yet.
    pub fn is_empty(&self) -> bool {
        self.oversize == 0
            && self.resize == 0
            && self.total_initial == 0
            && self.buckets.iter().all(BucketStats::is_idle)
    }

    /// Write the non-idle counters to the log at info level.
    pub fn dump(&self) {
        if self.is_empty() {
            return;
        }
        log::info!(
            "{}: oversize={} resize={} total_initial={}",
            self.name,
            self.oversize,
            self.resize,
            self.total_initial
        );
        for (size, stats) in self.bucket_report() {
            log::info!(
                "{}: bucket[{size}] get={} create={} return={} max={}",
                self.name,
                stats.get_op,
                stats.create_op,
                stats.return_op,
                stats.max_size
            );
        }
    }
}
