//! The caches one rendering context needs, under one reclaim trigger.

use crate::cache::ArrayCache;
use crate::config::CacheConfig;
use crate::soft::ReclaimHandle;

/// Dirty `u8`, clean and dirty `i32`, dirty `f32` and dirty `f64` caches
/// sharing one [`ReclaimHandle`].
#[derive(Debug)]
pub struct CacheSet {
    /// Dirty byte arrays (coverage alpha rows).
    pub dirty_bytes: ArrayCache<u8>,
    /// Clean int arrays (edge buckets, crossing counts).
    pub clean_ints: ArrayCache<i32>,
    /// Dirty int arrays.
    pub dirty_ints: ArrayCache<i32>,
    /// Dirty float arrays (edge storage).
    pub dirty_floats: ArrayCache<f32>,
    /// Dirty double arrays (path coordinates).
    pub dirty_doubles: ArrayCache<f64>,
    handle: ReclaimHandle,
}

impl CacheSet {
    /// Create a set with `bucket_capacity` arrays per size class.
    pub fn new(bucket_capacity: usize) -> Self {
        Self::with_config(CacheConfig::new(false, bucket_capacity))
    }

    /// Create a set from a template config; `clean` is overridden per cache.
    pub fn with_config(template: CacheConfig) -> Self {
        let handle = ReclaimHandle::new();
        let dirty = CacheConfig {
            clean: false,
            ..template.clone()
        };
        let clean = CacheConfig {
            clean: true,
            ..template
        };
        Self {
            dirty_bytes: ArrayCache::with_reclaim(dirty.clone(), handle.clone()),
            clean_ints: ArrayCache::with_reclaim(clean, handle.clone()),
            dirty_ints: ArrayCache::with_reclaim(dirty.clone(), handle.clone()),
            dirty_floats: ArrayCache::with_reclaim(dirty.clone(), handle.clone()),
            dirty_doubles: ArrayCache::with_reclaim(dirty, handle.clone()),
            handle,
        }
    }

    /// The trigger shared by every cache in the set.
    pub fn reclaim_handle(&self) -> ReclaimHandle {
        self.handle.clone()
    }

    /// Evict every cache's bucket table.
    pub fn reclaim_all(&self) {
        self.handle.request();
    }

    /// Log every cache's statistics at info level.
    pub fn dump_stats(&self) {
        self.dirty_bytes.dump_stats();
        self.clean_ints.dump_stats();
        self.dirty_ints.dump_stats();
        self.dirty_floats.dump_stats();
        self.dirty_doubles.dump_stats();
    }
}

impl Default for CacheSet {
    fn default() -> Self {
        Self::new(CacheConfig::DEFAULT_BUCKET_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_int_cache_is_clean() {
        let set = CacheSet::default();
        assert!(set.clean_ints.is_clean());
        assert!(!set.dirty_ints.is_clean());
        assert!(!set.dirty_bytes.is_clean());
        assert_eq!(set.dirty_doubles.name(), "DirtyArrayCache<f64>");
    }

    #[test]
    fn reclaim_all_evicts_every_table() {
        let set = CacheSet::new(2);
        let mut bytes = set.dirty_bytes.new_ref(0);
        let mut doubles = set.dirty_doubles.new_ref(0);
        let b = bytes.acquire(10);
        let d = doubles.acquire(10);
        bytes.release(b, 0);
        doubles.release(d, 0);
        assert!(set.dirty_bytes.is_resident());
        set.reclaim_all();
        assert!(!set.dirty_bytes.is_resident());
        assert!(!set.dirty_doubles.is_resident());
        assert_eq!(set.dirty_doubles.pooled_count(0), 0);
    }

    #[test]
    fn template_settings_apply_to_all() {
        let set = CacheSet::with_config(CacheConfig::new(false, 3).with_stats(true));
        assert_eq!(set.clean_ints.config().bucket_capacity, 3);
        assert!(set.dirty_floats.stats().is_some());
        assert!(set.clean_ints.config().stats);
    }
}
