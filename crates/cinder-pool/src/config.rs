//! Array cache configuration parameters.

/// Configuration for an [`ArrayCache`](crate::ArrayCache).
///
/// All values are fixed at construction. The size-class table itself is
/// not configurable; see [`sizes`](crate::sizes).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    /// Guarantee that every array handed out is zero-filled.
    ///
    /// Dirty caches (`false`) skip clearing on release and may hand out
    /// arrays with stale contents. Use them only when the consumer always
    /// writes before it reads.
    pub clean: bool,

    /// Maximum number of arrays retained per size class.
    ///
    /// Default: 8. Releases beyond this drop the array.
    pub bucket_capacity: usize,

    /// Collect per-bucket and per-cache usage statistics. Default: off.
    pub stats: bool,

    /// After each clearing release, scan the whole array and report any
    /// element that is still non-zero. O(array length). Default: off.
    pub checks: bool,

    /// Clear released arrays even in dirty caches. Default: off.
    pub clean_dirty: bool,

    /// Log every oversize request at info level. Default: off.
    pub log_oversize: bool,

    /// Log every grow operation at info level. Default: off.
    pub log_widen: bool,
}

impl CacheConfig {
    /// Default number of arrays retained per size class.
    pub const DEFAULT_BUCKET_CAPACITY: usize = 8;

    /// Create a config with the given cleanliness and bucket capacity.
    ///
    /// All diagnostics and statistics are off.
    pub fn new(clean: bool, bucket_capacity: usize) -> Self {
        Self {
            clean,
            bucket_capacity,
            stats: false,
            checks: false,
            clean_dirty: false,
            log_oversize: false,
            log_widen: false,
        }
    }

    /// Enable or disable statistics collection.
    pub fn with_stats(mut self, on: bool) -> Self {
        self.stats = on;
        self
    }

    /// Enable or disable zero-fill verification.
    pub fn with_checks(mut self, on: bool) -> Self {
        self.checks = on;
        self
    }

    /// Enable or disable clearing of arrays released to dirty caches.
    pub fn with_clean_dirty(mut self, on: bool) -> Self {
        self.clean_dirty = on;
        self
    }

    /// Enable or disable oversize and grow tracing.
    pub fn with_tracing(mut self, oversize: bool, widen: bool) -> Self {
        self.log_oversize = oversize;
        self.log_widen = widen;
        self
    }

    /// Whether releases must zero the used range.
    pub(crate) fn clears_on_release(&self) -> bool {
        self.clean || self.clean_dirty
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(false, Self::DEFAULT_BUCKET_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_dirty_and_quiet() {
        let config = CacheConfig::default();
        assert!(!config.clean);
        assert_eq!(config.bucket_capacity, 8);
        assert!(!config.stats && !config.checks && !config.clean_dirty);
        assert!(!config.clears_on_release());
    }

    #[test]
    fn clean_dirty_policy_forces_clearing() {
        let config = CacheConfig::new(false, 4).with_clean_dirty(true);
        assert!(config.clears_on_release());
    }

    #[test]
    fn builders_compose() {
        let config = CacheConfig::new(true, 2)
            .with_stats(true)
            .with_checks(true)
            .with_tracing(true, false);
        assert!(config.stats && config.checks && config.log_oversize);
        assert!(!config.log_widen);
        assert_eq!(config.bucket_capacity, 2);
    }
}
