//! Pool handles.
//!
//! An [`ArrayRef`] is what a rendering context holds: it owns one
//! *initial* array sized for the common case, and routes every other
//! acquire, grow and release through its [`ArrayCache`]. The initial
//! array never enters a bucket; releasing it sends it home to the
//! reference that created it.

use crate::cache::ArrayCache;
use crate::diagnostic::PoolDiagnostic;
use crate::element::{create_array, PoolElement};
use crate::sizes::{bucket_for, new_size, MAX_ARRAY_SIZE};

/// A handle onto an [`ArrayCache`] with its own initial array.
#[derive(Debug)]
pub struct ArrayRef<'c, T: PoolElement> {
    cache: &'c ArrayCache<T>,
    home: Option<Box<[T]>>,
    initial_addr: usize,
    initial_len: usize,
}

impl<'c, T: PoolElement> ArrayRef<'c, T> {
    pub(crate) fn new(cache: &'c ArrayCache<T>, initial: Box<[T]>) -> Self {
        Self {
            cache,
            initial_addr: initial.as_ptr() as usize,
            initial_len: initial.len(),
            home: Some(initial),
        }
    }

    /// The cache this reference draws from.
    pub fn cache(&self) -> &'c ArrayCache<T> {
        self.cache
    }

    /// Length of the initial array.
    pub fn initial_len(&self) -> usize {
        self.initial_len
    }

    /// Whether the initial array is currently held by this reference.
    pub fn is_initial_home(&self) -> bool {
        self.home.is_some()
    }

    /// Lend out the initial array.
    ///
    /// If it is already lent, falls back to an array of at least the
    /// initial size from the pool.
    pub fn initial(&mut self) -> Box<[T]> {
        match self.home.take() {
            Some(array) => array,
            None => self.acquire(self.initial_len),
        }
    }

    /// An array of at least `length` elements.
    ///
    /// Pooled lengths come from the matching size class, so the result is
    /// usually longer than asked. Longer than [`MAX_ARRAY_SIZE`], a fresh
    /// array of exactly `length` is allocated and will not be retained.
    pub fn acquire(&self, length: usize) -> Box<[T]> {
        if let Some(bucket) = bucket_for(length) {
            return self.cache.take_from_bucket(bucket);
        }
        self.cache.with_stats(|s| s.oversize += 1);
        if self.cache.config().log_oversize {
            self.cache.emit(PoolDiagnostic::Oversize { length });
        }
        create_array(length)
    }

    /// Ensure `array` can hold `needed` elements, keeping its first `used`.
    ///
    /// Returns `array` itself when it is already long enough. Otherwise
    /// the prefix is copied into a larger array and `array` is released.
    pub fn grow(&mut self, array: Box<[T]>, used: usize, needed: usize) -> Box<[T]> {
        let old_len = array.len();
        if old_len >= needed {
            return array;
        }
        let used = used.min(old_len);
        self.cache.with_stats(|s| s.resize += 1);
        let mut grown = self.acquire(new_size(used, needed));
        grown[..used].copy_from_slice(&array[..used]);
        self.release(array, used);
        if self.cache.config().log_widen {
            log::info!(
                "{}: grow: length {old_len} -> {} (used {used}, needed {needed})",
                self.cache.name(),
                grown.len()
            );
        }
        grown
    }

    /// Give `array` back, clearing its first `used` elements as needed.
    pub fn release(&mut self, array: Box<[T]>, used: usize) {
        self.release_range(array, 0, used);
    }

    /// Give `array` back, clearing `[from, to)` as needed.
    ///
    /// Clean caches (or dirty ones with `clean_dirty`) zero the range. The
    /// initial array goes home; other pooled-range arrays go to their
    /// bucket, and oversize arrays are dropped.
    pub fn release_range(&mut self, mut array: Box<[T]>, from: usize, to: usize) {
        let to = to.min(array.len());
        let from = from.min(to);
        let is_initial = self.is_initial(&array);
        let config = self.cache.config();

        if config.clears_on_release() && to != 0 && (is_initial || array.len() <= MAX_ARRAY_SIZE)
        {
            array[from..to].fill(T::default());
            if config.checks {
                self.check_cleared(&mut array, from, to);
            }
        }

        if is_initial {
            self.home = Some(array);
        } else if array.len() <= MAX_ARRAY_SIZE {
            self.cache.put_to_bucket(array);
        }
    }

    /// Release `array` and get the initial array back.
    pub fn recycle(&mut self, array: Box<[T]>, used: usize) -> Box<[T]> {
        self.release(array, used);
        self.initial()
    }

    fn is_initial(&self, array: &[T]) -> bool {
        self.home.is_none()
            && array.as_ptr() as usize == self.initial_addr
            && array.len() == self.initial_len
    }

    fn check_cleared(&self, array: &mut [T], from: usize, to: usize) {
        let zero = T::default();
        if let Some(index) = array.iter().position(|v| *v != zero) {
            self.cache.emit(PoolDiagnostic::NotCleared { index, from, to });
            array.fill(zero);
        }
    }
}
