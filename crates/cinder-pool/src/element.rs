//! Element types that can be pooled.

use std::fmt::Debug;

/// A plain numeric element stored in pooled arrays.
///
/// `Default::default()` must be the all-zero value: clean caches clear
/// arrays by filling them with it.
pub trait PoolElement: Copy + Default + PartialEq + Debug + 'static {
    /// Short type name used in log prefixes.
    const NAME: &'static str;
}

impl PoolElement for u8 {
    const NAME: &'static str = "u8";
}

impl PoolElement for i32 {
    const NAME: &'static str = "i32";
}

impl PoolElement for f32 {
    const NAME: &'static str = "f32";
}

impl PoolElement for f64 {
    const NAME: &'static str = "f64";
}

/// Allocate a zero-filled array of `len` elements.
pub(crate) fn create_array<T: PoolElement>(len: usize) -> Box<[T]> {
    vec![T::default(); len].into_boxed_slice()
}
