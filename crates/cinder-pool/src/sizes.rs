//! The process-wide size-class table and growth rule.
//!
//! Every cache shares one table: bucket `i` holds arrays of exactly
//! [`ARRAY_SIZES`]`[i]` elements, starting at [`MIN_ARRAY_SIZE`] and
//! growing by a factor of four. Requests above [`MAX_ARRAY_SIZE`] bypass
//! the pool.

/// Number of size classes.
pub const BUCKETS: usize = 8;

/// Length of the smallest pooled array, in elements.
pub const MIN_ARRAY_SIZE: usize = 4096;

/// Each size class is `1 << GROWTH_SHIFT` times the previous one.
const GROWTH_SHIFT: u32 = 2;

/// Array length of each size class, ascending.
pub const ARRAY_SIZES: [usize; BUCKETS] = build_sizes();

/// Length of the largest pooled array. Longer requests are oversize.
pub const MAX_ARRAY_SIZE: usize = ARRAY_SIZES[BUCKETS - 1];

/// Above this length, growth switches from x2 to x1.5.
pub const THRESHOLD_ARRAY_SIZE: usize = 16 * 1024 * 1024;

/// Grown sizes that fall short of the need are aligned to this many elements.
const ALIGN_SHIFT: u32 = 12;

const fn build_sizes() -> [usize; BUCKETS] {
    let mut sizes = [0; BUCKETS];
    let mut size = MIN_ARRAY_SIZE;
    let mut i = 0;
    while i < BUCKETS {
        sizes[i] = size;
        size <<= GROWTH_SHIFT;
        i += 1;
    }
    sizes
}

/// Index of the smallest size class that can hold `length` elements, or
/// `None` if `length` exceeds [`MAX_ARRAY_SIZE`].
pub fn bucket_for(length: usize) -> Option<usize> {
    ARRAY_SIZES.iter().position(|&size| length <= size)
}

/// Target length when growing an array whose used prefix is `cur_size`
/// elements so that it can hold `need_size`.
///
/// Doubles `cur_size` (or grows it by half past [`THRESHOLD_ARRAY_SIZE`]).
/// If that is not strictly larger than `need_size`, the need is instead
/// rounded up to the next multiple of 4096 above it. Saturates rather
/// than overflowing.
pub fn new_size(cur_size: usize, need_size: usize) -> usize {
    let mut size = if cur_size > THRESHOLD_ARRAY_SIZE {
        cur_size.saturating_add(cur_size >> 1)
    } else {
        cur_size.saturating_mul(2)
    };
    if size <= need_size {
        size = ((need_size >> ALIGN_SHIFT) + 1)
            .checked_shl(ALIGN_SHIFT)
            .filter(|&aligned| aligned > need_size)
            .unwrap_or(usize::MAX);
    }
    size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_grow_by_four_from_4k() {
        assert_eq!(ARRAY_SIZES[0], 4096);
        assert_eq!(ARRAY_SIZES[1], 16_384);
        assert_eq!(MAX_ARRAY_SIZE, 4096 << 14);
        assert!(ARRAY_SIZES.windows(2).all(|w| w[1] == w[0] * 4));
    }

    #[test]
    fn bucket_for_picks_smallest_fit() {
        assert_eq!(bucket_for(0), Some(0));
        assert_eq!(bucket_for(4096), Some(0));
        assert_eq!(bucket_for(4097), Some(1));
        assert_eq!(bucket_for(MAX_ARRAY_SIZE), Some(BUCKETS - 1));
        assert_eq!(bucket_for(MAX_ARRAY_SIZE + 1), None);
    }

    #[test]
    fn new_size_doubles_small_arrays() {
        assert_eq!(new_size(4096, 5000), 8192);
    }

    #[test]
    fn new_size_grows_by_half_past_threshold() {
        let cur = THRESHOLD_ARRAY_SIZE + 4096;
        assert_eq!(new_size(cur, cur + 1), cur + cur / 2);
    }

    #[test]
    fn new_size_aligns_when_doubling_falls_short() {
        assert_eq!(new_size(10, 5000), 8192);
        assert_eq!(new_size(0, 4096), 8192);
        assert_eq!(new_size(0, 1), 4096);
    }

    #[test]
    fn new_size_is_strictly_greater_than_need() {
        // Doubling lands exactly on the need: must still go past it.
        assert!(new_size(2048, 4096) > 4096);
    }

    #[test]
    fn new_size_saturates() {
        assert_eq!(new_size(usize::MAX, usize::MAX), usize::MAX);
        assert_eq!(new_size(0, usize::MAX - 1), usize::MAX);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn grown_size_exceeds_need(cur in 0usize..1 << 30, need in 0usize..1 << 30) {
                prop_assert!(new_size(cur, need) > need);
            }
        }
    }
}
