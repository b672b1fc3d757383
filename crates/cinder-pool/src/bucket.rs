//! A bounded stack of same-length arrays.

use crate::element::{create_array, PoolElement};

/// Result of returning an array to a [`Bucket`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PutOutcome {
    /// The array was stored; the bucket now holds `len` arrays.
    Stored { len: usize },
    /// The bucket was at capacity and the array was dropped.
    Full,
    /// The array length did not match and it was dropped.
    BadLength { expected: usize, actual: usize },
}

#[derive(Debug)]
pub(crate) struct Bucket<T> {
    array_size: usize,
    capacity: usize,
    arrays: Vec<Box<[T]>>,
}

impl<T: PoolElement> Bucket<T> {
    pub(crate) fn new(array_size: usize, capacity: usize) -> Self {
        Self {
            array_size,
            capacity,
            arrays: Vec::with_capacity(capacity),
        }
    }

    /// Pop the most recently returned array. `None` if empty.
    pub(crate) fn take(&mut self) -> Option<Box<[T]>> {
        self.arrays.pop()
    }

    /// A new array of this bucket's size.
    pub(crate) fn create(&self) -> Box<[T]> {
        create_array(self.array_size)
    }

    pub(crate) fn put(&mut self, array: Box<[T]>) -> PutOutcome {
        if array.len() != self.array_size {
            return PutOutcome::BadLength {
                expected: self.array_size,
                actual: array.len(),
            };
        }
        if self.arrays.len() >= self.capacity {
            return PutOutcome::Full;
        }
        self.arrays.push(array);
        PutOutcome::Stored {
            len: self.arrays.len(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.arrays.len()
    }

    pub(crate) fn array_size(&self) -> usize {
        self.array_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifo_reuse() {
        let mut bucket = Bucket::<i32>::new(4, 2);
        let mut a = bucket.create();
        a[0] = 1;
        let b = bucket.create();
        assert_eq!(bucket.put(b), PutOutcome::Stored { len: 1 });
        assert_eq!(bucket.put(a), PutOutcome::Stored { len: 2 });
        assert_eq!(bucket.take().unwrap()[0], 1);
        assert_eq!(bucket.len(), 1);
    }

    #[test]
    fn full_bucket_drops() {
        let mut bucket = Bucket::<u8>::new(4, 1);
        bucket.put(bucket.create());
        assert_eq!(bucket.put(bucket.create()), PutOutcome::Full);
        assert_eq!(bucket.len(), 1);
    }

    #[test]
    fn wrong_length_is_rejected() {
        let mut bucket = Bucket::<f64>::new(4, 1);
        let outcome = bucket.put(vec![0.0; 3].into_boxed_slice());
        assert_eq!(
            outcome,
            PutOutcome::BadLength {
                expected: 4,
                actual: 3
            }
        );
        assert_eq!(bucket.len(), 0);
        assert_eq!(bucket.array_size(), 4);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut bucket = Bucket::<f32>::new(4, 0);
        assert_eq!(bucket.put(bucket.create()), PutOutcome::Full);
        assert!(bucket.take().is_none());
    }
}
