//! End-to-end pool behaviour through the public API.

use cinder_pool::{
    ArrayCache, BucketedArrayPool, CacheConfig, CacheSet, PoolDiagnostic, ARRAY_SIZES,
    MAX_ARRAY_SIZE, MIN_ARRAY_SIZE,
};

fn with_stats<T: cinder_pool::PoolElement>(clean: bool, capacity: usize) -> ArrayCache<T> {
    ArrayCache::with_config(CacheConfig::new(clean, capacity).with_stats(true))
}

#[test_log::test]
fn release_then_acquire_reuses_the_size_class() {
    let pool: BucketedArrayPool<f64> = with_stats(false, 4);
    let mut r = pool.new_ref(0);
    for &n in &[1, 4096, 5000, ARRAY_SIZES[2]] {
        let first = r.acquire(n);
        let len = first.len();
        let addr = first.as_ptr();
        r.release(first, 0);
        let second = r.acquire(n);
        assert_eq!(second.len(), len);
        assert_eq!(second.as_ptr(), addr);
        r.release(second, 0);
    }
}

#[test_log::test]
fn oversize_arrays_are_never_reused() {
    let pool: BucketedArrayPool<u8> = with_stats(false, 4);
    let mut r = pool.new_ref(0);
    let n = MAX_ARRAY_SIZE + 1;
    let first = r.acquire(n);
    assert_eq!(first.len(), n);
    r.release(first, 0);
    let second = r.acquire(n);
    assert_eq!(second.len(), n);
    let stats = pool.stats().unwrap();
    assert_eq!(stats.oversize, 2);
    assert!(stats.bucket_report().is_empty());
}

#[test_log::test]
fn grow_exceeds_need_and_keeps_prefix() {
    let pool = ArrayCache::<i32>::new(false, 4);
    let mut r = pool.new_ref(16);
    let mut array = r.initial();
    for (i, v) in array.iter_mut().enumerate() {
        *v = i as i32;
    }
    let grown = r.grow(array, 16, 10_000);
    assert!(grown.len() > 10_000);
    assert_eq!(&grown[..16], &(0..16).collect::<Vec<i32>>()[..]);
}

#[test_log::test]
fn clean_pool_returns_zeroed_arrays() {
    let pool = ArrayCache::<i32>::new(true, 4);
    let mut r = pool.new_ref(0);
    let mut array = r.acquire(MIN_ARRAY_SIZE);
    array.fill(3);
    r.release(array, MIN_ARRAY_SIZE);
    let again = r.acquire(MIN_ARRAY_SIZE);
    assert!(again.iter().all(|&v| v == 0));
}

#[test_log::test]
fn bucket_capacity_bounds_pooled_arrays() {
    let pool: BucketedArrayPool<i32> = with_stats(false, 2);
    let rx = pool.diagnostics();
    let mut r = pool.new_ref(0);

    let arrays: Vec<_> = (0..3).map(|_| r.acquire(MIN_ARRAY_SIZE)).collect();
    for a in arrays {
        r.release(a, 0);
    }
    assert_eq!(pool.pooled_count(0), 2);
    assert_eq!(
        rx.try_recv().unwrap(),
        PoolDiagnostic::CapacityExceeded {
            array_size: MIN_ARRAY_SIZE
        }
    );

    let created = pool.stats().unwrap().buckets[0].create_op;
    assert_eq!(created, 3);
    let fourth = r.acquire(MIN_ARRAY_SIZE);
    let fifth = r.acquire(MIN_ARRAY_SIZE);
    assert_eq!(pool.stats().unwrap().buckets[0].create_op, 3);
    let sixth = r.acquire(MIN_ARRAY_SIZE);
    let stats = pool.stats().unwrap();
    assert_eq!(stats.buckets[0].create_op, 4);
    assert_eq!(stats.buckets[0].get_op, 6);
    assert_eq!(stats.buckets[0].return_op, 3);
    assert_eq!(stats.buckets[0].max_size, 2);
    drop((fourth, fifth, sixth));
}

#[test_log::test]
fn initial_array_never_enters_a_bucket() {
    let pool = ArrayCache::<f32>::new(false, 4);
    let mut r = pool.new_ref(MIN_ARRAY_SIZE);
    let initial = r.initial();
    r.release(initial, 0);
    assert_eq!(pool.pooled_count(0), 0);
    assert!(r.is_initial_home());

    // A different reference's initial array of the same size is pooled.
    let mut other = pool.new_ref(MIN_ARRAY_SIZE);
    let foreign = other.initial();
    r.release(foreign, 0);
    assert_eq!(pool.pooled_count(0), 1);
}

#[test_log::test]
fn reclaim_from_another_thread_rebuilds_the_table() {
    let pool = ArrayCache::<f64>::new(false, 4);
    let mut r = pool.new_ref(0);
    let array = r.acquire(10);
    r.release(array, 0);
    assert_eq!(pool.pooled_count(0), 1);

    let handle = pool.reclaim_handle();
    std::thread::spawn(move || handle.request()).join().unwrap();

    assert!(!pool.is_resident());
    let fresh = r.acquire(10);
    assert_eq!(fresh.len(), MIN_ARRAY_SIZE);
    assert!(pool.is_resident());
    assert_eq!(pool.pooled_count(0), 0);
}

#[test_log::test]
fn cache_set_shares_one_trigger() {
    let set = CacheSet::new(2);
    let handle = set.reclaim_handle();
    let mut ints = set.clean_ints.new_ref(0);
    let a = ints.acquire(1);
    ints.release(a, 1);
    assert_eq!(set.clean_ints.pooled_count(0), 1);
    std::thread::spawn(move || handle.request()).join().unwrap();
    assert_eq!(set.clean_ints.pooled_count(0), 0);
    set.dump_stats();
}

#[test_log::test]
fn stats_dump_is_quiet_when_disabled() {
    let pool = ArrayCache::<u8>::new(true, 1);
    pool.dump_stats();
    assert!(pool.stats().is_none());
}
