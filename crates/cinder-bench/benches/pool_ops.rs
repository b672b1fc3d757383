//! Criterion micro-benchmarks for array pool churn.

use std::hint::black_box;

use cinder_bench::{churn_profile, flatten, path_profile};
use cinder_pool::{ArrayCache, CacheConfig};
use criterion::{criterion_group, criterion_main, Criterion};

fn bench_acquire_release(c: &mut Criterion) {
    let cache = ArrayCache::<i32>::new(true, 8);
    let mut pool = cache.new_ref(4096);
    c.bench_function("acquire_release_clean_4k", |b| {
        b.iter(|| {
            let mut array = pool.acquire(black_box(4096));
            array[0] = 1;
            pool.release(array, 1);
        });
    });
}

fn bench_churn(c: &mut Criterion) {
    let steps = churn_profile(256);
    let cache = ArrayCache::<f32>::with_config(CacheConfig::new(false, 8));
    let mut pool = cache.new_ref(1024);
    c.bench_function("grow_churn_256", |b| {
        b.iter(|| {
            for step in &steps {
                let array = pool.acquire(step.initial);
                let array = pool.grow(array, step.initial, step.grown);
                pool.release(array, 0);
            }
        });
    });
}

fn bench_churn_after_reclaim(c: &mut Criterion) {
    let steps = churn_profile(64);
    let cache = ArrayCache::<f64>::new(false, 8);
    let mut pool = cache.new_ref(1024);
    c.bench_function("grow_churn_64_reclaimed", |b| {
        b.iter(|| {
            cache.reclaim_handle().request();
            for step in &steps {
                let array = pool.acquire(step.initial);
                let array = pool.grow(array, step.initial, step.grown);
                pool.release(array, 0);
            }
        });
    });
}

fn bench_flatten(c: &mut Criterion) {
    let segments = path_profile(7, 512);
    let cache = ArrayCache::<f64>::new(false, 8);
    let mut pool = cache.new_ref(4096);
    c.bench_function("flatten_512_segments", |b| {
        b.iter(|| {
            let (points, used) = flatten(&mut pool, black_box(&segments), 2.0).unwrap();
            pool.release(points, used);
        });
    });
}

criterion_group!(
    benches,
    bench_acquire_release,
    bench_churn,
    bench_churn_after_reclaim,
    bench_flatten
);
criterion_main!(benches);
