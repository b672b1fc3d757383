//! Flatten a random stroked path and report pool usage.
//!
//! Run with `RUST_LOG=info` to see the statistics dump.

use cinder_bench::{flatten, path_profile};
use cinder_pool::{CacheConfig, CacheSet};

fn main() {
    env_logger::init();
    println!("=== Cinder flatten example ===\n");

    let caches = CacheSet::with_config(CacheConfig::default().with_stats(true));
    let mut pool = caches.dirty_doubles.new_ref(256);

    for (round, count) in [16, 256, 4096].into_iter().enumerate() {
        let segments = path_profile(round as u64, count);
        let (points, used) = match flatten(&mut pool, &segments, 3.0) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("flatten failed: {e}");
                return;
            }
        };
        println!(
            "round {round}: {count} segments -> {} points (buffer {})",
            used / 2,
            points.len()
        );
        pool.release(points, used);
    }

    if let Some(stats) = caches.dirty_doubles.stats() {
        println!("\nresizes: {}", stats.resize);
        for (size, bucket) in stats.bucket_report() {
            println!(
                "bucket {size:>9}: get={} create={} return={} max={}",
                bucket.get_op, bucket.create_op, bucket.return_op, bucket.max_size
            );
        }
    }
    caches.dump_stats();
}
