//! Bucketed, size-classed array pools for rasterizer scratch buffers.
//!
//! A rasterizer churns through large temporary arrays on every path it
//! fills. This crate keeps released arrays in per-size-class buckets so
//! the hot path rarely touches the allocator.
//!
//! # Architecture
//!
//! ```text
//! CacheSet (one per rendering context)
//! ├── ReclaimHandle (shared eviction trigger, Send + Sync)
//! └── ArrayCache<T> × 5 (u8, i32 clean/dirty, f32, f64)
//!     ├── SoftTable → Bucket × BUCKETS (bounded LIFO of one array size)
//!     ├── CacheStats (optional counters)
//!     └── DiagnosticSink (log + bounded crossbeam channel)
//!
//! ArrayRef<'_, T> (borrowed handle, owns one initial array)
//!     acquire / grow / release / release_range / recycle
//! ```
//!
//! # Clean and dirty caches
//!
//! - **Clean:** the used range of every released array is zeroed, so
//!   arrays come back out all-zero.
//! - **Dirty:** contents are left as released. The consumer must write
//!   before it reads.
//!
//! Misuse (wrong-length releases, full buckets, uncleared arrays) is
//! reported as a [`PoolDiagnostic`] and never fails an operation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod bucket;
pub mod cache;
pub mod config;
pub mod diagnostic;
pub mod element;
pub mod reference;
pub mod set;
pub mod sizes;
pub mod soft;
pub mod stats;

pub use cache::ArrayCache;
pub use config::CacheConfig;
pub use diagnostic::{PoolDiagnostic, DIAGNOSTIC_CHANNEL_CAPACITY};
pub use element::PoolElement;
pub use reference::ArrayRef;
pub use set::CacheSet;
pub use sizes::{ARRAY_SIZES, BUCKETS, MAX_ARRAY_SIZE, MIN_ARRAY_SIZE};
pub use soft::{ReclaimHandle, SoftTable};
pub use stats::{BucketStats, CacheStats};

/// The pool as a rasterizer refers to it.
pub type BucketedArrayPool<T> = ArrayCache<T>;
