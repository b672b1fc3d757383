//! Test utilities and fixtures for Cinder development.
//!
//! Curve fixtures are plain coordinate arrays so this crate has no
//! dependency on the crates it helps test.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod curves;
