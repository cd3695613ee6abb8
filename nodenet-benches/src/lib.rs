//! Benchmark support crate for nodenet.
//!
//! Provides parameter types and fallible network setup shared by the
//! Criterion benchmarks for resizing and random connection.

pub mod error;
pub mod params;
pub mod setup;
