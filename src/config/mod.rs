//! Configuration module.
//!
//! This module provides the benchmark configuration and the functionality
//! for loading it from various sources.

pub mod bench;
pub mod loader;

pub use bench::BenchConfig;
pub use loader::ConfigLoader;
