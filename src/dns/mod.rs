//! DNS module.
//!
//! This module provides the measurement pipeline:
//! - Latency sampling against a single resolver
//! - Domain sweeps and full benchmark runs
//! - Core data types

pub mod sampler;
pub mod sweep;
pub mod types;

pub use sampler::{Probe, ResolverProbe, Sampler, SamplingError};
pub use sweep::DomainSweep;
pub use types::*;
