//! dnsbench - DNS resolution latency benchmark.
//!
//! This crate provides both a library API and a CLI tool for:
//! - Timing repeated DNS lookups against a set of resolvers
//! - Aggregating samples into means with 95% Student's t confidence intervals
//! - Comparing resolvers across a list of domains
//! - Terminal bar charts with error bars and confidence whiskers
//!
//! # Library Usage
//!
//! ```ignore
//! use dnsbench::{BenchConfig, DomainSweep, ResolverProbe};
//!
//! let config = BenchConfig::default();
//! let sweep = DomainSweep::new(&config);
//! let server = &config.resolvers[0];
//! let probe = ResolverProbe::new(server)?;
//! let report = sweep.sweep(&probe, server, &mut std::io::stdout()).await?;
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Default run: 12 resolvers x 17 domains x 50 samples, overall chart
//! dnsbench
//!
//! # Per-domain detail and one chart per resolver
//! dnsbench -v
//!
//! # Custom resolvers and domains, fewer samples, JSON output
//! dnsbench --dns 1.1.1.1#Cloudflare --dns 8.8.8.8 --domain example.com -n 10 --format json
//! ```

pub mod cli;
pub mod config;
pub mod dns;
pub mod error;
pub mod report;
pub mod stats;
pub mod tui;

// Re-export commonly used types
pub use cli::{Cli, OutputFormat};
pub use config::{BenchConfig, ConfigLoader};
pub use dns::types::{BenchReport, DnsServer, DomainStat, ResolverReport, ResolverStat};
pub use dns::{DomainSweep, Probe, ResolverProbe, Sampler, SamplingError};
pub use error::{Error, Result};
pub use stats::{ConfidenceInterval, StatsError, Summary};
