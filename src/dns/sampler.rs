//! Latency sampling against a single resolver.
//!
//! A [`Sampler`] issues a fixed number of sequential lookups for one
//! (resolver, domain) pair and records the wall-clock time of each. The
//! first failed lookup abandons the whole batch.

#![allow(clippy::missing_errors_doc)]

use crate::dns::types::{DnsServer, DomainStat};
use crate::error::{Error, Result};
use crate::stats::Summary;
use crossterm::cursor::MoveToColumn;
use crossterm::terminal::{Clear, ClearType};
use std::io::{IsTerminal, Write};
use std::time::Instant;
use thiserror::Error;
use trust_dns_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use trust_dns_resolver::proto::rr::RecordType;
use trust_dns_resolver::TokioAsyncResolver;

/// Standard DNS port.
const DNS_PORT: u16 = 53;

/// A sampling batch abandoned because one attempt failed.
#[derive(Debug, Error)]
#[error("Error resolving domain {domain} with {resolver}: {source}")]
pub struct SamplingError {
    /// Resolver address
    pub resolver: String,
    /// Domain being sampled
    pub domain: String,
    /// 1-based index of the failed attempt (the batch size if aggregation failed)
    pub attempt: usize,
    /// Underlying failure
    #[source]
    pub source: Box<Error>,
}

/// One name-resolution round trip.
///
/// Implementations resolve `domain` against a fixed resolver and report
/// only success or failure; the [`Sampler`] does the timing.
#[allow(async_fn_in_trait)]
pub trait Probe {
    /// Resolve `domain` once.
    async fn query(&self, domain: &str) -> Result<()>;
}

/// Probe backed by a `trust-dns` resolver bound to one nameserver.
///
/// Caching and the hosts file are disabled so every query reaches the
/// network.
pub struct ResolverProbe {
    resolver: TokioAsyncResolver,
}

impl ResolverProbe {
    /// Build a probe that queries only `server`.
    ///
    /// # Errors
    ///
    /// Returns an error if the server IP is invalid or the resolver cannot
    /// be initialized.
    pub fn new(server: &DnsServer) -> Result<Self> {
        let ip = server
            .ip_addr()
            .ok_or_else(|| Error::parse(format!("Invalid IP address: {}", server.ip)))?;

        let config = ResolverConfig::from_parts(
            None,
            vec![],
            NameServerConfigGroup::from_ips_clear(&[ip], DNS_PORT, true),
        );

        let mut opts = ResolverOpts::default();
        opts.cache_size = 0;
        opts.use_hosts_file = false;

        let resolver = TokioAsyncResolver::tokio(config, opts).map_err(Error::Resolver)?;
        Ok(Self { resolver })
    }
}

impl Probe for ResolverProbe {
    async fn query(&self, domain: &str) -> Result<()> {
        let lookup = self.resolver.lookup(fqdn(domain), RecordType::A).await?;
        tracing::trace!("{domain}: {} records", lookup.iter().count());
        Ok(())
    }
}

/// Absolute form of `domain` so no search suffix is appended.
fn fqdn(domain: &str) -> String {
    if domain.ends_with('.') {
        domain.to_string()
    } else {
        format!("{domain}.")
    }
}

/// Sequential latency sampler.
///
/// # Example
///
/// ```ignore
/// let sampler = Sampler::new(50);
/// let probe = ResolverProbe::new(&server)?;
/// let stat = sampler.measure(&probe, &server, "google.com").await?;
/// ```
#[derive(Debug, Clone)]
pub struct Sampler {
    samples: usize,
    show_progress: bool,
}

impl Sampler {
    /// Create a sampler taking `samples` measurements per batch.
    #[must_use]
    pub fn new(samples: usize) -> Self {
        Self {
            samples,
            show_progress: true,
        }
    }

    /// Enable or disable the console progress line.
    #[must_use]
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Take one batch of latency samples in milliseconds.
    ///
    /// Stops at the first failed attempt and discards everything measured
    /// so far.
    pub async fn sample<P: Probe>(
        &self,
        probe: &P,
        server: &DnsServer,
        domain: &str,
    ) -> std::result::Result<Vec<f64>, SamplingError> {
        let mut times = Vec::new();
        let progress = self.show_progress && std::io::stderr().is_terminal();

        for attempt in 1..=self.samples {
            if progress {
                draw_progress(domain, server, attempt, self.samples);
            }

            let start = Instant::now();
            let outcome = probe.query(domain).await;
            let elapsed = start.elapsed().as_secs_f64() * 1000.0;

            if let Err(e) = outcome {
                if progress {
                    clear_progress();
                }
                let err = SamplingError {
                    resolver: server.ip.clone(),
                    domain: domain.to_string(),
                    attempt,
                    source: Box::new(e),
                };
                tracing::debug!(attempt, "discarding batch: {err}");
                eprintln!("{err}");
                return Err(err);
            }

            tracing::debug!("{domain} via {server} #{attempt}: {elapsed:.3} ms");
            times.push(elapsed);
        }

        if progress {
            clear_progress();
        }
        Ok(times)
    }

    /// Sample one (resolver, domain) pair and aggregate the batch.
    pub async fn measure<P: Probe>(
        &self,
        probe: &P,
        server: &DnsServer,
        domain: &str,
    ) -> std::result::Result<DomainStat, SamplingError> {
        let times = self.sample(probe, server, domain).await?;
        let summary = Summary::from_samples(&times).map_err(|e| SamplingError {
            resolver: server.ip.clone(),
            domain: domain.to_string(),
            attempt: times.len(),
            source: Box::new(Error::Stats(e)),
        })?;

        Ok(DomainStat {
            domain: domain.to_string(),
            summary,
        })
    }
}

fn draw_progress(domain: &str, server: &DnsServer, attempt: usize, total: usize) {
    let mut err = std::io::stderr();
    let _ = write!(err, "\rTesting {domain} with {server} [{attempt:>3}/{total}]");
    let _ = err.flush();
}

fn clear_progress() {
    let mut err = std::io::stderr();
    let _ = crossterm::execute!(err, MoveToColumn(0), Clear(ClearType::CurrentLine));
}
