//! Domain sweeps and full benchmark runs.
//!
//! A [`DomainSweep`] samples every configured domain against one resolver
//! and aggregates the per-domain means into a resolver-level statistic.
//! [`run`] repeats that for every configured resolver, in order.

#![allow(clippy::missing_errors_doc)]

use crate::config::BenchConfig;
use crate::dns::sampler::{Probe, ResolverProbe, Sampler};
use crate::dns::types::{BenchReport, DnsServer, DomainFailure, ResolverReport, ResolverStat};
use crate::error::Result;
use crate::stats::Summary;
use std::io::Write;

/// Sweeps a fixed domain list against one resolver at a time.
#[derive(Debug, Clone)]
pub struct DomainSweep {
    sampler: Sampler,
    domains: Vec<String>,
    verbose: bool,
}

impl DomainSweep {
    /// Create a sweep from the benchmark configuration.
    #[must_use]
    pub fn new(config: &BenchConfig) -> Self {
        Self {
            sampler: Sampler::new(config.samples_per_point),
            domains: config.domains.clone(),
            verbose: config.verbose,
        }
    }

    /// Replace the sampler (e.g. to silence the progress line).
    #[must_use]
    pub fn with_sampler(mut self, sampler: Sampler) -> Self {
        self.sampler = sampler;
        self
    }

    /// Sample every domain against `server` and aggregate the results.
    ///
    /// Failed domains are recorded and left out of the resolver-level
    /// statistic. In verbose mode a summary line per successful domain is
    /// written to `out` as it completes.
    pub async fn sweep<P: Probe, W: Write>(
        &self,
        probe: &P,
        server: &DnsServer,
        out: &mut W,
    ) -> Result<ResolverReport> {
        let mut domains = Vec::with_capacity(self.domains.len());
        let mut failures = Vec::new();

        for domain in &self.domains {
            match self.sampler.measure(probe, server, domain).await {
                Ok(stat) => {
                    if self.verbose {
                        writeln!(out, "DNS Server {} for domain {}:", server, stat.domain)?;
                        writeln!(
                            out,
                            "  avg: {:.2} ms, min: {:.2} ms, max: {:.2} ms",
                            stat.summary.mean, stat.summary.min, stat.summary.max
                        )?;
                    }
                    domains.push(stat);
                }
                Err(e) => failures.push(DomainFailure {
                    domain: domain.clone(),
                    error: e.source.to_string(),
                }),
            }
        }

        let means: Vec<f64> = domains.iter().map(|d| d.summary.mean).collect();
        let overall = Summary::from_samples(&means).map(|summary| ResolverStat { summary });
        if let Err(e) = &overall {
            tracing::warn!("no overall statistic for {server}: {e}");
        }

        Ok(ResolverReport {
            server: server.clone(),
            domains,
            failures,
            overall,
        })
    }
}

/// Run the whole benchmark, one resolver after another.
///
/// `on_resolver` is called with each resolver's report as soon as it is
/// complete, before the next resolver starts.
pub async fn run<W, F>(
    config: &BenchConfig,
    sweep: &DomainSweep,
    out: &mut W,
    mut on_resolver: F,
) -> Result<BenchReport>
where
    W: Write,
    F: FnMut(&ResolverReport, &mut W) -> Result<()>,
{
    config.validate()?;
    tracing::info!(
        "benchmarking {} resolvers x {} domains x {} samples ({} queries)",
        config.resolvers.len(),
        config.domains.len(),
        config.samples_per_point,
        config.total_queries()
    );

    let mut resolvers = Vec::with_capacity(config.resolvers.len());
    for server in &config.resolvers {
        let probe = ResolverProbe::new(server)?;
        let report = sweep.sweep(&probe, server, out).await?;
        on_resolver(&report, out)?;
        resolvers.push(report);
    }

    tracing::info!("benchmark finished");
    Ok(BenchReport::new(config.samples_per_point, resolvers))
}
