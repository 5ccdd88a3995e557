//! DNS benchmark types and data structures.
//!
//! This module provides the resolver descriptor and the per-domain and
//! per-resolver result records produced by a benchmark run.

use crate::stats::{StatsError, Summary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::net::IpAddr;

/// DNS server information.
///
/// Represents a single resolver with a display name and its IP address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DnsServer {
    /// Server name (e.g., "Cloudflare", "Google")
    pub name: String,
    /// IP address of the DNS server
    #[serde(rename = "IP")]
    pub ip: String,
}

impl DnsServer {
    /// Create a new DNS server.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let server = DnsServer::new("Cloudflare", "1.1.1.1");
    /// ```
    pub fn new(name: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ip: ip.into(),
        }
    }

    /// Parse the IP address string into an `IpAddr`.
    #[must_use]
    pub fn ip_addr(&self) -> Option<IpAddr> {
        self.ip.parse().ok()
    }

    /// Chart label for this server.
    #[must_use]
    pub fn label(&self) -> String {
        format!("DNS {}", self.ip)
    }
}

impl std::fmt::Display for DnsServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ip)
    }
}

/// Statistics for one (resolver, domain) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainStat {
    /// Domain that was resolved
    pub domain: String,
    /// Aggregate over the latency samples
    pub summary: Summary,
}

/// Statistics for one resolver, computed over its per-domain means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverStat {
    /// Aggregate over the successful domains' means
    pub summary: Summary,
}

/// A domain whose sampling batch was discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainFailure {
    /// Domain that failed
    pub domain: String,
    /// Human-readable failure cause
    pub error: String,
}

/// Full outcome of sweeping one resolver.
#[derive(Debug, Clone, Serialize)]
pub struct ResolverReport {
    /// The resolver that was tested
    pub server: DnsServer,
    /// Successful domains, in sweep order
    pub domains: Vec<DomainStat>,
    /// Discarded domains, in sweep order
    pub failures: Vec<DomainFailure>,
    /// Resolver-level statistic, unavailable when fewer than two domains succeeded
    #[serde(serialize_with = "serialize_overall")]
    pub overall: Result<ResolverStat, StatsError>,
}

impl ResolverReport {
    /// The resolver-level statistic, if one could be computed.
    #[must_use]
    pub fn stat(&self) -> Option<&ResolverStat> {
        self.overall.as_ref().ok()
    }

    /// Number of domains that were swept.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.domains.len() + self.failures.len()
    }
}

fn serialize_overall<S: Serializer>(
    overall: &Result<ResolverStat, StatsError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    #[serde(rename_all = "lowercase")]
    enum Outcome<'a> {
        Ok(&'a ResolverStat),
        Error(String),
    }

    match overall {
        Ok(stat) => Outcome::Ok(stat).serialize(serializer),
        Err(e) => Outcome::Error(e.to_string()).serialize(serializer),
    }
}

/// Results of a complete benchmark run.
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    /// When the run finished
    pub generated_at: DateTime<Utc>,
    /// Samples taken per (resolver, domain) pair
    pub samples_per_point: usize,
    /// One entry per resolver, in configured order
    pub resolvers: Vec<ResolverReport>,
}

impl BenchReport {
    /// Create a report stamped with the current time.
    #[must_use]
    pub fn new(samples_per_point: usize, resolvers: Vec<ResolverReport>) -> Self {
        Self {
            generated_at: Utc::now(),
            samples_per_point,
            resolvers,
        }
    }

    /// Resolvers with a resolver-level statistic, fastest mean first.
    #[must_use]
    pub fn ranking(&self) -> Vec<(&DnsServer, &ResolverStat)> {
        let mut ranked: Vec<_> = self
            .resolvers
            .iter()
            .filter_map(|r| r.stat().map(|s| (&r.server, s)))
            .collect();
        ranked.sort_by(|a, b| {
            a.1.summary
                .mean
                .partial_cmp(&b.1.summary.mean)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }
}
