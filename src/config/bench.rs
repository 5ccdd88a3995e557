//! Benchmark configuration.

use crate::dns::types::DnsServer;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Samples taken per (resolver, domain) pair unless configured otherwise.
pub const DEFAULT_SAMPLES: usize = 50;

/// Upper bound on measurements per resolver and domain.
pub const MAX_SAMPLES: usize = 10_000;

/// Public resolvers tested by default, as (name, IP).
const DEFAULT_RESOLVERS: &[(&str, &str)] = &[
    ("Google", "8.8.8.8"),
    ("Cloudflare", "1.1.1.1"),
    ("Cloudflare Family", "1.1.1.2"),
    ("Quad9", "9.9.9.9"),
    ("Quad9 Secondary", "149.112.112.112"),
    ("Quad9 ECS", "9.9.9.11"),
    ("dns0.eu", "193.110.81.0"),
    ("dns0.eu Secondary", "185.253.5.0"),
    ("dns.sb", "185.222.222.222"),
    ("dns.sb Secondary", "45.11.45.11"),
    ("UncensoredDNS Anycast", "91.239.100.100"),
    ("UncensoredDNS Unicast", "89.233.43.71"),
];

/// Domains resolved by default.
const DEFAULT_DOMAINS: &[&str] = &[
    "google.com",
    "apple.com",
    "microsoft.com",
    "netflix.com",
    "youtube.com",
    "google.at",
    "orf.at",
    "tuwien.at",
    "reddit.com",
    "nasa.gov",
    "derstandard.at",
    "bbc.com",
    "diepresse.at",
    "wikipedia.org",
    "twitch.tv",
    "amazon.de",
    "europa.eu",
];

/// Everything a benchmark run needs.
///
/// Loaded from JSON (see [`crate::config::ConfigLoader`]); fields missing
/// from the file fall back to the built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Resolvers to test, in order
    pub resolvers: Vec<DnsServer>,
    /// Domains to resolve against each resolver, in order
    pub domains: Vec<String>,
    /// Measurements per (resolver, domain) pair
    pub samples_per_point: usize,
    /// Print per-domain detail and draw per-resolver charts
    #[serde(skip)]
    pub verbose: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            resolvers: default_resolvers(),
            domains: DEFAULT_DOMAINS.iter().map(|d| (*d).to_string()).collect(),
            samples_per_point: DEFAULT_SAMPLES,
            verbose: false,
        }
    }
}

impl BenchConfig {
    /// Check the configuration before any query is sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for empty lists, blank domains, or fewer
    /// than two samples per point, and [`Error::Parse`] for invalid IPs.
    pub fn validate(&self) -> Result<()> {
        if self.resolvers.is_empty() {
            return Err(Error::config("resolver list is empty"));
        }
        if self.domains.is_empty() {
            return Err(Error::config("domain list is empty"));
        }
        if self.samples_per_point < 2 {
            return Err(Error::config(format!(
                "samples_per_point must be at least 2, got {}",
                self.samples_per_point
            )));
        }
        if self.samples_per_point > MAX_SAMPLES {
            return Err(Error::config(format!(
                "samples_per_point must be at most {MAX_SAMPLES}, got {}",
                self.samples_per_point
            )));
        }
        if let Some(bad) = self.resolvers.iter().find(|s| s.ip_addr().is_none()) {
            return Err(Error::parse(format!("Invalid IP address: {}", bad.ip)));
        }
        if self.domains.iter().any(|d| d.trim().is_empty()) {
            return Err(Error::config("domain names must not be blank"));
        }
        Ok(())
    }

    /// Total number of lookups the run will issue if nothing fails.
    #[must_use]
    pub fn total_queries(&self) -> usize {
        self.resolvers.len() * self.domains.len() * self.samples_per_point
    }
}

fn default_resolvers() -> Vec<DnsServer> {
    DEFAULT_RESOLVERS
        .iter()
        .map(|(name, ip)| DnsServer::new(*name, *ip))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BenchConfig::default();
        assert_eq!(config.resolvers.len(), 12);
        assert_eq!(config.domains.len(), 17);
        assert_eq!(config.samples_per_point, 50);
        assert!(!config.verbose);
        assert_eq!(config.resolvers[0].ip, "8.8.8.8");
        assert_eq!(config.domains[16], "europa.eu");
        assert_eq!(config.total_queries(), 12 * 17 * 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        let mut config = BenchConfig {
            samples_per_point: 1,
            ..BenchConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.samples_per_point = 5;
        config.domains.clear();
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.domains = vec!["example.com".into()];
        config.resolvers = vec![DnsServer::new("Bad", "999.1.1.1")];
        assert!(matches!(config.validate(), Err(Error::Parse(_))));

        config.resolvers.clear();
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.resolvers = vec![DnsServer::new("Google", "8.8.8.8")];
        config.domains = vec!["  ".into()];
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_caps_samples() {
        let mut config = BenchConfig {
            samples_per_point: usize::MAX,
            ..BenchConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.samples_per_point = MAX_SAMPLES + 1;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.samples_per_point = MAX_SAMPLES;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: BenchConfig = serde_json::from_str(r#"{"samples_per_point": 10}"#).unwrap();
        assert_eq!(config.samples_per_point, 10);
        assert_eq!(config.resolvers.len(), 12);
        assert_eq!(config.domains.len(), 17);
    }
}
