//! Benchmark configuration loader.
//!
//! This module provides functionality to load the benchmark configuration
//! from an explicit JSON file or from command-line arguments.

use crate::config::bench::BenchConfig;
use crate::dns::types::DnsServer;
use crate::error::{Error, Result};
use std::path::Path;

/// Benchmark configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let config = ConfigLoader::load_from_file("dnsbench.json")?;
    /// for server in &config.resolvers {
    ///     println!("{}: {}", server.name, server.ip);
    /// }
    /// ```
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<BenchConfig> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: BenchConfig = serde_json::from_str(&content)?;
        tracing::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Create a resolver list from command-line arguments.
    ///
    /// # Arguments
    ///
    /// * `dns_servers` - Strings in format "IP#Name"; the name defaults to the IP
    ///
    /// # Errors
    ///
    /// Returns an error if any IP address is invalid.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let args = vec!["8.8.8.8#Google".to_string(), "1.1.1.1".to_string()];
    /// let servers = ConfigLoader::servers_from_args(&args)?;
    /// ```
    pub fn servers_from_args(dns_servers: &[String]) -> Result<Vec<DnsServer>> {
        dns_servers
            .iter()
            .map(|s| {
                let (ip, name) = match s.split_once('#') {
                    Some((ip, name)) => (ip.trim(), name.trim()),
                    None => (s.trim(), s.trim()),
                };

                if ip.parse::<std::net::IpAddr>().is_err() {
                    return Err(Error::Parse(format!("Invalid IP address: {ip}")));
                }

                Ok(DnsServer::new(name, ip))
            })
            .collect()
    }
}
