//! Command-line interface (CLI) argument parsing module.
//!
//! This module provides CLI argument parsing using `clap`. With no flags
//! the benchmark runs the built-in resolver and domain lists.

use crate::config::{BenchConfig, ConfigLoader};
use crate::error::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CLI argument parser using clap derive macro.
///
/// # Example
///
/// ```ignore
/// let cli = Cli::parse();
/// let config = cli.resolve_config()?;
/// ```
#[derive(Parser, Debug)]
#[command(
    name = "dnsbench",
    version,
    about = "DNS Benchmark Tool",
    long_about = "Measures DNS resolution latency across public resolvers and reports \
                  means with 95% confidence intervals"
)]
pub struct Cli {
    /// Enable verbose output (per-domain results and charts)
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode (only errors)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format
    #[arg(long, default_value = "table")]
    pub format: OutputFormat,

    /// Configuration file (JSON format)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Measurements per resolver and domain
    #[arg(short = 'n', long)]
    pub samples: Option<usize>,

    /// Custom DNS servers (format: IP#Name)
    #[arg(long = "dns")]
    pub dns_servers: Vec<String>,

    /// Custom domains to resolve
    #[arg(long = "domain")]
    pub domains: Vec<String>,

    /// Do not draw charts
    #[arg(long)]
    pub no_chart: bool,
}

impl Cli {
    /// Build the benchmark configuration.
    ///
    /// Precedence: built-in defaults, then the `--file` config, then
    /// command-line flags. Without `--file` no file is read.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded, a `--dns` value
    /// is invalid, or the resulting configuration fails validation.
    pub fn resolve_config(&self) -> Result<BenchConfig> {
        let mut config = match &self.file {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => BenchConfig::default(),
        };

        if !self.dns_servers.is_empty() {
            config.resolvers = ConfigLoader::servers_from_args(&self.dns_servers)?;
        }
        if !self.domains.is_empty() {
            config.domains.clone_from(&self.domains);
        }
        if let Some(samples) = self.samples {
            config.samples_per_point = samples;
        }
        config.verbose = self.verbose;

        config.validate()?;
        Ok(config)
    }
}

/// Output format for the final results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format (default, human-readable)
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// TSV format (tab-separated)
    Tsv,
}

impl OutputFormat {
    /// Get all available output format names.
    #[must_use]
    pub fn names() -> &'static [&'static str] {
        &["table", "json", "csv", "tsv"]
    }

    /// Whether progress and per-resolver lines belong on stdout.
    #[must_use]
    pub fn is_human(&self) -> bool {
        matches!(self, Self::Table)
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            _ => Err(format!(
                "Unknown format: {}. Valid options are: {:?}",
                s,
                Self::names()
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Tsv => write!(f, "tsv"),
        }
    }
}

/// Parse CLI arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
