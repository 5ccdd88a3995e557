//! dnsbench - DNS resolution latency benchmark
//!
//! Binary entry point for the dnsbench CLI application.

#![warn(clippy::all, warnings)]
#![warn(clippy::pedantic, clippy::nursery)]

use dnsbench::dns::{sweep, DomainSweep, Sampler};
use dnsbench::error::Result;
use dnsbench::{report, tui};
use std::io::{IsTerminal, Write};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Set up logging based on verbosity level.
///
/// # Arguments
///
/// * `verbose` - Enable debug-level logging
/// * `quiet` - Enable error-level only logging
fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    } else if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().without_time().with_writer(std::io::stderr))
        .init();
}

/// Main entry point for the dnsbench CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = dnsbench::cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("dnsbench starting...");

    let config = cli.resolve_config()?;
    let human = cli.format.is_human();

    let sampler = Sampler::new(config.samples_per_point).with_progress(!cli.quiet);
    let domain_sweep = DomainSweep::new(&config).with_sampler(sampler);

    // Only the final results go to stdout for machine-readable formats.
    let mut console: Box<dyn Write> = if human {
        Box::new(std::io::stdout())
    } else {
        Box::new(std::io::sink())
    };

    let results = sweep::run(&config, &domain_sweep, &mut console, |resolver, out| {
        if human {
            report::write_resolver_summary(out, resolver)?;
        }
        Ok(())
    })
    .await?;

    let mut stdout = std::io::stdout().lock();
    report::write_results(&mut stdout, &results, cli.format, config.verbose)?;
    stdout.flush()?;
    drop(stdout);

    if !cli.no_chart && std::io::stdout().is_terminal() {
        let charts = tui::charts_for(&results, config.verbose);
        tui::show(&charts)?;
    }

    Ok(())
}
