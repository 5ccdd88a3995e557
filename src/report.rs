//! Console reporting.
//!
//! Writes per-resolver summaries as they complete and the final results
//! in the selected [`OutputFormat`].

#![allow(clippy::missing_errors_doc)]

use crate::cli::OutputFormat;
use crate::dns::{BenchReport, ResolverReport};
use crate::error::Result;
use crate::stats::Summary;
use std::io::Write;

/// Write the summary lines for one finished resolver.
pub fn write_resolver_summary<W: Write>(out: &mut W, report: &ResolverReport) -> Result<()> {
    writeln!(out, "Overall stats for DNS Server {}:", report.server)?;
    match &report.overall {
        Ok(stat) => {
            let s = &stat.summary;
            writeln!(out, "  Overall average resolution time: {:.2} ms", s.mean)?;
            writeln!(out, "  Overall minimum resolution time: {:.2} ms", s.min)?;
            writeln!(out, "  Overall maximum resolution time: {:.2} ms", s.max)?;
        }
        Err(e) => {
            writeln!(
                out,
                "  unavailable ({} of {} domains succeeded: {})",
                report.domains.len(),
                report.attempted(),
                e
            )?;
        }
    }
    Ok(())
}

/// Write the final results in `format`.
///
/// `verbose` adds one row per domain to the CSV/TSV output.
pub fn write_results<W: Write>(
    out: &mut W,
    report: &BenchReport,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    match format {
        OutputFormat::Table => write_table(out, report),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Csv => write_delimited(out, report, ",", verbose),
        OutputFormat::Tsv => write_delimited(out, report, "\t", verbose),
    }
}

/// Ranking table, fastest resolver first.
fn write_table<W: Write>(out: &mut W, report: &BenchReport) -> Result<()> {
    writeln!(out, "\n=== Ranking ===")?;
    writeln!(
        out,
        "{:<4} {:<24} {:<18} {:>10} {:>10} {:>10} {:>21} {:>8}",
        "#", "Name", "IP", "Avg", "Min", "Max", "95% CI", "Domains"
    )?;
    writeln!(out, "{}", "-".repeat(112))?;

    let ranking = report.ranking();
    for (idx, (server, stat)) in ranking.iter().enumerate() {
        let s = &stat.summary;
        writeln!(
            out,
            "{:<4} {:<24} {:<18} {:>10} {:>10} {:>10} {:>21} {:>8}",
            idx + 1,
            server.name,
            server.ip,
            format!("{:.2} ms", s.mean),
            format!("{:.2} ms", s.min),
            format!("{:.2} ms", s.max),
            format!("[{:.2}, {:.2}]", s.ci.low, s.ci.high),
            s.n
        )?;
    }

    let failed = report.resolvers.len() - ranking.len();
    if failed > 0 {
        writeln!(out, "\n{failed} resolver(s) without enough successful domains")?;
    }
    Ok(())
}

fn write_delimited<W: Write>(
    out: &mut W,
    report: &BenchReport,
    sep: &str,
    verbose: bool,
) -> Result<()> {
    let header = [
        "#Resolver",
        "Name",
        "Domain",
        "N",
        "Mean(ms)",
        "Min(ms)",
        "Max(ms)",
        "StdDev(ms)",
        "CILow(ms)",
        "CIHigh(ms)",
    ];
    writeln!(out, "{}", header.join(sep))?;

    for r in &report.resolvers {
        if let Some(stat) = r.stat() {
            write_row(out, sep, &r.server.ip, &r.server.name, "*", &stat.summary)?;
        }
        if verbose {
            for d in &r.domains {
                write_row(out, sep, &r.server.ip, &r.server.name, &d.domain, &d.summary)?;
            }
        }
    }
    Ok(())
}

fn write_row<W: Write>(
    out: &mut W,
    sep: &str,
    ip: &str,
    name: &str,
    domain: &str,
    s: &Summary,
) -> Result<()> {
    let fields = [
        ip.to_string(),
        name.to_string(),
        domain.to_string(),
        s.n.to_string(),
        format!("{:.2}", s.mean),
        format!("{:.2}", s.min),
        format!("{:.2}", s.max),
        format!("{:.2}", s.std_dev),
        format!("{:.2}", s.ci.low),
        format!("{:.2}", s.ci.high),
    ];
    writeln!(out, "{}", fields.join(sep))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::{DnsServer, DomainFailure, DomainStat, ResolverStat};
    use crate::stats::StatsError;

    fn domain(name: &str, samples: &[f64]) -> DomainStat {
        DomainStat {
            domain: name.to_string(),
            summary: Summary::from_samples(samples).unwrap(),
        }
    }

    fn good() -> ResolverReport {
        let domains = vec![domain("a.example", &[11.0, 13.0]), domain("b.example", &[17.0, 19.0])];
        ResolverReport {
            server: DnsServer::new("Cloudflare", "1.1.1.1"),
            overall: Ok(ResolverStat {
                summary: Summary::from_samples(&[12.0, 18.0]).unwrap(),
            }),
            domains,
            failures: vec![],
        }
    }

    fn bad() -> ResolverReport {
        ResolverReport {
            server: DnsServer::new("Google", "8.8.8.8"),
            domains: vec![],
            failures: vec![DomainFailure {
                domain: "a.example".into(),
                error: "timeout".into(),
            }],
            overall: Err(StatsError::Empty),
        }
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_resolver_summary() {
        let text = render(|out| write_resolver_summary(out, &good()));
        assert_eq!(
            text,
            "Overall stats for DNS Server 1.1.1.1:\n\
             \x20 Overall average resolution time: 15.00 ms\n\
             \x20 Overall minimum resolution time: 12.00 ms\n\
             \x20 Overall maximum resolution time: 18.00 ms\n"
        );
    }

    #[test]
    fn test_resolver_summary_unavailable() {
        let text = render(|out| write_resolver_summary(out, &bad()));
        assert!(text.starts_with("Overall stats for DNS Server 8.8.8.8:\n"));
        assert!(text.contains("0 of 1 domains succeeded"));
    }

    #[test]
    fn test_table_ranking() {
        let report = BenchReport::new(2, vec![bad(), good()]);
        let text = render(|out| write_results(out, &report, OutputFormat::Table, false));
        assert!(text.contains("Cloudflare"));
        assert!(text.contains("15.00 ms"));
        assert!(text.contains("1 resolver(s) without enough successful domains"));
    }

    #[test]
    fn test_csv_rows() {
        let report = BenchReport::new(2, vec![good(), bad()]);

        let brief = render(|out| write_results(out, &report, OutputFormat::Csv, false));
        let lines: Vec<_> = brief.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("#Resolver,Name,Domain"));
        assert!(lines[1].starts_with("1.1.1.1,Cloudflare,*,2,15.00,12.00,18.00,4.24,"));

        let detailed = render(|out| write_results(out, &report, OutputFormat::Tsv, true));
        let lines: Vec<_> = detailed.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("1.1.1.1\tCloudflare\ta.example\t2\t12.00"));
    }

    #[test]
    fn test_json_output() {
        let report = BenchReport::new(2, vec![good()]);
        let text = render(|out| write_results(out, &report, OutputFormat::Json, false));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["samples_per_point"], 2);
        assert_eq!(value["resolvers"][0]["domains"][1]["domain"], "b.example");
    }
}
