//! Console and JSON rendering of duplication reports.
//!
//! Presentation only: the engine's output is rendered as-is, no
//! re-sorting or re-aggregation happens here.

use console::style;

use crate::dedupe::{AnalysisReport, OTHER_SOURCE};
use crate::fmt::{format_bytes, MAGNIFIER, SPARKLES, WARNING};

/// Print a duplication report to the console.
pub fn print_report(report: &AnalysisReport) {
    println!();
    println!(
        "{} {}",
        MAGNIFIER,
        style("Bundle Duplication Report").bold()
    );
    println!("{}", style("━".repeat(60)).dim());
    println!();

    if report.items.is_empty() {
        println!("{} No duplicated modules found across bundles.", SPARKLES);
    } else {
        for item in &report.items {
            let name = if item.source == OTHER_SOURCE {
                style("Other (small modules)").italic().to_string()
            } else {
                style(&item.source).cyan().to_string()
            };
            println!(
                "  {:<60} {:>12} wasted",
                name,
                style(format_bytes(item.wasted_bytes)).bold()
            );
            if item.source_bytes.is_empty() {
                for url in &item.urls {
                    println!("      in {}", style(url).dim());
                }
            } else {
                for (url, bytes) in item.urls.iter().zip(&item.source_bytes) {
                    println!(
                        "      {:>10}  {}",
                        format_bytes(*bytes),
                        style(url).dim()
                    );
                }
            }
        }

        println!();
        println!(
            "  {} {}",
            style("Total wasted:").bold(),
            style(format_bytes(report.total_wasted_bytes())).red().bold()
        );

        let mut by_url: Vec<(&String, &u64)> = report.wasted_bytes_by_url.iter().collect();
        by_url.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (url, wasted) in by_url {
            println!("    {:>10}  {}", format_bytes(*wasted), style(url).dim());
        }
    }

    if !report.failures.is_empty() {
        println!();
        for failure in &report.failures {
            println!(
                "{} {} {}: {}",
                WARNING,
                style("excluded").yellow(),
                failure.url,
                failure.error
            );
        }
    }
    println!();
}

/// Print a duplication report as pretty JSON.
pub fn print_json_report(report: &AnalysisReport) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
