use anyhow::Result;
use colored::Colorize;
use slagate_metrics::exporters::MarkdownExporter;
use slagate_metrics::summary::SummaryRecord;
use std::path::PathBuf;

use crate::ui;

pub async fn execute(summary_file: PathBuf, format: String, output: Option<PathBuf>) -> Result<()> {
    println!("{}", "=== Generate Report ===".bold().cyan());
    println!("Summary file: {}", summary_file.display());
    println!("Format: {}", format);

    let contents = tokio::fs::read_to_string(&summary_file).await?;
    let summary: SummaryRecord = serde_json::from_str(&contents)?;

    match format.as_str() {
        "cli" => {
            print_cli_report(&summary);
        }
        "json" => {
            let json = serde_json::to_string_pretty(&summary)?;
            if let Some(output_path) = output {
                tokio::fs::write(output_path, json).await?;
            } else {
                println!("{}", json);
            }
        }
        "markdown" => {
            let md = MarkdownExporter::format(&summary);
            if let Some(output_path) = output {
                tokio::fs::write(output_path, md).await?;
            } else {
                println!("{}", md);
            }
        }
        _ => {
            anyhow::bail!("Unknown format: {}", format);
        }
    }

    Ok(())
}

fn print_cli_report(summary: &SummaryRecord) {
    println!("\n{}", "=== Load Test Summary ===".bold().green());
    println!("Test: {}", summary.test_name.cyan());
    println!("Generated: {}", summary.timestamp);
    if !summary.repo.is_empty() {
        println!("Repo: {}", summary.repo);
    }
    if !summary.jmx.is_empty() {
        println!("Plan: {}", summary.jmx);
    }

    println!("\n{}", "Metrics:".bold());
    println!(
        "  Samples: {} total, {} ok, {} ko",
        summary.samples_total, summary.samples_ok, summary.samples_ko
    );
    println!("  Error Rate: {:.2}%", summary.error_pct);
    println!("  Throughput: {:.2} tps", summary.tps);
    println!(
        "  Latency: avg {:.2} ms, p90 {:.2} ms, p95 {:.2} ms",
        summary.avg_rt_ms, summary.p90_rt_ms, summary.p95_rt_ms
    );
    println!("  HTTP 5xx: {}", summary.http_500);

    println!();
    if summary.sla_passed {
        ui::print_success("SLA passed");
    } else {
        ui::print_error("SLA failed");
    }

    println!("\n{}", "SLA Evaluation:".bold());
    for reason in &summary.sla_reasons {
        println!("  - {}", reason);
    }
}
