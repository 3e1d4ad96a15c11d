use anyhow::Result;
use clap::Args;
use colored::Colorize;
use slagate_core::{read_samples, GateError};
use slagate_metrics::aggregator::{RunAggregate, RunMetrics};
use slagate_metrics::exporters::JsonExporter;
use slagate_metrics::sla::{evaluate, SlaReport};
use slagate_metrics::summary::{RunInfo, SummaryRecord};
use slagate_metrics::thresholds::{load_thresholds_from_file, Thresholds};
use std::path::PathBuf;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::debug;

use crate::ui;

#[derive(Args)]
pub struct CheckArgs {
    /// Path to the result file (CSV with one header row)
    pub jtl_file: PathBuf,

    /// Thread count used for the run (recorded in the summary)
    #[arg(long, env = "THREADS", default_value_t = 0)]
    pub threads: u64,

    /// Ramp-up seconds used for the run (recorded in the summary)
    #[arg(long, env = "RAMP_UP", default_value_t = 0)]
    pub rampup: u64,

    /// Planned duration seconds of the run (recorded in the summary)
    #[arg(long, env = "DURATION", default_value_t = 0)]
    pub duration: u64,

    /// Test name (defaults to the result file's base name)
    #[arg(long, env = "TEST_NAME")]
    pub test_name: Option<String>,

    /// Repository identifier (recorded in the summary)
    #[arg(long, env = "REPO", default_value = "")]
    pub repo: String,

    /// Test-plan identifier (recorded in the summary)
    #[arg(long, env = "JMX", default_value = "")]
    pub jmx: String,

    /// Where to write the summary artifact
    #[arg(short, long, default_value = "summary.json")]
    pub out: PathBuf,

    /// Thresholds file (YAML, TOML, or JSON)
    #[arg(long)]
    pub thresholds: Option<PathBuf>,

    /// Override the maximum global error percentage
    #[arg(long)]
    pub max_error_pct: Option<f64>,

    /// Override the maximum average latency in milliseconds
    #[arg(long)]
    pub max_avg_latency_ms: Option<f64>,

    /// Override the minimum transactions per second
    #[arg(long)]
    pub min_tps: Option<f64>,
}

/// Run the gate: ingest, aggregate, evaluate, report, export.
///
/// Returns the typed verdict; mapping it to a process exit status is the
/// caller's concern.
pub async fn execute(args: CheckArgs) -> Result<bool> {
    println!("{}", "=== SLA Gate ===".bold().cyan());
    println!("Loading results: {}", args.jtl_file.display());

    let thresholds = resolve_thresholds(&args).await?;
    debug!(?thresholds, "resolved thresholds");

    let samples = read_samples(&args.jtl_file)?;

    let mut aggregate = RunAggregate::new();
    aggregate.observe_all(&samples);
    let metrics = aggregate.finalize()?;

    let report = evaluate(&metrics, &thresholds);
    print_report(&metrics, &thresholds, &report);

    let info = RunInfo {
        test_name: args.test_name.clone().unwrap_or_else(|| {
            args.jtl_file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| args.jtl_file.display().to_string())
        }),
        threads: args.threads,
        rampup: args.rampup,
        duration: args.duration,
        repo: args.repo.clone(),
        jmx: args.jmx.clone(),
    };
    let summary = SummaryRecord::build(&info, &report);

    // A failed write is surfaced distinctly but does not flip the verdict.
    match JsonExporter::export(&summary, &args.out).await {
        Ok(()) => ui::print_info(&format!("Summary written to {}", args.out.display())),
        Err(e) => ui::print_error(&format!(
            "Failed to write summary to {}: {e}",
            args.out.display()
        )),
    }

    Ok(report.passed)
}

/// Thresholds come from defaults, then an optional file, then per-flag
/// overrides, in that order.
async fn resolve_thresholds(args: &CheckArgs) -> Result<Thresholds> {
    let mut thresholds = match &args.thresholds {
        Some(path) => load_thresholds_from_file(path).await?,
        None => Thresholds::default(),
    };

    if let Some(v) = args.max_error_pct {
        thresholds.max_error_pct = v;
    }
    if let Some(v) = args.max_avg_latency_ms {
        thresholds.max_avg_latency_ms = v;
    }
    if let Some(v) = args.min_tps {
        thresholds.min_tps = v;
    }

    thresholds
        .validate()
        .map_err(GateError::InvalidThresholds)?;
    Ok(thresholds)
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn row(name: &str, value: String) -> MetricRow {
    MetricRow {
        name: name.to_string(),
        value,
    }
}

fn print_report(metrics: &RunMetrics, thresholds: &Thresholds, report: &SlaReport) {
    ui::print_header("Performance Results");

    let rows = vec![
        row("Total Samples", metrics.samples_total.to_string()),
        row(
            "Samples OK / KO",
            format!("{} / {}", metrics.samples_ok, metrics.samples_ko),
        ),
        row("Test Duration", format!("{:.2} s", metrics.duration_s)),
        row(
            "Global Error Rate",
            format!(
                "{:.2}% (max SLA: {}%)",
                metrics.error_pct, thresholds.max_error_pct
            ),
        ),
        row(
            "Average Latency",
            format!(
                "{:.2} ms (max SLA: {} ms)",
                metrics.avg_rt_ms, thresholds.max_avg_latency_ms
            ),
        ),
        row(
            "Throughput",
            format!("{:.2} tps (min SLA: {} tps)", metrics.tps, thresholds.min_tps),
        ),
        row(
            "Latency Percentiles",
            format!("p90={:.2} ms, p95={:.2} ms", metrics.p90_rt_ms, metrics.p95_rt_ms),
        ),
        row(
            "Latency Min / Max",
            format!("{} ms / {} ms", metrics.min_rt_ms, metrics.max_rt_ms),
        ),
        row("HTTP 5xx", metrics.http_5xx.to_string()),
    ];

    println!("{}", Table::new(rows).with(Style::rounded()));
    println!();

    if report.passed {
        ui::print_success("SLA validation passed. All metrics meet the thresholds.");
    } else {
        ui::print_error("SLA validation failed. One or more thresholds were not met.");
    }

    ui::print_header("SLA Evaluation Detail");
    for reason in &report.reasons {
        println!("- {reason}");
    }
    println!();
}
