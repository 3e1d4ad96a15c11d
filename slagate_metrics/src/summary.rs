use crate::sla::SlaReport;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Run metadata supplied by the caller (CI pipeline variables or flags), not
/// derived from the log itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunInfo {
    pub test_name: String,
    pub threads: u64,
    pub rampup: u64,
    pub duration: u64,
    pub repo: String,
    pub jmx: String,
}

/// The machine-readable summary artifact.
///
/// A flat document with stable field names; build pipelines read these keys,
/// so renaming any of them is a breaking change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub test_name: String,
    /// UTC, second precision, `Z` suffix.
    pub timestamp: String,

    pub threads: u64,
    pub rampup: u64,
    pub duration: u64,
    pub repo: String,
    pub jmx: String,

    pub samples_total: u64,
    pub samples_ok: u64,
    pub samples_ko: u64,
    pub http_500: u64,
    pub error_pct: f64,

    pub tps: f64,
    pub avg_rt_ms: f64,
    pub p90_rt_ms: f64,
    pub p95_rt_ms: f64,

    pub sla_min_tps: f64,
    pub sla_max_error_pct: f64,
    pub sla_max_avg_latency_ms: f64,

    pub sla_passed: bool,
    pub sla_reasons: Vec<String>,
}

impl SummaryRecord {
    /// Flatten a finished evaluation into the artifact, stamped with the
    /// current wall-clock time. Float metrics are rounded to two decimals.
    pub fn build(info: &RunInfo, report: &SlaReport) -> Self {
        let m = &report.metrics;
        let t = &report.thresholds;
        Self {
            test_name: info.test_name.clone(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            threads: info.threads,
            rampup: info.rampup,
            duration: info.duration,
            repo: info.repo.clone(),
            jmx: info.jmx.clone(),
            samples_total: m.samples_total,
            samples_ok: m.samples_ok,
            samples_ko: m.samples_ko,
            http_500: m.http_5xx,
            error_pct: round2(m.error_pct),
            tps: round2(m.tps),
            avg_rt_ms: round2(m.avg_rt_ms),
            p90_rt_ms: round2(m.p90_rt_ms),
            p95_rt_ms: round2(m.p95_rt_ms),
            sla_min_tps: t.min_tps,
            sla_max_error_pct: t.max_error_pct,
            sla_max_avg_latency_ms: t.max_avg_latency_ms,
            sla_passed: report.passed,
            sla_reasons: report.reasons.clone(),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
