use crate::summary::SummaryRecord;
use anyhow::Result;
use std::path::Path;

pub struct MarkdownExporter;

impl MarkdownExporter {
    pub async fn export(summary: &SummaryRecord, path: impl AsRef<Path>) -> Result<()> {
        let markdown = Self::format(summary);
        tokio::fs::write(path, markdown).await?;
        Ok(())
    }

    pub fn format(summary: &SummaryRecord) -> String {
        let verdict = if summary.sla_passed {
            "**PASSED** — all metrics within thresholds."
        } else {
            "**FAILED** — one or more thresholds were not met."
        };

        format!(
            r#"# Load Test SLA Report: {}

Generated: {}

## Run Parameters

| Parameter | Value |
|-----------|-------|
| Threads | {} |
| Ramp-up | {} s |
| Duration | {} s |
| Repo | {} |
| JMX | {} |

## Summary Statistics

| Metric | Value |
|--------|-------|
| Total Samples | {} |
| Samples OK | {} |
| Samples KO | {} |
| HTTP 5xx | {} |
| Error Rate | {:.2}% |
| Throughput | {:.2} tps |

## Latency

| Metric | Value |
|--------|-------|
| Average | {:.2} ms |
| P90 | {:.2} ms |
| P95 | {:.2} ms |

## SLA Evaluation

{}

{}
"#,
            summary.test_name,
            summary.timestamp,
            summary.threads,
            summary.rampup,
            summary.duration,
            if summary.repo.is_empty() { "-" } else { summary.repo.as_str() },
            if summary.jmx.is_empty() { "-" } else { summary.jmx.as_str() },
            summary.samples_total,
            summary.samples_ok,
            summary.samples_ko,
            summary.http_500,
            summary.error_pct,
            summary.tps,
            summary.avg_rt_ms,
            summary.p90_rt_ms,
            summary.p95_rt_ms,
            verdict,
            summary
                .sla_reasons
                .iter()
                .map(|r| format!("- {r}"))
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}
