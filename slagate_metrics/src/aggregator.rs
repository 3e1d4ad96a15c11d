use serde::{Deserialize, Serialize};
use slagate_core::{GateError, Result, Sample};

/// Metrics derived from one full pass over a result log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    pub samples_total: u64,
    pub samples_ok: u64,
    pub samples_ko: u64,
    pub http_5xx: u64,
    /// Global error percentage, 0..=100.
    pub error_pct: f64,
    pub avg_rt_ms: f64,
    pub min_rt_ms: u64,
    pub max_rt_ms: u64,
    pub p90_rt_ms: f64,
    pub p95_rt_ms: f64,
    /// Wall-clock span of the run in seconds, from the earliest sample start
    /// to the latest sample end.
    pub duration_s: f64,
    pub tps: f64,
}

/// Accumulated state, mutated once per sample and finalized after the whole
/// input has been consumed. Individual samples are not retained; only their
/// latency values are kept for the percentile computation.
#[derive(Debug, Clone)]
pub struct RunAggregate {
    samples_total: u64,
    samples_ko: u64,
    http_5xx: u64,
    latency_sum_ms: u64,
    min_start_ms: i64,
    max_end_ms: i64,
    latencies: Vec<u64>,
}

impl RunAggregate {
    pub fn new() -> Self {
        Self {
            samples_total: 0,
            samples_ko: 0,
            http_5xx: 0,
            latency_sum_ms: 0,
            // Sentinels so the first sample always updates both extrema.
            min_start_ms: i64::MAX,
            max_end_ms: i64::MIN,
            latencies: Vec::new(),
        }
    }

    /// Fold one sample into the running aggregates.
    pub fn observe(&mut self, sample: &Sample) {
        self.samples_total += 1;
        self.latency_sum_ms += sample.elapsed_ms;
        self.latencies.push(sample.elapsed_ms);

        self.min_start_ms = self.min_start_ms.min(sample.timestamp_ms);
        self.max_end_ms = self.max_end_ms.max(sample.end_ms());

        if !sample.success {
            self.samples_ko += 1;
        }
        if sample.is_server_error() {
            self.http_5xx += 1;
        }
    }

    pub fn observe_all<'a>(&mut self, samples: impl IntoIterator<Item = &'a Sample>) {
        for sample in samples {
            self.observe(sample);
        }
    }

    pub fn len(&self) -> u64 {
        self.samples_total
    }

    pub fn is_empty(&self) -> bool {
        self.samples_total == 0
    }

    /// Derive the final metrics. Zero samples is a hard error, not a
    /// zero-metrics report.
    pub fn finalize(mut self) -> Result<RunMetrics> {
        if self.samples_total == 0 {
            return Err(GateError::NoSamples);
        }

        let total = self.samples_total as f64;
        let error_pct = self.samples_ko as f64 / total * 100.0;
        let avg_rt_ms = self.latency_sum_ms as f64 / total;

        let duration_ms = (self.max_end_ms - self.min_start_ms).max(0);
        let duration_s = if duration_ms > 0 {
            duration_ms as f64 / 1000.0
        } else {
            0.0
        };
        let tps = if duration_s > 0.0 {
            total / duration_s
        } else {
            0.0
        };

        self.latencies.sort_unstable();
        let p90_rt_ms = percentile(&self.latencies, 0.90);
        let p95_rt_ms = percentile(&self.latencies, 0.95);
        let min_rt_ms = *self.latencies.first().unwrap_or(&0);
        let max_rt_ms = *self.latencies.last().unwrap_or(&0);

        Ok(RunMetrics {
            samples_total: self.samples_total,
            samples_ok: self.samples_total - self.samples_ko,
            samples_ko: self.samples_ko,
            http_5xx: self.http_5xx,
            error_pct,
            avg_rt_ms,
            min_rt_ms,
            max_rt_ms,
            p90_rt_ms,
            p95_rt_ms,
            duration_s,
            tps,
        })
    }
}

impl Default for RunAggregate {
    fn default() -> Self {
        Self::new()
    }
}

/// Nearest-rank percentile over an ascending-sorted slice: the value at index
/// `round(p * (n-1))`, clamped into bounds, never interpolated. Downstream
/// consumers depend on the exact values this formula produces.
fn percentile(sorted: &[u64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = (p * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx.min(sorted.len() - 1)] as f64
}
