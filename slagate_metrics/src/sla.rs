use crate::aggregator::RunMetrics;
use crate::thresholds::Thresholds;
use serde::{Deserialize, Serialize};

/// Outcome of judging one run against the thresholds.
///
/// `reasons` holds one line per rule in evaluation order, for passes as well
/// as failures. Consumers parse these strings, so order and wording are part
/// of the contract: each names the measured value and the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlaReport {
    pub passed: bool,
    pub reasons: Vec<String>,
    pub metrics: RunMetrics,
    pub thresholds: Thresholds,
}

/// Judge aggregated metrics against the thresholds.
///
/// Four independent rules, fixed order: no HTTP 5xx at all, error rate,
/// average latency, minimum throughput. The overall verdict is the
/// conjunction of all four.
pub fn evaluate(metrics: &RunMetrics, thresholds: &Thresholds) -> SlaReport {
    let mut passed = true;
    let mut reasons = Vec::with_capacity(4);

    // 1. HTTP 5xx responses — never tolerated, independent of the error-rate
    // threshold.
    if metrics.http_5xx > 0 {
        passed = false;
        reasons.push(format!(
            "Detected {} HTTP 5xx responses (none allowed).",
            metrics.http_5xx
        ));
    } else {
        reasons.push("No HTTP 5xx responses (OK).".to_string());
    }

    // 2. Global error rate.
    if metrics.error_pct > thresholds.max_error_pct {
        passed = false;
        reasons.push(format!(
            "Global error rate {:.2}% > limit {:.2}%.",
            metrics.error_pct, thresholds.max_error_pct
        ));
    } else {
        reasons.push(format!(
            "Global error rate {:.2}% <= limit {:.2}% (OK).",
            metrics.error_pct, thresholds.max_error_pct
        ));
    }

    // 3. Average latency.
    if metrics.avg_rt_ms > thresholds.max_avg_latency_ms {
        passed = false;
        reasons.push(format!(
            "Average latency {:.2} ms > limit {} ms.",
            metrics.avg_rt_ms, thresholds.max_avg_latency_ms
        ));
    } else {
        reasons.push(format!(
            "Average latency {:.2} ms <= limit {} ms (OK).",
            metrics.avg_rt_ms, thresholds.max_avg_latency_ms
        ));
    }

    // 4. Minimum throughput.
    if metrics.tps < thresholds.min_tps {
        passed = false;
        reasons.push(format!(
            "TPS {:.2} < required minimum {}.",
            metrics.tps, thresholds.min_tps
        ));
    } else {
        reasons.push(format!(
            "TPS {:.2} >= required minimum {} (OK).",
            metrics.tps, thresholds.min_tps
        ));
    }

    SlaReport {
        passed,
        reasons,
        metrics: metrics.clone(),
        thresholds: *thresholds,
    }
}
