use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Service-level thresholds the aggregated metrics are judged against.
///
/// An immutable value passed into each evaluation call; there is no
/// process-wide threshold state. Zero tolerance for HTTP 5xx responses is
/// not configurable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Inclusive upper bound on the global error percentage.
    #[serde(default = "default_max_error_pct")]
    pub max_error_pct: f64,
    /// Inclusive upper bound on the mean latency, milliseconds.
    #[serde(default = "default_max_avg_latency_ms")]
    pub max_avg_latency_ms: f64,
    /// Inclusive lower bound on throughput, samples per second.
    #[serde(default = "default_min_tps")]
    pub min_tps: f64,
}

fn default_max_error_pct() -> f64 {
    1.0
}

fn default_max_avg_latency_ms() -> f64 {
    3000.0
}

fn default_min_tps() -> f64 {
    5.0
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_error_pct: default_max_error_pct(),
            max_avg_latency_ms: default_max_avg_latency_ms(),
            min_tps: default_min_tps(),
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), String> {
        if !self.max_error_pct.is_finite() || self.max_error_pct < 0.0 {
            return Err(format!(
                "max_error_pct must be a non-negative number, got {}",
                self.max_error_pct
            ));
        }
        if !self.max_avg_latency_ms.is_finite() || self.max_avg_latency_ms < 0.0 {
            return Err(format!(
                "max_avg_latency_ms must be a non-negative number, got {}",
                self.max_avg_latency_ms
            ));
        }
        if !self.min_tps.is_finite() || self.min_tps < 0.0 {
            return Err(format!(
                "min_tps must be a non-negative number, got {}",
                self.min_tps
            ));
        }
        Ok(())
    }
}

/// TOML files keep the values under a `[thresholds]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdsConfig {
    pub thresholds: Thresholds,
}

pub async fn load_thresholds_from_file(path: impl AsRef<Path>) -> Result<Thresholds> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path).await?;

    let extension = path.extension().and_then(|s| s.to_str());

    match extension {
        Some("yaml") | Some("yml") => parse_yaml(&contents),
        Some("toml") => parse_toml(&contents),
        Some("json") => parse_json(&contents),
        _ => Err(anyhow::anyhow!(
            "Unsupported thresholds file format. Use .yaml, .yml, .toml, or .json"
        )),
    }
}

fn parse_yaml(content: &str) -> Result<Thresholds> {
    let thresholds: Thresholds = serde_yaml::from_str(content)?;
    thresholds.validate().map_err(|e| anyhow::anyhow!(e))?;
    Ok(thresholds)
}

fn parse_toml(content: &str) -> Result<Thresholds> {
    let config: ThresholdsConfig = toml::from_str(content)?;
    config.thresholds.validate().map_err(|e| anyhow::anyhow!(e))?;
    Ok(config.thresholds)
}

fn parse_json(content: &str) -> Result<Thresholds> {
    let thresholds: Thresholds = serde_json::from_str(content)?;
    thresholds.validate().map_err(|e| anyhow::anyhow!(e))?;
    Ok(thresholds)
}
