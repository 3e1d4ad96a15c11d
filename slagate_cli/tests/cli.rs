use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

const PASSING_LOG: &str = "timeStamp,elapsed,label,responseCode,success\n\
                           0,100,home,200,true\n\
                           100,200,home,200,true\n\
                           300,300,home,200,true\n\
                           600,100,home,200,true\n";

fn write_log(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// A command with the run-metadata environment cleared, so ambient CI
/// variables cannot leak into assertions.
fn slagate() -> Command {
    let mut cmd = Command::cargo_bin("slagate").unwrap();
    for var in ["THREADS", "RAMP_UP", "DURATION", "TEST_NAME", "REPO", "JMX"] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn passing_run_exits_zero_and_writes_summary() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), "results.jtl", PASSING_LOG);
    let out = dir.path().join("summary.json");

    slagate()
        .args(["check"])
        .arg(&log)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("SLA validation passed"));

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(summary["test_name"], "results.jtl");
    assert_eq!(summary["samples_total"], 4);
    assert_eq!(summary["samples_ok"], 4);
    assert_eq!(summary["samples_ko"], 0);
    assert_eq!(summary["http_500"], 0);
    assert_eq!(summary["error_pct"], 0.0);
    assert_eq!(summary["avg_rt_ms"], 175.0);
    // 4 samples over a 0.7 s span, rounded to two decimals.
    assert_eq!(summary["tps"], 5.71);
    assert_eq!(summary["p90_rt_ms"], 300.0);
    assert_eq!(summary["p95_rt_ms"], 300.0);
    assert_eq!(summary["sla_passed"], true);
    assert_eq!(summary["sla_reasons"].as_array().unwrap().len(), 4);
    assert!(summary["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn server_errors_fail_the_gate() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(
        dir.path(),
        "results.jtl",
        "timeStamp,elapsed,responseCode,success\n\
         0,50,503,true\n\
         100,50,200,true\n",
    );
    let out = dir.path().join("summary.json");

    slagate()
        .args(["check"])
        .arg(&log)
        .arg("--out")
        .arg(&out)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("SLA validation failed"));

    // The artifact is still produced for a failed verdict.
    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(summary["sla_passed"], false);
    assert_eq!(summary["http_500"], 1);
    let reasons = summary["sla_reasons"].as_array().unwrap();
    assert_eq!(
        reasons[0].as_str().unwrap(),
        "Detected 1 HTTP 5xx responses (none allowed)."
    );
}

#[test]
fn empty_log_exits_one_without_summary() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(
        dir.path(),
        "empty.jtl",
        "timeStamp,elapsed,responseCode,success\n",
    );
    let out = dir.path().join("summary.json");

    slagate()
        .args(["check"])
        .arg(&log)
        .arg("--out")
        .arg(&out)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No samples"));

    assert!(!out.exists());
}

#[test]
fn missing_file_exits_one() {
    let dir = tempfile::tempdir().unwrap();

    slagate()
        .args(["check"])
        .arg(dir.path().join("does-not-exist.jtl"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn run_metadata_flows_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), "results.jtl", PASSING_LOG);
    let out = dir.path().join("summary.json");

    slagate()
        .args(["check"])
        .arg(&log)
        .arg("--out")
        .arg(&out)
        .env("THREADS", "25")
        .env("RAMP_UP", "10")
        .env("DURATION", "60")
        .env("TEST_NAME", "nightly-smoke")
        .env("REPO", "git@example.com:perf/suite.git")
        .assert()
        .success();

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(summary["threads"], 25);
    assert_eq!(summary["rampup"], 10);
    assert_eq!(summary["duration"], 60);
    assert_eq!(summary["test_name"], "nightly-smoke");
    assert_eq!(summary["repo"], "git@example.com:perf/suite.git");
}

#[test]
fn threshold_flags_override_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), "results.jtl", PASSING_LOG);
    let out = dir.path().join("summary.json");

    // ~5.71 tps passes the default minimum but not a raised one.
    slagate()
        .args(["check"])
        .arg(&log)
        .arg("--out")
        .arg(&out)
        .args(["--min-tps", "100"])
        .assert()
        .failure()
        .code(1);

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(summary["sla_min_tps"], 100.0);
    assert_eq!(summary["sla_passed"], false);
    let reasons = summary["sla_reasons"].as_array().unwrap();
    assert_eq!(reasons[3].as_str().unwrap(), "TPS 5.71 < required minimum 100.");
}

#[test]
fn thresholds_file_is_honored() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), "results.jtl", PASSING_LOG);
    let thresholds = write_log(
        dir.path(),
        "thresholds.yaml",
        "min_tps: 1\nmax_avg_latency_ms: 120\n",
    );
    let out = dir.path().join("summary.json");

    // Average latency of 175 ms breaks the tightened file threshold.
    slagate()
        .args(["check"])
        .arg(&log)
        .arg("--out")
        .arg(&out)
        .arg("--thresholds")
        .arg(&thresholds)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Average latency 175.00 ms > limit 120 ms."));
}

#[test]
fn validate_reports_ingestion_counts() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(
        dir.path(),
        "results.jtl",
        "timeStamp,elapsed,responseCode,success\n\
         0,50,200,true\n\
         100,60,500,false\n",
    );

    slagate()
        .args(["validate"])
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("Samples: 2"))
        .stdout(predicate::str::contains("HTTP 5xx: 1"));
}

#[test]
fn report_rerenders_summary_as_markdown() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), "results.jtl", PASSING_LOG);
    let out = dir.path().join("summary.json");

    slagate()
        .args(["check"])
        .arg(&log)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    slagate()
        .args(["report"])
        .arg(&out)
        .args(["--format", "markdown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Load Test SLA Report"))
        .stdout(predicate::str::contains("No HTTP 5xx responses (OK)."));
}

#[test]
fn report_rejects_unknown_format() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), "results.jtl", PASSING_LOG);
    let out = dir.path().join("summary.json");

    slagate()
        .args(["check"])
        .arg(&log)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    slagate()
        .args(["report"])
        .arg(&out)
        .args(["--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown format"));
}
