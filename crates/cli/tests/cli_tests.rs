//! CLI integration tests

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const METRICS_CSV: &str = "\
cpu_usage,memory_usage,latency,request_rate
35,40,120,200
42,48,150,310
55,52,180,400
61,58,200,450
68,66,230,520
72,70,245,580
78,82,240,620
85,79,290,700
91,88,350,820
96,93,420,950
50,80,160,380
40,45,300,260
";

fn cloudopt(work_dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cloudopt"));
    cmd.current_dir(work_dir)
        .env_remove("CLOUDOPT_DATA")
        .env_remove("CLOUDOPT_MODEL_DIR")
        .env_remove("RUST_LOG");
    cmd
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("Failed to execute cloudopt")
}

fn parse_stdout(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("stdout should be a JSON document")
}

fn write_csv(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("metrics.csv");
    fs::write(&path, METRICS_CSV).unwrap();
    path
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(cloudopt(temp_dir.path()).arg("--help"));

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(
        stdout.contains("Cloud Risk Optimizer"),
        "Should show app name"
    );
    assert!(stdout.contains("train"), "Should show train command");
    assert!(stdout.contains("assess"), "Should show assess command");
    assert!(stdout.contains("label"), "Should show label command");
    assert!(stdout.contains("inspect"), "Should show inspect command");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(cloudopt(temp_dir.path()).arg("--version"));

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("cloudopt"), "Should show binary name");
}

/// Test that assess without flags scores the sample workload
#[test]
fn test_assess_sample_json() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(cloudopt(temp_dir.path()).args(["--format", "json", "assess"]));

    assert!(output.status.success());
    let result = parse_stdout(&output);
    assert_eq!(result["risk_score"], 0.71);
    assert_eq!(result["decision"], "MONITOR closely (Moderate Risk)");
}

/// Test assessing explicit metrics
#[test]
fn test_assess_explicit_metrics() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(cloudopt(temp_dir.path()).args([
        "-f",
        "json",
        "assess",
        "--cpu",
        "20",
        "--memory",
        "30",
        "--latency",
        "50",
        "--request-rate",
        "100",
    ]));

    assert!(output.status.success());
    let result = parse_stdout(&output);
    assert_eq!(result["risk_score"], 0.2);
    assert_eq!(result["decision"], "NO ACTION required (System Healthy)");
}

/// Test that a partial set of metric flags is rejected
#[test]
fn test_assess_partial_metrics_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(cloudopt(temp_dir.path()).args(["assess", "--cpu", "90"]));

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("must be given together"));
}

/// Test that non-finite metrics are rejected by the weighted scorer
#[test]
fn test_assess_rejects_non_finite_metrics() {
    let temp_dir = TempDir::new().unwrap();
    for cpu in ["NaN", "inf"] {
        let output = run(cloudopt(temp_dir.path()).args([
            "-f",
            "json",
            "assess",
            "--cpu",
            cpu,
            "--memory",
            "10",
            "--latency",
            "10",
            "--request-rate",
            "10",
        ]));

        assert!(!output.status.success(), "cpu={} should fail", cpu);
        assert!(output.stdout.is_empty());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("finite"), "stderr: {}", stderr);
    }
}

/// Test batch assessment of a CSV
#[test]
fn test_assess_batch_input() {
    let temp_dir = TempDir::new().unwrap();
    let csv = write_csv(&temp_dir);
    let output = run(cloudopt(temp_dir.path())
        .args(["-f", "json", "assess", "--input"])
        .arg(&csv));

    assert!(output.status.success());
    let results = parse_stdout(&output);
    let results = results.as_array().expect("batch output should be an array");
    assert_eq!(results.len(), 12);

    assert_eq!(results[0]["cpu_usage"], 35.0);
    assert_eq!(results[0]["risk_score"], 0.32);
    assert_eq!(results[0]["decision"], "NO ACTION required (System Healthy)");
    assert_eq!(results[6]["risk_score"], 0.71);
    assert_eq!(results[9]["risk_score"], 0.93);
    assert_eq!(results[9]["decision"], "SCALE UP resources (High Risk Detected)");
}

/// Test that label reports one label per row
#[test]
fn test_label_json() {
    let temp_dir = TempDir::new().unwrap();
    let csv = write_csv(&temp_dir);
    let output = run(cloudopt(temp_dir.path())
        .args(["-f", "json", "label", "--data"])
        .arg(&csv));

    assert!(output.status.success());
    let rows = parse_stdout(&output);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 12);
    let positive = rows.iter().filter(|r| r["risk_label"] == 1).count();
    assert_eq!(positive, 6);
    assert_eq!(rows[0]["risk_label"], 0);
    assert_eq!(rows[9]["risk_label"], 1);
}

/// Test train followed by inspect and model-backed assessment
#[test]
fn test_train_inspect_and_assess_with_model() {
    let temp_dir = TempDir::new().unwrap();
    let csv = write_csv(&temp_dir);
    let model_dir = temp_dir.path().join("models");

    let output = run(cloudopt(temp_dir.path())
        .args(["-f", "json", "train", "--data"])
        .arg(&csv)
        .arg("--out")
        .arg(&model_dir));
    assert!(
        output.status.success(),
        "train failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report = parse_stdout(&output);
    assert_eq!(report["rows"], 12);
    assert_eq!(report["positive_labels"], 6);
    let labeled = report["labeled_rows"].as_array().unwrap();
    assert_eq!(labeled.len(), 12);
    assert_eq!(labeled[9]["risk_label"], 1);
    assert!(model_dir.join("scaler.json").exists());
    assert!(model_dir.join("risk_model.json").exists());

    let output = run(cloudopt(temp_dir.path())
        .args(["-f", "json", "inspect", "--model-dir"])
        .arg(&model_dir));
    assert!(output.status.success());
    let artifacts = parse_stdout(&output);
    let names: Vec<&str> = artifacts
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["scaler", "risk_model"]);

    let output = run(cloudopt(temp_dir.path())
        .args(["-f", "json", "assess", "--model-dir"])
        .arg(&model_dir));
    assert!(output.status.success());
    let result = parse_stdout(&output);
    let score = result["risk_score"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&score));
}

/// Test that train honors the environment fallbacks
#[test]
fn test_train_env_fallbacks() {
    let temp_dir = TempDir::new().unwrap();
    let csv = write_csv(&temp_dir);
    let model_dir = temp_dir.path().join("env-models");

    let output = run(cloudopt(temp_dir.path())
        .env("CLOUDOPT_DATA", &csv)
        .env("CLOUDOPT_MODEL_DIR", &model_dir)
        .arg("train"));

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Trained on 12 rows"));
    assert!(stdout.contains("Label"), "should print the label table");
    assert!(stdout.contains("1 (high)"));
    assert!(stdout.find("1 (high)") < stdout.find("Trained on"));
    assert!(model_dir.join("risk_model.json").exists());
}

/// Test that a missing dataset fails with a non-zero exit
#[test]
fn test_train_missing_data_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(cloudopt(temp_dir.path())
        .args(["train", "--data", "does-not-exist.csv", "--out"])
        .arg(temp_dir.path()));

    assert!(!output.status.success());
    assert!(!temp_dir.path().join("scaler.json").exists());
}

/// Test that inspect rejects a tampered artifact
#[test]
fn test_inspect_detects_tampering() {
    let temp_dir = TempDir::new().unwrap();
    let csv = write_csv(&temp_dir);
    let output = run(cloudopt(temp_dir.path())
        .args(["train", "--data"])
        .arg(&csv)
        .arg("--out")
        .arg(temp_dir.path()));
    assert!(output.status.success());

    let scaler_path = temp_dir.path().join("scaler.json");
    let mut envelope: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&scaler_path).unwrap()).unwrap();
    envelope["checksum"] = serde_json::Value::String("0".repeat(64));
    fs::write(&scaler_path, envelope.to_string()).unwrap();

    let output = run(cloudopt(temp_dir.path())
        .args(["inspect", "--model-dir"])
        .arg(temp_dir.path()));
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("scaler"));
}
