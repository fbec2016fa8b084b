//! CLI command integration tests.
//! Each test isolates config via a temp directory and an explicit RFE_CONFIG.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn rfe_cmd() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("rfe").unwrap();
    cmd.env_remove("RFE_CONFIG");
    cmd
}

fn field_json(args: &[&str]) -> serde_json::Value {
    let output = rfe_cmd().args(args).output().unwrap();
    assert!(
        output.status.success(),
        "rfe {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn field_prints_json() {
    let json = field_json(&["field", "0.4", "--component", "memory-vessel"]);
    assert_eq!(json["component"], "memory-vessel");
    let strength = json["strength"].as_f64().unwrap();
    assert!((0.1..=2.0).contains(&strength));
    assert!(json["componentMap"]["prompt-engine"].is_number());
}

#[test]
fn field_unknown_component_routes_to_all() {
    let json = field_json(&["field", "0.4", "--component", "not-real"]);
    assert_eq!(json["component"], "all");
}

#[test]
fn field_non_numeric_trauma_warns() {
    rfe_cmd()
        .args(["field", "banana"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"traumaLevel\": 0.5"))
        .stderr(predicate::str::contains("invalid trauma input"));
}

#[test]
fn field_elliptical_circle() {
    let json = field_json(&[
        "field",
        "0.25",
        "--phase",
        "transcendent",
        "--waveform",
        "elliptical",
    ]);
    assert!((json["x"].as_f64().unwrap() - 0.5).abs() < 1e-6);
    assert!((json["y"].as_f64().unwrap() - 1.0).abs() < 1e-6);
}

#[test]
fn field_reads_context_file() {
    let dir = TempDir::new().unwrap();
    let ctx = dir.path().join("ctx.json");
    std::fs::write(&ctx, r#"{"userActivity": "checkout", "phase": "trauma-core"}"#).unwrap();

    let json = field_json(&[
        "field",
        "0.6",
        "--component",
        "commerce-integration",
        "--context",
        ctx.to_str().unwrap(),
    ]);
    assert_eq!(json["meta"]["phase"], "trauma-core");
    let memory = json["componentMap"]["memory-vessel"].as_f64().unwrap();
    assert!((memory - 0.9).abs() < 1e-9, "memory-vessel = {memory}");
}

#[test]
fn field_rejects_bad_context_file() {
    let dir = TempDir::new().unwrap();
    let ctx = dir.path().join("ctx.json");
    std::fs::write(&ctx, "{ not json").unwrap();

    rfe_cmd()
        .args(["field", "0.5", "--context"])
        .arg(&ctx)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid context JSON"));
}

#[test]
fn config_file_sets_defaults() {
    let dir = TempDir::new().unwrap();
    let cfg = dir.path().join("rfe.toml");
    std::fs::write(
        &cfg,
        "default-phase = \"alien-flora\"\ndefault-waveform = \"triangle\"\n",
    )
    .unwrap();

    let output = rfe_cmd()
        .env("RFE_CONFIG", &cfg)
        .args(["field", "0.5"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["meta"]["phase"], "alien-flora");
    assert_eq!(json["meta"]["waveform"], "triangle");
}

#[test]
fn invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let cfg = dir.path().join("rfe.toml");
    std::fs::write(&cfg, "pulse-width = 2.0\n").unwrap();

    rfe_cmd()
        .args(["--config"])
        .arg(&cfg)
        .args(["field", "0.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pulse-width"));
}

#[test]
fn apply_enriches_state_file() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("state.json");
    let original = r#"{"fragment": {"crystallizationProbability": 0.65, "stability": 1.0}}"#;
    std::fs::write(&data, original).unwrap();

    let output = rfe_cmd()
        .args(["apply"])
        .arg(&data)
        .args(["0.8", "--component", "memory-vessel"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["__resonance"]["vector"]["z"].is_number());
    assert!(json["fragment"]["emotionalSignature"]["traumaLevel"].is_number());

    // Input file is left as it was.
    assert_eq!(std::fs::read_to_string(&data).unwrap(), original);
}

#[test]
fn sweep_emits_one_line_per_step() {
    let output = rfe_cmd()
        .args(["sweep", "--steps", "5", "--component", "security-trauma"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5);
    let last: serde_json::Value = serde_json::from_str(lines[4]).unwrap();
    assert_eq!(last["meta"]["traumaLevel"], 1.0);
}

#[test]
fn seeded_noise_is_reproducible() {
    let args = ["--seed", "7", "field", "0.3", "--waveform", "noise"];
    let a = field_json(&args);
    let b = field_json(&args);
    assert_eq!(a["x"], b["x"]);
    assert_eq!(a["y"], b["y"]);
}

#[test]
fn bench_reports_throughput() {
    rfe_cmd()
        .args(["bench", "--iterations", "500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vectors:    500"))
        .stdout(predicate::str::contains("vectors/s"));
}

#[test]
fn phases_lists_table() {
    rfe_cmd()
        .arg("phases")
        .assert()
        .success()
        .stdout(predicate::str::contains("cyber-lotus"))
        .stdout(predicate::str::contains("transcendent"))
        .stdout(predicate::str::contains("logistic(k=10, t0=0.5)"))
        .stdout(predicate::str::contains("t^1.5"));
}
