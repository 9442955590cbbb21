use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn manifest(dir: &TempDir, file: &str, content: &str) -> PathBuf {
    let path = dir.path().join(file);
    fs::write(&path, content).expect("write manifest");
    path
}

const LAYERED: &str = r#"{
    "components": [
        { "name": "api", "depends_on": ["db"], "start": true },
        { "name": "db", "load_order": 5, "init": true, "start": true },
        { "name": "metrics", "load_order": -1 }
    ],
    "bundles": [ { "name": "backend", "members": ["api", "db"] } ]
}"#;

#[test]
fn test_ping_command() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("gantry")?;
    cmd.arg("--ping");
    cmd.assert().success().stdout(predicate::str::contains("pong"));
    Ok(())
}

#[test]
fn test_plan_prints_dependencies_first() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = manifest(&dir, "layered.json", LAYERED);

    let mut cmd = Command::cargo_bin("gantry")?;
    cmd.arg("plan").arg(&path);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Construction plan (3 components):"))
        .stdout(predicate::str::contains("1. metrics (load order -1)"))
        .stdout(predicate::str::contains("2.   db (load order 5)"))
        .stdout(predicate::str::contains("3. api (load order 0) <- db"))
        .stdout(predicate::str::contains("constructed").not());
    Ok(())
}

#[test]
fn test_run_reports_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = manifest(&dir, "layered.json", LAYERED);

    let mut cmd = Command::cargo_bin("gantry")?;
    cmd.arg("run").arg(&path);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("constructed api with db"))
        .stdout(predicate::str::contains("initialized db"))
        .stdout(predicate::str::contains("Construction order: metrics, db, api"))
        .stdout(predicate::str::contains("Started: metrics, db, api"))
        .stdout(predicate::str::contains("Bundles: backend"));
    Ok(())
}

#[test]
fn test_run_survives_start_failure() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = manifest(
        &dir,
        "flaky.yaml",
        "components:\n  - name: listener\n    fail: start\n  - name: worker\n    start: true\n",
    );

    let mut cmd = Command::cargo_bin("gantry")?;
    cmd.arg("run").arg(&path);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("started worker"))
        .stdout(predicate::str::contains("Started: worker"))
        .stdout(predicate::str::contains("Start failed: listener"))
        .stderr(predicate::str::contains("Start hook of component 'listener' failed"));
    Ok(())
}

#[test]
fn test_cycle_is_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = manifest(
        &dir,
        "cycle.toml",
        "[[components]]\nname = \"a\"\ndepends_on = [\"b\"]\n\n[[components]]\nname = \"b\"\ndepends_on = [\"a\"]\n",
    );

    let mut cmd = Command::cargo_bin("gantry")?;
    cmd.arg("run").arg(&path);
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("constructed").not())
        .stderr(predicate::str::contains("Circular dependency detected: a -> b -> a"));
    Ok(())
}

#[test]
fn test_construction_failure_halts_run() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = manifest(
        &dir,
        "broken.json",
        r#"{ "components": [
            { "name": "first" },
            { "name": "second", "load_order": 1, "fail": "construct" },
            { "name": "third", "load_order": 2, "start": true }
        ] }"#,
    );

    let mut cmd = Command::cargo_bin("gantry")?;
    cmd.arg("run").arg(&path);
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("constructed first"))
        .stdout(predicate::str::contains("third").not())
        .stderr(predicate::str::contains("Construction of component 'second' failed"));
    Ok(())
}

#[test]
fn test_unsupported_manifest_format() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = manifest(&dir, "manifest.ini", "name = a");

    let mut cmd = Command::cargo_bin("gantry")?;
    cmd.arg("plan").arg(&path);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unsupported manifest format"));
    Ok(())
}

#[test]
fn test_quiet_run_summarises_warnings() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = manifest(
        &dir,
        "flaky.json",
        r#"{ "components": [
            { "name": "listener", "fail": "start" },
            { "name": "worker", "start": true }
        ] }"#,
    );

    let mut cmd = Command::cargo_bin("gantry")?;
    cmd.arg("run").arg(&path).arg("--quiet");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Start failed: listener"))
        .stdout(predicate::str::contains("Summary: 1 warnings, 0 errors"))
        .stderr(predicate::str::contains("Start hook of component").not());
    Ok(())
}

#[test]
fn test_quiet_run_counts_fatal_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = manifest(
        &dir,
        "broken.json",
        r#"{ "components": [ { "name": "only", "fail": "construct" } ] }"#,
    );

    let mut cmd = Command::cargo_bin("gantry")?;
    cmd.arg("-q").arg("run").arg(&path);
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Summary: 0 warnings, 1 errors"))
        .stderr(predicate::str::contains("Error: Construction of component 'only' failed"))
        .stderr(predicate::str::contains("halting startup").not());
    Ok(())
}

#[test]
fn test_default_run_prints_no_summary() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = manifest(&dir, "layered.json", LAYERED);

    let mut cmd = Command::cargo_bin("gantry")?;
    cmd.arg("run").arg(&path);
    cmd.assert().success().stdout(predicate::str::contains("Summary:").not());
    Ok(())
}
