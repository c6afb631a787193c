use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn create_workspace() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let project_dir = temp_dir.path().join("demo");
    fs::create_dir_all(project_dir.join("src")).unwrap();
    fs::write(
        project_dir.join("Cargo.toml"),
        "[package]\nname = \"demo\"\nversion = \"0.1.0\"\nedition = \"2021\"\n",
    )
    .unwrap();
    fs::write(project_dir.join("src").join("lib.rs"), "").unwrap();
    fs::write(
        temp_dir.path().join(".cargo-launch.json"),
        r#"{ "store": ".cargo-launch/launches.json" }"#,
    )
    .unwrap();
    temp_dir
}

fn write_payload(dir: &Path, args: &str) -> std::path::PathBuf {
    let path = dir.join("payload.json");
    fs::write(
        &path,
        format!(
            r#"{{
                "title": "Run Test",
                "command": "rust-analyzer.runSingle",
                "arguments": [{{ "binary": "cargo", "args": {args}, "env": {{ "RUST_BACKTRACE": "short" }} }}]
            }}"#
        ),
    )
    .unwrap();
    path
}

fn cargo_launch() -> Command {
    Command::cargo_bin("cargo-launch").unwrap()
}

#[test]
fn test_classify_prints_parts() {
    cargo_launch()
        .args(["classify", "test", "--lib", "--", "--nocapture", "--", "my_test"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""command": "test""#))
        .stdout(predicate::str::contains(r#""--lib""#))
        .stdout(predicate::str::contains(r#""my_test""#));
}

#[test]
fn test_handle_dry_run_creates_and_reuses_configuration() {
    let workspace = create_workspace();
    let payload = write_payload(
        workspace.path(),
        r#"["test", "--package", "demo", "--lib", "--", "tests::it_works", "--exact"]"#,
    );

    for _ in 0..2 {
        cargo_launch()
            .arg("handle")
            .arg(&payload)
            .arg("--workspace")
            .arg(workspace.path())
            .arg("--dry-run")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "cargo test --package demo --lib -- tests::it_works --exact",
            ))
            .stdout(predicate::str::contains("RUST_BACKTRACE=short"));
    }

    let stored = fs::read_to_string(workspace.path().join(".cargo-launch/launches.json")).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(stored.as_array().unwrap().len(), 1);
    assert_eq!(stored[0]["projectName"], "demo");

    cargo_launch()
        .arg("list")
        .arg("--workspace")
        .arg(workspace.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("demo test --package demo --lib"));
}

#[test]
fn test_handle_reads_stdin_and_ignores_other_subcommands() {
    let workspace = create_workspace();

    cargo_launch()
        .args(["handle", "-", "--dry-run", "--workspace"])
        .arg(workspace.path())
        .write_stdin(
            r#"{ "command": "rust-analyzer.runSingle", "arguments": [{ "binary": "cargo", "args": ["build"], "env": {} }] }"#,
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("ignoring"));

    assert!(!workspace.path().join(".cargo-launch/launches.json").exists());
}

#[test]
fn test_handle_unknown_project_fails() {
    let workspace = create_workspace();
    let payload = write_payload(workspace.path(), r#"["test"]"#);

    cargo_launch()
        .arg("handle")
        .arg(&payload)
        .args(["--project", "nope", "--dry-run", "--workspace"])
        .arg(workspace.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Cannot Find Project"))
        .stderr(predicate::str::contains("Error:").not());
}

#[test]
fn test_out_of_scope_command_needs_no_project_choice() {
    let workspace = create_workspace();
    for name in ["a", "b"] {
        let dir = workspace.path().join(name);
        fs::create_dir_all(dir.join("src")).unwrap();
        fs::write(
            dir.join("Cargo.toml"),
            format!("[package]\nname = \"{name}\"\nversion = \"0.1.0\"\nedition = \"2021\"\n"),
        )
        .unwrap();
        fs::write(dir.join("src").join("lib.rs"), "").unwrap();
    }

    cargo_launch()
        .args(["handle", "-", "--dry-run", "--workspace"])
        .arg(workspace.path())
        .write_stdin(
            r#"{ "command": "rust-analyzer.runSingle", "arguments": [{ "binary": "cargo", "args": ["build"], "env": {} }] }"#,
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("ignoring"));

    cargo_launch()
        .args(["handle", "-", "--dry-run", "--workspace"])
        .arg(workspace.path())
        .write_stdin(r#"{ "command": "rust-analyzer.runSingle", "arguments": [42] }"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("not a run command"));
}

#[cfg(unix)]
#[test]
fn test_handle_fails_when_the_process_is_killed() {
    use std::os::unix::fs::PermissionsExt;

    let workspace = create_workspace();
    let script = workspace.path().join("killed.sh");
    fs::write(&script, "#!/bin/sh\nkill -9 $$\n").unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    fs::write(
        workspace.path().join(".cargo-launch.json"),
        serde_json::json!({ "program": script }).to_string(),
    )
    .unwrap();
    let payload = write_payload(workspace.path(), r#"["test"]"#);

    cargo_launch()
        .arg("handle")
        .arg(&payload)
        .arg("--workspace")
        .arg(workspace.path())
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_list_without_store_fails() {
    let temp_dir = TempDir::new().unwrap();

    cargo_launch()
        .arg("list")
        .arg("--workspace")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No launch configuration store configured"));
}
