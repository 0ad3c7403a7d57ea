// ABOUTME: Integration tests for the dockwire CLI commands.
// ABOUTME: Validates --help output, argument validation and progress rendering.

mod support;

use assert_cmd::Command;
use predicates::prelude::*;
use support::fake_engine::{FakeEngine, Reply, events};

fn dockwire_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("dockwire"))
}

#[test]
fn help_shows_commands() {
    dockwire_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("pull"))
        .stdout(predicate::str::contains("push"))
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("network"));
}

#[test]
fn blank_image_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    dockwire_cmd()
        .current_dir(dir.path())
        .env("DOCKER_HOST", "tcp://127.0.0.1:1")
        .args(["pull", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("image is required"));
}

#[test]
fn malformed_build_arg_is_rejected() {
    dockwire_cmd()
        .args(["build", ".", "--build-arg", "NOVALUE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NAME=VALUE"));
}

#[test]
fn unreachable_engine_fails() {
    let dir = tempfile::tempdir().unwrap();
    dockwire_cmd()
        .current_dir(dir.path())
        .env("DOCKER_HOST", "tcp://127.0.0.1:1")
        .args(["pull", "busybox"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[tokio::test(flavor = "multi_thread")]
async fn pull_prints_progress_lines() {
    let engine = FakeEngine::start(events(&[
        r#"{"status":"Pulling from library/busybox","id":"latest"}"#,
        r#"{"status":"Downloading","id":"a1b2c3","progressDetail":{"current":512,"total":2048}}"#,
        r#"{"status":"Status: Downloaded newer image for busybox:latest"}"#,
    ]))
    .await;
    let url = engine.url();
    let dir = tempfile::tempdir().unwrap();
    let cwd = dir.path().to_path_buf();

    let assert = tokio::task::spawn_blocking(move || {
        dockwire_cmd()
            .current_dir(cwd)
            .env("DOCKER_HOST", url)
            .args(["pull", "busybox", "--tag", "latest"])
            .assert()
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("[latest] Pulling from library/busybox"))
        .stdout(predicate::str::contains("[a1b2c3] Downloading 512/2048"))
        .stdout(predicate::str::contains("Pulled busybox"));
    assert_eq!(
        engine.requests()[0].target,
        "/images/create?fromImage=busybox&tag=latest"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn engine_error_is_reported() {
    let engine = FakeEngine::start(events(&[
        r#"{"error":"manifest for ghost:latest not found"}"#,
    ]))
    .await;
    let url = engine.url();
    let dir = tempfile::tempdir().unwrap();
    let cwd = dir.path().to_path_buf();

    let assert = tokio::task::spawn_blocking(move || {
        dockwire_cmd()
            .current_dir(cwd)
            .env("DOCKER_HOST", url)
            .args(["pull", "ghost"])
            .assert()
    })
    .await
    .unwrap();

    assert
        .failure()
        .stdout(predicate::str::contains("[ERROR] manifest for ghost:latest not found"))
        .stderr(predicate::str::contains("Error: manifest for ghost:latest not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn network_inspect_prints_json() {
    let engine = FakeEngine::start(Reply::Status {
        code: 200,
        body: r#"{"Name":"bridge","Id":"f2de39df4171","Driver":"bridge"}"#.to_string(),
    })
    .await;
    let url = engine.url();
    let dir = tempfile::tempdir().unwrap();
    let cwd = dir.path().to_path_buf();

    let assert = tokio::task::spawn_blocking(move || {
        dockwire_cmd()
            .current_dir(cwd)
            .env("DOCKER_HOST", url)
            .args(["network", "inspect", "bridge"])
            .assert()
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains(r#""Name": "bridge""#));
}
