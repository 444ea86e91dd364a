//! CLI integration tests

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

fn ready_splash_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ready-splash"));
    cmd.env_remove("READY_SPLASH_MARKER");
    cmd
}

/// Binary with its config directory pointed at a scratch dir
fn isolated_bin(config_home: &TempDir) -> Command {
    let mut cmd = ready_splash_bin();
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd
}

#[test]
fn help_output() {
    let output = ready_splash_bin()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("loading window"));
    assert!(stdout.contains("--marker"));
    assert!(stdout.contains("--poll-interval"));
    assert!(stdout.contains("--backend"));
    assert!(stdout.contains("signal"));
}

#[test]
fn version_output() {
    let output = ready_splash_bin()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ready-splash"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_help() {
    ready_splash_bin()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("init")
                .and(predicate::str::contains("set"))
                .and(predicate::str::contains("get"))
                .and(predicate::str::contains("list"))
                .and(predicate::str::contains("path")),
        );
}

#[test]
fn invalid_poll_interval_is_usage_error() {
    let config_home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();

    isolated_bin(&config_home)
        .args(["--backend", "terminal", "--poll-interval", "soon"])
        .arg("--marker")
        .arg(dir.path().join(".ready"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid poll-interval"));
}

#[test]
fn invalid_backend_is_rejected() {
    let output = ready_splash_bin()
        .args(["--backend", "x11"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn marker_path_defaults_next_to_executable() {
    let config_home = TempDir::new().unwrap();
    let exe = fs::canonicalize(env!("CARGO_BIN_EXE_ready-splash")).unwrap();
    let expected = exe.parent().unwrap().join(".ready");

    isolated_bin(&config_home)
        .arg("marker-path")
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.to_string_lossy().as_ref()));
}

#[test]
fn marker_path_follows_env_override() {
    let config_home = TempDir::new().unwrap();

    isolated_bin(&config_home)
        .env("READY_SPLASH_MARKER", "/srv/game/.ready")
        .arg("marker-path")
        .assert()
        .success()
        .stdout(predicate::str::contains("/srv/game/.ready"));
}

#[test]
fn marker_path_prefers_cli_over_env() {
    let config_home = TempDir::new().unwrap();

    isolated_bin(&config_home)
        .env("READY_SPLASH_MARKER", "/srv/game/.ready")
        .args(["--marker", "/opt/game/.ready", "marker-path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/opt/game/.ready"));
}

#[test]
fn signal_writes_marker() {
    let config_home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let marker = dir.path().join(".ready");

    isolated_bin(&config_home)
        .arg("signal")
        .arg("--marker")
        .arg(&marker)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&marker).unwrap(), "ready");
}

#[test]
fn signal_into_missing_directory_fails() {
    let config_home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();

    isolated_bin(&config_home)
        .arg("signal")
        .arg("--marker")
        .arg(dir.path().join("missing").join(".ready"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to write marker"));
}

#[cfg(target_os = "linux")]
mod config {
    use super::*;

    #[test]
    fn path_is_under_config_home() {
        let config_home = TempDir::new().unwrap();

        isolated_bin(&config_home)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(
                predicate::str::contains("ready-splash")
                    .and(predicate::str::contains("config.toml")),
            );
    }

    #[test]
    fn init_then_list_shows_defaults() {
        let config_home = TempDir::new().unwrap();

        isolated_bin(&config_home)
            .args(["config", "init"])
            .assert()
            .success();

        assert!(config_home
            .path()
            .join("ready-splash")
            .join("config.toml")
            .exists());

        isolated_bin(&config_home)
            .args(["config", "list"])
            .assert()
            .success()
            .stdout(
                predicate::str::contains("100ms")
                    .and(predicate::str::contains("Loading The Inverse Path...")),
            );
    }

    #[test]
    fn init_twice_fails() {
        let config_home = TempDir::new().unwrap();

        isolated_bin(&config_home)
            .args(["config", "init"])
            .assert()
            .success();
        isolated_bin(&config_home)
            .args(["config", "init"])
            .assert()
            .code(1);
    }

    #[test]
    fn set_then_get_round_trip() {
        let config_home = TempDir::new().unwrap();

        isolated_bin(&config_home)
            .args(["config", "set", "window.caption", "Warming up"])
            .assert()
            .success();

        isolated_bin(&config_home)
            .args(["config", "get", "window.caption"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Warming up"));
    }

    #[test]
    fn get_unset_key() {
        let config_home = TempDir::new().unwrap();

        isolated_bin(&config_home)
            .args(["config", "get", "marker"])
            .assert()
            .success()
            .stdout(predicate::str::contains("(not set)"));
    }

    #[test]
    fn set_rejects_bad_values() {
        let config_home = TempDir::new().unwrap();

        isolated_bin(&config_home)
            .args(["config", "set", "poll_interval", "often"])
            .assert()
            .code(1);
        isolated_bin(&config_home)
            .args(["config", "set", "colour", "red"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Unknown key"));
    }

    #[test]
    fn configured_marker_is_used() {
        let config_home = TempDir::new().unwrap();

        isolated_bin(&config_home)
            .args(["config", "set", "marker", "/var/lib/game/.ready"])
            .assert()
            .success();

        isolated_bin(&config_home)
            .arg("marker-path")
            .assert()
            .success()
            .stdout(predicate::str::contains("/var/lib/game/.ready"));
    }
}
