//! End-to-end life-cycle tests driving a real `Menu` against stub pickers.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::time::Duration;

use sysinfo::{Pid, ProcessStatus, System};
use tempfile::TempDir;

use katana_menu::{Menu, MenuConfig, MenuError, MenuKind, MenuSettings, TimeoutPolicy};

/// Drop a small shell script into `dir` and return its path. The scripts
/// stand in for the picker binary: they ignore their argument list, read
/// stdin where relevant, and write whatever "selection" the test needs.
fn stub_picker(dir: &TempDir, name: &str, body: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path.display().to_string()
}

fn fast_settings(program: &str) -> MenuSettings {
    MenuSettings::default()
        .with_program(program)
        .with_min_display(Duration::from_millis(20))
        .with_timeout_policy(TimeoutPolicy::Fail)
}

fn lines_config() -> MenuConfig {
    MenuConfig::new(MenuKind::Custom)
        .add_line("Wifi", None)
        .add_line("Bluetooth", None)
}

/// A pid counts as gone once it left the process table or only its zombie
/// entry remains awaiting reaping.
fn picker_gone(pid: u32) -> bool {
    let mut system = System::new();
    system.refresh_processes();
    match system.process(Pid::from_u32(pid)) {
        None => true,
        Some(process) => process.status() == ProcessStatus::Zombie,
    }
}

async fn wait_for_exit(pid: u32) -> bool {
    for _ in 0..150 {
        if picker_gone(pid) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    false
}

#[tokio::test]
async fn value_collapses_whitespace_runs() {
    let dir = TempDir::new().unwrap();
    let picker = stub_picker(&dir, "choose", "cat >/dev/null\nprintf 'alpha   beta\\n'");

    let menu = Menu::new(lines_config(), fast_settings(&picker));
    menu.show().await.unwrap();
    let value = menu.value().await.unwrap();

    assert_eq!(value, "alpha beta");
    menu.destroy().await;
}

#[tokio::test]
async fn picker_receives_joined_lines() {
    let dir = TempDir::new().unwrap();
    // Echoing stdin back makes the selection the content we wrote.
    let picker = stub_picker(&dir, "echoer", "exec cat");

    let menu = Menu::new(lines_config(), fast_settings(&picker));
    menu.show().await.unwrap();
    let value = menu.value().await.unwrap();

    assert_eq!(value, "Wifi Bluetooth");
    menu.destroy().await;
}

#[tokio::test]
async fn value_without_show_is_empty() {
    let menu = Menu::new(lines_config(), fast_settings("rofi"));
    let value = menu.value().await.unwrap();
    assert_eq!(value, "");
}

#[tokio::test]
async fn cancelled_picker_yields_empty_value() {
    let dir = TempDir::new().unwrap();
    // Exits without emitting a choice, like a user pressing escape.
    let picker = stub_picker(&dir, "cancel", "exec true");

    let menu = Menu::new(lines_config(), fast_settings(&picker));
    menu.show().await.unwrap();
    let value = menu.value().await.unwrap();

    assert_eq!(value, "");
    menu.destroy().await;
}

#[tokio::test]
async fn show_then_destroy_leaves_no_picker() {
    let dir = TempDir::new().unwrap();
    let picker = stub_picker(&dir, "linger", "exec sleep 600");

    let menu = Menu::new(lines_config(), fast_settings(&picker));
    menu.show().await.unwrap();
    let pid = menu.pid().await.unwrap();
    assert!(!picker_gone(pid));

    menu.destroy().await;
    assert!(wait_for_exit(pid).await, "picker {pid} survived destroy");
    assert_eq!(menu.pid().await, None);
}

#[tokio::test]
async fn destroy_is_idempotent_from_any_state() {
    let dir = TempDir::new().unwrap();
    let picker = stub_picker(&dir, "linger", "exec sleep 600");

    let menu = Menu::new(lines_config(), fast_settings(&picker));

    // Idle: nothing recorded, nothing to do.
    menu.destroy().await;
    menu.kill_fork().await;
    menu.kill_picker().await;

    menu.show().await.unwrap();
    let pid = menu.pid().await.unwrap();

    menu.destroy().await;
    menu.destroy().await;
    menu.kill_picker().await;

    assert!(wait_for_exit(pid).await);
    assert_eq!(menu.pid().await, None);
}

#[tokio::test]
async fn loading_toggle_keeps_one_live_picker() {
    let dir = TempDir::new().unwrap();
    let picker = stub_picker(&dir, "linger", "exec sleep 600");

    let menu = Menu::new(lines_config(), fast_settings(&picker));
    menu.show().await.unwrap();
    let first = menu.pid().await.unwrap();

    menu.loading(true).await.unwrap();
    let second = menu.pid().await.unwrap();
    assert_ne!(first, second);
    assert!(wait_for_exit(first).await, "old picker survived the toggle");
    assert!(!picker_gone(second));

    menu.loading(false).await.unwrap();
    let third = menu.pid().await.unwrap();
    assert_ne!(second, third);
    assert!(wait_for_exit(second).await);
    assert!(!picker_gone(third));

    menu.destroy().await;
    assert!(wait_for_exit(third).await);
}

#[tokio::test]
async fn wedged_picker_times_out_and_is_destroyed() {
    let dir = TempDir::new().unwrap();
    let picker = stub_picker(&dir, "wedged", "exec sleep 600");

    let settings = fast_settings(&picker).with_value_timeout(Duration::from_millis(300));
    let menu = Menu::new(lines_config(), settings);
    menu.show().await.unwrap();
    let pid = menu.pid().await.unwrap();

    let result = menu.value().await;
    assert!(matches!(result, Err(MenuError::ResultTimeout)));
    assert!(wait_for_exit(pid).await, "picker {pid} survived the timeout");
    assert_eq!(menu.pid().await, None);

    // After the teardown the instance is back to idle.
    assert_eq!(menu.value().await.unwrap(), "");
}

#[tokio::test]
async fn missing_picker_binary_surfaces_spawn_error() {
    let menu = Menu::new(
        lines_config(),
        fast_settings("/nonexistent/picker-binary").with_handoff_timeout(Duration::from_secs(2)),
    );

    let result = menu.show().await;
    assert!(matches!(result, Err(MenuError::Spawn(_))));
    assert_eq!(menu.pid().await, None);
}
