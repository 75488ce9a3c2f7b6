//! Integration tests for mailchart CLI

mod common;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Get the path to the mailchart binary
fn mailchart_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    path.pop(); // Remove deps
    path.push("mailchart");
    path
}

/// Run mailchart with the given arguments
fn run_mailchart(args: &[&str]) -> std::process::Output {
    Command::new(mailchart_bin())
        .args(args)
        .output()
        .expect("failed to execute mailchart")
}

/// Run mailchart feeding `input` on stdin
fn run_mailchart_stdin(args: &[&str], input: &str) -> std::process::Output {
    let mut child = Command::new(mailchart_bin())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to execute mailchart");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

// =============================================================================
// Basic functionality tests
// =============================================================================

#[test]
fn test_help_flag() {
    let output = run_mailchart(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Email report dashboard renderer"));
    assert!(stdout.contains("render"));
    assert!(stdout.contains("toggle"));
    assert!(stdout.contains("prefs"));
}

#[test]
fn test_render_help_lists_options() {
    let output = run_mailchart(&["render", "--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--output"));
    assert!(stdout.contains("--image-dir"));
    assert!(stdout.contains("--watch"));
    assert!(stdout.contains("--dark"));
}

#[test]
fn test_version_flag() {
    let output = run_mailchart(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("mailchart"));
}

// =============================================================================
// Render mode
// =============================================================================

#[test]
fn test_render_full_payload() {
    let temp_dir = TempDir::new().unwrap();
    let payload = common::write_payload(temp_dir.path(), "stats.json", &common::full_payload());
    let html_path = temp_dir.path().join("dashboard.html");

    let output = run_mailchart(&[
        "render",
        "-q",
        path_str(&payload),
        "-o",
        path_str(&html_path),
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[Slots]"));
    assert!(stdout.contains("Drawn: 10/10"));

    let html = std::fs::read_to_string(&html_path).unwrap();
    assert!(html.contains("echarts.init"));
    assert!(html.contains(r#"id="hourly-activity""#));
    assert!(html.contains(r#"id="contact-bubbles""#));
    assert!(html.contains(r#"id="word-cloud""#));
    assert!(html.contains(r#"id="activity-heatmap""#));
    assert!(html.contains(r#"id="top-senders""#));
    assert!(html.contains("newsletter@example.net"));
    assert!(html.contains("invoice"));
    assert!(!html.contains("chart-placeholder\""));
}

#[test]
fn test_render_null_payload_shows_placeholders() {
    let temp_dir = TempDir::new().unwrap();
    let payload = common::write_raw(temp_dir.path(), "null.json", "null");
    let html_path = temp_dir.path().join("dashboard.html");

    let output = run_mailchart(&[
        "render",
        path_str(&payload),
        "-o",
        path_str(&html_path),
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("placeholder"));
    assert!(stdout.contains("Drawn: 0/10"));

    let html = std::fs::read_to_string(&html_path).unwrap();
    assert_eq!(html.matches(r#"class="chart-placeholder""#).count(), 10);
}

#[test]
fn test_render_empty_object_shows_placeholders() {
    let temp_dir = TempDir::new().unwrap();
    let payload = common::write_raw(temp_dir.path(), "empty.json", "{}");
    let html_path = temp_dir.path().join("dashboard.html");

    let output = run_mailchart(&[
        "render",
        "-q",
        path_str(&payload),
        "-o",
        path_str(&html_path),
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Drawn: 0/10"));
}

#[test]
fn test_render_one_way_contacts_falls_back() {
    let temp_dir = TempDir::new().unwrap();
    let payload = common::write_payload(
        temp_dir.path(),
        "contacts.json",
        &common::one_way_contacts_payload(),
    );
    let html_path = temp_dir.path().join("dashboard.html");

    let output = run_mailchart(&[
        "render",
        "-q",
        path_str(&payload),
        "-o",
        path_str(&html_path),
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("(fallback)"));
    assert!(stdout.contains("Drawn: 1/10"));
}

#[test]
fn test_render_malformed_field_keeps_other_slots() {
    let temp_dir = TempDir::new().unwrap();
    let payload =
        common::write_payload(temp_dir.path(), "quirky.json", &common::quirky_payload());
    let html_path = temp_dir.path().join("dashboard.html");

    let output = run_mailchart(&[
        "--no-color",
        "render",
        "-q",
        path_str(&payload),
        "-o",
        path_str(&html_path),
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let status = |slot: &str| {
        stdout
            .lines()
            .find(|l| l.starts_with(slot))
            .unwrap()
            .to_string()
    };
    assert!(status("hourly-activity").contains("bar"));
    assert!(status("contact-bubbles").contains("bubble"));
    assert!(!status("word-cloud").contains("placeholder"));
    assert!(status("activity-heatmap").contains("placeholder"));
    assert!(stdout.contains("Drawn: 3/10"));

    let html = std::fs::read_to_string(&html_path).unwrap();
    assert!(html.contains("10:00"));
    assert!(html.contains("invoice"));
}

#[test]
fn test_render_from_stdin() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("dashboard.html");

    let output = run_mailchart_stdin(
        &["render", "-q", "-", "-o", path_str(&html_path)],
        &common::full_payload().to_string(),
    );
    assert!(output.status.success());
    assert!(html_path.exists());
}

#[test]
fn test_render_dark_theme_sets_body_class() {
    let temp_dir = TempDir::new().unwrap();
    let payload = common::write_payload(temp_dir.path(), "stats.json", &common::full_payload());
    let html_path = temp_dir.path().join("dashboard.html");

    let output = run_mailchart(&[
        "render",
        "-q",
        "--dark",
        path_str(&payload),
        "-o",
        path_str(&html_path),
    ]);
    assert!(output.status.success());
    let html = std::fs::read_to_string(&html_path).unwrap();
    assert!(html.contains("dark-mode"));
}

#[test]
fn test_render_with_image_dir() {
    let temp_dir = TempDir::new().unwrap();
    let payload = common::write_payload(temp_dir.path(), "stats.json", &common::full_payload());
    let html_path = temp_dir.path().join("dashboard.html");
    let image_dir = temp_dir.path().join("charts");
    std::fs::create_dir(&image_dir).unwrap();

    let output = run_mailchart(&[
        "render",
        "-q",
        path_str(&payload),
        "-o",
        path_str(&html_path),
        "--image-dir",
        path_str(&image_dir),
    ]);
    assert!(output.status.success());

    let image_path = image_dir.join("hourly-activity.png");
    assert!(image_path.exists(), "Image file should be created");
    assert!(
        std::fs::metadata(&image_path).unwrap().len() > 0,
        "Image file should not be empty"
    );
    // Markup slots have no image
    assert!(!image_dir.join("word-cloud.png").exists());
}

// =============================================================================
// Preferences
// =============================================================================

#[test]
fn test_toggle_persists_preference() {
    let temp_dir = TempDir::new().unwrap();
    let prefs = temp_dir.path().join("prefs.json");

    let output = run_mailchart(&["--no-color", "toggle", "dark-mode", "--prefs", path_str(&prefs)]);
    assert!(output.status.success());
    assert!(prefs.exists());

    let output = run_mailchart(&["--no-color", "prefs", "--prefs", path_str(&prefs)]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let dark_line = stdout.lines().find(|l| l.starts_with("dark-mode")).unwrap();
    assert!(dark_line.ends_with("on"));
    let sidebar_line = stdout
        .lines()
        .find(|l| l.starts_with("sidebar-collapsed"))
        .unwrap();
    assert!(sidebar_line.ends_with("off"));
}

#[test]
fn test_prefs_file_with_json_booleans() {
    let temp_dir = TempDir::new().unwrap();
    let prefs = common::write_raw(
        temp_dir.path(),
        "prefs.json",
        r#"{"dark-mode": true, "sidebar-collapsed": false}"#,
    );
    let payload = common::write_payload(temp_dir.path(), "stats.json", &common::full_payload());
    let html_path = temp_dir.path().join("dashboard.html");

    let output = run_mailchart(&[
        "render",
        "-q",
        path_str(&payload),
        "-o",
        path_str(&html_path),
        "--prefs",
        path_str(&prefs),
    ]);
    assert!(output.status.success());
    let html = std::fs::read_to_string(&html_path).unwrap();
    assert!(html.contains(r#"<body class="dark-mode">"#));
}

#[test]
fn test_toggle_twice_restores_preference() {
    let temp_dir = TempDir::new().unwrap();
    let prefs = temp_dir.path().join("prefs.json");

    for _ in 0..2 {
        let output = run_mailchart(&["--no-color", "toggle", "sidebar", "--prefs", path_str(&prefs)]);
        assert!(output.status.success());
    }

    let output = run_mailchart(&["--no-color", "prefs", "--prefs", path_str(&prefs)]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let sidebar_line = stdout
        .lines()
        .find(|l| l.starts_with("sidebar-collapsed"))
        .unwrap();
    assert!(sidebar_line.ends_with("off"));
}

#[test]
fn test_render_uses_saved_preferences() {
    let temp_dir = TempDir::new().unwrap();
    let prefs = temp_dir.path().join("prefs.json");
    let payload = common::write_payload(temp_dir.path(), "stats.json", &common::full_payload());
    let html_path = temp_dir.path().join("dashboard.html");

    let output = run_mailchart(&["toggle", "sidebar", "--prefs", path_str(&prefs)]);
    assert!(output.status.success());

    let output = run_mailchart(&[
        "render",
        "-q",
        path_str(&payload),
        "-o",
        path_str(&html_path),
        "--prefs",
        path_str(&prefs),
    ]);
    assert!(output.status.success());
    let html = std::fs::read_to_string(&html_path).unwrap();
    assert!(html.contains(r#"<body class="sidebar-collapsed">"#));
}

// =============================================================================
// Error handling
// =============================================================================

#[test]
fn test_nonexistent_payload() {
    let output = run_mailchart(&["render", "/nonexistent/stats.json"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"));
}

#[test]
fn test_invalid_json_payload() {
    let temp_dir = TempDir::new().unwrap();
    let payload = common::write_raw(temp_dir.path(), "bad.json", "{\"hourly_activity\": [");
    let html_path = temp_dir.path().join("dashboard.html");

    let output = run_mailchart(&["render", path_str(&payload), "-o", path_str(&html_path)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!html_path.exists());
}

#[test]
fn test_output_directory_missing() {
    let temp_dir = TempDir::new().unwrap();
    let payload = common::write_payload(temp_dir.path(), "stats.json", &common::full_payload());
    let html_path = temp_dir.path().join("missing").join("dashboard.html");

    let output = run_mailchart(&["render", path_str(&payload), "-o", path_str(&html_path)]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Directory does not exist"));
}

#[test]
fn test_dark_and_light_conflict() {
    let temp_dir = TempDir::new().unwrap();
    let payload = common::write_payload(temp_dir.path(), "stats.json", &common::full_payload());

    let output = run_mailchart(&["render", "--dark", "--light", path_str(&payload)]);
    assert!(!output.status.success());
}

#[test]
fn test_watch_rejects_stdin() {
    let output = run_mailchart(&["render", "--watch", "-"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--watch"));
}

#[test]
fn test_toggle_requires_prefs() {
    let output = run_mailchart(&["toggle", "sidebar"]);
    assert!(!output.status.success());
}
