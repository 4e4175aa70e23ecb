//! CLI end-to-end tests that invoke the compiled `cmakepresets` binary.
//!
//! Most tests run against the preset trees in `test-fixtures/presets/`;
//! the rest build their own tree in a temporary directory.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use presets_test_utils::{PresetTree, preset};
use rstest::rstest;
use serde_json::{Value, json};
use tempfile::TempDir;

/// Path to a preset tree under test-fixtures/presets/.
fn fixture(name: &str) -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // crates/presets-cli -> ../../test-fixtures
    manifest_dir
        .join("../../test-fixtures/presets")
        .join(name)
        .canonicalize()
        .unwrap()
}

/// `cmakepresets -d <fixture> --no-schema` with the remaining args appended.
fn cmd(fixture_name: &str) -> Command {
    let mut cmd = Command::cargo_bin("cmakepresets").unwrap();
    cmd.env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .arg("-d")
        .arg(fixture(fixture_name))
        .arg("--no-schema");
    cmd
}

// ============================================================================
// Argument handling
// ============================================================================

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("cmakepresets")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("related"));
}

#[test]
fn test_source_is_required() {
    Command::cargo_bin("cmakepresets")
        .unwrap()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--file"));
}

#[test]
fn test_file_and_directory_are_exclusive() {
    let dir = fixture("basic");
    Command::cargo_bin("cmakepresets")
        .unwrap()
        .arg("-f")
        .arg(dir.join("CMakePresets.json"))
        .arg("-d")
        .arg(&dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

// ============================================================================
// list
// ============================================================================

#[test]
fn test_list_grouped_view() {
    cmd("basic")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("debug [D]"))
        .stdout(predicate::str::contains("build-debug"))
        .stdout(predicate::str::contains("test-debug"))
        .stdout(predicate::str::contains("mine"))
        .stdout(predicate::str::contains("base").not());
}

#[test]
fn test_list_flat_with_hidden() {
    cmd("basic")
        .args(["list", "--flat", "--show-hidden"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configure Presets:"))
        .stdout(predicate::str::contains("• base (hidden)"))
        .stdout(predicate::str::contains("Workflow Presets:"))
        .stdout(predicate::str::contains("• full"));
}

#[rstest]
#[case("configure", "• ci")]
#[case("build", "• build-release")]
#[case("test", "• test-debug")]
#[case("package", "• package-ci")]
#[case("workflow", "• full")]
fn test_list_single_type(#[case] kind: &str, #[case] expected: &str) {
    cmd("basic")
        .args(["list", "--type", kind])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected))
        .stdout(predicate::str::contains("No presets found").not());
}

#[test]
fn test_list_from_file_path() {
    let file = fixture("basic").join("CMakePresets.json");
    Command::cargo_bin("cmakepresets")
        .unwrap()
        .env("NO_COLOR", "1")
        .arg("--file")
        .arg(file)
        .args(["--no-schema", "list", "-t", "configure"])
        .assert()
        .success()
        .stdout(predicate::str::contains("• ci"));
}

#[test]
fn test_list_without_user_presets() {
    cmd("basic")
        .args(["--no-user-presets", "list", "--flat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mine").not());
}

// ============================================================================
// show
// ============================================================================

#[test]
fn test_show_inheritance_and_sources() {
    cmd("basic")
        .args(["show", "ci"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Defined in: cmake/ci.json"))
        .stdout(predicate::str::contains("└── release"))
        .stdout(predicate::str::contains("    └── base"))
        .stdout(predicate::str::contains("generator: Ninja (from base)"));
}

#[test]
fn test_show_resolve_json() {
    let output = cmd("basic")
        .args(["show", "ci", "--resolve", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let preset: Value = serde_json::from_slice(&output).unwrap();
    let source_dir = fixture("basic");

    assert_eq!(
        preset["toolchainFile"],
        json!(format!("{}/cmake/toolchain.cmake", source_dir.display()))
    );
    assert_eq!(preset["binaryDir"], json!(format!("{}/build/ci", source_dir.display())));
    assert!(
        preset["cacheVariables"]["INSTALL_ROOT"]
            .as_str()
            .unwrap()
            .ends_with("presets/install")
    );
}

#[test]
fn test_show_flatten_with_type() {
    cmd("basic")
        .args(["show", "build-release", "--type", "build", "--flatten"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[flattened]"))
        .stdout(predicate::str::contains("jobs: 8"));
}

#[test]
fn test_show_unknown_preset() {
    cmd("basic")
        .args(["show", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Preset 'ghost' not found"));
}

#[test]
fn test_show_unknown_preset_warns_once() {
    let assert = cmd("basic").args(["-v", "show", "ghost"]).assert().failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert_eq!(stderr.matches("No preset of any type named 'ghost'").count(), 1);
    assert!(!stderr.contains("No configure preset named"));
}

#[test]
fn test_show_unknown_preset_of_type_warns() {
    cmd("basic")
        .args(["-v", "show", "ghost", "--type", "build"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No build preset named 'ghost'"))
        .stderr(predicate::str::contains("Build preset 'ghost' not found"));
}

#[test]
fn test_show_user_preset() {
    cmd("basic")
        .args(["show", "mine", "--flatten", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"ENABLE_SANITIZERS\": \"ON\""))
        .stdout(predicate::str::contains("\"CMAKE_BUILD_TYPE\": \"Debug\""));
}

// ============================================================================
// related
// ============================================================================

#[test]
fn test_related_presets() {
    cmd("basic")
        .args(["related", "debug"])
        .assert()
        .success()
        .stdout(predicate::str::contains("• build-debug"))
        .stdout(predicate::str::contains("• test-debug"));
}

#[test]
fn test_related_with_filter() {
    cmd("basic")
        .args(["related", "release", "--type", "package"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(none)"))
        .stdout(predicate::str::contains("Build Presets").not());
}

#[test]
fn test_related_unknown_configure() {
    cmd("basic")
        .args(["related", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configure preset 'ghost' not found"));
}

// ============================================================================
// Loading failures and logging
// ============================================================================

#[test]
fn test_old_version_is_rejected() {
    cmd("old-version")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported version 1"));
}

#[test]
fn test_directory_without_presets() {
    let temp = TempDir::new().unwrap();
    Command::cargo_bin("cmakepresets")
        .unwrap()
        .arg("-d")
        .arg(temp.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_missing_schema_cache_is_not_fatal() {
    let tree = PresetTree::new().with_presets(json!({
        "version": 4,
        "configurePresets": [preset("dev", json!(null))]
    }));
    let cache = TempDir::new().unwrap();
    Command::cargo_bin("cmakepresets")
        .unwrap()
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .arg("-d")
        .arg(tree.root())
        .arg("--schema-cache")
        .arg(cache.path())
        .args(["-v", "list", "--flat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("• dev"))
        .stderr(predicate::str::contains("WARN"));
}

#[test]
fn test_verbose_logs_loading() {
    cmd("basic")
        .args(["-vv", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Loaded presets"));
}
