//! Integration tests for the lucky-wheel CLI.
//!
//! Every run gets its own data directory and config file path so tests never
//! touch the user's saved options.
//!
//! Run with: `cargo test --package lucky-wheel-cli --test cli_integration`

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Helper to run the CLI isolated inside `dir`.
fn run_wheel(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lucky-wheel"))
        .current_dir(dir)
        .env("LUCKY_WHEEL_CONFIG", dir.join("config.json"))
        .env_remove("LUCKY_WHEEL_DATA_DIR")
        .env_remove("LUCKY_WHEEL_USER_AGENT")
        .arg("--data-dir")
        .arg(dir.join("data"))
        .args(args)
        .output()
        .expect("Failed to execute lucky-wheel command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_options_show_defaults() {
    let temp = TempDir::new().unwrap();

    let output = run_wheel(temp.path(), &["options", "show"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "options show should succeed");
    assert!(stdout.contains("1. 选项1"), "Should list first default label");
    assert!(stdout.contains("8. 选项8"), "Should list last default label");
    assert!(stdout.contains("(defaults)"));
    assert!(
        !temp.path().join("data/options.json").exists(),
        "Showing options should not create the store"
    );
}

#[test]
fn test_options_set_persists_trimmed_labels() {
    let temp = TempDir::new().unwrap();

    let output = run_wheel(
        temp.path(),
        &["options", "set", " 火锅 ,烧烤,面条,饺子,寿司,披萨,沙拉, 汉堡"],
    );
    assert!(output.status.success(), "options set should succeed");

    let saved = fs::read_to_string(temp.path().join("data/options.json")).unwrap();
    let entries: serde_json::Value = serde_json::from_str(&saved).unwrap();
    let labels: Vec<String> =
        serde_json::from_str(entries["wheelOptions"].as_str().unwrap()).unwrap();
    assert_eq!(labels.len(), 8);
    assert_eq!(labels[0], "火锅");
    assert_eq!(labels[7], "汉堡");

    let output = run_wheel(temp.path(), &["options", "show"]);
    let stdout = stdout(&output);
    assert!(stdout.contains("1. 火锅"));
    assert!(!stdout.contains("(defaults)"));
}

#[test]
fn test_options_set_rejects_wrong_count() {
    let temp = TempDir::new().unwrap();

    for labels in ["a,b,c,d,e,f,g", "a,b,c,d,e,f,g,h,i"] {
        let output = run_wheel(temp.path(), &["options", "set", labels]);
        let stderr = String::from_utf8_lossy(&output.stderr);

        assert!(!output.status.success(), "{} labels should fail", labels);
        assert!(
            stderr.contains("请确保输入8个选项！"),
            "Should explain the count rule"
        );
    }
    assert!(!temp.path().join("data/options.json").exists());
}

#[test]
fn test_options_reset_twice() {
    let temp = TempDir::new().unwrap();
    run_wheel(temp.path(), &["options", "set", "1,2,3,4,5,6,7,8"]);

    for _ in 0..2 {
        let output = run_wheel(temp.path(), &["options", "reset"]);
        assert!(output.status.success(), "options reset should succeed");
        assert!(stdout(&output).contains("选项已重置！"));
    }

    let output = run_wheel(temp.path(), &["options", "show"]);
    assert!(stdout(&output).contains("(defaults)"));
}

#[test]
fn test_options_reset_repairs_corrupt_store() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("options.json"), "not json").unwrap();

    let output = run_wheel(temp.path(), &["options", "reset"]);
    assert!(output.status.success(), "reset should overwrite a corrupt store");
    assert!(stdout(&output).contains("选项已重置！"));

    let saved = fs::read_to_string(data.join("options.json")).unwrap();
    let entries: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert!(entries.get("wheelOptions").is_none());

    let output = run_wheel(temp.path(), &["options", "show"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("(defaults)"));
}

#[test]
fn test_spin_with_fixed_index() {
    let temp = TempDir::new().unwrap();

    let output = run_wheel(temp.path(), &["spin", "--index", "3"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "spin should succeed");
    assert!(stdout.contains("index:   3"));
    assert!(stdout.contains("angle:   2002.5"));
    assert!(stdout.contains("message: 恭喜！抽中了：选项4"));
}

#[test]
fn test_spin_uses_saved_labels() {
    let temp = TempDir::new().unwrap();
    run_wheel(temp.path(), &["options", "set", "a,b,c,d,e,f,g,h"]);

    let output = run_wheel(temp.path(), &["spin", "--index", "7"]);
    assert!(stdout(&output).contains("message: 恭喜！抽中了：h"));
}

#[test]
fn test_spin_rejects_out_of_range_index() {
    let temp = TempDir::new().unwrap();
    let output = run_wheel(temp.path(), &["spin", "--index", "8"]);
    assert!(!output.status.success(), "index 8 should be rejected");
}

#[test]
fn test_random_spin_lands_on_a_label() {
    let temp = TempDir::new().unwrap();

    let output = run_wheel(temp.path(), &["spin"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "spin should succeed");
    assert!(stdout.contains("label:   选项"));
    assert!(stdout.contains("message: 恭喜！抽中了：选项"));
}

#[test]
fn test_config_file_is_honored() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("config.json"),
        r#"{"storage_key": "customKey", "extra_rotations": 1}"#,
    )
    .unwrap();

    let output = run_wheel(temp.path(), &["spin", "--index", "0"]);
    assert!(stdout(&output).contains("angle:   697.5"));

    let output = run_wheel(temp.path(), &["config", "show"]);
    let stdout = stdout(&output);
    assert!(output.status.success(), "config show should succeed");
    assert!(stdout.contains("customKey"));
}

#[test]
fn test_config_path_prints_override() {
    let temp = TempDir::new().unwrap();

    let output = run_wheel(temp.path(), &["config", "path"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "config path should succeed");
    assert!(stdout.trim().ends_with("config.json"));
}
