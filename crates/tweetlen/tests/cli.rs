//! Runs the `tweetlen` binary the way a user or a script would.

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn tweetlen() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn json_stdout(assert: &assert_cmd::assert::Assert) -> serde_json::Value {
    serde_json::from_slice(&assert.get_output().stdout).expect("stdout is not JSON")
}

// =============================================================================
// Surface
// =============================================================================

#[test]
fn help_lists_the_commands() {
    let mut assert = tweetlen().arg("--help").assert().success();
    for name in ["count", "check", "info", "serve"] {
        assert = assert.stdout(predicate::str::contains(name));
    }
}

#[test]
fn version_flags() {
    for flag in ["--version", "-V"] {
        tweetlen()
            .arg(flag)
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
    tweetlen()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(format!("{}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn bare_invocation_prints_usage_and_exits_2() {
    tweetlen()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn unknown_input_is_a_usage_error() {
    for args in [&["not-a-command"][..], &["--not-a-flag"], &["count", "--nope"]] {
        tweetlen()
            .args(args)
            .assert()
            .code(2)
            .stderr(predicate::str::contains("error:"));
    }
}

#[test]
fn global_flags_work_after_the_subcommand() {
    for flags in [
        &["-q"][..],
        &["-v"],
        &["-vv"],
        &["--color", "never"],
        &["--color", "always"],
    ] {
        tweetlen()
            .args(["count", "--text", "hello"])
            .args(flags)
            .assert()
            .success()
            .stdout(predicate::str::contains("5/280"));
    }
}

#[test]
fn info_reports_package_and_weights() {
    tweetlen()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains("URL weight"));

    let assert = tweetlen().args(["info", "--json"]).assert().success();
    let info = json_stdout(&assert);
    assert_eq!(info["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(info["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(info["weights"]["url_weight"], 23);
}

// =============================================================================
// Count Command
// =============================================================================

#[test]
fn count_inline_text() {
    tweetlen()
        .args(["count", "--text", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5/280"))
        .stdout(predicate::str::contains("275 remaining"));
}

#[test]
fn count_weights_urls_and_emoji() {
    tweetlen()
        .args(["--color", "never", "count", "--text", "Hello 😀 https://google.com/very/long/url"])
        .assert()
        .success()
        .stdout(predicate::str::contains("32/280"));
}

#[test]
fn count_json_has_report_fields() {
    let assert = tweetlen()
        .args(["count", "--json", "--text", "I love 🍕! Check out https://pizza.com"])
        .assert()
        .success();
    let json = json_stdout(&assert);
    assert_eq!(json["weighted_length"], 44);
    assert_eq!(json["remaining"], 236);
    assert_eq!(json["url_count"], 1);
    assert_eq!(json["emoji_count"], 1);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["can_send"], true);
}

#[test]
fn count_over_limit_reports_negative_remaining() {
    let assert = tweetlen()
        .args(["count", "--json", "--text", "a".repeat(300).as_str()])
        .assert()
        .success();
    let json = json_stdout(&assert);
    assert_eq!(json["remaining"], -20);
    assert_eq!(json["status"], "over_limit");
}

#[test]
fn count_reads_file_without_trailing_newline() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), "こんにちは\n").unwrap();
    tweetlen()
        .args(["count", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("10/280"));
}

#[test]
fn count_keep_newline_counts_it() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), "hello\n").unwrap();
    tweetlen()
        .args(["count", "--keep-newline", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("6/280"));
}

#[test]
fn count_reads_stdin() {
    tweetlen()
        .args(["count", "-"])
        .write_stdin("안녕\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("4/280"));
}

#[test]
fn count_without_input_fails() {
    tweetlen()
        .arg("count")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no input"));
}

#[test]
fn count_text_and_file_conflict() {
    tweetlen()
        .args(["count", "message.txt", "--text", "hi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn count_missing_file_fails() {
    tweetlen()
        .args(["count", "/nonexistent/message.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

// =============================================================================
// Check Command
// =============================================================================

#[test]
fn check_passes_for_short_message() {
    tweetlen()
        .args(["check", "--text", "Check this https://example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS:"))
        .stdout(predicate::str::contains("34/280"));
}

#[test]
fn check_fails_for_blank_message() {
    tweetlen()
        .args(["check", "--text", "   \n  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty"));
}

#[test]
fn check_fails_for_long_message() {
    tweetlen()
        .args(["check", "--text", "你".repeat(141).as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("282"));
}

#[test]
fn check_accepts_exactly_the_limit() {
    tweetlen()
        .args(["check", "--text", "你".repeat(140).as_str()])
        .assert()
        .success();
}

#[test]
fn check_json_still_prints_report_on_failure() {
    let assert = tweetlen()
        .args(["check", "--json", "--text", "a".repeat(281).as_str()])
        .assert()
        .failure();
    let json = json_stdout(&assert);
    assert_eq!(json["can_send"], false);
    assert!(json["reason"].as_str().unwrap().contains("281"));
}

// =============================================================================
// Input Limits
// =============================================================================

#[test]
fn oversized_input_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".tweetlen.toml"), "max_input_bytes = 8\n").unwrap();
    tweetlen()
        .current_dir(dir.path())
        .args(["count", "--text", "more than eight bytes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

#[test]
fn disabled_input_limit_allows_large_input() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".tweetlen.toml"),
        "max_input_bytes = 8\ndisable_input_limit = true\n",
    )
    .unwrap();
    tweetlen()
        .current_dir(dir.path())
        .args(["count", "--text", "more than eight bytes"])
        .assert()
        .success();
}

// =============================================================================
// Working Directory
// =============================================================================

#[test]
fn chdir_reads_relative_files_from_the_new_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("draft.txt"), "Hi 😀\n").unwrap();
    tweetlen()
        .args(["-C", dir.path().to_str().unwrap(), "count", "draft.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5/280"));
}

#[test]
fn chdir_to_a_missing_directory_fails() {
    tweetlen()
        .args(["-C", "/nonexistent/tweetlen/drafts", "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to change directory"));
}
