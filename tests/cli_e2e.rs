//! End-to-end CLI tests for chatpulse.
//!
//! These tests run the actual binary against small exports written to a
//! temporary directory and check the printed report and written files.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

const LEGACY: &str = "\
01/02/2021, 10:29 - Messages to this chat and calls are now secured with end-to-end encryption. Tap for more info.
01/02/2021, 10:30 - Alice: hello 😀
01/02/2021, 10:31 - Bob: hi there
02/02/2021, 21:05 - Alice: how are you doing 😀😀
03/03/2021, 08:00 - Carol: <Media omitted>
";

const BRACKETED: &str = "\
[01/02/21, 10:30:15] Alice: hello
[01/02/21, 10:31:40] Bob: hi
there
";

/// Creates a temporary directory with one export per layout.
fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("legacy.txt"), LEGACY).unwrap();
    fs::write(dir.path().join("bracketed.txt"), BRACKETED).unwrap();
    fs::write(
        dir.path().join("malformed.txt"),
        "01/02/2021, 10:30 - Alice: ok\n01/02/2021, 10:31 - : who?\n",
    )
    .unwrap();
    fs::write(dir.path().join("empty.txt"), "").unwrap();
    dir
}

fn chatpulse_cmd() -> Command {
    let mut cmd = Command::from_std(std::process::Command::new(env!("CARGO_BIN_EXE_chatpulse")));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn input(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_str().unwrap().to_string()
}

fn output_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

mod basic_functionality {
    use super::*;

    #[test]
    fn test_legacy_report() {
        let fixtures = setup_fixtures();

        chatpulse_cmd()
            .arg(input(&fixtures, "legacy.txt"))
            .assert()
            .success()
            .stdout(predicate::str::contains("Found 4 messages in Legacy format (detected)"))
            .stdout(predicate::str::contains("👤 Alice"))
            .stdout(predicate::str::contains("Messages:    2"))
            .stdout(predicate::str::contains("😀 (3)"))
            .stdout(predicate::str::contains("N/A"))
            .stdout(predicate::str::contains("Busiest slot: Monday 10:00 (2 messages)"))
            .stdout(predicate::str::contains("Done"));
    }

    #[test]
    fn test_forced_bracketed_format() {
        let fixtures = setup_fixtures();

        chatpulse_cmd()
            .args([input(&fixtures, "bracketed.txt").as_str(), "--format", "ios"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Found 2 messages in Bracketed format"))
            .stdout(predicate::str::contains("(detected)").not());
    }

    #[test]
    fn test_help() {
        chatpulse_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--export"))
            .stdout(predicate::str::contains("--min-emoji-count"));
    }

    #[test]
    fn test_verbose_logs_to_stderr() {
        let fixtures = setup_fixtures();

        chatpulse_cmd()
            .args([input(&fixtures, "legacy.txt").as_str(), "-v"])
            .assert()
            .success()
            .stderr(predicate::str::contains("export parsed"));
    }
}

// ============================================================================
// Filter Tests
// ============================================================================

mod filters {
    use super::*;

    #[test]
    fn test_user_filter() {
        let fixtures = setup_fixtures();

        chatpulse_cmd()
            .args([input(&fixtures, "legacy.txt").as_str(), "--user", "Bob"])
            .assert()
            .success()
            .stdout(predicate::str::contains("1 of 4 messages match the filter"))
            .stdout(predicate::str::contains("👤 Bob"))
            .stdout(predicate::str::contains("👤 Alice").not());
    }

    #[test]
    fn test_date_range() {
        let fixtures = setup_fixtures();

        chatpulse_cmd()
            .args([
                input(&fixtures, "legacy.txt").as_str(),
                "--from",
                "2021-02-02",
                "--to",
                "2021-02-28",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("1 of 4 messages match the filter"))
            .stdout(predicate::str::contains("Busiest slot: Tuesday 21:00 (1 messages)"));
    }

    #[test]
    fn test_bad_date_format() {
        let fixtures = setup_fixtures();

        chatpulse_cmd()
            .args([input(&fixtures, "legacy.txt").as_str(), "--from", "02/02/2021"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid date"));
    }

    #[test]
    fn test_end_before_start() {
        let fixtures = setup_fixtures();

        chatpulse_cmd()
            .args([
                input(&fixtures, "legacy.txt").as_str(),
                "--from",
                "2021-03-01",
                "--to",
                "2021-02-01",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid filter"));
    }
}

// ============================================================================
// Flag Tests
// ============================================================================

mod flags {
    use super::*;

    #[test]
    fn test_skip_media() {
        let fixtures = setup_fixtures();

        chatpulse_cmd()
            .args([input(&fixtures, "legacy.txt").as_str(), "--skip-media"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Dropped 1 media placeholders"))
            .stdout(predicate::str::contains("👤 Carol").not());
    }

    #[test]
    fn test_anonymize() {
        let fixtures = setup_fixtures();

        chatpulse_cmd()
            .args([input(&fixtures, "legacy.txt").as_str(), "--anonymize"])
            .assert()
            .success()
            .stdout(predicate::str::contains("👤 User 1"))
            .stdout(predicate::str::contains("Alice").not());
    }

    #[test]
    fn test_min_emoji_count() {
        let fixtures = setup_fixtures();

        chatpulse_cmd()
            .args([input(&fixtures, "legacy.txt").as_str(), "--min-emoji-count", "4"])
            .assert()
            .success()
            .stdout(predicate::str::contains("😀").not());
    }

    #[test]
    fn test_emoji_flags_conflict() {
        let fixtures = setup_fixtures();

        chatpulse_cmd()
            .args([
                input(&fixtures, "legacy.txt").as_str(),
                "--top-emojis",
                "1",
                "--min-emoji-count",
                "1",
            ])
            .assert()
            .failure();
    }

    #[test]
    fn test_malformed_lines_skipped_by_default() {
        let fixtures = setup_fixtures();

        chatpulse_cmd()
            .arg(input(&fixtures, "malformed.txt"))
            .assert()
            .success()
            .stdout(predicate::str::contains("Skipped 1 unparsable lines"));
    }

    #[test]
    fn test_strict_fails_on_malformed_line() {
        let fixtures = setup_fixtures();

        chatpulse_cmd()
            .args([input(&fixtures, "malformed.txt").as_str(), "--strict"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Malformed message line 2"));
    }

    #[test]
    fn test_config_file() {
        let fixtures = setup_fixtures();
        let config = output_path(&fixtures, "chatpulse.json");
        fs::write(&config, r#"{"parse": {"skip_media": true}}"#).unwrap();

        chatpulse_cmd()
            .args([
                input(&fixtures, "legacy.txt").as_str(),
                "--config",
                config.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Dropped 1 media placeholders"));
    }
}

// ============================================================================
// Output Tests
// ============================================================================

mod outputs {
    use super::*;

    #[test]
    fn test_export_csv() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "table.csv");

        chatpulse_cmd()
            .args([
                input(&fixtures, "legacy.txt").as_str(),
                "--export",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("CSV table written"));

        let content = fs::read_to_string(&output).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("Date;Time;Sender;Message;MonthBucket;Hour;Weekday;Emojis")
        );
        assert_eq!(lines.count(), 4);
    }

    #[test]
    fn test_export_json_respects_filter() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "table.json");

        chatpulse_cmd()
            .args([
                input(&fixtures, "legacy.txt").as_str(),
                "--user",
                "Alice",
                "-e",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r["sender"] == "Alice"));
    }

    #[test]
    fn test_export_jsonl() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "table.jsonl");

        chatpulse_cmd()
            .args([
                input(&fixtures, "legacy.txt").as_str(),
                "--export",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        let content = fs::read_to_string(&output).unwrap();
        assert_eq!(content.lines().count(), 4);
        for line in content.lines() {
            let _: serde_json::Value = serde_json::from_str(line).unwrap();
        }
    }

    #[test]
    fn test_export_unknown_extension() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "table.dat");

        chatpulse_cmd()
            .args([
                input(&fixtures, "legacy.txt").as_str(),
                "--export",
                output.to_str().unwrap(),
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown file extension"));

        chatpulse_cmd()
            .args([
                input(&fixtures, "legacy.txt").as_str(),
                "--export",
                output.to_str().unwrap(),
                "--export-format",
                "csv",
            ])
            .assert()
            .success();
        assert!(output.exists());
    }

    #[test]
    fn test_export_format_requires_export() {
        let fixtures = setup_fixtures();

        chatpulse_cmd()
            .args([input(&fixtures, "legacy.txt").as_str(), "--export-format", "json"])
            .assert()
            .failure();
    }

    #[test]
    fn test_report() {
        let fixtures = setup_fixtures();
        let report = output_path(&fixtures, "report.json");

        chatpulse_cmd()
            .args([
                input(&fixtures, "legacy.txt").as_str(),
                "--report",
                report.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Report written"));

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
        assert_eq!(json["message_count"], 4);
        assert_eq!(json["senders"], serde_json::json!(["Alice", "Bob", "Carol"]));
        assert_eq!(json["user_stats"][1]["words"]["status"], "insufficient_sample");
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod errors {
    use super::*;

    #[test]
    fn test_missing_file() {
        chatpulse_cmd()
            .arg("/nonexistent/chat.txt")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error"));
    }

    #[test]
    fn test_empty_file() {
        let fixtures = setup_fixtures();

        chatpulse_cmd()
            .arg(input(&fixtures, "empty.txt"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("No messages found"));
    }

    #[test]
    fn test_missing_input_argument() {
        chatpulse_cmd().assert().failure();
    }
}
