use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

use test_helpers::base_mejournal_command;

#[test]
fn test_write_then_show_today() {
    let temp_dir = tempdir().unwrap();

    base_mejournal_command(temp_dir.path())
        .args(["write", "Walked to the river."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry saved!"));

    base_mejournal_command(temp_dir.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Today's Reflection"))
        .stdout(predicate::str::contains("Walked to the river."));

    let raw = fs::read_to_string(temp_dir.path().join("journal_entries.json")).unwrap();
    let records: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(records[0]["date"], "2024-06-13");
    assert_eq!(records[0]["content"], "Walked to the river.");
}

#[test]
fn test_write_reads_stdin() {
    let temp_dir = tempdir().unwrap();

    base_mejournal_command(temp_dir.path())
        .args(["write", "--date", "20240612"])
        .write_stdin("From stdin\n")
        .assert()
        .success();

    base_mejournal_command(temp_dir.path())
        .args(["show", "-d", "2024-06-12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reflection for June 12, 2024"))
        .stdout(predicate::str::contains("From stdin"));
}

#[test]
fn test_write_blank_entry_fails_without_saving() {
    let temp_dir = tempdir().unwrap();

    base_mejournal_command(temp_dir.path())
        .args(["write", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing was saved"));

    assert!(!temp_dir.path().join("journal_entries.json").exists());
}

#[test]
fn test_invalid_date() {
    let temp_dir = tempdir().unwrap();

    base_mejournal_command(temp_dir.path())
        .args(["show", "--date", "not-a-date"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}

#[test]
fn test_week_shows_current_week_guidance() {
    let temp_dir = tempdir().unwrap();

    base_mejournal_command(temp_dir.path())
        .args(["write", "Thursday note"])
        .assert()
        .success();

    base_mejournal_command(temp_dir.path())
        .arg("week")
        .assert()
        .success()
        .stdout(predicate::str::contains("Jun 10 - Jun 16, 2024"))
        .stdout(predicate::str::contains("[x] Thu 13 (today)"))
        .stdout(predicate::str::contains("Current Week in Progress"));
}

#[test]
fn test_reflect_previous_week_once() {
    let temp_dir = tempdir().unwrap();

    base_mejournal_command(temp_dir.path())
        .args(["reflect", "--different", "X", "--learned", "Y", "--want", "Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Weekly reflection completed!"))
        .stdout(predicate::str::contains("Jun 3 - Jun 9, 2024"));

    base_mejournal_command(temp_dir.path())
        .args(["reflect", "--learned", "changed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already completed"));

    base_mejournal_command(temp_dir.path())
        .args(["week", "--back", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Weekly reflection completed"))
        .stdout(predicate::str::contains("  Y"))
        .stdout(predicate::str::contains("changed").not());
}

#[test]
fn test_reflect_current_week_refused() {
    let temp_dir = tempdir().unwrap();

    base_mejournal_command(temp_dir.path())
        .args(["reflect", "--back", "0", "--learned", "too early"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("hasn't finished yet"));

    assert!(!temp_dir.path().join("weekly_summaries.json").exists());
}

#[test]
fn test_invalid_week_start_config() {
    let temp_dir = tempdir().unwrap();

    base_mejournal_command(temp_dir.path())
        .env("MEJOURNAL_WEEK_START", "someday")
        .arg("week")
        .assert()
        .failure()
        .stderr(predicate::str::contains("MEJOURNAL_WEEK_START"));
}

#[test]
fn test_sunday_week_start() {
    let temp_dir = tempdir().unwrap();

    base_mejournal_command(temp_dir.path())
        .env("MEJOURNAL_WEEK_START", "sunday")
        .arg("week")
        .assert()
        .success()
        .stdout(predicate::str::contains("Jun 9 - Jun 15, 2024"));
}

#[test]
fn test_read_only_commands_leave_malformed_snapshot_untouched() {
    let temp_dir = tempdir().unwrap();
    let entries_path = temp_dir.path().join("journal_entries.json");
    let truncated = r#"[{"id":"2024-06-12","date":"2024-06-12","content":"precious"},"#;
    fs::write(&entries_path, truncated).unwrap();

    base_mejournal_command(temp_dir.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entry yet."));

    base_mejournal_command(temp_dir.path())
        .args(["week", "--back", "1"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&entries_path).unwrap(), truncated);
    assert!(!temp_dir.path().join("weekly_summaries.json").exists());
}

#[test]
fn test_week_back_beyond_calendar_fails_cleanly() {
    let temp_dir = tempdir().unwrap();

    base_mejournal_command(temp_dir.path())
        .args(["week", "--back", "20000000"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("outside the supported calendar range"));
}
