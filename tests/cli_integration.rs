//! Integration tests for Deskmate
//!
//! The first modules exercise the note store and history log through the
//! library against files in temporary directories. The `binary_tests`
//! module drives the `deskmate` executable, both one-shot and through the
//! interactive shell.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use deskmate_cli::storage::{
    FileLineStore, FixedClock, HistoryLog, NoteRepository, StoreError, HISTORY_LIMIT,
};
use tempfile::{tempdir, TempDir};

// =============================================================================
// Test Helpers
// =============================================================================

/// Creates a note repository backed by a file in a temporary directory.
/// Returns the repository and the temp directory (which must be kept alive).
fn create_test_notes() -> (NoteRepository<FileLineStore, FixedClock>, TempDir) {
    let dir = tempdir().expect("Failed to create temp directory");
    let clock = FixedClock(
        NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap(),
    );
    let repo = NoteRepository::with_clock(
        FileLineStore::new(dir.path().join("data").join("notes.txt")),
        clock,
    );
    (repo, dir)
}

fn notes_file(dir: &Path) -> String {
    fs::read_to_string(dir.join("data").join("notes.txt")).expect("Failed to read notes file")
}

// =============================================================================
// Note Store Tests
// =============================================================================

mod note_tests {
    use super::*;

    #[test]
    fn test_positions_are_dense_in_add_order() {
        let (repo, _dir) = create_test_notes();
        let inputs = ["first", "", "second", "   ", "third"];

        let added = inputs.iter().filter(|t| repo.add(t).is_ok()).count();

        let notes = repo.list_all().expect("Failed to list notes");
        assert_eq!(notes.len(), added, "Only non-empty adds should be stored");
        let positions: Vec<usize> = notes.iter().map(|n| n.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn test_file_format() {
        let (repo, dir) = create_test_notes();

        repo.add("Buy milk").unwrap();
        repo.add("sell car").unwrap();

        assert_eq!(
            notes_file(dir.path()),
            "[2025-01-15 10:00:00] Buy milk\n[2025-01-15 10:00:00] sell car\n"
        );
    }

    #[test]
    fn test_search_returns_current_positions() {
        let (repo, _dir) = create_test_notes();
        repo.add("Buy milk").unwrap();
        repo.add("sell car").unwrap();

        let hits = repo.search("milk").unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].position, 1);
    }

    #[test]
    fn test_delete_shifts_later_positions_down() {
        let (repo, _dir) = create_test_notes();
        for text in ["a", "b", "c", "d", "e"] {
            repo.add(text).unwrap();
        }
        let before = repo.list_all().unwrap();

        repo.delete_by_index(2).unwrap();

        let after = repo.list_all().unwrap();
        assert_eq!(after.len(), before.len() - 1);
        assert!(after.iter().all(|n| n.text != "b"));
        for old in before.iter().filter(|n| n.position > 2) {
            let moved = after.iter().find(|n| n.text == old.text).unwrap();
            assert_eq!(moved.position, old.position - 1);
        }
    }

    #[test]
    fn test_out_of_range_delete_leaves_file_untouched() {
        let (repo, dir) = create_test_notes();
        repo.add("one").unwrap();
        repo.add("two").unwrap();
        let before = notes_file(dir.path());

        assert!(matches!(
            repo.delete_by_index(0),
            Err(StoreError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            repo.delete_by_index(3),
            Err(StoreError::IndexOutOfRange { .. })
        ));

        assert_eq!(notes_file(dir.path()), before);
    }

    #[test]
    fn test_edit_keeps_timestamp_then_delete_removes_edited_text() {
        let (repo, dir) = create_test_notes();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(
            dir.path().join("data").join("notes.txt"),
            "[2020-02-02 08:00:00] draft\n",
        )
        .unwrap();

        let old = repo.edit_by_index(1, "new").unwrap();
        assert_eq!(old, "[2020-02-02 08:00:00] draft");
        assert_eq!(notes_file(dir.path()), "[2020-02-02 08:00:00] new\n");

        let removed = repo.delete_by_index(1).unwrap();
        assert_eq!(removed.text, "new");
        assert!(repo.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_call_mom_scenario() {
        let (repo, _dir) = create_test_notes();
        assert!(repo.list_all().unwrap().is_empty());

        repo.add("Call mom").unwrap();
        let notes = repo.list_all().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].position, 1);
        assert_eq!(notes[0].timestamp.as_deref(), Some("2025-01-15 10:00:00"));
        assert_eq!(notes[0].text, "Call mom");

        assert_eq!(repo.delete_by_keyword("mom").unwrap(), 1);
        assert!(repo.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_hand_edited_file_is_picked_up() {
        let (repo, dir) = create_test_notes();
        repo.add("from the app").unwrap();

        let path = dir.path().join("data").join("notes.txt");
        let mut content = notes_file(dir.path());
        content.push_str("typed in an editor\n");
        fs::write(&path, content).unwrap();

        let notes = repo.list_all().unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[1].timestamp, None);
        assert_eq!(notes[1].text, "typed in an editor");
    }
}

// =============================================================================
// History Tests
// =============================================================================

mod history_tests {
    use super::*;

    #[test]
    fn test_fifteen_records_keep_last_ten() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("calc_history.txt");
        let log = HistoryLog::new(FileLineStore::new(&path));

        for i in 1..=15 {
            log.record(&format!("{i}*{i}"), &(i * i).to_string())
                .expect("Failed to record");
        }

        let expected: Vec<String> = (6..=15).map(|i| format!("{i}*{i} = {}", i * i)).collect();
        assert_eq!(log.read_recent().unwrap(), expected);

        let on_disk = fs::read_to_string(&path).unwrap();
        assert_eq!(on_disk.lines().count(), HISTORY_LIMIT);
    }
}

// =============================================================================
// Binary Tests
// =============================================================================

mod binary_tests {
    use super::*;
    use assert_cmd::Command;
    use predicates::prelude::*;

    /// Builds a `deskmate` command isolated from the user's home and data.
    fn deskmate(home: &TempDir) -> Command {
        let mut cmd = Command::cargo_bin("deskmate").expect("Binary should build");
        cmd.env("HOME", home.path())
            .env("NO_COLOR", "1")
            .env("CLICOLOR", "0")
            .env_remove("DESKMATE_DATA_DIR")
            .env_remove("RUST_LOG")
            .arg("--data-dir")
            .arg(home.path().join("data"));
        cmd
    }

    #[test]
    fn test_one_shot_note_add_and_json_show() {
        let home = tempdir().unwrap();

        deskmate(&home)
            .args(["note", "add", "Buy", "milk"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Note added"));

        let output = deskmate(&home)
            .args(["note", "show", "--format", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let notes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(notes[0]["position"], 1);
        assert_eq!(notes[0]["text"], "Buy milk");
    }

    #[test]
    fn test_one_shot_errors_exit_nonzero() {
        let home = tempdir().unwrap();

        deskmate(&home)
            .args(["note", "delete", "1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Note number 1 not found"));

        deskmate(&home)
            .args(["calc", "2", "+", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid character 'x'"));
    }

    #[test]
    fn test_calc_records_history() {
        let home = tempdir().unwrap();

        deskmate(&home)
            .args(["calc", "2+3*4"])
            .assert()
            .success()
            .stdout(predicate::str::contains("2+3*4 = 14"));

        let history = fs::read_to_string(home.path().join("data").join("calc_history.txt")).unwrap();
        assert_eq!(history, "2+3*4 = 14\n");
    }

    #[test]
    fn test_convert_temperature() {
        let home = tempdir().unwrap();

        deskmate(&home)
            .args(["convert", "temp", "100", "C", "F"])
            .assert()
            .success()
            .stdout(predicate::str::contains("212"));
    }

    #[test]
    fn test_shell_session() {
        let home = tempdir().unwrap();
        let script = "\
note add \"Call mom\"
note add 'Buy milk'
note search MILK
note delete 9
note delete-matching mom
note show
calc 7/2
fly to the moon

exit
";

        deskmate(&home)
            .write_stdin(script)
            .assert()
            .success()
            .stdout(predicate::str::contains("1 note(s) match 'MILK'"))
            .stdout(predicate::str::contains("Deleted 1 note(s) containing 'mom'"))
            .stdout(predicate::str::contains("7/2 = 3.5"))
            .stdout(predicate::str::contains("Unknown command"))
            .stdout(predicate::str::contains("Goodbye."))
            .stderr(predicate::str::contains("Note number 9 not found"));

        let notes = notes_on_disk(home.path());
        assert_eq!(notes.len(), 1);
        assert!(notes[0].ends_with("] Buy milk"));
    }

    #[test]
    fn test_shell_exits_on_end_of_input() {
        let home = tempdir().unwrap();

        deskmate(&home)
            .write_stdin("time\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Exiting."));
    }

    #[test]
    fn test_shell_rejects_empty_keyword_delete() {
        let home = tempdir().unwrap();

        deskmate(&home)
            .write_stdin("note add keep me\nnote delete-matching \"\"\nquit\n")
            .assert()
            .success()
            .stderr(predicate::str::contains("Keyword must not be empty"));

        assert_eq!(notes_on_disk(home.path()).len(), 1);
    }

    #[test]
    fn test_config_set_and_get() {
        let home = tempdir().unwrap();

        deskmate(&home)
            .args(["config", "set", "password_length", "20"])
            .assert()
            .success();

        deskmate(&home)
            .args(["config", "get", "password_length"])
            .assert()
            .success()
            .stdout(predicate::str::contains("20"));

        let output = deskmate(&home).arg("password").output().unwrap();
        let password = String::from_utf8(output.stdout).unwrap();
        assert_eq!(password.trim_end().chars().count(), 20);
    }

    #[test]
    fn test_calc_reports_history_write_failure() {
        let home = tempdir().unwrap();
        fs::create_dir_all(home.path().join("data").join("calc_history.txt")).unwrap();

        deskmate(&home)
            .args(["calc", "1+1"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("1+1 = 2"))
            .stderr(predicate::str::contains("Failed to save calculation history"));

        deskmate(&home)
            .write_stdin("calc 2*3\nexit\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("2*3 = 6"))
            .stderr(predicate::str::contains("Error:"))
            .stderr(predicate::str::contains("Failed to save calculation history"));
    }

    #[test]
    fn test_shell_note_subcommand_is_case_insensitive() {
        let home = tempdir().unwrap();

        deskmate(&home)
            .write_stdin("NOTE ADD Water plants\nNote Show\nquit\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Note added"))
            .stdout(predicate::str::contains("Water plants"));

        assert_eq!(notes_on_disk(home.path()).len(), 1);
    }

    #[test]
    fn test_host_commands_emit_json() {
        let home = tempdir().unwrap();

        for command in ["sysinfo", "battery", "network"] {
            let output = deskmate(&home)
                .args([command, "--format", "json"])
                .output()
                .unwrap();
            assert!(output.status.success(), "{command} failed");

            let value: serde_json::Value = serde_json::from_slice(&output.stdout)
                .unwrap_or_else(|e| panic!("{command} printed invalid JSON: {e}"));
            if command == "sysinfo" {
                assert!(value["os"].is_string());
                assert!(value.get("memory").is_some());
                assert!(value.get("disk").is_some());
            }
        }
    }

    fn notes_on_disk(home: &Path) -> Vec<String> {
        fs::read_to_string(home.join("data").join("notes.txt"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}
