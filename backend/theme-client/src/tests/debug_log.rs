use crate::debug_log::{DebugLog, FileDebugLog, Severity};

use std::sync::Arc;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde_json::json;

/// **VALUE**: Verifies the exact line layout written to the debug log.
///
/// **WHY THIS MATTERS**: Support scripts grep these files by `Type:` and `Operation:`.
#[test]
fn given_record_when_formatted_then_matches_line_layout() {
    let timestamp = UNIX_EPOCH + Duration::from_secs(1_700_000_000);

    let line = FileDebugLog::format_line(
        timestamp,
        Severity::Error,
        "delete_asset",
        &json!({ "code": "00102" }),
    );

    assert_eq!(
        line,
        r#"[2023-11-14T22:13:20Z] Type: Error | Operation: delete_asset | Data: {"code":"00102"}"#
    );
}

#[test]
fn given_string_payload_when_formatted_then_written_without_quotes() {
    let line = FileDebugLog::format_line(
        SystemTime::now(),
        Severity::Info,
        "list_themes",
        &json!("connection refused"),
    );

    assert!(line.ends_with("| Data: connection refused"));
}

#[test]
fn given_records_when_logged_then_lines_appended() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("opencode.log");
    let log = FileDebugLog::new(&path);

    log.record(Severity::Info, "list_themes", &json!({ "path": "list" }));
    log.record(Severity::Error, "list_themes", &json!("boom"));
    drop(log);

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("Type: Info | Operation: list_themes"));
    assert!(lines[1].ends_with("Data: boom"));
}

/// **VALUE**: Verifies write failures are swallowed.
///
/// **WHY THIS MATTERS**: A read-only working directory must not make theme uploads fail.
///
/// **BUG THIS CATCHES**: Would catch a panic or propagated error from the logger.
#[test]
fn given_unwritable_path_when_recorded_then_does_not_panic() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be opened as a log file
    let log = FileDebugLog::new(dir.path());

    log.record(Severity::Info, "check_configuration", &json!({}));
    log.record(Severity::Info, "check_configuration", &json!({}));
}

/// **VALUE**: Verifies records queued from many threads all reach the file once the log is
/// dropped.
///
/// **WHY THIS MATTERS**: Writes happen off the caller's thread; dropping the client must not
/// lose the lines describing its last calls.
///
/// **BUG THIS CATCHES**: Would catch the writer thread being detached instead of joined, or
/// interleaved partial lines.
#[test]
fn given_concurrent_records_when_log_dropped_then_every_line_flushed() {
    // GIVEN: A shared file log
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("opencode.log");
    let log = Arc::new(FileDebugLog::new(&path));

    // WHEN: Four threads record 25 lines each, then the log is dropped
    let workers: Vec<_> = (0..4)
        .map(|worker| {
            let log = Arc::clone(&log);
            thread::spawn(move || {
                for call in 0..25 {
                    log.record(Severity::Info, "send_asset", &json!({ "worker": worker, "call": call }));
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }
    drop(log);

    // THEN: All 100 complete lines are on disk
    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 100);
    assert!(
        lines
            .iter()
            .all(|line| line.contains("Type: Info | Operation: send_asset | Data: {"))
    );
}
