//! Integration tests for the extract command.

use std::fs;

use carelog_cli::cli::ExtractArgs;
use carelog_cli::commands::run_extract;
use carelog_model::EntityKind;
use tempfile::TempDir;

fn write_envelope(dir: &std::path::Path, name: &str, subject: &str, text_body: &str) {
    let envelope = serde_json::json!({
        "subject": subject,
        "text_body": text_body,
        "attachments": [],
    });
    fs::write(dir.join(name), envelope.to_string()).expect("write envelope");
}

fn extract_args(input: &std::path::Path) -> ExtractArgs {
    ExtractArgs {
        input_dir: input.to_path_buf(),
        output_dir: None,
        workers: Some(2),
        limit: None,
        dry_run: false,
    }
}

#[test]
fn extract_writes_one_record_per_envelope() {
    let dir = TempDir::new().expect("tempdir");
    write_envelope(
        dir.path(),
        "note-1.json",
        "Will's automated daily shift note- 2024-03-26",
        "Date: 2024-03-26\nWritten by; Stacy Moses\nDescription of mood: Settled\n",
    );
    write_envelope(
        dir.path(),
        "misc.json",
        "Lawn mowing quote",
        "Hi team\nQuote attached\n",
    );

    let summary = run_extract(&extract_args(dir.path())).expect("extract runs");

    assert_eq!(summary.total, 2);
    assert_eq!(summary.per_entity.get(&EntityKind::ShiftNote), Some(&1));
    assert_eq!(summary.per_entity.get(&EntityKind::Unclassified), Some(&1));
    assert!(!summary.has_errors());

    let records_dir = dir.path().join("records");
    let note: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(records_dir.join("note-1.record.json")).expect("read record"),
    )
    .expect("record parses");
    assert_eq!(note["entity"], "shift_note");
    assert_eq!(note["fields"]["author_name"]["value"], "Stacy Moses");

    let misc: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(records_dir.join("misc.record.json")).expect("read record"),
    )
    .expect("record parses");
    assert_eq!(misc["entity"], "unclassified");
    assert_eq!(misc["incomplete"], true);
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().expect("tempdir");
    write_envelope(
        dir.path(),
        "note-1.json",
        "Will's automated daily shift note- 2024-03-26",
        "Date: 2024-03-26\nWritten by; Stacy Moses\n",
    );
    let mut args = extract_args(dir.path());
    args.dry_run = true;

    let summary = run_extract(&args).expect("extract runs");

    assert_eq!(summary.total, 1);
    assert!(summary.output_dir.is_none());
    assert!(!dir.path().join("records").exists());
}

#[test]
fn unreadable_envelopes_are_skipped_and_reported() {
    let dir = TempDir::new().expect("tempdir");
    write_envelope(
        dir.path(),
        "note-1.json",
        "Will's automated daily shift note- 2024-03-26",
        "Date: 2024-03-26\nWritten by; Stacy Moses\n",
    );
    fs::write(dir.path().join("broken.json"), "{not json").expect("write file");

    let summary = run_extract(&extract_args(dir.path())).expect("extract runs");

    assert_eq!(summary.total, 1);
    assert!(summary.has_errors());
    assert_eq!(summary.errors.len(), 1);
}

#[test]
fn limit_caps_the_batch() {
    let dir = TempDir::new().expect("tempdir");
    for index in 0..5 {
        write_envelope(
            dir.path(),
            &format!("note-{index}.json"),
            "Will's automated daily shift note- 2024-03-26",
            "Date: 2024-03-26\nWritten by; Stacy Moses\n",
        );
    }
    let mut args = extract_args(dir.path());
    args.limit = Some(2);

    let summary = run_extract(&args).expect("extract runs");
    assert_eq!(summary.total, 2);
}
