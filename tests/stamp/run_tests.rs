// Tests for run module

use pathstamp::stamp::config::Config;
use pathstamp::stamp::{process_directory, process_file, Annotator, FileOutcome, IgnoreRules, RunOutcome, SkipReason};
use std::fs;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tempfile::tempdir;

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn backups_under(root: &Path) -> Vec<String> {
    let mut found = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else if path.to_string_lossy().ends_with(".bak") {
                found.push(path.display().to_string());
            }
        }
    }
    found
}

#[test]
fn test_end_to_end_counting_contract() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "a.ts", b"export const answer: number = 42; // fifty bytes\n");
    write(root, "b.png", b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR");
    write(root, "node_modules/c.ts", b"module.exports = 1;\n");

    let stats = process_directory(root).unwrap();

    assert_eq!(stats.files_processed, 1);
    // b.png is skipped, c.ts is never visited and counted nowhere
    assert_eq!(stats.files_skipped, 1);
    assert_eq!(stats.skipped_for(SkipReason::IgnoredExtension), 1);
    assert_eq!(stats.outcome, RunOutcome::Completed);

    assert!(fs::read_to_string(root.join("a.ts")).unwrap().starts_with("// a.ts\n\n"));
    assert_eq!(
        fs::read_to_string(root.join("node_modules/c.ts")).unwrap(),
        "module.exports = 1;\n"
    );
    assert!(backups_under(root).is_empty());
}

#[test]
fn test_second_run_annotates_nothing() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "src/app.ts", b"let x = 1;\n");
    write(root, "scripts/run.sh", b"echo hi\n");

    let first = process_directory(root).unwrap();
    assert_eq!(first.files_processed, 2);
    let app_after_first = fs::read(root.join("src/app.ts")).unwrap();
    assert_eq!(
        fs::read_to_string(root.join("scripts/run.sh")).unwrap(),
        "# scripts/run.sh\n\necho hi\n"
    );

    let second = process_directory(root).unwrap();
    assert_eq!(second.files_processed, 0);
    assert_eq!(second.files_skipped, 2);
    assert_eq!(second.skipped_for(SkipReason::AlreadyAnnotated), 2);
    assert_eq!(fs::read(root.join("src/app.ts")).unwrap(), app_after_first);
}

#[test]
fn test_mixed_tree_tallies_reasons() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "ok.js", b"console.log(1);\n");
    write(root, "empty.js", b"   \n");
    write(root, "package.json", b"{}\n");
    write(root, "blob.unknown", b"\0\0\0");
    write(root, "old.js.bak", b"stale\n");

    let stats = process_directory(root).unwrap();
    assert_eq!(stats.files_processed, 1);
    assert_eq!(stats.files_skipped, 4);
    assert_eq!(stats.skipped_for(SkipReason::Empty), 1);
    assert_eq!(stats.skipped_for(SkipReason::IgnoredName), 1);
    assert_eq!(stats.skipped_for(SkipReason::Binary), 1);
    assert_eq!(stats.skipped_for(SkipReason::BackupArtifact), 1);
}

#[test]
fn test_restored_files_count_as_skipped() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let original = b"na\xefve\n".to_vec();
    write(root, "日本/notes.txt", &original);

    let stats = process_directory(root).unwrap();
    assert_eq!(stats.files_processed, 0);
    assert_eq!(stats.files_skipped, 1);
    assert_eq!(stats.files_restored, 1);
    assert_eq!(fs::read(root.join("日本/notes.txt")).unwrap(), original);
    assert!(backups_under(root).is_empty());
}

#[test]
fn test_raised_cancel_flag_stops_before_next_file() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "a.ts", b"a\n");
    write(root, "b.ts", b"b\n");

    let flag = Arc::new(AtomicBool::new(true));
    let stats = Annotator::new(root).with_cancel_flag(flag).run().unwrap();

    assert_eq!(stats.outcome, RunOutcome::Interrupted);
    assert_eq!(stats.files_processed + stats.files_skipped, 0);
    assert_eq!(fs::read(root.join("a.ts")).unwrap(), b"a\n");
}

#[test]
fn test_config_rules_apply_to_run() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "generated/api.ts", b"x\n");
    write(root, "app.ts", b"y\n");
    write(root, "trace.log", b"z\n");

    let config = Config::parse(
        "extra_ignored_dirs = [\"generated\"]\nextra_ignored_extensions = [\"log\"]\n",
    )
    .unwrap();
    let stats = Annotator::from_config(root, &config).run().unwrap();

    assert_eq!(stats.files_processed, 1);
    assert_eq!(stats.files_skipped, 1);
    assert_eq!(fs::read(root.join("generated/api.ts")).unwrap(), b"x\n");
}

#[test]
fn test_missing_root_is_an_error() {
    let dir = tempdir().unwrap();
    let err = process_directory(&dir.path().join("nowhere")).unwrap_err();
    assert!(err.to_string().contains("Directory not found"));
}

#[test]
fn test_file_root_is_rejected() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("single.ts");
    fs::write(&file, "x").unwrap();
    assert!(process_directory(&file).unwrap_err().to_string().contains("Not a directory"));
}

#[test]
fn test_process_file_filters_before_transforming() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let image = root.join("logo.png");
    fs::write(&image, b"not really a png").unwrap();

    assert_eq!(
        process_file(&image, &root, &IgnoreRules::default()),
        FileOutcome::Skipped(SkipReason::IgnoredExtension)
    );
    assert_eq!(fs::read(&image).unwrap(), b"not really a png");
}

#[test]
fn test_stats_serialize_to_json() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "a.ts", b"a\n");
    write(root, "b.png", b"png");

    let stats = process_directory(root).unwrap();
    let json: serde_json::Value = serde_json::to_value(&stats).unwrap();

    assert_eq!(json["files_processed"], 1);
    assert_eq!(json["files_skipped"], 1);
    assert_eq!(json["skip_reasons"]["ignored-extension"], 1);
    assert_eq!(json["outcome"]["status"], "completed");
    assert!(json["duration"].is_f64());
}
