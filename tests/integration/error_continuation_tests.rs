//! Unreadable files are skipped while the rest of the scan completes.

use clonex::duplicates::{DuplicateFinder, DuplicateReport};
use clonex::output::JsonOutput;
use clonex::scanner::{HashFailureKind, ScanError};
use std::fs;
use tempfile::tempdir;

#[cfg(unix)]
#[test]
fn test_permission_denied_file_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "same").unwrap();
    fs::write(dir.path().join("b.txt"), "same").unwrap();
    let locked = dir.path().join("locked.txt");
    fs::write(&locked, "same").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores file modes
    if fs::File::open(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
        return;
    }

    let (index, summary) = DuplicateFinder::with_defaults()
        .build_index(dir.path())
        .unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

    assert_eq!(summary.files_scanned, 2);
    assert_eq!(summary.files_skipped, 1);
    assert_eq!(summary.permission_denied_count(), 1);

    let report = DuplicateReport::from_index(&index);
    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.groups[0].len(), 2);
    assert!(report.groups[0].files.iter().all(|f| f.path != locked));

    match &summary.errors[0] {
        ScanError::Hash(e) => {
            assert_eq!(e.kind(), HashFailureKind::PermissionDenied);
            assert_eq!(e.path(), locked.as_path());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[cfg(unix)]
#[test]
fn test_broken_symlink_is_skipped() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("real"), "data").unwrap();
    std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("dangling")).unwrap();

    let (index, summary) = DuplicateFinder::with_defaults()
        .build_index(dir.path())
        .unwrap();

    assert_eq!(summary.files_scanned, 1);
    assert_eq!(summary.files_skipped, 1);
    assert_eq!(index.total_files(), 1);
    assert_eq!(summary.errors[0].path(), dir.path().join("dangling"));
}

#[cfg(unix)]
#[test]
fn test_symlink_to_file_shares_target_content() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("target.txt");
    fs::write(&target, "linked").unwrap();
    std::os::unix::fs::symlink(&target, dir.path().join("alias.txt")).unwrap();

    let (index, _) = DuplicateFinder::with_defaults()
        .build_index(dir.path())
        .unwrap();
    let report = DuplicateReport::from_index(&index);

    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.groups[0].keep().path, dir.path().join("alias.txt"));
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_does_not_abort_scan() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("hidden_copy"), "payload").unwrap();
    fs::write(dir.path().join("open_a"), "payload").unwrap();
    fs::write(dir.path().join("open_b"), "payload").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = DuplicateFinder::with_defaults().build_index(dir.path());
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let (index, summary) = result.unwrap();
    assert_eq!(summary.files_scanned, 2);
    assert!(summary.has_errors());
    assert_eq!(DuplicateReport::from_index(&index).groups[0].len(), 2);
}

#[cfg(unix)]
#[test]
fn test_skipped_files_appear_in_json() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("ok"), "fine").unwrap();
    std::os::unix::fs::symlink(dir.path().join("nowhere"), dir.path().join("broken")).unwrap();

    let (index, summary) = DuplicateFinder::with_defaults()
        .build_index(dir.path())
        .unwrap();
    let report = DuplicateReport::from_index(&index);
    let json = JsonOutput::new(&report, &summary);

    assert_eq!(json.summary.files_skipped, 1);
    assert_eq!(json.skipped.len(), 1);
    assert_eq!(
        json.skipped[0].path,
        dir.path().join("broken").display().to_string()
    );
}

#[cfg(unix)]
#[test]
fn test_skipped_files_are_named_in_text_report() {
    use clonex::cli::OutputFormat;

    let dir = tempdir().unwrap();
    fs::write(dir.path().join("ok"), "fine").unwrap();
    let broken = dir.path().join("broken");
    std::os::unix::fs::symlink(dir.path().join("nowhere"), &broken).unwrap();

    let (report, scan) =
        clonex::find_duplicates(dir.path(), clonex::duplicates::FinderConfig::default()).unwrap();
    let mut out = Vec::new();
    clonex::write_report(&mut out, OutputFormat::Text, &report, &scan, false).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("1 file(s) could not be read and were skipped"));
    assert!(text.contains(&format!("SKIPPED: {}", broken.display())));
}
