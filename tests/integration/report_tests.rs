use clonex::cli::OutputFormat;
use clonex::duplicates::FinderConfig;
use clonex::{find_duplicates, write_report};
use std::fs;
use tempfile::{tempdir, TempDir};

fn setup_hello_world() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello").unwrap();
    fs::write(dir.path().join("b.txt"), "hello").unwrap();
    fs::write(dir.path().join("c.txt"), "world").unwrap();
    dir
}

fn render(dir: &TempDir, format: OutputFormat) -> String {
    let (report, scan) = find_duplicates(dir.path(), FinderConfig::default()).unwrap();
    let mut out = Vec::new();
    write_report(&mut out, format, &report, &scan, false).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_text_report_lists_keep_and_duplicate() {
    let dir = setup_hello_world();
    let text = render(&dir, OutputFormat::Text);

    let keep_line = format!("KEEP: {}", dir.path().join("a.txt").display());
    let dup_line = format!("DUPLICATE: {}", dir.path().join("b.txt").display());

    assert!(text.contains("Duplicate Group #1:"));
    assert!(text.contains("These 2 files are identical copies"));
    assert!(text.contains(&keep_line));
    assert!(text.contains(&dup_line));
    assert!(!text.contains("c.txt"));
    assert!(text.contains("Found 1 group(s) of duplicates"));
    assert!(text.contains("1 file(s) can be safely deleted"));
    assert!(!text.contains("Duplicate Group #2:"));
}

#[test]
fn test_text_report_without_duplicates() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("one"), "1").unwrap();
    fs::write(dir.path().join("two"), "2").unwrap();
    fs::write(dir.path().join("three"), "3").unwrap();

    let text = render(&dir, OutputFormat::Text);

    assert!(text.contains("Great news! No duplicate files were found."));
    assert!(!text.contains("Duplicate Group"));
    assert!(!text.contains("SUMMARY:"));
}

#[test]
fn test_text_report_has_no_ansi_codes_when_color_disabled() {
    let dir = setup_hello_world();
    let text = render(&dir, OutputFormat::Text);
    assert!(!text.contains('\u{1b}'));
}

#[test]
fn test_json_report_structure() {
    let dir = setup_hello_world();
    let json = render(&dir, OutputFormat::Json);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let groups = value["duplicates"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["group"], 1);
    assert_eq!(
        groups[0]["hash"],
        "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
    );
    assert_eq!(groups[0]["size"], 5);
    assert_eq!(
        groups[0]["keep"],
        dir.path().join("a.txt").display().to_string()
    );
    assert_eq!(groups[0]["duplicates"].as_array().unwrap().len(), 1);

    let summary = &value["summary"];
    assert_eq!(summary["algorithm"], "sha256");
    assert_eq!(summary["files_scanned"], 3);
    assert_eq!(summary["files_skipped"], 0);
    assert_eq!(summary["duplicate_groups"], 1);
    assert_eq!(summary["duplicate_files"], 1);
    assert_eq!(summary["reclaimable_space"], 5);
    assert!(value["skipped"].as_array().unwrap().is_empty());
}

#[test]
fn test_csv_report_rows() {
    let dir = setup_hello_world();
    let csv_text = render(&dir, OutputFormat::Csv);

    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["group_id", "hash", "role", "path", "size"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "1");
    assert_eq!(&rows[0][2], "keep");
    assert_eq!(rows[0][3], dir.path().join("a.txt").display().to_string());
    assert_eq!(&rows[1][2], "duplicate");
    assert_eq!(rows[1][3], dir.path().join("b.txt").display().to_string());
    assert_eq!(&rows[1][4], "5");
}

#[test]
fn test_csv_report_without_duplicates_is_header_only() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("solo"), "alone").unwrap();

    let csv_text = render(&dir, OutputFormat::Csv);
    assert_eq!(csv_text.lines().next(), Some("group_id,hash,role,path,size"));

    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    assert_eq!(reader.headers().unwrap().len(), 5);
    assert_eq!(reader.records().count(), 0);
}
