//! RecordScanner integration tests over realistic dependency files.

mod common;

use std::io::Cursor;

use cochange_mdg::RecordScanner;
use cochange_mdg::adapters::fs::reader::open_input;
use cochange_mdg::domain::error::RecordError;

use common::fixtures::{
    NESTED_HANDLER, REPO_FIND, SERVICE_FIELD, SERVICE_RUN, mixed_dependency_file, write_temp_file,
};

#[test]
fn test_example_line_from_miner() {
    let line = "a/Foo.java/[CN]/Foo/\tb/Bar.java/[CN]/Bar/\t5\t0.8\t0\t12\n";
    let mut scanner = RecordScanner::new(Cursor::new(line));
    assert!(scanner.scan());
    let record = scanner.record().unwrap();
    assert_eq!(record.from, vec!["a/Foo.java/[CN]/Foo/".to_string()]);
    assert_eq!(record.to, "b/Bar.java/[CN]/Bar/");
    assert_eq!(record.support_count, 5);
    assert_eq!(record.confidence, 0.8);
    assert_eq!(record.commits_count, 12);
    assert!(!scanner.scan());
}

#[test]
fn test_k_entities_then_four_numbers() {
    for k in 1..=5 {
        let entities: Vec<String> = (0..k).map(|i| format!("e{i}")).collect();
        let line = format!("{}\t7\t0.25\t99\t3", entities.join("\t"));
        let mut scanner = RecordScanner::new(Cursor::new(line));
        assert!(scanner.scan());
        let record = scanner.record().unwrap();
        assert_eq!(record.from.len(), k - 1);
        assert_eq!(record.from, entities[..k - 1]);
        assert_eq!(record.to, entities[k - 1]);
        assert_eq!(record.support_count, 7);
        assert_eq!(record.confidence, 0.25);
        assert_eq!(record.commits_count, 3);
    }
}

#[test]
fn test_mixed_file_via_iterator() {
    let mut scanner = RecordScanner::new(Cursor::new(mixed_dependency_file()));
    let records: Vec<_> = scanner
        .records()
        .collect::<Result<_, RecordError>>()
        .unwrap();
    assert!(scanner.err().is_none());
    assert_eq!(records.len(), 3);

    assert_eq!(records[0].from, vec![SERVICE_RUN, SERVICE_FIELD]);
    assert_eq!(records[0].to, REPO_FIND);
    assert_eq!(records[0].commits_count, 9);

    // Extra trailing numbers are ignored.
    assert_eq!(records[1].to, SERVICE_RUN);
    assert_eq!(records[1].support_count, 2);
    assert_eq!(records[1].commits_count, 3);

    // Space separated legacy line.
    assert_eq!(records[2].from, vec![SERVICE_FIELD]);
    assert_eq!(records[2].to, NESTED_HANDLER);
    assert_eq!(records[2].confidence, 0.1);
}

#[test]
fn test_line_numbers_count_blank_lines() {
    let mut scanner = RecordScanner::new(Cursor::new(mixed_dependency_file()));
    let mut numbers = Vec::new();
    while scanner.scan() {
        numbers.push(scanner.line_number());
    }
    assert_eq!(numbers, vec![1, 4, 5]);
    assert!(scanner.err().is_none());
}

#[test]
fn test_whitespace_only_input_yields_nothing() {
    let mut scanner = RecordScanner::new(Cursor::new(" \n\t\n\r\n   "));
    assert!(!scanner.scan());
    assert_eq!(scanner.record(), Err(RecordError::NoCurrentLine));
}

#[test]
fn test_scan_from_file() {
    let file = write_temp_file(&mixed_dependency_file());
    let reader = open_input(file.path()).unwrap();
    let mut scanner = RecordScanner::new(reader);
    assert_eq!(scanner.records().count(), 3);
    assert!(scanner.err().is_none());
}
