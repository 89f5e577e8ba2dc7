#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use tempfile::TempDir;

use super::*;
use crate::models::NewTransaction;

fn open_temp() -> (TempDir, Ledger) {
    let dir = TempDir::new().unwrap();
    let ledger = Ledger::open(&dir.path().join("ledger.db")).unwrap();
    (dir, ledger)
}

fn add(ledger: &Ledger, kind: TransactionKind, category: &str, amount: &str, date: &str) {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    let txn = NewTransaction::from_inputs(kind, category, amount, date).unwrap();
    ledger.insert(&txn).unwrap();
}

fn seed(ledger: &Ledger) {
    add(ledger, TransactionKind::Income, "Salary", "5000", "2024-01-31");
    add(ledger, TransactionKind::Expense, "Rent", "1200", "2024-01-03");
    add(ledger, TransactionKind::Income, "Bonus", "1234.5", "2023-12-20");
    add(ledger, TransactionKind::Income, "Salary", "5000", "2024-02-29");
}

// ── filter_from_inputs ────────────────────────────────────────

#[test]
fn test_filter_from_blank_inputs() {
    assert!(filter_from_inputs("", "", "").is_empty());
    assert!(filter_from_inputs("  ", " ", "\t").is_empty());
}

#[test]
fn test_filter_placeholders_are_ignored() {
    let filter = filter_from_inputs(TYPE_PLACEHOLDER, CATEGORY_PLACEHOLDER, DATE_PLACEHOLDER);
    assert!(filter.is_empty());
}

#[test]
fn test_filter_normalizes_inputs() {
    let filter = filter_from_inputs(" income ", "food", "2024-03");
    assert_eq!(filter.kind, Some(TransactionKind::Income));
    assert_eq!(filter.category.as_deref(), Some("Food"));
    assert_eq!(filter.date, Some(DateMatch::YearMonth("2024-03".into())));
}

#[test]
fn test_filter_unknown_type_ignored() {
    let filter = filter_from_inputs("transfer", "", "");
    assert_eq!(filter.kind, None);
    assert!(filter.is_empty());
}

// ── write_csv ─────────────────────────────────────────────────

#[test]
fn test_write_csv_format() {
    let (_dir, ledger) = open_temp();
    seed(&ledger);
    let mut out = Vec::new();
    write_csv(&ledger.all().unwrap(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Transaction ID,Date,Type,Category,Amount");
    assert_eq!(lines[1], "1,2024-01-31,Income,Salary,\"$5,000\"");
    assert_eq!(lines[3], "3,2023-12-20,Income,Bonus,\"$1,234.5\"");
    assert_eq!(lines.len(), 5);
}

#[test]
fn test_write_csv_header_only_for_empty_slice() {
    let mut out = Vec::new();
    write_csv(&[], &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap().trim_end(),
        "Transaction ID,Date,Type,Category,Amount"
    );
}

// ── export_to_path ────────────────────────────────────────────

#[test]
fn test_export_income_for_year() {
    let (dir, ledger) = open_temp();
    seed(&ledger);
    let path = dir.path().join("out.csv");

    let filter = filter_from_inputs("Income", "", "2024");
    let outcome = export_to_path(&ledger, &filter, &path).unwrap();
    assert_eq!(outcome, ExportOutcome::Exported { count: 2 });

    let text = std::fs::read_to_string(&path).unwrap();
    let rows: Vec<&str> = text.lines().skip(1).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.contains(",2024-") && r.contains(",Income,")));
}

#[test]
fn test_export_no_data_writes_nothing() {
    let (dir, ledger) = open_temp();
    seed(&ledger);
    let path = dir.path().join("none.csv");

    let filter = filter_from_inputs("Expense", "Travel", "");
    let outcome = export_to_path(&ledger, &filter, &path).unwrap();
    assert_eq!(outcome, ExportOutcome::NoData);
    assert!(!path.exists());
}

#[test]
fn test_export_twice_is_byte_identical() {
    let (dir, ledger) = open_temp();
    seed(&ledger);
    let first = dir.path().join("a.csv");
    let second = dir.path().join("b.csv");
    let filter = filter_from_inputs("", "", "");

    export_to_path(&ledger, &filter, &first).unwrap();
    export_to_path(&ledger, &filter, &second).unwrap();

    assert_eq!(
        std::fs::read(&first).unwrap(),
        std::fs::read(&second).unwrap()
    );
}

#[test]
fn test_export_exact_day() {
    let (dir, ledger) = open_temp();
    seed(&ledger);
    let path = dir.path().join("day.csv");

    let filter = filter_from_inputs("", "", "2024-02-29");
    assert_eq!(
        export_to_path(&ledger, &filter, &path).unwrap(),
        ExportOutcome::Exported { count: 1 }
    );
}

#[test]
fn test_export_to_missing_directory_fails() {
    let (dir, ledger) = open_temp();
    seed(&ledger);
    let path = dir.path().join("missing").join("out.csv");
    let filter = filter_from_inputs("", "", "");
    assert!(export_to_path(&ledger, &filter, &path).is_err());
}
