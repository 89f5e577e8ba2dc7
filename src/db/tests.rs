#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;
use tempfile::TempDir;

fn open_temp() -> (TempDir, Ledger) {
    let dir = TempDir::new().unwrap();
    let ledger = Ledger::open(&dir.path().join("ledger.db")).unwrap();
    (dir, ledger)
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
}

fn new_txn(kind: TransactionKind, category: &str, amount: &str, date: &str) -> NewTransaction {
    NewTransaction::from_inputs(kind, category, amount, day(date)).unwrap()
}

fn ids(ledger: &Ledger) -> Vec<i64> {
    ledger.all().unwrap().iter().map(|t| t.id).collect()
}

fn setup_test_data(ledger: &Ledger) {
    let txns = [
        new_txn(TransactionKind::Income, "salary", "5000", "2024-01-31"),
        new_txn(TransactionKind::Expense, "rent", "1200", "2024-01-03"),
        new_txn(TransactionKind::Expense, "food", "300", "2024-02-10"),
        new_txn(TransactionKind::Income, "freelance", "750.50", "2023-12-15"),
        new_txn(TransactionKind::Expense, "food", "45.25", "2023-12-20"),
    ];
    for txn in &txns {
        ledger.insert(txn).unwrap();
    }
}

// ── Open ──────────────────────────────────────────────────────

#[test]
fn test_open_creates_empty_table() {
    let (_dir, ledger) = open_temp();
    assert_eq!(ledger.count().unwrap(), 0);
    assert!(ledger.all().unwrap().is_empty());
}

#[test]
fn test_reopen_keeps_rows() {
    let (dir, ledger) = open_temp();
    setup_test_data(&ledger);
    let reopened = Ledger::open(&dir.path().join("ledger.db")).unwrap();
    assert_eq!(reopened.count().unwrap(), 5);
    assert_eq!(reopened.path(), ledger.path());
}

// ── Insert ────────────────────────────────────────────────────

#[test]
fn test_insert_then_read_all() {
    let (_dir, ledger) = open_temp();
    let txn = NewTransaction::today(TransactionKind::Income, "salary", "5,000").unwrap();
    let id = ledger.insert(&txn).unwrap();
    assert_eq!(id, 1);

    let all = ledger.all().unwrap();
    assert_eq!(all.len(), 1);
    let row = &all[0];
    assert_eq!(row.id, 1);
    assert_eq!(row.kind, TransactionKind::Income);
    assert_eq!(row.category, "Salary");
    assert_eq!(row.amount, dec!(5000));
    assert_eq!(row.date, chrono::Local::now().date_naive());
}

#[test]
fn test_insert_appends_sequential_ids() {
    let (_dir, ledger) = open_temp();
    setup_test_data(&ledger);
    assert_eq!(ids(&ledger), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_insert_preserves_fractional_amounts() {
    let (_dir, ledger) = open_temp();
    ledger
        .insert(&new_txn(TransactionKind::Expense, "coffee", "4.35", "2024-01-01"))
        .unwrap();
    assert_eq!(ledger.all().unwrap()[0].amount, dec!(4.35));
}

#[test]
fn test_insert_reuses_interior_gap() {
    let (_dir, ledger) = open_temp();
    ledger
        .execute_raw(
            "INSERT INTO transactions VALUES (1, '2024-01-01', 'Income', 'A', 1.0);
             INSERT INTO transactions VALUES (2, '2024-01-01', 'Income', 'B', 1.0);
             INSERT INTO transactions VALUES (4, '2024-01-01', 'Income', 'C', 1.0);",
        )
        .unwrap();
    let id = ledger
        .insert(&new_txn(TransactionKind::Expense, "d", "2", "2024-01-02"))
        .unwrap();
    assert_eq!(id, 3);
    assert_eq!(ids(&ledger), vec![1, 2, 3, 4]);
}

#[test]
fn test_insert_reuses_missing_first_id() {
    let (_dir, ledger) = open_temp();
    ledger
        .execute_raw(
            "INSERT INTO transactions VALUES (2, '2024-01-01', 'Income', 'A', 1.0);
             INSERT INTO transactions VALUES (3, '2024-01-01', 'Income', 'B', 1.0);",
        )
        .unwrap();
    let id = ledger
        .insert(&new_txn(TransactionKind::Income, "c", "2", "2024-01-02"))
        .unwrap();
    assert_eq!(id, 1);
}

#[test]
fn test_insert_picks_lowest_of_several_gaps() {
    let (_dir, ledger) = open_temp();
    ledger
        .execute_raw(
            "INSERT INTO transactions VALUES (1, '2024-01-01', 'Income', 'A', 1.0);
             INSERT INTO transactions VALUES (3, '2024-01-01', 'Income', 'B', 1.0);
             INSERT INTO transactions VALUES (6, '2024-01-01', 'Income', 'C', 1.0);",
        )
        .unwrap();
    let first = ledger
        .insert(&new_txn(TransactionKind::Income, "x", "1", "2024-01-02"))
        .unwrap();
    let second = ledger
        .insert(&new_txn(TransactionKind::Income, "y", "1", "2024-01-02"))
        .unwrap();
    let third = ledger
        .insert(&new_txn(TransactionKind::Income, "z", "1", "2024-01-02"))
        .unwrap();
    assert_eq!((first, second, third), (2, 4, 5));
}

// ── Delete + renumber ─────────────────────────────────────────

#[test]
fn test_delete_lowest_renumbers() {
    let (_dir, ledger) = open_temp();
    for cat in ["a", "b", "c"] {
        ledger
            .insert(&new_txn(TransactionKind::Income, cat, "1", "2024-01-01"))
            .unwrap();
    }
    let removed = ledger.delete_and_renumber(&[1]).unwrap();
    assert_eq!(removed, 1);

    let all = ledger.all().unwrap();
    let pairs: Vec<(i64, &str)> = all.iter().map(|t| (t.id, t.category.as_str())).collect();
    assert_eq!(pairs, vec![(1, "B"), (2, "C")]);
}

#[test]
fn test_delete_multiple_preserves_relative_order() {
    let (_dir, ledger) = open_temp();
    setup_test_data(&ledger);
    let before: Vec<String> = ledger
        .all()
        .unwrap()
        .into_iter()
        .map(|t| t.category)
        .collect();

    ledger.delete_and_renumber(&[2, 4]).unwrap();

    let after = ledger.all().unwrap();
    assert_eq!(after.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    let cats: Vec<&str> = after.iter().map(|t| t.category.as_str()).collect();
    assert_eq!(cats, vec![before[0].as_str(), before[2].as_str(), before[4].as_str()]);
}

#[test]
fn test_delete_all_leaves_empty_table() {
    let (_dir, ledger) = open_temp();
    setup_test_data(&ledger);
    let removed = ledger.delete_and_renumber(&[1, 2, 3, 4, 5]).unwrap();
    assert_eq!(removed, 5);
    assert_eq!(ledger.count().unwrap(), 0);

    // Next insert starts over at 1
    let id = ledger
        .insert(&new_txn(TransactionKind::Income, "a", "1", "2024-01-01"))
        .unwrap();
    assert_eq!(id, 1);
}

#[test]
fn test_delete_empty_selection_is_noop() {
    let (_dir, ledger) = open_temp();
    setup_test_data(&ledger);
    assert_eq!(ledger.delete_and_renumber(&[]).unwrap(), 0);
    assert_eq!(ids(&ledger), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_delete_rolls_back_when_renumber_fails() {
    let (_dir, ledger) = open_temp();
    setup_test_data(&ledger);
    let before: Vec<(i64, String)> = ledger
        .all()
        .unwrap()
        .into_iter()
        .map(|t| (t.id, t.category))
        .collect();
    ledger
        .execute_raw(
            "CREATE TRIGGER block_renumber BEFORE UPDATE ON transactions
             WHEN NEW.id = 2
             BEGIN SELECT RAISE(ABORT, 'renumber blocked'); END;",
        )
        .unwrap();

    assert!(ledger.delete_and_renumber(&[1]).is_err());

    let after: Vec<(i64, String)> = ledger
        .all()
        .unwrap()
        .into_iter()
        .map(|t| (t.id, t.category))
        .collect();
    assert_eq!(ids(&ledger), vec![1, 2, 3, 4, 5]);
    assert_eq!(after, before);
}

#[test]
fn test_delete_unknown_id_still_compacts() {
    let (_dir, ledger) = open_temp();
    ledger
        .execute_raw(
            "INSERT INTO transactions VALUES (2, '2024-01-01', 'Income', 'A', 1.0);
             INSERT INTO transactions VALUES (5, '2024-01-01', 'Income', 'B', 1.0);",
        )
        .unwrap();
    assert_eq!(ledger.delete_and_renumber(&[99]).unwrap(), 0);
    assert_eq!(ids(&ledger), vec![1, 2]);
}

#[test]
fn test_ids_contiguous_after_mixed_operations() {
    let (_dir, ledger) = open_temp();
    for i in 0..10 {
        ledger
            .insert(&new_txn(
                TransactionKind::Expense,
                &format!("cat{i}"),
                "10",
                "2024-01-01",
            ))
            .unwrap();
    }
    ledger.delete_and_renumber(&[3, 7, 10]).unwrap();
    ledger
        .insert(&new_txn(TransactionKind::Income, "late", "1", "2024-01-02"))
        .unwrap();
    ledger.delete_and_renumber(&[1]).unwrap();

    let all = ledger.all().unwrap();
    let expected: Vec<i64> = (1..=all.len() as i64).collect();
    assert_eq!(all.iter().map(|t| t.id).collect::<Vec<_>>(), expected);
    assert_eq!(all.last().unwrap().category, "Late");
}

// ── Search ────────────────────────────────────────────────────

#[test]
fn test_search_matches_any_column_case_insensitive() {
    let (_dir, ledger) = open_temp();
    setup_test_data(&ledger);

    let food = ledger.search("FOOD").unwrap();
    assert_eq!(food.len(), 2);

    let expenses = ledger.search("expense").unwrap();
    assert_eq!(expenses.len(), 3);

    let december = ledger.search("2023-12").unwrap();
    assert_eq!(december.len(), 2);

    let by_amount = ledger.search("750.5").unwrap();
    assert_eq!(by_amount.len(), 1);
    assert_eq!(by_amount[0].category, "Freelance");
}

#[test]
fn test_search_empty_term_returns_everything() {
    let (_dir, ledger) = open_temp();
    setup_test_data(&ledger);
    assert_eq!(ledger.search("").unwrap().len(), 5);
}

// ── Filtered ──────────────────────────────────────────────────

#[test]
fn test_filtered_no_filters_returns_all() {
    let (_dir, ledger) = open_temp();
    setup_test_data(&ledger);
    let rows = ledger.filtered(&TransactionFilter::default()).unwrap();
    assert_eq!(rows.len(), 5);
}

#[test]
fn test_filtered_by_kind_and_year() {
    let (_dir, ledger) = open_temp();
    setup_test_data(&ledger);
    let filter = TransactionFilter {
        kind: Some(TransactionKind::Income),
        category: None,
        date: Some(DateMatch::parse("2024")),
    };
    let rows = ledger.filtered(&filter).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, "Salary");
}

#[test]
fn test_filtered_by_year_month() {
    let (_dir, ledger) = open_temp();
    setup_test_data(&ledger);
    let filter = TransactionFilter {
        date: Some(DateMatch::parse("2024-01")),
        ..Default::default()
    };
    let cats: Vec<String> = ledger
        .filtered(&filter)
        .unwrap()
        .into_iter()
        .map(|t| t.category)
        .collect();
    assert_eq!(cats, vec!["Salary", "Rent"]);
}

#[test]
fn test_filtered_by_exact_day_and_category() {
    let (_dir, ledger) = open_temp();
    setup_test_data(&ledger);
    let filter = TransactionFilter {
        kind: None,
        category: Some("Food".into()),
        date: Some(DateMatch::parse("2024-02-10")),
    };
    let rows = ledger.filtered(&filter).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, dec!(300));
}

#[test]
fn test_filtered_no_match() {
    let (_dir, ledger) = open_temp();
    setup_test_data(&ledger);
    let filter = TransactionFilter {
        category: Some("Travel".into()),
        ..Default::default()
    };
    assert!(ledger.filtered(&filter).unwrap().is_empty());
}

// ── Aggregates ────────────────────────────────────────────────

#[test]
fn test_sum_for_kind() {
    let (_dir, ledger) = open_temp();
    ledger
        .insert(&new_txn(TransactionKind::Income, "salary", "5000", "2024-01-01"))
        .unwrap();
    ledger
        .insert(&new_txn(TransactionKind::Expense, "rent", "1200", "2024-01-01"))
        .unwrap();
    ledger
        .insert(&new_txn(TransactionKind::Expense, "food", "300", "2024-01-01"))
        .unwrap();

    assert_eq!(
        ledger.sum_for_kind(TransactionKind::Income).unwrap(),
        Some(dec!(5000))
    );
    assert_eq!(
        ledger.sum_for_kind(TransactionKind::Expense).unwrap(),
        Some(dec!(1500))
    );
}

#[test]
fn test_sum_for_kind_without_rows() {
    let (_dir, ledger) = open_temp();
    ledger
        .insert(&new_txn(TransactionKind::Income, "salary", "10", "2024-01-01"))
        .unwrap();
    assert_eq!(ledger.sum_for_kind(TransactionKind::Expense).unwrap(), None);
}

#[test]
fn test_sums_by_category() {
    let (_dir, ledger) = open_temp();
    setup_test_data(&ledger);
    let sums = ledger.sums_by_category(TransactionKind::Expense).unwrap();
    assert_eq!(
        sums,
        vec![("Food".to_string(), dec!(345.25)), ("Rent".to_string(), dec!(1200))]
    );
}

#[test]
fn test_sums_by_category_empty() {
    let (_dir, ledger) = open_temp();
    assert!(ledger
        .sums_by_category(TransactionKind::Income)
        .unwrap()
        .is_empty());
}

#[test]
fn test_sums_by_month_chronological() {
    let (_dir, ledger) = open_temp();
    setup_test_data(&ledger);
    let months = ledger.sums_by_month(TransactionKind::Expense).unwrap();
    assert_eq!(
        months,
        vec![
            ("2023-12".to_string(), dec!(45.25)),
            ("2024-01".to_string(), dec!(1200)),
            ("2024-02".to_string(), dec!(300)),
        ]
    );
}

#[test]
fn test_read_normalizes_kind_casing() {
    let (_dir, ledger) = open_temp();
    ledger
        .execute_raw("INSERT INTO transactions VALUES (1, '2024-01-01', 'income', 'Gift', 20.0);")
        .unwrap();
    let all = ledger.all().unwrap();
    assert_eq!(all[0].kind, TransactionKind::Income);
}
