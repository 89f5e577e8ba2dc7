#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn make_txn(kind: TransactionKind, amount: Decimal) -> Transaction {
    Transaction {
        id: 1,
        date: day(2024, 1, 15),
        kind,
        category: "Food".into(),
        amount,
    }
}

// ── Transaction ───────────────────────────────────────────────

#[test]
fn test_income() {
    let txn = make_txn(TransactionKind::Income, dec!(100.00));
    assert!(txn.is_income());
    assert!(!txn.is_expense());
    assert_eq!(txn.signed_amount(), dec!(100.00));
}

#[test]
fn test_expense() {
    let txn = make_txn(TransactionKind::Expense, dec!(50.00));
    assert!(!txn.is_income());
    assert!(txn.is_expense());
    assert_eq!(txn.signed_amount(), dec!(-50.00));
}

#[test]
fn test_date_string() {
    assert_eq!(
        make_txn(TransactionKind::Income, dec!(1)).date_string(),
        "2024-01-15"
    );
}

// ── TransactionKind ───────────────────────────────────────────

#[test]
fn test_kind_parse() {
    assert_eq!(TransactionKind::parse("Income"), Some(TransactionKind::Income));
    assert_eq!(TransactionKind::parse("income"), Some(TransactionKind::Income));
    assert_eq!(TransactionKind::parse(" EXPENSE "), Some(TransactionKind::Expense));
    assert_eq!(TransactionKind::parse("expenses"), None);
    assert_eq!(TransactionKind::parse(""), None);
}

#[test]
fn test_kind_roundtrip() {
    for kind in TransactionKind::all() {
        assert_eq!(TransactionKind::parse(kind.as_str()), Some(*kind));
    }
}

#[test]
fn test_kind_toggled() {
    assert_eq!(TransactionKind::Income.toggled(), TransactionKind::Expense);
    assert_eq!(TransactionKind::Expense.toggled(), TransactionKind::Income);
}

#[test]
fn test_kind_display() {
    assert_eq!(format!("{}", TransactionKind::Expense), "Expense");
}

// ── validate_amount ───────────────────────────────────────────

#[test]
fn test_validate_amount_plain() {
    assert_eq!(validate_amount("42").unwrap(), dec!(42));
    assert_eq!(validate_amount("12.50").unwrap(), dec!(12.50));
    assert_eq!(validate_amount(" 7 ").unwrap(), dec!(7));
}

#[test]
fn test_validate_amount_thousands_separators() {
    assert_eq!(validate_amount("1,234").unwrap(), dec!(1234));
    assert_eq!(validate_amount("1,234,567.89").unwrap(), dec!(1234567.89));
}

#[test]
fn test_validate_amount_scientific() {
    assert_eq!(validate_amount("1e3").unwrap(), dec!(1000));
}

#[test]
fn test_validate_amount_rejects_zero_and_negative() {
    assert_eq!(validate_amount("0"), Err(EntryError::InvalidAmount));
    assert_eq!(validate_amount("0.00"), Err(EntryError::InvalidAmount));
    assert_eq!(validate_amount("-5"), Err(EntryError::InvalidAmount));
}

#[test]
fn test_validate_amount_rejects_garbage() {
    assert_eq!(validate_amount(""), Err(EntryError::InvalidAmount));
    assert_eq!(validate_amount("abc"), Err(EntryError::InvalidAmount));
    assert_eq!(validate_amount("$5"), Err(EntryError::InvalidAmount));
    assert_eq!(validate_amount("1.2.3"), Err(EntryError::InvalidAmount));
}

// ── normalize_category ────────────────────────────────────────

#[test]
fn test_normalize_category() {
    assert_eq!(normalize_category("food"), "Food");
    assert_eq!(normalize_category("FOOD"), "Food");
    assert_eq!(normalize_category("  eating out "), "Eating out");
    assert_eq!(normalize_category(""), "");
    assert_eq!(normalize_category("   "), "");
}

#[test]
fn test_normalize_category_unicode() {
    assert_eq!(normalize_category("épicerie"), "Épicerie");
}

// ── NewTransaction ────────────────────────────────────────────

#[test]
fn test_new_transaction_from_inputs() {
    let txn =
        NewTransaction::from_inputs(TransactionKind::Expense, "rent", "1,200", day(2024, 3, 1))
            .unwrap();
    assert_eq!(txn.category, "Rent");
    assert_eq!(txn.amount, dec!(1200));
    assert_eq!(txn.kind, TransactionKind::Expense);
    assert_eq!(txn.date, day(2024, 3, 1));
}

#[test]
fn test_new_transaction_amount_checked_first() {
    let err = NewTransaction::from_inputs(TransactionKind::Income, "", "nope", day(2024, 1, 1))
        .unwrap_err();
    assert_eq!(err, EntryError::InvalidAmount);
}

#[test]
fn test_new_transaction_empty_category() {
    let err = NewTransaction::from_inputs(TransactionKind::Income, "  ", "10", day(2024, 1, 1))
        .unwrap_err();
    assert_eq!(err, EntryError::EmptyCategory);
}

#[test]
fn test_new_transaction_today() {
    let txn = NewTransaction::today(TransactionKind::Income, "salary", "5000").unwrap();
    assert_eq!(txn.date, chrono::Local::now().date_naive());
}

#[test]
fn test_entry_error_messages() {
    assert_eq!(
        EntryError::InvalidAmount.to_string(),
        "Please enter a valid numeric amount."
    );
    assert_eq!(EntryError::EmptyCategory.to_string(), "Please enter a category.");
}

// ── TransactionFilter ─────────────────────────────────────────

#[test]
fn test_date_match_granularity() {
    assert_eq!(DateMatch::parse("2024"), DateMatch::Year("2024".into()));
    assert_eq!(DateMatch::parse("2024-03"), DateMatch::YearMonth("2024-03".into()));
    assert_eq!(DateMatch::parse("2024-03-05"), DateMatch::Day("2024-03-05".into()));
    // Odd lengths fall back to an exact comparison
    assert_eq!(DateMatch::parse("24"), DateMatch::Day("24".into()));
    assert_eq!(DateMatch::parse(" 2024 "), DateMatch::Year("2024".into()));
}

#[test]
fn test_filter_is_empty() {
    assert!(TransactionFilter::default().is_empty());
    let filter = TransactionFilter {
        kind: Some(TransactionKind::Income),
        ..Default::default()
    };
    assert!(!filter.is_empty());
}
