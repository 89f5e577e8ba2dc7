use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{normalize_category, validate_amount, EntryError, TransactionKind};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Transaction {
    pub(crate) id: i64,
    pub(crate) date: NaiveDate,
    pub(crate) kind: TransactionKind,
    pub(crate) category: String,
    pub(crate) amount: Decimal,
}

impl Transaction {
    pub(crate) fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub(crate) fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with its sign applied: expenses count against the balance.
    pub(crate) fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    pub(crate) fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// A validated row that has not been written yet. The id is assigned by the
/// ledger at insert time.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewTransaction {
    pub(crate) date: NaiveDate,
    pub(crate) kind: TransactionKind,
    pub(crate) category: String,
    pub(crate) amount: Decimal,
}

impl NewTransaction {
    /// Validate raw form input. Nothing is persisted on error.
    pub(crate) fn from_inputs(
        kind: TransactionKind,
        category: &str,
        amount: &str,
        date: NaiveDate,
    ) -> Result<Self, EntryError> {
        let amount = validate_amount(amount)?;
        let category = normalize_category(category);
        if category.is_empty() {
            return Err(EntryError::EmptyCategory);
        }
        Ok(Self {
            date,
            kind,
            category,
            amount,
        })
    }

    /// Same as [`NewTransaction::from_inputs`], dated today (local time).
    pub(crate) fn today(
        kind: TransactionKind,
        category: &str,
        amount: &str,
    ) -> Result<Self, EntryError> {
        Self::from_inputs(kind, category, amount, chrono::Local::now().date_naive())
    }
}
