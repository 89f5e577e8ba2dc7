mod entry;
mod filter;
mod kind;
mod transaction;

pub(crate) use entry::{normalize_category, validate_amount, EntryError};
pub(crate) use filter::{DateMatch, TransactionFilter};
pub(crate) use kind::TransactionKind;
pub(crate) use transaction::{NewTransaction, Transaction, DATE_FORMAT};

#[cfg(test)]
mod tests;
