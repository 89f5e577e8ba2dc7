use rust_decimal::Decimal;
use std::str::FromStr;

/// Input rejected before it reaches the ledger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum EntryError {
    #[error("Please enter a valid numeric amount.")]
    InvalidAmount,
    #[error("Please enter a category.")]
    EmptyCategory,
    #[error("Type must be Income or Expense, got '{0}'")]
    InvalidKind(String),
}

/// Parse a user-typed amount. Thousands separators are stripped; the value
/// must be a number strictly greater than zero.
pub(crate) fn validate_amount(input: &str) -> Result<Decimal, EntryError> {
    let cleaned = input.replace(',', "");
    let cleaned = cleaned.trim();
    let value = Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .map_err(|_| EntryError::InvalidAmount)?;
    if value > Decimal::ZERO {
        Ok(value)
    } else {
        Err(EntryError::InvalidAmount)
    }
}

/// Trim and capitalize: first character upper case, the rest lower case.
/// `"fOOD "` → `"Food"`.
pub(crate) fn normalize_category(input: &str) -> String {
    let mut chars = input.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
