use super::TransactionKind;

/// Granularity of a date filter, chosen from the length of the typed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DateMatch {
    /// `YYYY`
    Year(String),
    /// `YYYY-MM`
    YearMonth(String),
    /// Anything else is compared to the stored date as-is.
    Day(String),
}

impl DateMatch {
    pub(crate) fn parse(input: &str) -> Self {
        let input = input.trim().to_string();
        match input.chars().count() {
            4 => Self::Year(input),
            7 => Self::YearMonth(input),
            _ => Self::Day(input),
        }
    }
}

/// AND-combined row filter. `None` fields are not applied at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TransactionFilter {
    pub(crate) kind: Option<TransactionKind>,
    pub(crate) category: Option<String>,
    pub(crate) date: Option<DateMatch>,
}

impl TransactionFilter {
    pub(crate) fn is_empty(&self) -> bool {
        self.kind.is_none() && self.category.is_none() && self.date.is_none()
    }
}
