//! Filtered CSV export of the ledger.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::db::Ledger;
use crate::format::format_amount;
use crate::models::{normalize_category, DateMatch, Transaction, TransactionFilter, TransactionKind};

/// Hint text shown in empty filter fields. Submitting it verbatim means
/// "no filter".
pub(crate) const TYPE_PLACEHOLDER: &str = "Income or Expense";
pub(crate) const CATEGORY_PLACEHOLDER: &str = "Category type";
pub(crate) const DATE_PLACEHOLDER: &str = "(YYYY-MM-DD)";

/// Used when no output path is given; `~` is expanded by the caller.
pub(crate) const DEFAULT_EXPORT_PATH: &str = "~/flowledger-export.csv";

pub(crate) const HEADER: [&str; 5] = ["Transaction ID", "Date", "Type", "Category", "Amount"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExportOutcome {
    /// Nothing matched; no file was written.
    NoData,
    Exported { count: usize },
}

/// Build a filter from the three raw text fields. Blank or placeholder
/// fields are skipped, and a type that is neither Income nor Expense is
/// ignored.
pub(crate) fn filter_from_inputs(kind: &str, category: &str, date: &str) -> TransactionFilter {
    let kind = active(kind, TYPE_PLACEHOLDER).and_then(TransactionKind::parse);
    let category = active(category, CATEGORY_PLACEHOLDER).map(normalize_category);
    let date = active(date, DATE_PLACEHOLDER).map(DateMatch::parse);
    TransactionFilter {
        kind,
        category,
        date,
    }
}

fn active<'a>(input: &'a str, placeholder: &str) -> Option<&'a str> {
    let trimmed = input.trim();
    (!trimmed.is_empty() && trimmed != placeholder).then_some(trimmed)
}

/// Write the header and one record per transaction.
pub(crate) fn write_csv<W: Write>(txns: &[Transaction], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for txn in txns {
        wtr.write_record([
            txn.id.to_string(),
            txn.date_string(),
            txn.kind.to_string(),
            txn.category.clone(),
            format_amount(txn.amount),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Export every row matching `filter` to `path`. The file is only created
/// when at least one row matches.
pub(crate) fn export_to_path(
    ledger: &Ledger,
    filter: &TransactionFilter,
    path: &Path,
) -> Result<ExportOutcome> {
    if filter.is_empty() {
        tracing::debug!("exporting without filters");
    }
    let txns = ledger.filtered(filter)?;
    if txns.is_empty() {
        tracing::info!(?filter, "export skipped, no matching transactions");
        return Ok(ExportOutcome::NoData);
    }

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    write_csv(&txns, file)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;

    tracing::info!(count = txns.len(), path = %path.display(), "exported transactions");
    Ok(ExportOutcome::Exported { count: txns.len() })
}

#[cfg(test)]
mod tests;
