mod ids;
mod schema;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::types::{ToSql, Type};
use rusqlite::{params, Connection, Row};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

use crate::models::*;

const SELECT_COLUMNS: &str = "SELECT id, date, type, category, amount FROM transactions";

/// The persistent ledger. Only the database location is held; every
/// operation opens its own connection and drops it before returning.
pub(crate) struct Ledger {
    path: PathBuf,
}

impl Ledger {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let ledger = Self {
            path: path.to_path_buf(),
        };
        let conn = ledger.connect()?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        conn.execute_batch(schema::SCHEMA)
            .context("Failed to create transactions table")?;
        tracing::debug!(path = %path.display(), "ledger opened");
        Ok(ledger)
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.path)
            .with_context(|| format!("Failed to open database: {}", self.path.display()))
    }

    // ── Writes ────────────────────────────────────────────────

    /// Insert a validated transaction and return the id it was given.
    pub(crate) fn insert(&self, txn: &NewTransaction) -> Result<i64> {
        let amount = txn
            .amount
            .to_f64()
            .with_context(|| format!("Amount out of range: {}", txn.amount))?;

        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let id = ids::next_id(&tx).context("Failed to assign transaction id")?;
        tx.execute(
            "INSERT INTO transactions (id, date, type, category, amount)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                id,
                txn.date.format(DATE_FORMAT).to_string(),
                txn.kind,
                txn.category,
                amount,
            ],
        )
        .context("Failed to insert transaction")?;
        tx.commit()?;

        tracing::info!(id, kind = %txn.kind, category = %txn.category, "transaction added");
        Ok(id)
    }

    /// Delete the given rows and renumber the survivors `1..N` as one unit of
    /// work. Returns the number of rows removed.
    pub(crate) fn delete_and_renumber(&self, ids: &[i64]) -> Result<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let mut removed = 0;
        for id in ids {
            removed += tx
                .execute("DELETE FROM transactions WHERE id = ?1", params![id])
                .with_context(|| format!("Failed to delete transaction {id}"))?;
        }
        let renumbered = ids::renumber(&tx).context("Failed to renumber transactions")?;
        tx.commit()?;

        tracing::info!(removed, renumbered, "transactions deleted");
        Ok(removed)
    }

    // ── Reads ─────────────────────────────────────────────────

    pub(crate) fn all(&self) -> Result<Vec<Transaction>> {
        self.query_transactions(&format!("{SELECT_COLUMNS} ORDER BY id"), &[])
    }

    /// Case-insensitive substring match against every column.
    pub(crate) fn search(&self, term: &str) -> Result<Vec<Transaction>> {
        let pattern = format!("%{}%", term.trim());
        self.query_transactions(
            &format!(
                "{SELECT_COLUMNS}
                 WHERE CAST(id AS TEXT) LIKE ?1 OR date LIKE ?1 OR type LIKE ?1
                    OR category LIKE ?1 OR CAST(amount AS TEXT) LIKE ?1
                 ORDER BY id"
            ),
            &[&pattern as &dyn ToSql],
        )
    }

    pub(crate) fn filtered(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let mut sql = format!("{SELECT_COLUMNS} WHERE 1=1");
        let mut param_values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(kind) = filter.kind {
            sql.push_str(&format!(" AND type = ?{}", param_values.len() + 1));
            param_values.push(Box::new(kind));
        }
        if let Some(category) = &filter.category {
            sql.push_str(&format!(" AND category = ?{}", param_values.len() + 1));
            param_values.push(Box::new(category.clone()));
        }
        if let Some(date) = &filter.date {
            let (clause, value) = match date {
                DateMatch::Year(y) => ("strftime('%Y', date)", y),
                DateMatch::YearMonth(m) => ("strftime('%Y-%m', date)", m),
                DateMatch::Day(d) => ("date", d),
            };
            sql.push_str(&format!(" AND {clause} = ?{}", param_values.len() + 1));
            param_values.push(Box::new(value.clone()));
        }

        sql.push_str(" ORDER BY id");

        let params_ref: Vec<&dyn ToSql> = param_values.iter().map(|p| p.as_ref()).collect();
        self.query_transactions(&sql, &params_ref)
    }

    pub(crate) fn count(&self) -> Result<i64> {
        Ok(self
            .connect()?
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }

    fn query_transactions(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Vec<Transaction>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, row_to_transaction)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    // ── Aggregates ────────────────────────────────────────────

    /// Sum of all amounts of one kind, `None` when there are no such rows.
    pub(crate) fn sum_for_kind(&self, kind: TransactionKind) -> Result<Option<Decimal>> {
        let total: Option<f64> = self.connect()?.query_row(
            "SELECT SUM(amount) FROM transactions WHERE type = ?1",
            params![kind],
            |row| row.get(0),
        )?;
        Ok(total.map(real_to_decimal))
    }

    /// Per-category sums for one kind, ordered by category.
    pub(crate) fn sums_by_category(&self, kind: TransactionKind) -> Result<Vec<(String, Decimal)>> {
        self.grouped_sums(
            "SELECT category, SUM(amount) FROM transactions
             WHERE type = ?1
             GROUP BY category
             ORDER BY category",
            kind,
        )
    }

    /// Per-month (`YYYY-MM`) sums for one kind, oldest month first.
    pub(crate) fn sums_by_month(&self, kind: TransactionKind) -> Result<Vec<(String, Decimal)>> {
        self.grouped_sums(
            "SELECT strftime('%Y-%m', date) AS month, SUM(amount) FROM transactions
             WHERE type = ?1
             GROUP BY month
             HAVING month IS NOT NULL
             ORDER BY month",
            kind,
        )
    }

    fn grouped_sums(&self, sql: &str, kind: TransactionKind) -> Result<Vec<(String, Decimal)>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params![kind], |row| {
            let key: String = row.get(0)?;
            let total: f64 = row.get(1)?;
            Ok((key, real_to_decimal(total)))
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    #[cfg(test)]
    pub(crate) fn execute_raw(&self, sql: &str) -> Result<()> {
        self.connect()?.execute_batch(sql)?;
        Ok(())
    }
}

fn row_to_transaction(row: &Row) -> rusqlite::Result<Transaction> {
    let date_str: String = row.get(1)?;
    let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
    let amount: f64 = row.get(4)?;
    Ok(Transaction {
        id: row.get(0)?,
        date,
        kind: row.get(2)?,
        category: row.get(3)?,
        amount: real_to_decimal(amount),
    })
}

/// REAL column values back to decimals, rounded to the shortest
/// representation of the stored double.
fn real_to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

#[cfg(test)]
mod tests;
