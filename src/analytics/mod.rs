//! Aggregates and chart-ready series built from ledger sums.

mod chart;
mod pie;

pub(crate) use chart::{build_chart, ChartData, ChartKind, ChartOutcome};
pub(crate) use pie::{small_legend_title, PieBreakdown, Slice};

use anyhow::Result;
use rust_decimal::Decimal;

use crate::db::Ledger;
use crate::models::TransactionKind;

/// Running totals shown next to the entry form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Totals {
    pub(crate) income: Decimal,
    pub(crate) expense: Decimal,
}

impl Totals {
    /// Missing sums (no rows of that kind) count as zero.
    pub(crate) fn from_sums(income: Option<Decimal>, expense: Option<Decimal>) -> Self {
        Self {
            income: income.unwrap_or_default(),
            expense: expense.unwrap_or_default(),
        }
    }

    pub(crate) fn load(ledger: &Ledger) -> Result<Self> {
        Ok(Self::from_sums(
            ledger.sum_for_kind(TransactionKind::Income)?,
            ledger.sum_for_kind(TransactionKind::Expense)?,
        ))
    }

    pub(crate) fn balance(&self) -> Decimal {
        self.income - self.expense
    }
}

/// Monthly totals for one kind, oldest month first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TrendSeries {
    pub(crate) kind: TransactionKind,
    pub(crate) points: Vec<(String, Decimal)>,
}

impl TrendSeries {
    /// Sorts by month key regardless of the order the sums arrive in.
    /// `None` when there are no months.
    pub(crate) fn new(kind: TransactionKind, mut points: Vec<(String, Decimal)>) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        points.sort_by(|a, b| a.0.cmp(&b.0));
        Some(Self { kind, points })
    }

    pub(crate) fn max(&self) -> Decimal {
        self.points
            .iter()
            .map(|(_, v)| *v)
            .max()
            .unwrap_or_default()
    }
}
