use anyhow::Result;
use rust_decimal::Decimal;

use super::{PieBreakdown, TrendSeries};
use crate::db::Ledger;
use crate::models::TransactionKind;

/// Every chart the app can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChartKind {
    CategoryBar(TransactionKind),
    ComparisonBar,
    CategoryPie(TransactionKind),
    ComparisonPie,
    MonthlyTrend(TransactionKind),
}

impl ChartKind {
    pub(crate) fn all() -> &'static [ChartKind] {
        &[
            Self::CategoryBar(TransactionKind::Income),
            Self::CategoryBar(TransactionKind::Expense),
            Self::ComparisonBar,
            Self::CategoryPie(TransactionKind::Income),
            Self::CategoryPie(TransactionKind::Expense),
            Self::ComparisonPie,
            Self::MonthlyTrend(TransactionKind::Income),
            Self::MonthlyTrend(TransactionKind::Expense),
        ]
    }

    pub(crate) fn title(&self) -> &'static str {
        match self {
            Self::CategoryBar(TransactionKind::Income)
            | Self::CategoryPie(TransactionKind::Income) => "Income by Category",
            Self::CategoryBar(TransactionKind::Expense)
            | Self::CategoryPie(TransactionKind::Expense) => "Expenses by Category",
            Self::ComparisonBar | Self::ComparisonPie => "Income vs. Expenses",
            Self::MonthlyTrend(TransactionKind::Income) => "Monthly Income Trends",
            Self::MonthlyTrend(TransactionKind::Expense) => "Monthly Expenses Trends",
        }
    }

    /// Short name used by the CLI, e.g. `income-pie`.
    pub(crate) fn slug(&self) -> &'static str {
        match self {
            Self::CategoryBar(TransactionKind::Income) => "income-bar",
            Self::CategoryBar(TransactionKind::Expense) => "expense-bar",
            Self::ComparisonBar => "compare-bar",
            Self::CategoryPie(TransactionKind::Income) => "income-pie",
            Self::CategoryPie(TransactionKind::Expense) => "expense-pie",
            Self::ComparisonPie => "compare-pie",
            Self::MonthlyTrend(TransactionKind::Income) => "income-trend",
            Self::MonthlyTrend(TransactionKind::Expense) => "expense-trend",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase();
        Self::all().iter().copied().find(|k| k.slug() == wanted)
    }

    /// Bar/pie/line, for menus.
    pub(crate) fn style_label(&self) -> &'static str {
        match self {
            Self::CategoryBar(_) | Self::ComparisonBar => "Bar",
            Self::CategoryPie(_) | Self::ComparisonPie => "Pie",
            Self::MonthlyTrend(_) => "Line",
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title(), self.style_label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ChartData {
    Bar {
        title: &'static str,
        bars: Vec<(String, Decimal)>,
    },
    Pie {
        title: &'static str,
        breakdown: PieBreakdown,
    },
    Line {
        title: &'static str,
        series: TrendSeries,
    },
}

impl ChartData {
    pub(crate) fn title(&self) -> &'static str {
        match self {
            Self::Bar { title, .. } | Self::Pie { title, .. } | Self::Line { title, .. } => title,
        }
    }
}

/// Either something to draw or the reason there is nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ChartOutcome {
    Ready(ChartData),
    NoData(&'static str),
}

pub(crate) fn build_chart(ledger: &Ledger, kind: ChartKind) -> Result<ChartOutcome> {
    let title = kind.title();
    let outcome = match kind {
        ChartKind::CategoryBar(k) => {
            let bars = ledger.sums_by_category(k)?;
            if bars.is_empty() {
                ChartOutcome::NoData(no_category_data(k))
            } else {
                ChartOutcome::Ready(ChartData::Bar { title, bars })
            }
        }
        ChartKind::CategoryPie(k) => {
            match PieBreakdown::from_values(&ledger.sums_by_category(k)?) {
                Some(breakdown) => ChartOutcome::Ready(ChartData::Pie { title, breakdown }),
                None => ChartOutcome::NoData(no_category_data(k)),
            }
        }
        ChartKind::ComparisonBar | ChartKind::ComparisonPie => {
            match comparison_values(ledger)? {
                Err(msg) => ChartOutcome::NoData(msg),
                Ok(values) if kind == ChartKind::ComparisonBar => {
                    ChartOutcome::Ready(ChartData::Bar {
                        title,
                        bars: values,
                    })
                }
                Ok(values) => match PieBreakdown::from_values(&values) {
                    Some(breakdown) => ChartOutcome::Ready(ChartData::Pie { title, breakdown }),
                    None => ChartOutcome::NoData("No transactions to show."),
                },
            }
        }
        ChartKind::MonthlyTrend(k) => match TrendSeries::new(k, ledger.sums_by_month(k)?) {
            Some(series) => ChartOutcome::Ready(ChartData::Line { title, series }),
            None => ChartOutcome::NoData(NO_TRENDS),
        },
    };
    if let ChartOutcome::NoData(msg) = &outcome {
        tracing::debug!(chart = kind.slug(), msg, "no chart data");
    }
    Ok(outcome)
}

const NO_TRENDS: &str = "No monthly trends to show.";

fn no_category_data(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "No income to show.",
        TransactionKind::Expense => "No expenses to show.",
    }
}

/// Total income and total expenses; both must have rows.
fn comparison_values(
    ledger: &Ledger,
) -> Result<std::result::Result<Vec<(String, Decimal)>, &'static str>> {
    let Some(income) = ledger.sum_for_kind(TransactionKind::Income)? else {
        return Ok(Err("No transactions for income to show."));
    };
    let Some(expense) = ledger.sum_for_kind(TransactionKind::Expense)? else {
        return Ok(Err("No transactions for expenses to show."));
    };
    Ok(Ok(vec![
        ("Income".to_string(), income),
        ("Expenses".to_string(), expense),
    ]))
}
