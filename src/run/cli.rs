use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::analytics::{build_chart, small_legend_title, ChartData, ChartKind, ChartOutcome, Totals};
use crate::db::Ledger;
use crate::export::{self, ExportOutcome};
use crate::format::{format_amount, format_currency};
use crate::models::{EntryError, NewTransaction, Transaction, TransactionKind, DATE_FORMAT};
use crate::ui::util::truncate;

const BAR_WIDTH: usize = 40;

pub(crate) fn as_cli(args: &[String], ledger: &Ledger) -> Result<()> {
    match args[1].as_str() {
        "add" | "a" => cli_add(&args[2..], ledger),
        "list" | "ls" => cli_list(&args[2..], ledger),
        "delete" | "rm" => cli_delete(&args[2..], ledger),
        "export" => cli_export(&args[2..], ledger),
        "summary" | "s" => cli_summary(ledger),
        "chart" => cli_chart(&args[2..], ledger),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("flowledger {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("FlowLedger - local income and expense tracker");
    println!();
    println!("Usage: flowledger [command]");
    println!();
    println!("Commands:");
    println!("  (none)                              Launch interactive TUI");
    println!("  add <type> <category> <amount>      Record a transaction (type: Income or Expense)");
    println!("    --date <YYYY-MM-DD>               Date of the transaction (default: today)");
    println!("  list [search]                       List transactions, optionally filtered");
    println!("  delete <id>...                      Delete transactions and renumber the rest");
    println!("  export [path]                       Export transactions to CSV");
    println!("    --type <Income|Expense>           Only this type");
    println!("    --category <name>                 Only this category");
    println!("    --date <YYYY|YYYY-MM|YYYY-MM-DD>  Only this year, month or day");
    println!("  summary                             Print totals and per-category sums");
    println!("  chart [name]                        Print a chart (no name lists them)");
    println!("  --help, -h                          Show this help");
    println!("  --version, -V                       Show version");
}

fn cli_add(args: &[String], ledger: &Ledger) -> Result<()> {
    let positional = positional_args(args, &["--date"]);
    let [kind, category, amount] = positional.as_slice() else {
        anyhow::bail!("Usage: flowledger add <type> <category> <amount> [--date YYYY-MM-DD]");
    };

    let kind =
        TransactionKind::parse(kind).ok_or_else(|| EntryError::InvalidKind(kind.to_string()))?;
    let date = match flag_value(args, "--date") {
        Some(d) => NaiveDate::parse_from_str(d, DATE_FORMAT)
            .with_context(|| format!("Invalid date '{d}', expected YYYY-MM-DD"))?,
        None => chrono::Local::now().date_naive(),
    };

    let txn = NewTransaction::from_inputs(kind, category, amount, date)?;
    let id = ledger.insert(&txn)?;
    println!(
        "Added #{id}: {} {} {} on {}",
        txn.kind,
        txn.category,
        format_amount(txn.amount),
        txn.date.format(DATE_FORMAT)
    );
    Ok(())
}

fn cli_list(args: &[String], ledger: &Ledger) -> Result<()> {
    let txns = match args.first() {
        Some(term) => ledger.search(term)?,
        None => ledger.all()?,
    };
    if txns.is_empty() {
        println!("No transactions");
        return Ok(());
    }

    println!(
        "{:<5} {:<11} {:<8} {:<20} {:>14}",
        "ID", "Date", "Type", "Category", "Amount"
    );
    println!("{}", "─".repeat(62));
    for txn in &txns {
        print_row(txn);
    }
    let income = txns.iter().filter(|t| t.is_income()).count();
    let expense = txns.iter().filter(|t| t.is_expense()).count();
    println!("{}", "─".repeat(62));
    println!("{} transactions ({income} income, {expense} expense)", txns.len());
    Ok(())
}

fn print_row(txn: &Transaction) {
    println!(
        "{:<5} {:<11} {:<8} {:<20} {:>14}",
        txn.id,
        txn.date_string(),
        txn.kind,
        truncate(&txn.category, 20),
        format_amount(txn.signed_amount())
    );
}

fn cli_delete(args: &[String], ledger: &Ledger) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: flowledger delete <id>...");
    }
    let ids = args
        .iter()
        .map(|a| {
            a.parse::<i64>()
                .with_context(|| format!("Invalid transaction id: {a}"))
        })
        .collect::<Result<Vec<_>>>()?;

    let removed = ledger.delete_and_renumber(&ids)?;
    if removed == 0 {
        println!("No matching transactions");
    } else {
        println!("Transactions deleted successfully. ({removed} removed)");
    }
    Ok(())
}

fn cli_export(args: &[String], ledger: &Ledger) -> Result<()> {
    let filter = export::filter_from_inputs(
        flag_value(args, "--type").unwrap_or(""),
        flag_value(args, "--category").unwrap_or(""),
        flag_value(args, "--date").unwrap_or(""),
    );

    let output_path = positional_args(args, &["--type", "--category", "--date"])
        .first()
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| shellexpand(export::DEFAULT_EXPORT_PATH));

    match export::export_to_path(ledger, &filter, &PathBuf::from(&output_path))? {
        ExportOutcome::NoData => println!("No transactions found for the given filters."),
        ExportOutcome::Exported { count } => {
            println!("Transactions exported successfully! {count} rows written to {output_path}");
        }
    }
    Ok(())
}

fn cli_summary(ledger: &Ledger) -> Result<()> {
    let totals = Totals::load(ledger)?;

    println!("FlowLedger summary");
    println!("{}", "─".repeat(40));
    println!("  Total Income:   {}", format_amount(totals.income));
    println!("  Total Expenses: {}", format_amount(totals.expense));
    println!("  Balance:        {}", format_amount(totals.balance()));
    println!("  Transactions:   {}", ledger.count()?);

    for kind in TransactionKind::all() {
        let sums = ledger.sums_by_category(*kind)?;
        if sums.is_empty() {
            continue;
        }
        println!();
        println!("{kind} by Category:");
        for (name, amount) in &sums {
            println!("  {name:<24} {}", format_amount(*amount));
        }
    }
    Ok(())
}

fn cli_chart(args: &[String], ledger: &Ledger) -> Result<()> {
    let Some(name) = args.first() else {
        println!("Available charts:");
        for kind in ChartKind::all() {
            println!("  {:<15} {kind}", kind.slug());
        }
        return Ok(());
    };

    let kind = ChartKind::parse(name)
        .ok_or_else(|| anyhow::anyhow!("Unknown chart: {name}. Run `flowledger chart` to list them"))?;

    match build_chart(ledger, kind)? {
        ChartOutcome::NoData(msg) => println!("{msg}"),
        ChartOutcome::Ready(data) => {
            for line in chart_lines(&data) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

/// Plain-text rendering of a chart, one bar per line.
pub(super) fn chart_lines(data: &ChartData) -> Vec<String> {
    let mut lines = vec![data.title().to_string(), "─".repeat(BAR_WIDTH + 34)];
    match data {
        ChartData::Bar { bars, .. } => {
            let max = bars.iter().map(|(_, v)| *v).max().unwrap_or_default();
            for (label, value) in bars {
                lines.push(format!(
                    "{:<18} {:<width$} {}",
                    truncate(label, 18),
                    bar(*value, max),
                    format_currency(*value),
                    width = BAR_WIDTH
                ));
            }
        }
        ChartData::Pie { breakdown, .. } => {
            let hundred = Decimal::ONE_HUNDRED;
            for slice in breakdown.labeled() {
                lines.push(format!(
                    "{:<18} {:<width$} {}",
                    truncate(&slice.label, 18),
                    bar(slice.percentage, hundred),
                    slice.percent_label(),
                    width = BAR_WIDTH
                ));
            }
            if !breakdown.small_legend.is_empty() {
                lines.push(String::new());
                lines.push(small_legend_title());
                for slice in &breakdown.small_legend {
                    lines.push(format!("  {}", slice.legend_line()));
                }
            }
        }
        ChartData::Line { series, .. } => {
            let max = series.max();
            for (month, value) in &series.points {
                lines.push(format!(
                    "{:<18} {:<width$} {}",
                    month,
                    bar(*value, max),
                    format_currency(*value),
                    width = BAR_WIDTH
                ));
            }
        }
    }
    lines
}

fn bar(value: Decimal, max: Decimal) -> String {
    if max <= Decimal::ZERO {
        return String::new();
    }
    let cells = (value / max * Decimal::from(BAR_WIDTH))
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(BAR_WIDTH);
    "█".repeat(cells)
}

/// Value following `name`, e.g. `--date 2024` → `Some("2024")`.
fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

/// Arguments that are neither a known flag nor a flag's value.
fn positional_args<'a>(args: &'a [String], flags: &[&str]) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if flags.contains(&arg.as_str()) {
            iter.next();
        } else {
            out.push(arg.as_str());
        }
    }
    out
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
