use anyhow::Result;
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::analytics::{build_chart, ChartKind, ChartOutcome, Totals};
use crate::db::Ledger;
use crate::export::{self, ExportOutcome};
use crate::models::*;
use crate::ui::util::format_amount_input;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Entry,
    History,
    Export,
    Charts,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Entry, Self::History, Self::Export, Self::Charts]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Entry => write!(f, "Entry"),
            Self::History => write!(f, "History"),
            Self::Export => write!(f, "Export"),
            Self::Charts => write!(f, "Charts"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Search,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Search => write!(f, "SEARCH"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteTransactions { ids: Vec<i64> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryField {
    Amount,
    Category,
    Kind,
}

impl EntryField {
    pub(crate) fn all() -> &'static [EntryField] {
        &[Self::Amount, Self::Category, Self::Kind]
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Amount => "Amount",
            Self::Category => "Category",
            Self::Kind => "Type",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExportField {
    Kind,
    Category,
    Date,
    Path,
}

impl ExportField {
    pub(crate) fn all() -> &'static [ExportField] {
        &[Self::Kind, Self::Category, Self::Date, Self::Path]
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Kind => "Type",
            Self::Category => "Category",
            Self::Date => "Date",
            Self::Path => "Output file",
        }
    }

    /// Hint drawn in place of an empty field.
    pub(crate) fn placeholder(&self) -> &'static str {
        match self {
            Self::Kind => export::TYPE_PLACEHOLDER,
            Self::Category => export::CATEGORY_PLACEHOLDER,
            Self::Date => export::DATE_PLACEHOLDER,
            Self::Path => export::DEFAULT_EXPORT_PATH,
        }
    }
}

/// Cycle through a fixed list of fields.
fn step<T: Copy + PartialEq>(all: &[T], current: T, delta: isize) -> T {
    let len = all.len() as isize;
    let idx = all.iter().position(|f| *f == current).unwrap_or(0) as isize;
    all[(idx + delta).rem_euclid(len) as usize]
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) search_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Entry
    pub(crate) entry_field: EntryField,
    pub(crate) entry_amount: String,
    pub(crate) entry_category: String,
    pub(crate) entry_kind: TransactionKind,
    pub(crate) totals: Totals,
    pub(crate) transaction_count: i64,

    // History
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,
    pub(crate) selected_transactions: BTreeSet<i64>,

    // Export
    pub(crate) export_field: ExportField,
    pub(crate) export_kind: String,
    pub(crate) export_category: String,
    pub(crate) export_date: String,
    pub(crate) export_path: String,

    // Charts
    pub(crate) chart_index: usize,
    pub(crate) chart: Option<ChartOutcome>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Entry,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            search_input: String::new(),
            status_message: String::new(),
            show_help: false,

            entry_field: EntryField::Amount,
            entry_amount: String::new(),
            entry_category: String::new(),
            entry_kind: TransactionKind::Income,
            totals: Totals::default(),
            transaction_count: 0,

            transactions: Vec::new(),
            transaction_index: 0,
            transaction_scroll: 0,
            selected_transactions: BTreeSet::new(),

            export_field: ExportField::Kind,
            export_kind: String::new(),
            export_category: String::new(),
            export_date: String::new(),
            export_path: String::new(),

            chart_index: 0,
            chart: None,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    // ── Refresh ───────────────────────────────────────────────

    pub(crate) fn refresh_totals(&mut self, ledger: &Ledger) -> Result<()> {
        self.totals = Totals::load(ledger)?;
        self.transaction_count = ledger.count()?;
        Ok(())
    }

    pub(crate) fn refresh_transactions(&mut self, ledger: &Ledger) -> Result<()> {
        self.transactions = if self.search_input.trim().is_empty() {
            ledger.all()?
        } else {
            ledger.search(&self.search_input)?
        };
        if self.transaction_index >= self.transactions.len() {
            self.transaction_index = self.transactions.len().saturating_sub(1);
        }
        if self.transaction_scroll > self.transaction_index {
            self.transaction_scroll = self.transaction_index;
        }
        Ok(())
    }

    pub(crate) fn refresh_chart(&mut self, ledger: &Ledger) -> Result<()> {
        self.chart = Some(build_chart(ledger, self.chart_kind())?);
        Ok(())
    }

    pub(crate) fn refresh_all(&mut self, ledger: &Ledger) -> Result<()> {
        self.refresh_totals(ledger)?;
        self.refresh_transactions(ledger)?;
        if self.screen == Screen::Charts {
            self.refresh_chart(ledger)?;
        }
        Ok(())
    }

    // ── Entry ─────────────────────────────────────────────────

    /// Append a typed character to the focused entry field.
    pub(crate) fn entry_push(&mut self, c: char) {
        match self.entry_field {
            EntryField::Amount => {
                self.entry_amount.push(c);
                self.entry_amount = format_amount_input(&self.entry_amount);
            }
            EntryField::Category => self.entry_category.push(c),
            EntryField::Kind => match c.to_ascii_lowercase() {
                'i' => self.entry_kind = TransactionKind::Income,
                'e' => self.entry_kind = TransactionKind::Expense,
                ' ' => self.entry_kind = self.entry_kind.toggled(),
                _ => {}
            },
        }
    }

    pub(crate) fn entry_pop(&mut self) {
        match self.entry_field {
            EntryField::Amount => {
                self.entry_amount.pop();
                self.entry_amount = format_amount_input(&self.entry_amount);
            }
            EntryField::Category => {
                self.entry_category.pop();
            }
            EntryField::Kind => {}
        }
    }

    pub(crate) fn entry_next_field(&mut self, delta: isize) {
        self.entry_field = step(EntryField::all(), self.entry_field, delta);
    }

    /// Enter inside the form: a valid amount moves on to the category, a
    /// category submits.
    pub(crate) fn entry_enter(&mut self, ledger: &Ledger) -> Result<()> {
        match self.entry_field {
            EntryField::Amount => match validate_amount(&self.entry_amount) {
                Ok(_) => self.entry_field = EntryField::Category,
                Err(e) => self.set_status(e.to_string()),
            },
            EntryField::Category | EntryField::Kind => self.submit_entry(ledger)?,
        }
        Ok(())
    }

    /// Validate the form and insert it, dated today. Validation problems
    /// only set the status line.
    pub(crate) fn submit_entry(&mut self, ledger: &Ledger) -> Result<()> {
        let txn = match NewTransaction::today(
            self.entry_kind,
            &self.entry_category,
            &self.entry_amount,
        ) {
            Ok(txn) => txn,
            Err(e) => {
                self.entry_field = match e {
                    EntryError::EmptyCategory => EntryField::Category,
                    _ => EntryField::Amount,
                };
                self.set_status(e.to_string());
                return Ok(());
            }
        };

        let id = ledger.insert(&txn)?;
        self.entry_amount.clear();
        self.entry_category.clear();
        self.entry_field = EntryField::Amount;
        self.refresh_all(ledger)?;
        self.set_status(format!("Transaction Added! (#{id})"));
        Ok(())
    }

    // ── History ───────────────────────────────────────────────

    pub(crate) fn toggle_selection(&mut self) {
        if let Some(txn) = self.transactions.get(self.transaction_index) {
            if !self.selected_transactions.remove(&txn.id) {
                self.selected_transactions.insert(txn.id);
            }
        }
    }

    pub(crate) fn clear_selections(&mut self) {
        self.selected_transactions.clear();
    }

    /// Ask to delete the selection, or the cursor row when nothing is
    /// selected.
    pub(crate) fn request_delete(&mut self) {
        let ids: Vec<i64> = if self.selected_transactions.is_empty() {
            self.transactions
                .get(self.transaction_index)
                .map(|t| vec![t.id])
                .unwrap_or_default()
        } else {
            // Only rows still visible under the current search.
            self.transactions
                .iter()
                .map(|t| t.id)
                .filter(|id| self.selected_transactions.contains(id))
                .collect()
        };

        if ids.is_empty() {
            self.set_status("Please select a transaction to delete.");
            return;
        }

        self.confirm_message = match ids.as_slice() {
            [id] => format!("Delete transaction #{id}?"),
            _ => format!("Delete {} selected transactions?", ids.len()),
        };
        self.pending_action = Some(PendingAction::DeleteTransactions { ids });
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn delete_transactions(&mut self, ledger: &Ledger, ids: &[i64]) -> Result<()> {
        ledger.delete_and_renumber(ids)?;
        self.clear_selections();
        self.refresh_all(ledger)?;
        self.set_status("Transactions deleted successfully.");
        Ok(())
    }

    // ── Export ────────────────────────────────────────────────

    pub(crate) fn export_value_mut(&mut self) -> &mut String {
        match self.export_field {
            ExportField::Kind => &mut self.export_kind,
            ExportField::Category => &mut self.export_category,
            ExportField::Date => &mut self.export_date,
            ExportField::Path => &mut self.export_path,
        }
    }

    pub(crate) fn export_value(&self, field: ExportField) -> &str {
        match field {
            ExportField::Kind => &self.export_kind,
            ExportField::Category => &self.export_category,
            ExportField::Date => &self.export_date,
            ExportField::Path => &self.export_path,
        }
    }

    pub(crate) fn export_next_field(&mut self, delta: isize) {
        self.export_field = step(ExportField::all(), self.export_field, delta);
    }

    pub(crate) fn export_target(&self) -> PathBuf {
        let raw = if self.export_path.trim().is_empty() {
            export::DEFAULT_EXPORT_PATH
        } else {
            self.export_path.trim()
        };
        PathBuf::from(crate::run::shellexpand(raw))
    }

    /// Run the export with the current filter fields. The filters are
    /// cleared after a file is written.
    pub(crate) fn run_export(&mut self, ledger: &Ledger) -> Result<()> {
        let filter =
            export::filter_from_inputs(&self.export_kind, &self.export_category, &self.export_date);
        let path = self.export_target();
        match export::export_to_path(ledger, &filter, &path)? {
            ExportOutcome::NoData => {
                self.set_status("No transactions found for the given filters.");
            }
            ExportOutcome::Exported { count } => {
                self.export_kind.clear();
                self.export_category.clear();
                self.export_date.clear();
                self.set_status(format!(
                    "Transactions exported successfully! {count} rows to {}",
                    path.display()
                ));
            }
        }
        Ok(())
    }

    // ── Charts ────────────────────────────────────────────────

    pub(crate) fn chart_kind(&self) -> ChartKind {
        let all = ChartKind::all();
        all[self.chart_index.min(all.len() - 1)]
    }

    pub(crate) fn select_chart(&mut self, ledger: &Ledger, index: usize) -> Result<()> {
        self.chart_index = index.min(ChartKind::all().len() - 1);
        self.refresh_chart(ledger)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod app_tests;
