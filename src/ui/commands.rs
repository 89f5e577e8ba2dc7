use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, Screen};
use crate::analytics::ChartKind;
use crate::db::Ledger;
use crate::models::{EntryError, TransactionKind};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &Ledger) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit FlowLedger", cmd_quit, r);
    register_command!("quit", "Quit FlowLedger", cmd_quit, r);
    register_command!("e", "Go to Entry", cmd_entry, r);
    register_command!("entry", "Go to Entry", cmd_entry, r);
    register_command!("hi", "Go to History", cmd_history, r);
    register_command!("history", "Go to History", cmd_history, r);
    register_command!("c", "Go to Charts", cmd_charts, r);
    register_command!("charts", "Go to Charts", cmd_charts, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add a transaction (e.g. :add expense food 12.50)",
        cmd_add,
        r
    );
    register_command!("a", "Add a transaction (e.g. :a income salary 5,000)", cmd_add, r);
    register_command!(
        "type",
        "Set entry type (e.g. :type expense)",
        cmd_type,
        r
    );
    register_command!(
        "search",
        "Search transactions (e.g. :search food)",
        cmd_search,
        r
    );
    register_command!("s", "Search transactions (e.g. :s food)", cmd_search, r);
    register_command!(
        "delete-selected",
        "Delete selected transactions",
        cmd_delete_selected,
        r
    );
    register_command!("ds", "Delete selected transactions", cmd_delete_selected, r);
    register_command!(
        "clear-selection",
        "Unselect all transactions",
        cmd_clear_selection,
        r
    );
    register_command!(
        "export",
        "Export with the current filters (e.g. :export ~/ledger.csv)",
        cmd_export,
        r
    );
    register_command!(
        "chart",
        "Show a chart (e.g. :chart expense-pie)",
        cmd_chart,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, ledger)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

pub(crate) fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 2) // skip short aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Switch screens, loading whatever the new screen shows.
pub(crate) fn switch_screen(app: &mut App, ledger: &Ledger, screen: Screen) -> anyhow::Result<()> {
    app.screen = screen;
    match screen {
        Screen::Entry => app.refresh_totals(ledger)?,
        Screen::History => app.refresh_transactions(ledger)?,
        Screen::Export => {}
        Screen::Charts => app.refresh_chart(ledger)?,
    }
    Ok(())
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _ledger: &Ledger) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_entry(_args: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    switch_screen(app, ledger, Screen::Entry)
}

fn cmd_history(_args: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    switch_screen(app, ledger, Screen::History)
}

fn cmd_charts(_args: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    switch_screen(app, ledger, Screen::Charts)
}

fn cmd_help(_args: &str, app: &mut App, _ledger: &Ledger) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    // Last token is the amount, the first the type, the rest the category
    let mut parts = args.split_whitespace();
    let (Some(kind), Some(amount)) = (parts.next(), parts.next_back()) else {
        app.set_status("Usage: :add <income|expense> <category> <amount>");
        return Ok(());
    };
    let category = parts.collect::<Vec<_>>().join(" ");

    let Some(kind) = TransactionKind::parse(kind) else {
        app.set_status(EntryError::InvalidKind(kind.to_string()).to_string());
        return Ok(());
    };

    app.entry_kind = kind;
    app.entry_category = category;
    app.entry_amount = amount.to_string();
    app.submit_entry(ledger)
}

fn cmd_type(args: &str, app: &mut App, _ledger: &Ledger) -> anyhow::Result<()> {
    match TransactionKind::parse(args) {
        Some(kind) => {
            app.entry_kind = kind;
            app.set_status(format!("Entry type: {kind}"));
        }
        None => app.set_status(EntryError::InvalidKind(args.to_string()).to_string()),
    }
    Ok(())
}

fn cmd_search(args: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    app.search_input = args.to_string();
    app.transaction_index = 0;
    app.transaction_scroll = 0;
    switch_screen(app, ledger, Screen::History)?;

    if args.is_empty() {
        app.set_status("Search cleared");
    } else {
        app.set_status(format!("Searching: {args}"));
    }

    Ok(())
}

fn cmd_delete_selected(_args: &str, app: &mut App, _ledger: &Ledger) -> anyhow::Result<()> {
    if app.screen != Screen::History {
        app.set_status("Navigate to History first");
        return Ok(());
    }
    app.request_delete();
    Ok(())
}

fn cmd_clear_selection(_args: &str, app: &mut App, _ledger: &Ledger) -> anyhow::Result<()> {
    app.clear_selections();
    app.set_status("Selection cleared");
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    if !args.is_empty() {
        app.export_path = args.to_string();
    }
    app.screen = Screen::Export;
    app.run_export(ledger)
}

fn cmd_chart(args: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    if args.is_empty() {
        let names: Vec<&str> = ChartKind::all().iter().map(|k| k.slug()).collect();
        app.set_status(format!("Charts: {}", names.join(", ")));
        return Ok(());
    }

    match ChartKind::all().iter().position(|k| Some(*k) == ChartKind::parse(args)) {
        Some(index) => {
            app.screen = Screen::Charts;
            app.select_chart(ledger, index)?;
        }
        None => app.set_status(format!("Unknown chart: {args}")),
    }
    Ok(())
}
