use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::format::format_amount;
use crate::models::TransactionKind;
use crate::ui::app::{App, EntryField, InputMode};
use crate::ui::theme;
use crate::ui::util::truncate;

const RECENT_ROWS: usize = 8;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Totals
            Constraint::Length(7), // Form
            Constraint::Min(3),    // Recent
        ])
        .split(area);

    render_totals(f, chunks[0], app);
    render_form(f, chunks[1], app);
    render_recent(f, chunks[2], app);
}

fn render_totals(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area);

    let balance = app.totals.balance();
    render_card(f, cards[0], "Total Income", app.totals.income, theme::GREEN);
    render_card(f, cards[1], "Total Expenses", app.totals.expense, theme::RED);
    render_card(
        f,
        cards[2],
        "Balance",
        balance,
        if balance >= Decimal::ZERO {
            theme::GREEN
        } else {
            theme::RED
        },
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, amount: Decimal, color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::block_title_style()));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Editing;
    let mut lines = vec![Line::from("")];

    for field in EntryField::all() {
        let focused = *field == app.entry_field;
        let marker = if focused { "▶ " } else { "  " };
        let label_style = if focused {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::dim_style()
        };

        let value = match field {
            EntryField::Amount => value_span(&app.entry_amount, "0.00", focused && editing),
            EntryField::Category => value_span(&app.entry_category, "e.g. Food", focused && editing),
            EntryField::Kind => kind_span(app.entry_kind),
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{:<10}", field.label()), label_style),
            value,
        ]));
    }

    let title = if editing {
        " New Transaction (editing) "
    } else {
        " New Transaction "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if editing {
            theme::ACCENT
        } else {
            theme::OVERLAY
        }))
        .title(Span::styled(title, theme::block_title_style()));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn value_span<'a>(value: &'a str, hint: &'a str, cursor: bool) -> Span<'a> {
    if value.is_empty() && !cursor {
        Span::styled(hint, theme::dim_style())
    } else if cursor {
        Span::styled(format!("{value}▏"), theme::normal_style())
    } else {
        Span::styled(value, theme::normal_style())
    }
}

fn kind_span(kind: TransactionKind) -> Span<'static> {
    let options: Vec<String> = TransactionKind::all()
        .iter()
        .map(|k| {
            if *k == kind {
                format!("[{k}]")
            } else {
                format!(" {k} ")
            }
        })
        .collect();
    Span::styled(options.join(" "), theme::kind_style(kind))
}

fn render_recent(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app
        .transactions
        .iter()
        .rev()
        .take(RECENT_ROWS.min(area.height.saturating_sub(2) as usize))
        .map(|txn| {
            Line::from(vec![
                Span::styled(format!(" #{:<4} ", txn.id), theme::dim_style()),
                Span::styled(format!("{}  ", txn.date_string()), theme::dim_style()),
                Span::styled(format!("{:<8}", txn.kind), theme::kind_style(txn.kind)),
                Span::styled(
                    format!("{:<20}", truncate(&txn.category, 20)),
                    theme::normal_style(),
                ),
                Span::styled(format_amount(txn.amount), theme::kind_style(txn.kind)),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Recent ", theme::block_title_style()));

    if lines.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No transactions yet. Press i to start typing an amount",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}
