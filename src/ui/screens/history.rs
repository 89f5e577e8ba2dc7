use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::format::format_amount;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.transactions.is_empty() {
        let msg = if !app.search_input.is_empty() {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("No transactions matching '{}'", app.search_input),
                    theme::dim_style(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Press Esc to clear the search",
                    theme::dim_style(),
                )),
            ]
        } else {
            vec![
                Line::from(""),
                Line::from(Span::styled("No transactions yet", theme::dim_style())),
                Line::from(""),
                Line::from(Span::styled(
                    "Add one on the Entry tab (1) or with :add",
                    theme::dim_style(),
                )),
            ]
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" History (0) ", theme::block_title_style()));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["ID", "Date", "Type", "Category", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .transactions
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let is_selected = app.selected_transactions.contains(&txn.id);
            let is_cursor = i == app.transaction_index;

            let id_cell = if is_selected {
                format!("\u{2022} {}", txn.id)
            } else {
                format!("  {}", txn.id)
            };

            let style = if is_cursor && is_selected {
                Style::default().fg(theme::HEADER_BG).bg(theme::YELLOW)
            } else if is_cursor {
                theme::selected_style()
            } else if is_selected {
                Style::default().fg(theme::YELLOW)
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(id_cell),
                Cell::from(txn.date_string()),
                Cell::from(Span::styled(txn.kind.as_str(), theme::kind_style(txn.kind))),
                Cell::from(truncate(&txn.category, 30)),
                Cell::from(Span::styled(
                    format_amount(txn.amount),
                    theme::kind_style(txn.kind),
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(9),
        Constraint::Min(16),
        Constraint::Length(16),
    ];

    let selection = if app.selected_transactions.is_empty() {
        String::new()
    } else {
        format!("[{} selected] ", app.selected_transactions.len())
    };
    let search = if app.search_input.is_empty() {
        String::new()
    } else {
        format!("search: '{}'", app.search_input)
    };

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" History ({}) {selection}{search} ", app.transactions.len()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}
