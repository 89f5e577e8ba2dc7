use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::ui::app::{App, ExportField, InputMode};
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(3)])
        .split(area);

    render_fields(f, chunks[0], app);
    render_notes(f, chunks[1], app);
}

fn render_fields(f: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Editing;
    let mut lines = vec![Line::from("")];

    for field in ExportField::all() {
        let focused = *field == app.export_field;
        let value = app.export_value(*field);
        let marker = if focused { "▶ " } else { "  " };
        let label_style = if focused {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::dim_style()
        };

        let value_span = if focused && editing {
            Span::styled(format!("{value}▏"), theme::normal_style())
        } else if value.is_empty() {
            Span::styled(field.placeholder(), theme::dim_style())
        } else {
            Span::styled(value.to_string(), theme::normal_style())
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{:<13}", field.label()), label_style),
            value_span,
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if editing {
            theme::ACCENT
        } else {
            theme::OVERLAY
        }))
        .title(Span::styled(" Export to CSV ", theme::block_title_style()));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_notes(f: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::from(Span::styled(
            " Empty fields are not applied. Filters combine with AND.",
            theme::dim_style(),
        )),
        Line::from(Span::styled(
            " Date accepts a year (2024), a month (2024-03) or a day (2024-03-15).",
            theme::dim_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Target: ", theme::dim_style()),
            Span::styled(
                app.export_target().display().to_string(),
                theme::normal_style(),
            ),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY));
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}
