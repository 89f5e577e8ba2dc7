use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::analytics::{
    small_legend_title, ChartData, ChartKind, ChartOutcome, PieBreakdown, Slice, TrendSeries,
};
use crate::format::format_currency;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(20)])
        .split(area);

    render_menu(f, chunks[0], app);

    match &app.chart {
        Some(ChartOutcome::Ready(data)) => match data {
            ChartData::Bar { title, bars } => render_bars(f, chunks[1], title, bars),
            ChartData::Pie { title, breakdown } => render_pie(f, chunks[1], title, breakdown),
            ChartData::Line { title, series } => render_trend(f, chunks[1], title, series),
        },
        Some(ChartOutcome::NoData(msg)) => render_message(f, chunks[1], msg),
        None => render_message(f, chunks[1], "Select a chart with j/k"),
    }
}

fn titled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::block_title_style()))
}

fn render_menu(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = ChartKind::all()
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let style = if i == app.chart_index {
                theme::selected_style()
            } else {
                theme::normal_style()
            };
            Line::from(Span::styled(format!(" {kind}"), style))
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(titled_block("Charts")), area);
}

fn render_message(f: &mut Frame, area: Rect, msg: &str) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(msg.to_string(), theme::dim_style())),
    ])
    .centered()
    .block(titled_block("Chart"));
    f.render_widget(text, area);
}

fn render_bars(f: &mut Frame, area: Rect, title: &str, values: &[(String, Decimal)]) {
    let bars: Vec<Bar> = values
        .iter()
        .enumerate()
        .map(|(i, (label, amount))| {
            Bar::default()
                .value(amount.round().to_u64().unwrap_or(0))
                .text_value(format_currency(*amount))
                .label(Line::from(truncate(label, 12)))
                .style(Style::default().fg(theme::palette_color(i)))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(theme::palette_color(i))
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(titled_block(title))
        .data(BarGroup::default().bars(&bars))
        .bar_width(12)
        .bar_gap(1);

    f.render_widget(chart, area);
}

/// Terminal pie: one proportional bar per labelled slice, with the small
/// slices listed in a separate legend.
fn render_pie(f: &mut Frame, area: Rect, title: &str, breakdown: &PieBreakdown) {
    let legend_height = if breakdown.small_legend.is_empty() {
        0
    } else {
        breakdown.small_legend.len() as u16 + 2
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(legend_height)])
        .split(area);

    let width = chunks[0].width.saturating_sub(36) as usize;
    let lines: Vec<Line> = breakdown
        .slices
        .iter()
        .enumerate()
        .filter(|(_, slice)| slice.is_labeled())
        .map(|(i, slice)| slice_line(i, slice, width))
        .collect();

    let mut body = vec![Line::from(Span::styled(
        format!(" Total {}", format_currency(breakdown.total)),
        theme::dim_style(),
    ))];
    body.push(Line::from(""));
    body.extend(lines);
    f.render_widget(Paragraph::new(body).block(titled_block(title)), chunks[0]);

    if !breakdown.small_legend.is_empty() {
        let legend: Vec<Line> = breakdown
            .small_legend
            .iter()
            .map(|slice| {
                Line::from(Span::styled(
                    format!(" {}", slice.legend_line()),
                    theme::normal_style(),
                ))
            })
            .collect();
        f.render_widget(
            Paragraph::new(legend).block(titled_block(&small_legend_title())),
            chunks[1],
        );
    }
}

/// Colours follow the slice's position in the full pie, so they stay put
/// when small slices are left out.
fn slice_line(index: usize, slice: &Slice, width: usize) -> Line<'static> {
    let cells = (slice.percentage / Decimal::ONE_HUNDRED * Decimal::from(width))
        .round()
        .to_usize()
        .unwrap_or(0);
    Line::from(vec![
        Span::styled(
            format!(" {:<18} ", truncate(&slice.label, 18)),
            theme::normal_style(),
        ),
        Span::styled(
            "█".repeat(cells.max(1)),
            Style::default().fg(theme::palette_color(index)),
        ),
        Span::styled(format!(" {}", slice.percent_label()), theme::dim_style()),
    ])
}

fn render_trend(f: &mut Frame, area: Rect, title: &str, series: &TrendSeries) {
    let points: Vec<(f64, f64)> = series
        .points
        .iter()
        .enumerate()
        .map(|(i, (_, value))| (i as f64, value.to_f64().unwrap_or(0.0)))
        .collect();
    let max = series.max();
    let x_max = (points.len().saturating_sub(1)).max(1) as f64;

    let x_labels: Vec<String> = match series.points.as_slice() {
        [only] => vec![only.0.clone()],
        [first, .., last] => vec![first.0.clone(), last.0.clone()],
        [] => Vec::new(),
    };
    let y_labels = vec![
        format_currency(Decimal::ZERO),
        format_currency(max / Decimal::TWO),
        format_currency(max),
    ];

    let dataset = Dataset::default()
        .name(series.kind.as_str())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme::kind_style(series.kind))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(titled_block(title))
        .x_axis(
            Axis::default()
                .title("Month")
                .style(theme::dim_style())
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Amount")
                .style(theme::dim_style())
                .bounds([0.0, max.to_f64().unwrap_or(0.0).max(1.0)])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}
