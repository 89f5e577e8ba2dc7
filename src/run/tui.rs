use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::analytics::ChartKind;
use crate::db::Ledger;
use crate::ui::app::{App, EntryField, ExportField, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(ledger: &Ledger) -> Result<()> {
    let mut app = App::new();
    app.refresh_all(ledger)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, ledger);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "terminal UI stopped");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    ledger: &Ledger,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab + status + command bars, table borders and header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            let handled = match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, ledger),
                InputMode::Command => handle_command_input(key, app, ledger),
                InputMode::Search => handle_search_input(key, app, ledger),
                InputMode::Editing => handle_editing_input(key, app, ledger),
                InputMode::Confirm => handle_confirm_input(key, app, ledger),
            };
            // Storage failures are reported, never fatal
            if let Err(e) = handled {
                tracing::error!(error = %e, "operation failed");
                app.input_mode = InputMode::Normal;
                app.set_status(format!("Database error: {e}"));
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, ledger: &Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
            app.search_input.clear();
            app.screen = Screen::History;
        }
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('1') => commands::switch_screen(app, ledger, Screen::Entry)?,
        KeyCode::Char('2') => commands::switch_screen(app, ledger, Screen::History)?,
        KeyCode::Char('3') => commands::switch_screen(app, ledger, Screen::Export)?,
        KeyCode::Char('4') => commands::switch_screen(app, ledger, Screen::Charts)?,
        KeyCode::Tab => cycle_screen(app, ledger, 1)?,
        KeyCode::BackTab => cycle_screen(app, ledger, -1)?,
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => {
            app.status_message.clear();
            if app.screen == Screen::History && !app.search_input.is_empty() {
                app.search_input.clear();
                app.refresh_transactions(ledger)?;
            }
        }
        _ => match app.screen {
            Screen::Entry => handle_entry_keys(key, app, ledger)?,
            Screen::History => handle_history_keys(key, app),
            Screen::Export => handle_export_keys(key, app, ledger)?,
            Screen::Charts => handle_chart_keys(key, app, ledger)?,
        },
    }
    Ok(())
}

fn cycle_screen(app: &mut App, ledger: &Ledger, delta: isize) -> Result<()> {
    let screens = Screen::all();
    let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0) as isize;
    let next = (idx + delta).rem_euclid(screens.len() as isize) as usize;
    commands::switch_screen(app, ledger, screens[next])
}

fn handle_entry_keys(key: event::KeyEvent, app: &mut App, ledger: &Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.entry_next_field(1),
        KeyCode::Char('k') | KeyCode::Up => app.entry_next_field(-1),
        KeyCode::Char('t') | KeyCode::Char(' ') => {
            app.entry_kind = app.entry_kind.toggled();
        }
        KeyCode::Char('i') | KeyCode::Enter => {
            if app.entry_field == EntryField::Kind && key.code == KeyCode::Enter {
                app.submit_entry(ledger)?;
            } else {
                app.input_mode = InputMode::Editing;
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_history_keys(key: event::KeyEvent, app: &mut App) {
    let len = app.transactions.len();
    let page = app.visible_rows.max(1);
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            scroll_down(&mut app.transaction_index, &mut app.transaction_scroll, len, page);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            scroll_up(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        KeyCode::Char('g') => scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll),
        KeyCode::Char('G') => {
            scroll_to_bottom(&mut app.transaction_index, &mut app.transaction_scroll, len, page);
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..page / 2 {
                scroll_down(&mut app.transaction_index, &mut app.transaction_scroll, len, page);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..page / 2 {
                scroll_up(&mut app.transaction_index, &mut app.transaction_scroll);
            }
        }
        KeyCode::Char(' ') => {
            app.toggle_selection();
            scroll_down(&mut app.transaction_index, &mut app.transaction_scroll, len, page);
        }
        KeyCode::Char('D') | KeyCode::Delete => app.request_delete(),
        _ => {}
    }
}

fn handle_export_keys(key: event::KeyEvent, app: &mut App, ledger: &Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.export_next_field(1),
        KeyCode::Char('k') | KeyCode::Up => app.export_next_field(-1),
        KeyCode::Char('i') | KeyCode::Enter => app.input_mode = InputMode::Editing,
        KeyCode::Char('x') => app.run_export(ledger)?,
        KeyCode::Char('c') => {
            app.export_value_mut().clear();
        }
        _ => {}
    }
    Ok(())
}

fn handle_chart_keys(key: event::KeyEvent, app: &mut App, ledger: &Ledger) -> Result<()> {
    let last = ChartKind::all().len() - 1;
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            let next = (app.chart_index + 1).min(last);
            app.select_chart(ledger, next)?;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            let prev = app.chart_index.saturating_sub(1);
            app.select_chart(ledger, prev)?;
        }
        KeyCode::Char('g') => app.select_chart(ledger, 0)?,
        KeyCode::Char('G') => app.select_chart(ledger, last)?,
        KeyCode::Char('r') => app.refresh_chart(ledger)?,
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, ledger: &Ledger) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, ledger)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_search_input(key: event::KeyEvent, app: &mut App, ledger: &Ledger) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.search_input.clear();
            app.refresh_transactions(ledger)?;
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            live_search(app, ledger)?;
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            live_search(app, ledger)?;
        }
        _ => {}
    }
    Ok(())
}

fn live_search(app: &mut App, ledger: &Ledger) -> Result<()> {
    app.screen = Screen::History;
    app.transaction_index = 0;
    app.transaction_scroll = 0;
    app.refresh_transactions(ledger)
}

/// Typing into the focused form field on the Entry or Export screen.
fn handle_editing_input(key: event::KeyEvent, app: &mut App, ledger: &Ledger) -> Result<()> {
    match app.screen {
        Screen::Entry => match key.code {
            KeyCode::Enter => {
                app.entry_enter(ledger)?;
                if app.entry_field == EntryField::Amount && app.entry_amount.is_empty() {
                    app.input_mode = InputMode::Normal;
                }
            }
            KeyCode::Esc => app.input_mode = InputMode::Normal,
            KeyCode::Tab => app.entry_next_field(1),
            KeyCode::BackTab => app.entry_next_field(-1),
            KeyCode::Backspace => app.entry_pop(),
            KeyCode::Char(c) => app.entry_push(c),
            _ => {}
        },
        Screen::Export => match key.code {
            KeyCode::Enter => {
                if app.export_field == ExportField::Path {
                    app.input_mode = InputMode::Normal;
                    app.run_export(ledger)?;
                } else {
                    app.export_next_field(1);
                }
            }
            KeyCode::Esc => app.input_mode = InputMode::Normal,
            KeyCode::Tab => app.export_next_field(1),
            KeyCode::BackTab => app.export_next_field(-1),
            KeyCode::Backspace => {
                app.export_value_mut().pop();
            }
            KeyCode::Char(c) => app.export_value_mut().push(c),
            _ => {}
        },
        Screen::History | Screen::Charts => app.input_mode = InputMode::Normal,
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, ledger: &Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            if let Some(PendingAction::DeleteTransactions { ids }) = app.pending_action.take() {
                app.delete_transactions(ledger, &ids)?;
            }
        }
        _ => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
    }
    Ok(())
}
