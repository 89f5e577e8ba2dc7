mod analytics;
mod config;
mod db;
mod export;
mod format;
mod logging;
mod models;
mod run;
mod ui;


use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::load()?;
    if let Err(e) = logging::init(&config) {
        eprintln!("Warning: logging disabled: {e}");
    }
    let ledger = db::Ledger::open(&config.db_path)?;
    tracing::info!(
        db = %ledger.path().display(),
        version = env!("CARGO_PKG_VERSION"),
        "flowledger started"
    );

    match args.len() {
        1 => run::as_tui(&ledger),
        2.. => run::as_cli(&args, &ledger),
        _ => {
            eprintln!("Usage: flowledger [command]");
            Ok(())
        }
    }
}
