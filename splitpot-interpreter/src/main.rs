#![warn(clippy::uninlined_format_args)]

mod config;

use std::{borrow::Cow, env, fs, process};

use config::AppConfig;
use splitpot_application::LedgerProcessor;
use splitpot_infrastructure::SplitpotLedgerParser;
use splitpot_presentation::{ReportPresenter, format_ledger_parse_error};
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Cow<'static, str>>;

fn main() {
    init_logging();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

/// Logs go to stderr so the report on stdout stays clean; `RUST_LOG` sets the level.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> CliResult<()> {
    let Some(path) = env::args().nth(1) else {
        return Err("Usage: splitpot <file.ledger>".into());
    };

    let config = AppConfig::from_env().map_err(|err| err.to_string())?;

    let source =
        fs::read_to_string(&path).map_err(|err| format!("Failed to read '{path}': {err}"))?;

    let processor = LedgerProcessor::new(&SplitpotLedgerParser);
    let book = processor
        .load_with_weights(&source, config.weights)
        .map_err(|err| format_ledger_parse_error(&err))?;

    let report = processor.report(&book);
    if !report.settle_up.is_fully_settled() {
        tracing::warn!(path = %path, "Ledger does not settle completely");
    }

    print!("{}", ReportPresenter::render(&report));
    Ok(())
}
