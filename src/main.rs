//! Timeline capture replay - Entry Point

use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tlcap::interceptor::operations::OPERATION_NAMES;
use tlcap::integration::{process_lines, Dispatcher};
use tlcap::model::AppError;
use tlcap::store::Stores;
use tracing::{info, warn};

/// Replay captured GraphQL timeline exchanges and print the extracted entities
#[derive(Parser, Debug)]
#[command(name = "tlcap")]
#[command(version)]
#[command(about = "Extract posts and users from captured timeline responses")]
pub struct Args {
    /// Path to JSONL capture file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print only this operation's store
    #[arg(long, value_parser = OPERATION_NAMES)]
    pub store: Option<String>,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// Do not intercept this operation (repeatable)
    #[arg(long, value_parser = OPERATION_NAMES)]
    pub disable: Vec<String>,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = tlcap::config::load_config_with_precedence(args.config.clone())?;
        let merged = tlcap::config::merge_config(config_file);
        let with_env = tlcap::config::apply_env_overrides(merged);
        tlcap::config::apply_cli_overrides(with_env, args.disable.clone(), args.compact)
    };
    tlcap::config::validate(&config)?;

    tlcap::logging::init(&config.log_file_path, None)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let mut input_source = tlcap::source::detect_input_source(args.file.clone())?;
    let lines = input_source.read_all_lines()?;

    let stores = Stores::new();
    let output = replay(lines, &stores, &config.disabled_operations, args.store.as_deref())?;

    let rendered = if config.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}")?;

    Ok(())
}

/// Dispatch every capture line into `stores` and export the result.
fn replay<L: AsRef<[u8]>>(
    lines: Vec<L>,
    stores: &Stores,
    disabled: &[String],
    only: Option<&str>,
) -> Result<serde_json::Value, AppError> {
    let dispatcher = Dispatcher::for_stores(stores, disabled)?;

    let (exchanges, errors) = process_lines(lines, 1);
    if !errors.is_empty() {
        warn!(count = errors.len(), "Capture contained malformed lines");
    }

    let summary = dispatcher.replay(&exchanges);
    info!(
        exchanges = summary.exchanges,
        unmatched = summary.unmatched,
        entities = summary.entities,
        failures = summary.failures,
        "Replay complete"
    );

    Ok(serde_json::Value::Object(stores.export(only)?))
}
