//! # Tally Terminal Library
//!
//! The cashier terminal: command line parsing, configuration, state, and the
//! interactive shell.
//!
//! ## Module Organization
//! ```text
//! tally_terminal_lib/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap definitions
//! ├── config.rs       ◄─── tally.toml + TALLY_* environment
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── order.rs    ◄─── OrderStore (Arc<Mutex<OrderState>> + watch)
//! │   ├── catalog.rs  ◄─── CatalogState
//! │   ├── history.rs  ◄─── HistoryState
//! │   └── config.rs   ◄─── ConfigState
//! ├── commands/       ◄─── One function per cashier action
//! ├── display.rs      ◄─── Text rendering of command results
//! ├── shell.rs        ◄─── Interactive session
//! └── error.rs        ◄─── CommandError for everything the cashier sees
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod shell;
pub mod state;

use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use commands::{auth, history, product, receipt, stats};
use config::TerminalConfig;
use error::{CommandError, CommandResult};
use shell::Shell;
use state::{CatalogState, ConfigState, HistoryState};
use tally_api::ApiClient;

/// Runs the terminal.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Terminal Startup                                  │
/// │                                                                         │
/// │  1. Parse Command Line ───────────────────────────────────────────────► │
/// │  2. Initialize Logging (stderr, RUST_LOG or default filter) ──────────► │
/// │  3. Load Config (defaults → tally.toml → TALLY_* → validate) ─────────► │
/// │  4. Build ApiClient (base URL, request timeout) ──────────────────────► │
/// │  5. Run the shell, or one command and exit ───────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = e.code.as_str(), message = %e.message, "Command failed");
            eprintln!("error [{}]: {}", e.code.as_str(), e.message);
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tally=trace` - Show trace for tally crates only
/// - Default: INFO, with debug for tally crates
///
/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tally=debug,reqwest=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(cli: Cli) -> CommandResult<()> {
    let config = TerminalConfig::load(cli.config.as_deref())?;
    let api = ApiClient::new(config.api_config())?;
    let config = ConfigState::new(config);
    info!(base_url = %api.base_url(), "Tally terminal ready");

    let json = cli.json;
    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => {
            let shell = Shell::new(api, config);
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            shell
                .run(input, tokio::io::stdout())
                .await
                .map_err(|e| CommandError::internal(format!("Terminal I/O failed: {e}")))?;
        }
        Command::Products => {
            let products = product::refresh_products(&api, &CatalogState::new()).await;
            emit(json, products.as_slice(), display::products)?;
        }
        Command::Product { product_id } => {
            let product = product::get_product(&api, &CatalogState::new(), &product_id).await?;
            emit(json, &product, display::product)?;
        }
        Command::History => {
            let records = history::refresh_history(&api, &HistoryState::new()).await;
            emit(json, records.as_slice(), display::history)?;
        }
        Command::Stats { days } => {
            let orders = HistoryState::new();
            history::refresh_history(&api, &orders).await;
            let summary = stats::get_stats(&orders, &config, days, &Local::now())?;
            emit(json, &summary, display::stats)?;
        }
        Command::Login { username, password } => {
            let session = auth::login(&api, &config, &username, &password).await?;
            emit(json, &session, |s| display::session(Some(s)))?;
        }
        Command::Logout => {
            auth::logout(&api, &config)?;
            emit(json, &(), |_| "Logged out.\n".to_string())?;
        }
        Command::Whoami => {
            let session = auth::whoami(&api, &config)?;
            emit(json, &session, |s| display::session(s.as_ref()))?;
        }
        Command::Receipt { order_id, out } => {
            let output = receipt::receipt(
                &api,
                &HistoryState::new(),
                &config,
                &order_id,
                out.as_deref(),
            )
            .await?;
            emit(json, &output, display::receipt)?;
        }
    }
    Ok(())
}

/// Prints a one-shot result as JSON or text.
fn emit<T, F>(json: bool, value: &T, render: F) -> CommandResult<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    let text = if json {
        let mut body = serde_json::to_string_pretty(value)
            .map_err(|e| CommandError::internal(format!("Could not encode output: {e}")))?;
        body.push('\n');
        body
    } else {
        render(value)
    };
    print!("{text}");
    Ok(())
}
