//! # Interactive Shell
//!
//! The cashier's session: one command per line, each awaited before the next
//! line is read.
//!
//! ```text
//! tally> products
//! tally> add 1
//! [order] 1 products, 1 units, total $2.50
//! tally> checkout
//! Order 5f0c… submitted, total $2.50.
//! [order] 0 products, 0 units, total $0.00
//! ```
//!
//! Failures are printed as `error [CODE]: message` and the shell keeps going.

use std::path::PathBuf;

use chrono::Local;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::commands::{auth, history, order, product, receipt, stats};
use crate::display;
use crate::error::{CommandError, CommandResult};
use crate::state::{CatalogState, ConfigState, HistoryState, OrderStore};
use tally_api::ApiClient;
use tally_core::OrderSummary;

const PROMPT: &str = "tally> ";

const HELP: &str = "\
Commands:
  products                 refresh and list the catalog
  product <id>             show one product
  add <id>                 add one unit of a product
  inc <id> | dec <id>      change the quantity of a line
  rm <id>                  remove a line
  cart                     show the current order
  clear                    empty the current order
  checkout                 submit the current order
  history                  refresh and list submitted orders
  receipt <id> [path]      show a receipt, or write it as HTML to <path>
  stats [days]             today's figures and revenue charts
  login <user> <password>  log in on this terminal
  logout | whoami          end or show the session
  help | quit
";

// =============================================================================
// Parsing
// =============================================================================

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Products,
    Product(String),
    Add(String),
    Increase(String),
    Decrease(String),
    Remove(String),
    Cart,
    Clear,
    Checkout,
    History,
    Receipt { order_id: String, path: Option<PathBuf> },
    Stats { days: Option<u32> },
    Login { username: String, password: String },
    Logout,
    Whoami,
    Help,
    Quit,
}

impl ShellCommand {
    /// Parses a line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> CommandResult<Option<ShellCommand>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or_default().to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        let command = match (verb.as_str(), args.as_slice()) {
            ("products", []) => ShellCommand::Products,
            ("product", [id]) => ShellCommand::Product(id.to_string()),
            ("add", [id]) => ShellCommand::Add(id.to_string()),
            ("inc", [id]) => ShellCommand::Increase(id.to_string()),
            ("dec", [id]) => ShellCommand::Decrease(id.to_string()),
            ("rm", [id]) => ShellCommand::Remove(id.to_string()),
            ("cart", []) => ShellCommand::Cart,
            ("clear", []) => ShellCommand::Clear,
            ("checkout", []) => ShellCommand::Checkout,
            ("history", []) => ShellCommand::History,
            ("receipt", [id]) => ShellCommand::Receipt {
                order_id: id.to_string(),
                path: None,
            },
            ("receipt", [id, path]) => ShellCommand::Receipt {
                order_id: id.to_string(),
                path: Some(PathBuf::from(path)),
            },
            ("stats", []) => ShellCommand::Stats { days: None },
            ("stats", [days]) => {
                let days = days.parse::<u32>().map_err(|_| {
                    CommandError::validation(format!("'{days}' is not a number of days"))
                })?;
                ShellCommand::Stats { days: Some(days) }
            }
            ("login", [username, password]) => ShellCommand::Login {
                username: username.to_string(),
                password: password.to_string(),
            },
            ("logout", []) => ShellCommand::Logout,
            ("whoami", []) => ShellCommand::Whoami,
            ("help" | "?", []) => ShellCommand::Help,
            ("quit" | "exit", []) => ShellCommand::Quit,
            (
                "products" | "product" | "add" | "inc" | "dec" | "rm" | "cart" | "clear" | "checkout"
                | "history" | "receipt" | "stats" | "login" | "logout" | "whoami" | "help"
                | "quit" | "exit",
                _,
            ) => {
                return Err(CommandError::validation(format!(
                    "Wrong arguments for '{verb}'. Type `help` for usage."
                )))
            }
            _ => {
                return Err(CommandError::validation(format!(
                    "Unknown command '{verb}'. Type `help` for usage."
                )))
            }
        };
        Ok(Some(command))
    }
}

// =============================================================================
// Shell
// =============================================================================

/// What to do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Print(String),
    Quit,
}

/// All state for one cashier session.
#[derive(Debug, Clone)]
pub struct Shell {
    api: ApiClient,
    order: OrderStore,
    catalog: CatalogState,
    history: HistoryState,
    config: ConfigState,
}

impl Shell {
    pub fn new(api: ApiClient, config: ConfigState) -> Self {
        Shell {
            api,
            order: OrderStore::new(),
            catalog: CatalogState::new(),
            history: HistoryState::new(),
            config,
        }
    }

    pub fn order(&self) -> &OrderStore {
        &self.order
    }

    pub fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn history(&self) -> &HistoryState {
        &self.history
    }

    /// Runs one command.
    pub async fn execute(&self, command: ShellCommand) -> CommandResult<Reply> {
        debug!(?command, "shell command");

        let text = match command {
            ShellCommand::Products => {
                display::products(&product::refresh_products(&self.api, &self.catalog).await)
            }
            ShellCommand::Product(id) => {
                display::product(&product::get_product(&self.api, &self.catalog, &id).await?)
            }
            ShellCommand::Add(id) => {
                order::add_to_order(&self.catalog, &self.order, &id)?;
                String::new()
            }
            ShellCommand::Increase(id) => {
                order::increase_item(&self.order, &id)?;
                String::new()
            }
            ShellCommand::Decrease(id) => {
                order::decrease_item(&self.order, &id)?;
                String::new()
            }
            ShellCommand::Remove(id) => {
                order::remove_item(&self.order, &id);
                String::new()
            }
            ShellCommand::Cart => display::order(&order::get_order(&self.order)),
            ShellCommand::Clear => {
                order::clear_order(&self.order);
                String::new()
            }
            ShellCommand::Checkout => display::checkout(
                &order::checkout(&self.api, &self.order, &self.history).await?,
            ),
            ShellCommand::History => {
                display::history(&history::refresh_history(&self.api, &self.history).await)
            }
            ShellCommand::Receipt { order_id, path } => display::receipt(
                &receipt::receipt(
                    &self.api,
                    &self.history,
                    &self.config,
                    &order_id,
                    path.as_deref(),
                )
                .await?,
            ),
            ShellCommand::Stats { days } => {
                history::refresh_history(&self.api, &self.history).await;
                display::stats(&stats::get_stats(
                    &self.history,
                    &self.config,
                    days,
                    &Local::now(),
                )?)
            }
            ShellCommand::Login { username, password } => {
                let session = auth::login(&self.api, &self.config, &username, &password).await?;
                display::session(Some(&session))
            }
            ShellCommand::Logout => {
                auth::logout(&self.api, &self.config)?;
                "Logged out.\n".to_string()
            }
            ShellCommand::Whoami => {
                display::session(auth::whoami(&self.api, &self.config)?.as_ref())
            }
            ShellCommand::Help => HELP.to_string(),
            ShellCommand::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Print(text))
    }

    /// Reads commands from `input` until end of input or `quit`.
    pub async fn run<R, W>(&self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Shell started");
        let mut changes = self.order.subscribe();
        let mut lines = input.lines();

        output.write_all(HELP.as_bytes()).await?;
        loop {
            output.write_all(PROMPT.as_bytes()).await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            let reply = match ShellCommand::parse(&line) {
                Ok(Some(command)) => self.execute(command).await,
                Ok(None) => continue,
                Err(e) => Err(e),
            };

            match reply {
                Ok(Reply::Print(text)) => output.write_all(text.as_bytes()).await?,
                Ok(Reply::Quit) => break,
                Err(e) => {
                    let notice = format!("error [{}]: {}\n", e.code.as_str(), e.message);
                    output.write_all(notice.as_bytes()).await?;
                }
            }

            if let Some(summary) = changed_summary(&mut changes) {
                output
                    .write_all(display::order_status(&summary).as_bytes())
                    .await?;
            }
        }

        output.flush().await?;
        info!("Shell finished");
        Ok(())
    }
}

fn changed_summary(changes: &mut watch::Receiver<OrderSummary>) -> Option<OrderSummary> {
    match changes.has_changed() {
        Ok(true) => Some(*changes.borrow_and_update()),
        _ => None,
    }
}
