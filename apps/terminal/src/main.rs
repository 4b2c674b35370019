//! # Tally Terminal Entry Point
//!
//! ```text
//! tally                      interactive shell (default)
//! tally products             list the catalog
//! tally stats --days 30      revenue figures
//! tally receipt 42 --out r.html
//! ```
//!
//! The actual setup is in lib.rs so it can be tested.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    tally_terminal_lib::run().await
}
