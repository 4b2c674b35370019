//! # Command Line

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally POS cashier terminal.
#[derive(Debug, Parser)]
#[command(name = "tally", version, about)]
pub struct Cli {
    /// Config file (default: tally.toml in the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print one-shot results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Defaults to `shell`
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Interactive cashier session
    Shell,

    /// List the product catalog
    Products,

    /// Show one product
    Product { product_id: String },

    /// List submitted orders
    History,

    /// Today's figures and revenue charts
    Stats {
        /// Length of the daily chart
        #[arg(long)]
        days: Option<u32>,
    },

    /// Log in on this terminal
    Login { username: String, password: String },

    /// End the session on this terminal
    Logout,

    /// Show who is logged in
    Whoami,

    /// Print a receipt, or write it as HTML
    Receipt {
        order_id: String,

        /// Write HTML to this file instead of printing text
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
}
