//! # Receipt Commands
//!
//! Writes an HTML receipt for the external PDF/share tooling, or returns a
//! text receipt for the screen.

use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use tracing::{debug, info};

use crate::commands::history::refresh_history;
use crate::error::{CommandError, CommandResult, ErrorCode};
use crate::state::{ConfigState, HistoryState};
use tally_api::ApiClient;
use tally_core::receipt::{render_receipt_html, render_receipt_text};
use tally_core::validation::validate_order_id;
use tally_core::Order;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ReceiptOutput {
    /// HTML written to this file.
    Written { path: PathBuf },
    /// Plain text for the terminal.
    Text { body: String },
}

/// Finds an order locally, refreshing the history once if it is missing.
async fn find_order(
    api: &ApiClient,
    history: &HistoryState,
    order_id: &str,
) -> CommandResult<Order> {
    if let Some(order) = history.find(order_id) {
        return Ok(order);
    }

    debug!(order_id = %order_id, "Order not in local history; refreshing");
    refresh_history(api, history).await;
    history
        .find(order_id)
        .ok_or_else(|| CommandError::not_found("Order", order_id))
}

/// Renders the receipt for `order_id`.
///
/// With `path`, writes HTML there; otherwise returns plain text.
pub async fn receipt(
    api: &ApiClient,
    history: &HistoryState,
    config: &ConfigState,
    order_id: &str,
    path: Option<&Path>,
) -> CommandResult<ReceiptOutput> {
    debug!(order_id = %order_id, ?path, "receipt command");
    validate_order_id(order_id)?;

    let order = find_order(api, history, order_id).await?;

    match path {
        Some(path) => {
            let html = render_receipt_html(&order, config.store_name(), &Local);
            std::fs::write(path, html).map_err(|e| {
                CommandError::new(
                    ErrorCode::StorageError,
                    format!("Could not write {}: {e}", path.display()),
                )
            })?;
            info!(order_id = %order_id, path = ?path, "Receipt written");
            Ok(ReceiptOutput::Written {
                path: path.to_path_buf(),
            })
        }
        None => Ok(ReceiptOutput::Text {
            body: render_receipt_text(&order, config.store_name(), &Local),
        }),
    }
}
