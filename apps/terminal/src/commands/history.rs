//! # History Commands
//!
//! Order history, refreshed on demand ("pull to refresh").

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::state::HistoryState;
use tally_api::ApiClient;
use tally_core::Order;

/// One submitted order, summarized for the history list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecordDto {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub item_count: usize,
    /// Exactly as stored; may be empty for old records.
    pub total: String,
}

impl From<&Order> for OrderRecordDto {
    fn from(order: &Order) -> Self {
        OrderRecordDto {
            id: order.id.clone(),
            created_at: order.created_at,
            item_count: order.products.len(),
            total: order.total.as_text().into_owned(),
        }
    }
}

fn newest_first(orders: &[Order]) -> Vec<OrderRecordDto> {
    let mut records: Vec<OrderRecordDto> = orders.iter().map(OrderRecordDto::from).collect();
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    records
}

/// Re-fetches the history. A failed fetch leaves only the orders created on
/// this terminal that the backend has not listed yet.
pub async fn refresh_history(api: &ApiClient, history: &HistoryState) -> Vec<OrderRecordDto> {
    debug!("refresh_history command");

    let orders = api.orders().list_or_empty().await;
    info!(count = orders.len(), "History refreshed");

    history.replace(orders);
    newest_first(&history.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::DecimalText;

    fn order(id: &str, at: &str) -> Order {
        Order {
            id: id.into(),
            created_at: at.parse().unwrap(),
            products: Vec::new(),
            total: DecimalText::Number(serde_json::Number::from(12)),
        }
    }

    #[test]
    fn test_history_is_newest_first() {
        let records = newest_first(&[
            order("a", "2026-10-16T09:00:00Z"),
            order("b", "2026-10-18T09:00:00Z"),
            order("c", "2026-10-17T09:00:00Z"),
        ]);

        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert_eq!(records[0].total, "12");
    }
}
