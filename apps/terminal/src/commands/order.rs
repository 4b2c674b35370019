//! # Order Commands
//!
//! Building the order at the register and submitting it.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Lifecycle                                      │
//! │                                                                         │
//! │  ┌──────────┐  add   ┌──────────┐ checkout ┌──────────┐  201  ┌──────┐ │
//! │  │  Empty   │───────►│ In Order │─────────►│Submitting│──────►│Empty │ │
//! │  └──────────┘        └──────────┘          └──────────┘       └──────┘ │
//! │       ▲                │  ▲   │                 │                       │
//! │       │      inc / dec │  │   │ rm (last)       │ anything else         │
//! │       │                └──┘   │                 ▼                       │
//! │       └───────────────────────┘           order kept, error shown      │
//! │                                                                         │
//! │  checkout on Empty  ──► EMPTY_ORDER, nothing sent                      │
//! │  checkout while Submitting ──► CHECKOUT_IN_PROGRESS                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{CommandError, CommandResult, ErrorCode};
use crate::state::{CatalogState, HistoryState, OrderStore};
use tally_api::ApiClient;
use tally_core::validation::validate_product_id;
use tally_core::{OrderLineItem, OrderState, OrderSummary};

/// One line of the order, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineDto {
    pub product_id: String,
    pub name: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
}

impl From<&OrderLineItem> for OrderLineDto {
    fn from(item: &OrderLineItem) -> Self {
        OrderLineDto {
            product_id: item.product.id.clone(),
            name: item.product.name.clone(),
            unit_price: item.product.price.to_decimal_string(),
            quantity: item.quantity,
            line_total: item.line_total().to_decimal_string(),
        }
    }
}

/// The whole order with totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub items: Vec<OrderLineDto>,
    pub item_count: usize,
    pub total_quantity: u64,
    pub total: String,
}

impl From<&OrderState> for OrderView {
    fn from(order: &OrderState) -> Self {
        let summary = OrderSummary::from(order);
        OrderView {
            items: order.items().iter().map(OrderLineDto::from).collect(),
            item_count: summary.item_count,
            total_quantity: summary.total_quantity,
            total: summary.total.to_decimal_string(),
        }
    }
}

/// Outcome of a successful checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResult {
    pub order_id: String,
    pub total: String,
    pub created_at: DateTime<Utc>,
}

/// Current order contents.
pub fn get_order(store: &OrderStore) -> OrderView {
    debug!("get_order command");
    store.with_order(|order| OrderView::from(order))
}

/// Adds one unit of a catalog product.
pub fn add_to_order(
    catalog: &CatalogState,
    store: &OrderStore,
    product_id: &str,
) -> CommandResult<OrderView> {
    debug!(product_id = %product_id, "add_to_order command");
    validate_product_id(product_id)?;

    let product = catalog
        .find(product_id)
        .ok_or_else(|| CommandError::not_found("Product", product_id))?;

    Ok(store.with_order_mut(|order| {
        order.add(&product);
        OrderView::from(&*order)
    }))
}

/// Adds one more unit of a product already in the order.
pub fn increase_item(store: &OrderStore, product_id: &str) -> CommandResult<OrderView> {
    debug!(product_id = %product_id, "increase_item command");
    store.with_order_mut(|order| {
        order.increase(product_id)?;
        Ok(OrderView::from(&*order))
    })
}

/// Takes one unit away, stopping at 1.
pub fn decrease_item(store: &OrderStore, product_id: &str) -> CommandResult<OrderView> {
    debug!(product_id = %product_id, "decrease_item command");
    store.with_order_mut(|order| {
        order.decrease(product_id)?;
        Ok(OrderView::from(&*order))
    })
}

/// Drops a product from the order. Unknown ids leave the order as it is.
pub fn remove_item(store: &OrderStore, product_id: &str) -> OrderView {
    debug!(product_id = %product_id, "remove_item command");
    store.with_order_mut(|order| {
        if order.remove(product_id).is_none() {
            debug!(product_id = %product_id, "Nothing to remove");
        }
        OrderView::from(&*order)
    })
}

/// Empties the order without submitting it.
pub fn clear_order(store: &OrderStore) -> OrderView {
    debug!("clear_order command");
    store.with_order_mut(|order| {
        order.clear();
        OrderView::from(&*order)
    })
}

/// Submits the order.
///
/// ## Flow
/// 1. Refuse if another checkout is running
/// 2. Build the payload (fails on an empty order, before any request)
/// 3. `POST /Order`; only `201 Created` counts
/// 4. On success clear the order and record it in the history
///
/// On any failure the order is left exactly as it was.
pub async fn checkout(
    api: &ApiClient,
    store: &OrderStore,
    history: &HistoryState,
) -> CommandResult<CheckoutResult> {
    debug!("checkout command");

    let _guard = store.begin_submission().ok_or_else(|| {
        CommandError::new(
            ErrorCode::CheckoutInProgress,
            "A checkout is already in progress",
        )
    })?;

    let order_id = Uuid::new_v4().to_string();
    let payload = store.with_order(|order| order.to_submission(order_id, Utc::now()))?;

    let created = match api.orders().create(&payload).await {
        Ok(created) => created,
        Err(e) => {
            warn!(order_id = %payload.id, error = %e, "Checkout failed; order kept");
            return Err(e.into());
        }
    };

    store.with_order_mut(OrderState::clear);

    info!(order_id = %payload.id, total = %payload.total, "Order submitted");
    history.push(created);

    Ok(CheckoutResult {
        order_id: payload.id,
        total: payload.total,
        created_at: payload.created_at,
    })
}
