//! # Order State
//!
//! The in-progress order (the cashier's cart) and its running total.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order State Operations                               │
//! │                                                                         │
//! │  Cashier Action           Operation              State Change           │
//! │  ──────────────           ─────────              ────────────           │
//! │                                                                         │
//! │  Tap product ────────────► add(product) ───────► qty += 1 or push(1)   │
//! │                                                                         │
//! │  Tap "+" ────────────────► increase(id) ───────► qty += 1              │
//! │                                                                         │
//! │  Tap "-" ────────────────► decrease(id) ───────► qty = max(1, qty - 1) │
//! │                                                                         │
//! │  Tap "Remove" ───────────► remove(id) ─────────► items.retain(..)      │
//! │                                                                         │
//! │  Order accepted (201) ───► clear() ────────────► items.clear()         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line item per product id, in first-added order
//! - Every stored quantity is ≥ 1
//! - `total()` is the exact sum of price × quantity (no intermediate rounding)

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{NewOrder, OrderLine, Product};

/// A product and how many of it are in the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineItem {
    /// Product data frozen when the item was first added.
    pub product: Product,

    /// Always ≥ 1.
    pub quantity: u32,
}

impl OrderLineItem {
    fn new(product: Product) -> Self {
        OrderLineItem {
            product,
            quantity: 1,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

/// The order being built at the register.
///
/// Owned by a single caller; wrap it in a store (see the terminal app's
/// `OrderStore`) to share it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderState {
    items: Vec<OrderLineItem>,
}

impl OrderState {
    /// Creates an empty order.
    pub fn new() -> Self {
        Self::default()
    }

    fn find_mut(&mut self, product_id: &str) -> CoreResult<&mut OrderLineItem> {
        self.items
            .iter_mut()
            .find(|item| item.product.id == product_id)
            .ok_or_else(|| CoreError::LineItemNotFound(product_id.to_string()))
    }

    /// Adds one unit of `product`.
    ///
    /// An existing line item for the same id is incremented; otherwise a new
    /// line item with quantity 1 is appended. The first-added product data is
    /// kept for the line item.
    pub fn add(&mut self, product: &Product) {
        match self.items.iter_mut().find(|item| item.product.id == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.items.push(OrderLineItem::new(product.clone())),
        }
    }

    /// Increments the quantity of an existing line item.
    ///
    /// ## Errors
    /// [`CoreError::LineItemNotFound`] if the id is not in the order. The
    /// order is unchanged in that case.
    pub fn increase(&mut self, product_id: &str) -> CoreResult<u32> {
        let item = self.find_mut(product_id)?;
        item.quantity = item.quantity.saturating_add(1);
        Ok(item.quantity)
    }

    /// Decrements the quantity of an existing line item, never below 1.
    ///
    /// Decreasing a line item at quantity 1 leaves it at 1; use
    /// [`OrderState::remove`] to take it out of the order.
    ///
    /// ## Errors
    /// [`CoreError::LineItemNotFound`] if the id is not in the order.
    pub fn decrease(&mut self, product_id: &str) -> CoreResult<u32> {
        let item = self.find_mut(product_id)?;
        item.quantity = item.quantity.saturating_sub(1).max(1);
        Ok(item.quantity)
    }

    /// Drops the line item for `product_id`. Absent ids are a no-op.
    pub fn remove(&mut self, product_id: &str) -> Option<OrderLineItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.product.id == product_id)?;
        Some(self.items.remove(index))
    }

    /// Empties the order.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Exact sum of price × quantity.
    pub fn total(&self) -> Money {
        self.items.iter().map(OrderLineItem::line_total).sum()
    }

    /// Line items in the order they were first added.
    pub fn items(&self) -> &[OrderLineItem] {
        &self.items
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Quantity of one product, `None` if absent.
    pub fn quantity_of(&self, product_id: &str) -> Option<u32> {
        self.items
            .iter()
            .find(|item| item.product.id == product_id)
            .map(|item| item.quantity)
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Builds the `POST /Order` payload.
    ///
    /// ## Errors
    /// [`CoreError::EmptyOrder`] when there is nothing to submit. This check
    /// runs before any request is made.
    pub fn to_submission(
        &self,
        id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> CoreResult<NewOrder> {
        if self.is_empty() {
            return Err(CoreError::EmptyOrder);
        }

        let products = self
            .items
            .iter()
            .map(|item| OrderLine {
                product_id: item.product.id.clone(),
                product_name: item.product.name.clone(),
                price: item.product.price.into(),
                quantity: item.quantity,
            })
            .collect();

        Ok(NewOrder {
            products,
            total: self.total().to_decimal_string(),
            created_at,
            id: id.into(),
        })
    }
}

/// Order totals for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub item_count: usize,
    pub total_quantity: u64,
    pub total: Money,
}

impl From<&OrderState> for OrderSummary {
    fn from(order: &OrderState) -> Self {
        OrderSummary {
            item_count: order.len(),
            total_quantity: order.total_quantity(),
            total: order.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
