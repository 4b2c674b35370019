//! # Domain Types
//!
//! Core domain types used throughout Tally POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Order       │   │   NewOrder      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id (UUID v4)   │       │
//! │  │  name           │   │  created_at     │   │  created_at     │       │
//! │  │  price (Money)  │   │  products[]     │   │  products[]     │       │
//! │  │  image          │   │  total (text)   │   │  total "8.00"   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ ProductRecord   │   │   OrderLine     │   │  Coordinates    │       │
//! │  │  (wire shape)   │   │  (snapshot)     │   │  lat / lon      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! An `OrderLine` freezes product id, name, price and quantity at submission
//! time. Later catalog changes never alter a submitted order.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, ValidationError};
use crate::money::Money;

// =============================================================================
// Decimal Text
// =============================================================================

/// A decimal amount as it appears on the wire.
///
/// The backend sends prices and totals as strings (`"19.99"`), but older
/// records sometimes carry plain JSON numbers. Both are kept verbatim and
/// parsed on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DecimalText {
    /// `"19.99"`
    Text(String),
    /// `19.99`
    Number(serde_json::Number),
}

impl DecimalText {
    /// Returns the amount as text, exactly as received.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            DecimalText::Text(text) => Cow::Borrowed(text.as_str()),
            DecimalText::Number(number) => Cow::Owned(number.to_string()),
        }
    }

    /// Parses the amount into exact [`Money`].
    pub fn to_money(&self) -> Result<Money, ValidationError> {
        Money::parse_decimal(&self.as_text())
    }
}

impl Default for DecimalText {
    fn default() -> Self {
        DecimalText::Text(String::new())
    }
}

impl From<Money> for DecimalText {
    fn from(amount: Money) -> Self {
        DecimalText::Text(amount.to_decimal_string())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as returned by `GET /Product`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    #[serde(default)]
    pub product_name: String,
    pub price: DecimalText,
    #[serde(default)]
    pub product_image: String,
}

/// A product available for sale, with its price already parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Identifier assigned by the remote catalog.
    pub id: String,

    /// Display name shown to the cashier and on receipts.
    pub name: String,

    /// Unit price.
    pub price: Money,

    /// Image URL.
    pub image: String,
}

impl Product {
    /// Creates a product directly (used by tests and demo data).
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            price,
            image: String::new(),
        }
    }
}

impl TryFrom<ProductRecord> for Product {
    type Error = CoreError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let price = record
            .price
            .to_money()
            .map_err(|err| CoreError::InvalidAmount {
                value: record.price.as_text().into_owned(),
                reason: err.to_string(),
            })?;

        Ok(Product {
            id: record.id,
            name: record.product_name,
            price,
            image: record.product_image,
        })
    }
}

// =============================================================================
// Submitted Orders
// =============================================================================

/// One line of a submitted order, frozen at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub price: DecimalText,
    pub quantity: u32,
}

impl OrderLine {
    /// Unit price × quantity, if the price parses.
    pub fn line_total(&self) -> Option<Money> {
        self.price
            .to_money()
            .ok()
            .map(|price| price.multiply_quantity(self.quantity))
    }
}

/// An order as stored by the remote `/Order` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "Products", default)]
    pub products: Vec<OrderLine>,

    /// Kept verbatim; records created before totals were submitted have none.
    #[serde(rename = "Total", default)]
    pub total: DecimalText,
}

impl Order {
    /// The parsed total, or `None` if `Total` is missing or malformed.
    pub fn total_amount(&self) -> Option<Money> {
        self.total.to_money().ok()
    }
}

/// The body of `POST /Order`.
///
/// Built by [`crate::order::OrderState::to_submission`]; never constructed
/// from an empty order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    #[serde(rename = "Products")]
    pub products: Vec<OrderLine>,

    /// Exact total with two fractional digits.
    #[serde(rename = "Total")]
    pub total: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    pub id: String,
}

// =============================================================================
// Location
// =============================================================================

/// A device position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Coordinates {
            latitude,
            longitude,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_record_with_string_price() {
        let record: ProductRecord = serde_json::from_value(json!({
            "id": "1",
            "productName": "Iced Latte",
            "price": "3.50",
            "productImage": "https://img.example/latte.png"
        }))
        .unwrap();

        let product = Product::try_from(record).unwrap();
        assert_eq!(product.name, "Iced Latte");
        assert_eq!(product.price.cents(), 350);
        assert_eq!(product.image, "https://img.example/latte.png");
    }

    #[test]
    fn test_product_record_with_numeric_price() {
        let record: ProductRecord =
            serde_json::from_value(json!({"id": "2", "productName": "Tea", "price": 1.25}))
                .unwrap();
        assert_eq!(Product::try_from(record).unwrap().price.cents(), 125);
    }

    #[test]
    fn test_product_record_with_bad_price() {
        let record: ProductRecord =
            serde_json::from_value(json!({"id": "3", "productName": "Mystery", "price": "free"}))
                .unwrap();
        let err = Product::try_from(record).unwrap_err();
        assert!(matches!(err, CoreError::InvalidAmount { ref value, .. } if value == "free"));
    }

    #[test]
    fn test_order_decodes_remote_shape() {
        let order: Order = serde_json::from_value(json!({
            "id": "7",
            "createdAt": "2026-10-18T14:30:00.000Z",
            "Products": [
                {"productId": "1", "productName": "Latte", "price": "3.50", "quantity": 2}
            ],
            "Total": "7.00"
        }))
        .unwrap();

        assert_eq!(order.products.len(), 1);
        assert_eq!(order.products[0].line_total(), Some(Money::from_cents(700)));
        assert_eq!(order.total_amount(), Some(Money::from_cents(700)));
    }

    #[test]
    fn test_order_without_total_has_no_amount() {
        let order: Order = serde_json::from_value(json!({
            "id": "8",
            "createdAt": "2026-10-18T09:00:00Z",
            "Products": []
        }))
        .unwrap();
        assert_eq!(order.total_amount(), None);
    }

    #[test]
    fn test_new_order_wire_names() {
        let created_at = "2026-10-18T14:30:00Z".parse().unwrap();
        let payload = NewOrder {
            products: vec![OrderLine {
                product_id: "1".into(),
                product_name: "Latte".into(),
                price: Money::from_cents(350).into(),
                quantity: 2,
            }],
            total: "7.00".into(),
            created_at,
            id: "abc".into(),
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["Total"], "7.00");
        assert_eq!(value["id"], "abc");
        assert_eq!(value["Products"][0]["productId"], "1");
        assert_eq!(value["Products"][0]["price"], "3.50");
        assert_eq!(value["Products"][0]["quantity"], 2);
        assert!(value["createdAt"].as_str().unwrap().starts_with("2026-10-18T14:30:00"));
    }
}
