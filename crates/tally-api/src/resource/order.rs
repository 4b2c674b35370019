//! # Order Client
//!
//! Order history (`GET /Order`) and order submission (`POST /Order`).
//!
//! ## Submission Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        POST /Order                                      │
//! │                                                                         │
//! │   NewOrder {Products, Total, createdAt, id}                            │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   201 Created ──► Ok(Order)   caller clears the in-progress order      │
//! │   anything else ► Err(UnexpectedStatus)   order is kept for retry      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only `201` counts as success. A `200` from a misbehaving proxy is treated
//! as a failure so the cashier never loses an order that was not created.

use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::client::{expect_status, ApiClient};
use crate::error::ApiResult;
use tally_core::{DecimalText, NewOrder, Order};

const PATH: &str = "Order";

/// Client for the `/Order` collection.
#[derive(Debug, Clone)]
pub struct OrderClient {
    api: ApiClient,
}

impl OrderClient {
    pub fn new(api: ApiClient) -> Self {
        OrderClient { api }
    }

    /// Fetches every submitted order. Records that do not decode are skipped.
    pub async fn list(&self) -> ApiResult<Vec<Order>> {
        let records: Vec<Value> = self.api.get_json(PATH).await?;
        let received = records.len();

        let orders: Vec<Order> = records
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<Order>(value) {
                Ok(order) => Some(order),
                Err(e) => {
                    warn!(error = %e, "Skipping malformed order record");
                    None
                }
            })
            .collect();

        debug!(received, kept = orders.len(), "Fetched orders");
        Ok(orders)
    }

    /// Like [`list`](Self::list), but any failure yields an empty history.
    pub async fn list_or_empty(&self) -> Vec<Order> {
        match self.list().await {
            Ok(orders) => orders,
            Err(e) => {
                error!(error = %e, "Failed to fetch orders");
                Vec::new()
            }
        }
    }

    /// Submits a new order.
    ///
    /// Returns the record echoed by the backend, or the submitted payload
    /// itself when the echo cannot be decoded.
    ///
    /// ## Errors
    /// - [`ApiError::UnexpectedStatus`](crate::ApiError::UnexpectedStatus) for any status other than 201
    /// - transport failures and timeouts
    pub async fn create(&self, payload: &NewOrder) -> ApiResult<Order> {
        let url = self.api.endpoint(PATH)?;
        debug!(%url, order_id = %payload.id, lines = payload.products.len(), "POST");

        let response = self
            .api
            .request(Method::POST, url)
            .json(payload)
            .send()
            .await?;
        let response = expect_status(Method::POST, StatusCode::CREATED, response)?;

        let body = response.bytes().await?;
        let created = match serde_json::from_slice::<Order>(&body) {
            Ok(order) => order,
            Err(e) => {
                debug!(error = %e, "Order echo not decodable; using submitted payload");
                submitted_order(payload)
            }
        };

        info!(order_id = %created.id, total = %payload.total, "Order created");
        Ok(created)
    }
}

fn submitted_order(payload: &NewOrder) -> Order {
    Order {
        id: payload.id.clone(),
        created_at: payload.created_at,
        products: payload.products.clone(),
        total: DecimalText::Text(payload.total.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{Money, OrderLine};

    #[test]
    fn test_submitted_order_mirrors_payload() {
        let payload = NewOrder {
            products: vec![OrderLine {
                product_id: "1".into(),
                product_name: "Latte".into(),
                price: Money::from_cents(350).into(),
                quantity: 2,
            }],
            total: "7.00".into(),
            created_at: "2026-10-18T10:00:00Z".parse().unwrap(),
            id: "abc".into(),
        };

        let order = submitted_order(&payload);
        assert_eq!(order.id, "abc");
        assert_eq!(order.total_amount(), Some(Money::from_cents(700)));
        assert_eq!(order.products, payload.products);
    }
}
