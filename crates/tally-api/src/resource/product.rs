//! # Product Client
//!
//! Reads the catalog from `GET /Product`.
//!
//! Records are decoded one at a time. A record with a missing id or an
//! unparseable price is logged and skipped so a single bad row never hides
//! the rest of the catalog.

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::client::ApiClient;
use crate::error::ApiResult;
use tally_core::{Product, ProductRecord};

const PATH: &str = "Product";

/// Client for the `/Product` collection.
#[derive(Debug, Clone)]
pub struct ProductClient {
    api: ApiClient,
}

impl ProductClient {
    pub fn new(api: ApiClient) -> Self {
        ProductClient { api }
    }

    /// Fetches the full catalog.
    ///
    /// ## Errors
    /// Transport failures, non-2xx statuses and a body that is not a JSON
    /// array. Individual bad records are skipped, not reported.
    pub async fn list(&self) -> ApiResult<Vec<Product>> {
        let records: Vec<Value> = self.api.get_json(PATH).await?;
        let received = records.len();

        let products: Vec<Product> = records.into_iter().filter_map(decode_product).collect();

        debug!(received, kept = products.len(), "Fetched products");
        Ok(products)
    }

    /// Like [`list`](Self::list), but any failure yields an empty catalog.
    pub async fn list_or_empty(&self) -> Vec<Product> {
        match self.list().await {
            Ok(products) => products,
            Err(e) => {
                error!(error = %e, "Failed to fetch products");
                Vec::new()
            }
        }
    }
}

fn decode_product(value: Value) -> Option<Product> {
    let record: ProductRecord = match serde_json::from_value(value) {
        Ok(record) => record,
        Err(e) => {
            warn!(error = %e, "Skipping malformed product record");
            return None;
        }
    };

    let id = record.id.clone();
    match Product::try_from(record) {
        Ok(product) => Some(product),
        Err(e) => {
            warn!(product_id = %id, error = %e, "Skipping product with bad price");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_product_skips_bad_rows() {
        assert!(decode_product(json!({"id": "1", "productName": "Tea", "price": "1.25"})).is_some());
        assert!(decode_product(json!({"productName": "No id", "price": "1.00"})).is_none());
        assert!(decode_product(json!({"id": "2", "productName": "Free?", "price": "free"})).is_none());
        assert!(decode_product(json!("not an object")).is_none());
    }
}
