//! # Product Commands
//!
//! Catalog refresh and the product detail view.
//!
//! A failed fetch yields an empty catalog rather than an error; the cashier
//! sees "no products" and can refresh again.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CommandError, CommandResult};
use crate::state::CatalogState;
use tally_api::ApiClient;
use tally_core::validation::validate_product_id;
use tally_core::Product;

/// Product DTO for display and `--json` output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    /// Two-decimal price, e.g. `"2.50"`.
    pub price: String,
    pub image: String,
}

impl From<&Product> for ProductDto {
    fn from(product: &Product) -> Self {
        ProductDto {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price.to_decimal_string(),
            image: product.image.clone(),
        }
    }
}

/// Fetches the catalog and swaps it into `catalog`.
pub async fn refresh_products(api: &ApiClient, catalog: &CatalogState) -> Vec<ProductDto> {
    debug!("refresh_products command");

    let products = api.products().list_or_empty().await;
    let dtos = products.iter().map(ProductDto::from).collect();
    info!(count = products.len(), "Catalog refreshed");

    catalog.replace(products);
    dtos
}

/// One product's details.
///
/// Looks in the catalog as last fetched, and fetches it once if the id is
/// not there.
pub async fn get_product(
    api: &ApiClient,
    catalog: &CatalogState,
    product_id: &str,
) -> CommandResult<ProductDto> {
    debug!(product_id = %product_id, "get_product command");
    validate_product_id(product_id)?;

    if catalog.find(product_id).is_none() {
        debug!(product_id = %product_id, "Product not in local catalog; refreshing");
        refresh_products(api, catalog).await;
    }

    catalog
        .find(product_id)
        .map(|product| ProductDto::from(&product))
        .ok_or_else(|| CommandError::not_found("Product", product_id))
}
