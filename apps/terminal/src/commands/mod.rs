//! # Commands Module
//!
//! Every action the cashier can take. The shell and the one-shot CLI both
//! call these; neither touches state or the network directly.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── Catalog refresh and product detail
//! ├── order.rs    ◄─── add / inc / dec / rm / cart / checkout
//! ├── history.rs  ◄─── Order history refresh
//! ├── stats.rs    ◄─── Revenue statistics
//! ├── receipt.rs  ◄─── HTML / text receipts
//! └── auth.rs     ◄─── login / logout / whoami
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the order
//! fn increase_item(store: &OrderStore, product_id: &str)
//!
//! // Needs catalog and order
//! fn add_to_order(catalog: &CatalogState, store: &OrderStore, product_id: &str)
//!
//! // Needs the network too
//! async fn checkout(api: &ApiClient, store: &OrderStore, history: &HistoryState)
//! ```
//!
//! Results are DTOs that serialize to camelCase JSON for `--json` output.

pub mod auth;
pub mod history;
pub mod order;
pub mod product;
pub mod receipt;
pub mod stats;
