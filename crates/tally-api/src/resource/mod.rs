//! # Resource Clients
//!
//! One client per remote collection.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Resource Clients                                     │
//! │                                                                         │
//! │  ApiClient                                                             │
//! │  ├── products() ──► ProductClient   list, list_or_empty                │
//! │  ├── orders()   ──► OrderClient     list, list_or_empty, create        │
//! │  └── users()    ──► UserClient      list, get, update, append_location │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Clients
//!
//! - [`ProductClient`] - The product catalog
//! - [`OrderClient`] - Order history and order submission
//! - [`UserClient`] - Registered cashiers and their location history

pub mod order;
pub mod product;
pub mod register;

pub use order::OrderClient;
pub use product::ProductClient;
pub use register::{User, UserClient};
