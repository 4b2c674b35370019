//! # State Module
//!
//! Application state for the cashier terminal.
//!
//! Separate state types instead of one `AppState`: each command takes only
//! the state it needs, and tests build exactly the pieces they exercise.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │ OrderStore   │ │ CatalogState │ │ HistoryState │ │ ConfigState  │   │
//! │  │              │ │              │ │              │ │              │   │
//! │  │ Arc<Mutex<   │ │ RwLock<Arc<  │ │ RwLock<Arc<  │ │ Arc<Terminal │   │
//! │  │  OrderState  │ │  Vec<Product │ │  Vec<Order>  │ │  Config>     │   │
//! │  │ >> + watch   │ │ >>>          │ │ >>>          │ │              │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • OrderStore: exclusive lock per action, never held across .await     │
//! │  • Catalog/History: whole-list swap on refresh                         │
//! │  • ConfigState: read-only after startup                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod config;
mod history;
mod order;

pub use catalog::CatalogState;
pub use config::ConfigState;
pub use history::HistoryState;
pub use order::{OrderStore, SubmissionGuard};
