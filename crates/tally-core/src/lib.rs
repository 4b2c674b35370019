//! # tally-core: Pure Business Logic for Tally POS
//!
//! This crate is the **heart** of Tally POS. It holds the order being built
//! at the register and the revenue statistics, as pure code with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Cashier Terminal (apps/terminal)             │   │
//! │  │    products ──► add/inc/dec/rm ──► checkout ──► history/stats   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   order   │  │   stats   │  │   │
//! │  │   │  Product  │  │   Money   │  │OrderState │  │ Aggregator│  │   │
//! │  │   │  Order    │  │WholeUnits │  │ LineItem  │  │ ChartSer. │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CLOCK READS • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tally-api (REST client)                      │   │
//! │  │           /Product, /Order, /Register, session cache            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain and wire types (Product, Order, NewOrder, Coordinates)
//! - [`money`] - Exact `Money` and rounded `WholeUnits`
//! - [`order`] - The in-progress order and its running total
//! - [`stats`] - Revenue statistics over an order history
//! - [`receipt`] - HTML and text receipts
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{Money, OrderState, Product};
//!
//! let latte = Product::new("1", "Latte", Money::from_cents(250));
//! let scone = Product::new("2", "Scone", Money::from_cents(300));
//!
//! let mut order = OrderState::new();
//! order.add(&latte);
//! order.add(&latte);
//! order.add(&scone);
//!
//! assert_eq!(order.total().to_decimal_string(), "8.00");
//! ```

pub mod error;
pub mod money;
pub mod order;
pub mod receipt;
pub mod stats;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, WholeUnits};
pub use order::{OrderLineItem, OrderState, OrderSummary};
pub use stats::{ChartSeries, StatsAggregator, StatsSummary};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default length of the daily revenue window.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Longest daily revenue window accepted from user input (one leap year).
pub const MAX_WINDOW_DAYS: u32 = 366;
