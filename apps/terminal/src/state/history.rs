//! # History State
//!
//! Submitted orders as last fetched, plus any created since. Same swap
//! discipline as the catalog.
//!
//! ```text
//!  checkout ──► push(order) ──► orders + unconfirmed
//!  refresh  ──► replace(fetched) ──► fetched + unconfirmed not in fetched
//! ```
//!
//! An order created here stays visible until a fetch returns it, even if
//! the backend list lags behind the `POST`.

use std::sync::{Arc, RwLock, RwLockWriteGuard};

use tally_core::Order;

#[derive(Debug, Default)]
struct Ledger {
    orders: Arc<Vec<Order>>,
    /// Created on this terminal, not yet seen in a fetch.
    unconfirmed: Vec<Order>,
}

#[derive(Debug, Clone, Default)]
pub struct HistoryState {
    ledger: Arc<RwLock<Ledger>>,
}

impl HistoryState {
    pub fn new() -> Self {
        Self::default()
    }

    fn write(&self) -> RwLockWriteGuard<'_, Ledger> {
        self.ledger
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replaces the history with a fresh fetch, keeping locally created
    /// orders the fetch does not contain yet.
    pub fn replace(&self, fetched: Vec<Order>) {
        let mut ledger = self.write();
        ledger
            .unconfirmed
            .retain(|local| !fetched.iter().any(|remote| remote.id == local.id));

        let mut next = fetched;
        next.extend(ledger.unconfirmed.iter().cloned());
        ledger.orders = Arc::new(next);
    }

    /// Records an order this terminal just created, so stats and receipts
    /// include it before the backend lists it.
    pub fn push(&self, order: Order) {
        let mut ledger = self.write();

        ledger.unconfirmed.retain(|existing| existing.id != order.id);
        ledger.unconfirmed.push(order.clone());

        let mut next = Vec::with_capacity(ledger.orders.len() + 1);
        next.extend(
            ledger
                .orders
                .iter()
                .filter(|existing| existing.id != order.id)
                .cloned(),
        );
        next.push(order);
        ledger.orders = Arc::new(next);
    }

    pub fn snapshot(&self) -> Arc<Vec<Order>> {
        let ledger = self
            .ledger
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&ledger.orders)
    }

    pub fn find(&self, order_id: &str) -> Option<Order> {
        self.snapshot()
            .iter()
            .find(|order| order.id == order_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::DecimalText;

    fn order(id: &str, total: &str) -> Order {
        Order {
            id: id.to_string(),
            created_at: "2026-10-18T10:00:00Z".parse().unwrap(),
            products: Vec::new(),
            total: DecimalText::Text(total.to_string()),
        }
    }

    fn ids(history: &HistoryState) -> Vec<String> {
        history.snapshot().iter().map(|o| o.id.clone()).collect()
    }

    #[test]
    fn test_push_replaces_same_id() {
        let history = HistoryState::new();
        history.replace(vec![order("1", "5.00"), order("2", "3.00")]);

        history.push(order("2", "4.00"));
        history.push(order("3", "1.00"));

        assert_eq!(ids(&history), vec!["1", "2", "3"]);
        assert_eq!(
            history.find("2").map(|o| o.total.as_text().into_owned()),
            Some("4.00".to_string())
        );
    }

    #[test]
    fn test_refresh_keeps_orders_the_backend_has_not_listed() {
        let history = HistoryState::new();
        history.push(order("local", "3.00"));

        history.replace(vec![order("remote", "100.00")]);
        assert_eq!(ids(&history), vec!["remote", "local"]);

        // Once the backend lists it, the fetched copy wins.
        history.replace(vec![order("remote", "100.00"), order("local", "3.50")]);
        assert_eq!(ids(&history), vec!["remote", "local"]);
        assert_eq!(
            history.find("local").map(|o| o.total.as_text().into_owned()),
            Some("3.50".to_string())
        );

        history.replace(vec![order("remote", "100.00")]);
        assert_eq!(ids(&history), vec!["remote"]);
    }
}
