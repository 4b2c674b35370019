//! # Order Store
//!
//! Shares the in-progress [`OrderState`] between commands.
//!
//! ## Thread Safety
//! The order is wrapped in `Arc<Mutex<T>>`: every action takes the lock,
//! applies one `OrderState` operation and releases it. Locks are never held
//! across an `.await`.
//!
//! ## Change Notification
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Store                                          │
//! │                                                                         │
//! │  add / inc / dec / rm / clear                                          │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  with_order_mut(|o| ...)  ──►  Mutex<OrderState>                       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  watch::Sender<OrderSummary>  ──►  every subscriber sees the latest    │
//! │                                    item count, quantity and total      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Submission Guard
//! Only one checkout may be in flight. [`OrderStore::begin_submission`] hands
//! out a guard; a second call fails until the guard is dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tally_core::{OrderState, OrderSummary};
use tokio::sync::watch;

/// Shared handle to the order being built at the register.
#[derive(Debug, Clone)]
pub struct OrderStore {
    order: Arc<Mutex<OrderState>>,
    changes: Arc<watch::Sender<OrderSummary>>,
    submitting: Arc<AtomicBool>,
}

impl OrderStore {
    /// Creates a store holding an empty order.
    pub fn new() -> Self {
        let (changes, _) = watch::channel(OrderSummary::default());
        OrderStore {
            order: Arc::new(Mutex::new(OrderState::new())),
            changes: Arc::new(changes),
            submitting: Arc::new(AtomicBool::new(false)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, OrderState> {
        // OrderState operations leave it consistent even if a caller panicked.
        self.order
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Executes a function with read access to the order.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = store.with_order(|order| order.total());
    /// ```
    pub fn with_order<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OrderState) -> R,
    {
        let order = self.lock();
        f(&order)
    }

    /// Executes a function with write access to the order, then publishes
    /// the new summary to subscribers.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// store.with_order_mut(|order| order.increase("42"))?;
    /// ```
    pub fn with_order_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OrderState) -> R,
    {
        let mut order = self.lock();
        let result = f(&mut order);
        let summary = OrderSummary::from(&*order);
        drop(order);

        self.changes.send_if_modified(|current| {
            if *current == summary {
                false
            } else {
                *current = summary;
                true
            }
        });
        result
    }

    /// A copy of the current order.
    pub fn snapshot(&self) -> OrderState {
        self.with_order(OrderState::clone)
    }

    /// Receives the order summary after every change.
    pub fn subscribe(&self) -> watch::Receiver<OrderSummary> {
        self.changes.subscribe()
    }

    /// Marks a checkout as running, or returns `None` if one already is.
    pub fn begin_submission(&self) -> Option<SubmissionGuard> {
        self.submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmissionGuard {
                flag: Arc::clone(&self.submitting),
            })
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }
}

impl Default for OrderStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Held for the duration of one checkout.
#[derive(Debug)]
pub struct SubmissionGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for SubmissionGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
