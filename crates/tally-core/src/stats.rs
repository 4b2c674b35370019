//! # Revenue Statistics
//!
//! Derives chart-ready series from a snapshot of submitted orders.
//!
//! ## Bucketing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How an Order Lands in a Bucket                       │
//! │                                                                         │
//! │  Order.created_at (UTC) ──► with_timezone(now's zone) ──► local date    │
//! │                                                        └─► local hour   │
//! │                                                                         │
//! │  Order.Total "19.99" ──► Money (1999 cents) ──► summed per bucket       │
//! │                                                    │                    │
//! │                                                    ▼                    │
//! │                                     round_to_whole_units() ──► 20       │
//! │                                                                         │
//! │  Unparseable or missing Total ──► contributes 0                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is cached: each call walks the slice again. The caller supplies
//! `now`, and its time zone decides what "today" means.

use std::collections::HashMap;

use chrono::{DateTime, Days, NaiveDate, TimeZone, Timelike};
use serde::Serialize;

use crate::money::{Money, WholeUnits};
use crate::types::Order;

/// Parallel label/value series, in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<WholeUnits>,
}

impl ChartSeries {
    fn push(&mut self, label: String, value: WholeUnits) {
        self.labels.push(label);
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(label, value)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (&str, WholeUnits)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Largest value, zero for an empty series.
    pub fn max_value(&self) -> WholeUnits {
        self.values.iter().copied().max().unwrap_or_default()
    }
}

/// Everything the statistics screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub orders_today: usize,
    pub revenue_today: WholeUnits,
    pub daily: ChartSeries,
    pub hourly: ChartSeries,
}

/// Pure aggregation over a borrowed order history.
#[derive(Debug, Clone, Copy)]
pub struct StatsAggregator<'a> {
    orders: &'a [Order],
}

/// An order's total, with malformed or missing totals counted as zero.
fn order_amount(order: &Order) -> Money {
    order.total_amount().unwrap_or_default()
}

impl<'a> StatsAggregator<'a> {
    pub fn new(orders: &'a [Order]) -> Self {
        StatsAggregator { orders }
    }

    fn local_date<Tz: TimeZone>(order: &Order, zone: &Tz) -> NaiveDate {
        order.created_at.with_timezone(zone).date_naive()
    }

    /// Orders whose local calendar date equals `now`'s.
    pub fn orders_today<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<&'a Order> {
        let zone = now.timezone();
        let today = now.date_naive();
        self.orders
            .iter()
            .filter(|order| Self::local_date(order, &zone) == today)
            .collect()
    }

    /// Today's revenue, rounded to whole units after summing.
    pub fn revenue_today<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> WholeUnits {
        self.orders_today(now)
            .into_iter()
            .map(order_amount)
            .sum::<Money>()
            .round_to_whole_units()
    }

    /// Revenue for each of the last `days` dates ending today (inclusive).
    ///
    /// Always returns exactly `days` buckets; dates without orders are 0.
    /// Labels are `YYYY-MM-DD`.
    pub fn daily_revenue<Tz: TimeZone>(&self, days: u32, now: &DateTime<Tz>) -> ChartSeries {
        let zone = now.timezone();
        let today = now.date_naive();

        let mut per_day: HashMap<NaiveDate, Money> = HashMap::new();
        for order in self.orders {
            *per_day.entry(Self::local_date(order, &zone)).or_default() += order_amount(order);
        }

        let mut series = ChartSeries::default();
        for offset in (0..days).rev() {
            let Some(date) = today.checked_sub_days(Days::new(u64::from(offset))) else {
                continue;
            };
            let revenue = per_day.get(&date).copied().unwrap_or_default();
            series.push(
                date.format("%Y-%m-%d").to_string(),
                revenue.round_to_whole_units(),
            );
        }
        series
    }

    /// Revenue per elapsed hour of today: buckets `0..=now.hour()`.
    ///
    /// Labels are `HH:00`.
    pub fn hourly_revenue_today<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> ChartSeries {
        let zone = now.timezone();

        let mut per_hour: HashMap<u32, Money> = HashMap::new();
        for order in self.orders_today(now) {
            let hour = order.created_at.with_timezone(&zone).hour();
            *per_hour.entry(hour).or_default() += order_amount(order);
        }

        let mut series = ChartSeries::default();
        for hour in 0..=now.hour() {
            let revenue = per_hour.get(&hour).copied().unwrap_or_default();
            series.push(format!("{hour:02}:00"), revenue.round_to_whole_units());
        }
        series
    }

    /// All four statistics at once.
    pub fn summary<Tz: TimeZone>(&self, days: u32, now: &DateTime<Tz>) -> StatsSummary {
        StatsSummary {
            orders_today: self.orders_today(now).len(),
            revenue_today: self.revenue_today(now),
            daily: self.daily_revenue(days, now),
            hourly: self.hourly_revenue_today(now),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
