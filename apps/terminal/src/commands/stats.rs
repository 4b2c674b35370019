//! # Stats Commands
//!
//! Revenue figures for the statistics screen, computed from the history
//! currently held in [`HistoryState`]. Refresh the history first for
//! up-to-date numbers.

use chrono::{DateTime, TimeZone};
use tracing::debug;

use crate::error::CommandResult;
use crate::state::{ConfigState, HistoryState};
use tally_core::validation::validate_window_days;
use tally_core::{StatsAggregator, StatsSummary};

/// Today's count and revenue plus the daily and hourly charts.
///
/// `days` defaults to the configured window. `now` fixes both "today" and
/// the time zone used for bucketing.
pub fn get_stats<Tz: TimeZone>(
    history: &HistoryState,
    config: &ConfigState,
    days: Option<u32>,
    now: &DateTime<Tz>,
) -> CommandResult<StatsSummary> {
    let days = days.unwrap_or_else(|| config.daily_window_days());
    debug!(days, "get_stats command");
    validate_window_days(days)?;

    let orders = history.snapshot();
    Ok(StatsAggregator::new(&orders).summary(days, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TerminalConfig;
    use crate::error::ErrorCode;
    use chrono::FixedOffset;
    use tally_core::{DecimalText, Order};

    fn order(at: &str, total: &str) -> Order {
        Order {
            id: at.into(),
            created_at: at.parse().unwrap(),
            products: Vec::new(),
            total: DecimalText::Text(total.into()),
        }
    }

    #[test]
    fn test_stats_use_configured_window() {
        let history = HistoryState::new();
        history.replace(vec![
            order("2026-10-18T07:30:00Z", "19.99"),
            order("2026-10-17T12:00:00Z", "5.50"),
        ]);
        let config = ConfigState::new(TerminalConfig::default());
        let now = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 18, 14, 5, 0)
            .unwrap();

        let stats = get_stats(&history, &config, None, &now).unwrap();
        assert_eq!(stats.orders_today, 1);
        assert_eq!(stats.revenue_today.value(), 20);
        assert_eq!(stats.daily.len(), 7);
        assert_eq!(stats.daily.labels[6], "2026-10-18");
        assert_eq!(stats.daily.values[5].value(), 6);
        assert_eq!(stats.hourly.len(), 15);
        assert_eq!(stats.hourly.values[7].value(), 20);
    }

    #[test]
    fn test_rejects_bad_window() {
        let config = ConfigState::new(TerminalConfig::default());
        let now = chrono::Utc::now();
        let err = get_stats(&HistoryState::new(), &config, Some(0), &now).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
