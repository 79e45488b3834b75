//! Derived statistics over the ledger.
//!
//! Pure functions: callers supply `now` so buckets are deterministic
//! under test. The bucketing contract is strict — `monthly_buckets`
//! always returns exactly `months` entries, oldest first, one per
//! calendar month ending at the current month, with empty months
//! reported as `count = 0` rather than omitted.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::events::{EventKind, HistoryEvent};

/// Default number of months covered by the monthly rollups.
pub const DEFAULT_STATS_MONTHS: u32 = 12;

/// One calendar-month aggregation window.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyBucket {
    /// Human-readable month label, e.g. "Jan 2024".
    pub month: String,
    /// First day of the bucket's month.
    pub date: NaiveDate,
    /// Sum of `quantity` over matching events in this month.
    pub count: u64,
    /// The raw matching events.
    pub events: Vec<HistoryEvent>,
}

/// Ledger-wide totals.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LedgerSummary {
    /// Number of events in the ledger.
    pub events: usize,
    /// Total units added.
    pub added: u64,
    /// Total units consumed.
    pub consumed: u64,
    /// Total units deleted.
    pub deleted: u64,
}

/// Buckets events of one kind into the last `months` calendar months,
/// ending at the month of `now` inclusive, oldest bucket first.
#[must_use]
pub fn monthly_buckets(
    events: &[HistoryEvent],
    kind: EventKind,
    months: u32,
    now: DateTime<Utc>,
) -> Vec<MonthlyBucket> {
    // Months counted on a flat year*12 axis so the window can cross
    // year boundaries.
    #[allow(clippy::cast_possible_wrap)]
    let anchor = now.year() * 12 + now.month0() as i32;

    (0..months)
        .rev()
        .map(|back| {
            #[allow(clippy::cast_possible_wrap)]
            let index = anchor - back as i32;
            let year = index.div_euclid(12);
            let month = index.rem_euclid(12) as u32 + 1;
            let first_of_month =
                NaiveDate::from_ymd_opt(year, month, 1).expect("month index is in 1..=12");

            let matching: Vec<HistoryEvent> = events
                .iter()
                .filter(|event| {
                    event.kind == kind
                        && event.date.year() == year
                        && event.date.month() == month
                })
                .cloned()
                .collect();
            let count = matching.iter().map(|event| u64::from(event.quantity)).sum();

            MonthlyBucket {
                month: first_of_month.format("%b %Y").to_string(),
                date: first_of_month,
                count,
                events: matching,
            }
        })
        .collect()
}

/// Totals per event kind over the whole ledger.
#[must_use]
pub fn summarize(events: &[HistoryEvent]) -> LedgerSummary {
    let total_of = |kind: EventKind| {
        events
            .iter()
            .filter(|event| event.kind == kind)
            .map(|event| u64::from(event.quantity))
            .sum()
    };

    LedgerSummary {
        events: events.len(),
        added: total_of(EventKind::Added),
        consumed: total_of(EventKind::Consumed),
        deleted: total_of(EventKind::Deleted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn event(kind: EventKind, quantity: u32, date: DateTime<Utc>) -> HistoryEvent {
        HistoryEvent {
            id: Uuid::new_v4(),
            kind,
            bottle_id: 1,
            bottle_name: "Test".to_owned(),
            bottle_productor: None,
            bottle_year: None,
            bottle_color: None,
            quantity,
            date,
        }
    }

    #[test]
    fn test_empty_ledger_still_yields_every_bucket() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap();

        let buckets = monthly_buckets(&[], EventKind::Consumed, 12, now);

        assert_eq!(buckets.len(), 12);
        assert!(buckets.iter().all(|b| b.count == 0 && b.events.is_empty()));
        assert_eq!(buckets[0].date, NaiveDate::from_ymd_opt(2023, 7, 1).unwrap());
        assert_eq!(buckets[11].date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn test_buckets_sum_quantity_not_event_count() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let events = vec![
            event(
                EventKind::Consumed,
                2,
                Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap(),
            ),
            event(
                EventKind::Consumed,
                3,
                Utc.with_ymd_and_hms(2024, 1, 9, 12, 0, 0).unwrap(),
            ),
            // Other kinds never count toward consumption.
            event(
                EventKind::Added,
                6,
                Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap(),
            ),
        ];

        let buckets = monthly_buckets(&events, EventKind::Consumed, 1, now);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].count, 5);
        assert_eq!(buckets[0].events.len(), 2);
        assert_eq!(buckets[0].month, "Jan 2024");
    }

    #[test]
    fn test_month_boundaries_split_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 2, 15, 10, 0, 0).unwrap();
        let last_second_of_january = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap();
        let first_second_of_february = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let events = vec![
            event(EventKind::Consumed, 1, last_second_of_january),
            event(EventKind::Consumed, 4, first_second_of_february),
        ];

        let buckets = monthly_buckets(&events, EventKind::Consumed, 2, now);

        assert_eq!(buckets[0].month, "Jan 2024");
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[1].month, "Feb 2024");
        assert_eq!(buckets[1].count, 4);
    }

    #[test]
    fn test_window_crosses_year_boundary() {
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();

        let buckets = monthly_buckets(&[], EventKind::Added, 4, now);

        let labels: Vec<&str> = buckets.iter().map(|b| b.month.as_str()).collect();
        assert_eq!(labels, ["Nov 2023", "Dec 2023", "Jan 2024", "Feb 2024"]);
    }

    #[test]
    fn test_summarize_totals_by_kind() {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let events = vec![
            event(EventKind::Added, 6, date),
            event(EventKind::Added, 2, date),
            event(EventKind::Consumed, 3, date),
            event(EventKind::Deleted, 1, date),
        ];

        let summary = summarize(&events);

        assert_eq!(summary.events, 4);
        assert_eq!(summary.added, 8);
        assert_eq!(summary.consumed, 3);
        assert_eq!(summary.deleted, 1);
    }
}
