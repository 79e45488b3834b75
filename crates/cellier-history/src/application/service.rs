//! The history service: recording, queries, cleanup, and backfill.

use std::collections::HashSet;
use std::sync::Arc;

use cellier_core::bottle::{Bottle, BottleStatus};
use cellier_core::clock::Clock;
use cellier_core::error::DomainError;
use chrono::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::application::stats::{LedgerSummary, MonthlyBucket, monthly_buckets, summarize};
use crate::domain::events::{EventDraft, EventKind, HistoryEvent};
use crate::store::HistoryStore;

/// Default window for [`HistoryService::recent`].
pub const DEFAULT_RECENT_DAYS: u32 = 30;

/// Default maximum event age for [`HistoryService::cleanup`].
pub const DEFAULT_MAX_AGE_DAYS: u32 = 365;

/// Application service owning the history ledger.
///
/// Every write goes through an internal async mutex, serializing the
/// load-append-save cycle so two overlapping recordings cannot lose an
/// append. The store itself stays a plain load/save pair.
pub struct HistoryService {
    store: Arc<dyn HistoryStore>,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl HistoryService {
    /// Creates a history service over the given store and clock.
    #[must_use]
    pub fn new(store: Arc<dyn HistoryStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    /// Records a new event: validates the draft, synthesizes `id` and a
    /// default `date`, appends, and persists.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for a zero quantity, and
    /// `DomainError::Storage` when the ledger cannot be read or
    /// written. Unlike read paths, write-path storage failures are
    /// surfaced so callers never believe an unpersisted event exists.
    pub async fn record(&self, draft: EventDraft) -> Result<HistoryEvent, DomainError> {
        draft.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut events = self.store.load().await?;
        let event = draft.into_event(Uuid::new_v4(), self.clock.now());
        events.push(event.clone());
        self.store.save(&events).await?;

        tracing::debug!(
            event_id = %event.id,
            kind = ?event.kind,
            bottle_id = event.bottle_id,
            quantity = event.quantity,
            "history event recorded"
        );
        Ok(event)
    }

    /// The full ledger, most recent first.
    pub async fn history(&self) -> Vec<HistoryEvent> {
        let mut events = self.load_or_empty().await;
        sort_descending(&mut events);
        events
    }

    /// Events for one bottle, most recent first.
    pub async fn bottle_history(&self, bottle_id: i64) -> Vec<HistoryEvent> {
        let mut events: Vec<HistoryEvent> = self
            .load_or_empty()
            .await
            .into_iter()
            .filter(|event| event.bottle_id == bottle_id)
            .collect();
        sort_descending(&mut events);
        events
    }

    /// Events from the last `days` days, most recent first. The cutoff
    /// is day-granular: the same time of day `days` days ago, not
    /// midnight-aligned.
    pub async fn recent(&self, days: u32) -> Vec<HistoryEvent> {
        let cutoff = self.clock.now() - Duration::days(i64::from(days));
        let mut events: Vec<HistoryEvent> = self
            .load_or_empty()
            .await
            .into_iter()
            .filter(|event| event.date >= cutoff)
            .collect();
        sort_descending(&mut events);
        events
    }

    /// Monthly consumption rollup over the last `months` calendar
    /// months, oldest bucket first.
    pub async fn monthly_consumption(&self, months: u32) -> Vec<MonthlyBucket> {
        let events = self.load_or_empty().await;
        monthly_buckets(&events, EventKind::Consumed, months, self.clock.now())
    }

    /// Monthly additions rollup over the last `months` calendar months,
    /// oldest bucket first.
    pub async fn monthly_additions(&self, months: u32) -> Vec<MonthlyBucket> {
        let events = self.load_or_empty().await;
        monthly_buckets(&events, EventKind::Added, months, self.clock.now())
    }

    /// Ledger-wide totals.
    pub async fn summary(&self) -> LedgerSummary {
        summarize(&self.load_or_empty().await)
    }

    /// Maintenance: drops events older than `max_age_days`, persists
    /// the pruned ledger, and returns the retained count. This is the
    /// only operation that removes events.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Storage` when the ledger cannot be read or
    /// written.
    pub async fn cleanup(&self, max_age_days: u32) -> Result<usize, DomainError> {
        let _guard = self.write_lock.lock().await;
        let events = self.store.load().await?;
        let cutoff = self.clock.now() - Duration::days(i64::from(max_age_days));
        let before = events.len();
        let retained: Vec<HistoryEvent> = events
            .into_iter()
            .filter(|event| event.date >= cutoff)
            .collect();
        self.store.save(&retained).await?;

        tracing::info!(
            removed = before - retained.len(),
            retained = retained.len(),
            max_age_days,
            "history cleanup completed"
        );
        Ok(retained.len())
    }

    /// Backfills the ledger from the current bottle snapshot.
    ///
    /// Idempotent on the `(bottle_id, kind)` key: a bottle gets at most
    /// one synthesized `added` event, and bottles still carrying the
    /// legacy fully-drunk status get at most one synthesized `consumed`
    /// event. Synthesized events are backdated to the bottle's
    /// `date_added` (the true consumption date was never captured
    /// pre-ledger). Zero-quantity bottles are skipped entirely, even
    /// when marked drunk: events carry a positive quantity, so there
    /// is nothing meaningful to synthesize for them. Designed to run
    /// on every bottle-list load; after the first successful pass it
    /// is a no-op.
    ///
    /// Returns the number of events synthesized.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Storage` when the ledger cannot be read or
    /// written.
    pub async fn migrate_from_bottles(&self, bottles: &[Bottle]) -> Result<usize, DomainError> {
        let _guard = self.write_lock.lock().await;
        let mut events = self.store.load().await?;
        let mut seen: HashSet<(i64, EventKind)> = events
            .iter()
            .map(|event| (event.bottle_id, event.kind))
            .collect();

        let mut synthesized = 0;
        for bottle in bottles {
            // A zero-quantity bottle has nothing to backfill and would
            // violate the positive-quantity invariant.
            if bottle.quantity == 0 {
                continue;
            }
            if seen.insert((bottle.id, EventKind::Added)) {
                events.push(self.backfill_event(EventKind::Added, bottle));
                synthesized += 1;
            }
            if bottle.status == BottleStatus::Drunk
                && seen.insert((bottle.id, EventKind::Consumed))
            {
                events.push(self.backfill_event(EventKind::Consumed, bottle));
                synthesized += 1;
            }
        }

        if synthesized > 0 {
            self.store.save(&events).await?;
            tracing::info!(synthesized, "history backfilled from bottle snapshot");
        }
        Ok(synthesized)
    }

    fn backfill_event(&self, kind: EventKind, bottle: &Bottle) -> HistoryEvent {
        EventDraft::for_bottle(kind, bottle, bottle.quantity)
            .backdated(bottle.added_at())
            .into_event(Uuid::new_v4(), self.clock.now())
    }

    /// Read-path loads degrade to an empty ledger: a broken store must
    /// show up as "no history", never block the application.
    async fn load_or_empty(&self) -> Vec<HistoryEvent> {
        match self.store.load().await {
            Ok(events) => events,
            Err(err) => {
                tracing::warn!(error = %err, "history unavailable, treating ledger as empty");
                Vec::new()
            }
        }
    }
}

/// Stable descending sort by date; equal dates keep insertion order so
/// re-rendered lists do not flicker.
fn sort_descending(events: &mut [HistoryEvent]) {
    events.sort_by(|a, b| b.date.cmp(&a.date));
}
