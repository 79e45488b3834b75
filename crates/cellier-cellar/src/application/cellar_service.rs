//! Cellar orchestration: record history first, mutate bottles second.

use std::sync::Arc;

use cellier_core::bottle::{Bottle, BottlePatch, NewBottle};
use cellier_core::error::DomainError;
use cellier_core::service::BottleService;
use cellier_history::application::service::HistoryService;
use cellier_history::domain::events::{EventDraft, EventKind};

use crate::domain::transitions::{BottleMutation, CellarOutcome, RemovalKind, plan_removal};

/// Orchestrates bottle mutations against the upstream API together
/// with ledger recording.
///
/// Ordering contract: for removals the history event is recorded
/// before the upstream mutation, so a crashed or rejected mutation
/// still leaves an audit trail of intent. The resulting orphan event
/// is an accepted inconsistency window, not compensated.
pub struct CellarService {
    history: Arc<HistoryService>,
    bottles: Arc<dyn BottleService>,
}

impl CellarService {
    /// Creates the cellar service over the history service and the
    /// bottle collaborator.
    #[must_use]
    pub fn new(history: Arc<HistoryService>, bottles: Arc<dyn BottleService>) -> Self {
        Self { history, bottles }
    }

    /// Consumes `quantity` units of a bottle. Full consumption leaves
    /// an exhausted entity in place rather than deleting it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::BottleNotFound` for an unknown bottle,
    /// `DomainError::Validation` for a zero or excess quantity, and
    /// storage/upstream errors from the ledger or the bottle API.
    pub async fn consume(
        &self,
        bottle_id: i64,
        quantity: u32,
    ) -> Result<CellarOutcome, DomainError> {
        self.remove_units(bottle_id, RemovalKind::Consume, quantity)
            .await
    }

    /// Removes `quantity` units of a bottle without consuming them.
    /// Removing the last unit deletes the bottle entity.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`CellarService::consume`].
    pub async fn remove(
        &self,
        bottle_id: i64,
        quantity: u32,
    ) -> Result<CellarOutcome, DomainError> {
        self.remove_units(bottle_id, RemovalKind::Delete, quantity)
            .await
    }

    async fn remove_units(
        &self,
        bottle_id: i64,
        kind: RemovalKind,
        quantity: u32,
    ) -> Result<CellarOutcome, DomainError> {
        let bottle = self.bottles.get_bottle(bottle_id).await?;
        let plan = plan_removal(&bottle, kind, quantity)?;

        // Record intent before touching the collaborator (§ordering
        // contract): the audit trail must survive a failed mutation.
        self.history.record(plan.event).await?;

        let mutation_result = match plan.mutation {
            BottleMutation::Patch { quantity } => self
                .bottles
                .patch_bottle(bottle_id, &BottlePatch::quantity(quantity))
                .await
                .map(|_| ()),
            BottleMutation::Delete => self.bottles.delete_bottle(bottle_id).await,
        };
        if let Err(err) = mutation_result {
            tracing::warn!(
                bottle_id,
                error = %err,
                "bottle mutation failed after its history event was recorded"
            );
            return Err(err);
        }

        Ok(plan.outcome)
    }

    /// Creates a bottle upstream, then records its `added` event. The
    /// event needs the assigned identifier, so here creation comes
    /// first; a failed recording is logged but does not undo the
    /// creation.
    ///
    /// # Errors
    ///
    /// Returns upstream errors from the bottle API.
    pub async fn add_bottle(&self, data: NewBottle) -> Result<Bottle, DomainError> {
        let bottle = self.bottles.create_bottle(&data).await?;

        let draft = EventDraft::for_bottle(EventKind::Added, &bottle, bottle.quantity);
        if let Err(err) = self.history.record(draft).await {
            tracing::warn!(
                bottle_id = bottle.id,
                error = %err,
                "bottle created but its added event was not recorded"
            );
        }
        Ok(bottle)
    }

    /// Lists all bottles and opportunistically backfills the ledger
    /// from the snapshot. Backfill failures never block the listing.
    ///
    /// # Errors
    ///
    /// Returns upstream errors from the bottle API.
    pub async fn list_bottles(&self) -> Result<Vec<Bottle>, DomainError> {
        let bottles = self.bottles.list_bottles().await?;
        if let Err(err) = self.history.migrate_from_bottles(&bottles).await {
            tracing::warn!(error = %err, "history backfill failed during bottle listing");
        }
        Ok(bottles)
    }
}
