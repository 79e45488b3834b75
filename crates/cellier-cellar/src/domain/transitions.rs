//! The bottle quantity state machine.
//!
//! A bottle is Active while `quantity > 0` and Exhausted at zero.
//! Consumption moves units out of stock but never deletes the entity —
//! an exhausted bottle stays visible as a completed record. Deletion
//! removes units without tasting them; removing the last unit deletes
//! the entity itself, with the ledger snapshot preserving its history.

use cellier_core::bottle::Bottle;
use cellier_core::error::DomainError;
use cellier_history::domain::events::{EventDraft, EventKind};
use serde::Serialize;

/// Why units are leaving the cellar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalKind {
    /// Units were drunk.
    Consume,
    /// Units are discarded without being drunk.
    Delete,
}

/// The upstream mutation a removal requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BottleMutation {
    /// Patch the bottle to a new quantity.
    Patch {
        /// Stock after the removal.
        quantity: u32,
    },
    /// Delete the bottle entity entirely.
    Delete,
}

/// Where the bottle ends up after a removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CellarOutcome {
    /// Still active with stock remaining.
    Updated {
        /// Units left in the cellar.
        remaining: u32,
    },
    /// Fully consumed: quantity is zero but the entity is kept.
    Exhausted,
    /// Fully deleted: the entity no longer exists upstream.
    Removed,
}

/// A validated removal: the event to record first, the mutation to
/// issue afterwards, and the resulting bottle state.
#[derive(Debug)]
pub struct RemovalPlan {
    /// History event capturing the intent, recorded before mutating.
    pub event: EventDraft,
    /// Upstream mutation to issue once the event is recorded.
    pub mutation: BottleMutation,
    /// Resulting bottle state.
    pub outcome: CellarOutcome,
}

/// Plans the removal of `quantity` units from a bottle.
///
/// # Errors
///
/// Returns `DomainError::Validation` when `quantity` is zero or exceeds
/// the bottle's current stock.
pub fn plan_removal(
    bottle: &Bottle,
    kind: RemovalKind,
    quantity: u32,
) -> Result<RemovalPlan, DomainError> {
    if quantity == 0 {
        return Err(DomainError::Validation(format!(
            "cannot remove zero units from bottle {}",
            bottle.id
        )));
    }
    if quantity > bottle.quantity {
        return Err(DomainError::Validation(format!(
            "cannot remove {quantity} units from bottle {} holding {}",
            bottle.id, bottle.quantity
        )));
    }

    let remaining = bottle.quantity - quantity;
    let (event_kind, mutation, outcome) = match kind {
        // Consumption keeps the entity even at zero stock, for
        // traceability of "drunk and remembered" vs "removed".
        RemovalKind::Consume => (
            EventKind::Consumed,
            BottleMutation::Patch {
                quantity: remaining,
            },
            if remaining == 0 {
                CellarOutcome::Exhausted
            } else {
                CellarOutcome::Updated { remaining }
            },
        ),
        RemovalKind::Delete if remaining == 0 => {
            (EventKind::Deleted, BottleMutation::Delete, CellarOutcome::Removed)
        }
        RemovalKind::Delete => (
            EventKind::Deleted,
            BottleMutation::Patch {
                quantity: remaining,
            },
            CellarOutcome::Updated { remaining },
        ),
    };

    Ok(RemovalPlan {
        event: EventDraft::for_bottle(event_kind, bottle, quantity),
        mutation,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellier_core::bottle::BottleStatus;
    use chrono::NaiveDate;

    fn bottle(quantity: u32) -> Bottle {
        Bottle {
            id: 11,
            name: "Clos Test".to_owned(),
            productor: Some("Domaine".to_owned()),
            year: Some(2018),
            color: Some("Blanc".to_owned()),
            quantity,
            status: BottleStatus::InCellar,
            date_added: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_partial_delete_patches_remaining_quantity() {
        let plan = plan_removal(&bottle(6), RemovalKind::Delete, 2).unwrap();

        assert_eq!(plan.event.kind, EventKind::Deleted);
        assert_eq!(plan.event.quantity, 2);
        assert_eq!(plan.mutation, BottleMutation::Patch { quantity: 4 });
        assert_eq!(plan.outcome, CellarOutcome::Updated { remaining: 4 });
    }

    #[test]
    fn test_full_delete_removes_the_entity() {
        let plan = plan_removal(&bottle(6), RemovalKind::Delete, 6).unwrap();

        assert_eq!(plan.event.kind, EventKind::Deleted);
        assert_eq!(plan.event.quantity, 6);
        assert_eq!(plan.mutation, BottleMutation::Delete);
        assert_eq!(plan.outcome, CellarOutcome::Removed);
    }

    #[test]
    fn test_partial_consume_patches_remaining_quantity() {
        let plan = plan_removal(&bottle(6), RemovalKind::Consume, 2).unwrap();

        assert_eq!(plan.event.kind, EventKind::Consumed);
        assert_eq!(plan.mutation, BottleMutation::Patch { quantity: 4 });
        assert_eq!(plan.outcome, CellarOutcome::Updated { remaining: 4 });
    }

    #[test]
    fn test_full_consume_exhausts_but_keeps_the_entity() {
        let plan = plan_removal(&bottle(6), RemovalKind::Consume, 6).unwrap();

        assert_eq!(plan.event.kind, EventKind::Consumed);
        // Patched to zero, never deleted.
        assert_eq!(plan.mutation, BottleMutation::Patch { quantity: 0 });
        assert_eq!(plan.outcome, CellarOutcome::Exhausted);
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let err = plan_removal(&bottle(6), RemovalKind::Consume, 0).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_excess_quantity_is_rejected() {
        let err = plan_removal(&bottle(2), RemovalKind::Delete, 3).unwrap_err();
        match err {
            DomainError::Validation(msg) => {
                assert!(msg.contains("3 units"));
                assert!(msg.contains("holding 2"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_outcome_serializes_with_state_tag() {
        let json = serde_json::to_value(CellarOutcome::Updated { remaining: 3 }).unwrap();
        assert_eq!(json["state"], "updated");
        assert_eq!(json["remaining"], 3);

        let json = serde_json::to_value(CellarOutcome::Exhausted).unwrap();
        assert_eq!(json["state"], "exhausted");
    }
}
