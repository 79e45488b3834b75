//! History events for the cellar ledger.
//!
//! Events are immutable once created and carry a denormalized snapshot
//! of the bottle they refer to, so history stays meaningful after the
//! bottle itself is altered or removed. The serialized field names
//! preserve the original `cave_history` JSON layout.

use cellier_core::bottle::Bottle;
use cellier_core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The closed set of ledger event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Units entered the cellar.
    Added,
    /// Units were drunk. Full consumption exhausts the bottle but keeps
    /// the entity for traceability.
    Consumed,
    /// Units were removed without being drunk. Full removal deletes the
    /// bottle entity; the ledger keeps the snapshot.
    Deleted,
}

/// One immutable entry in the cellar ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEvent {
    /// Unique event identifier.
    pub id: Uuid,
    /// Event type.
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Upstream bottle identifier. Dangling references are tolerated;
    /// the bottle may since have been deleted.
    pub bottle_id: i64,
    /// Snapshot: wine name at event time.
    pub bottle_name: String,
    /// Snapshot: producer at event time.
    #[serde(default)]
    pub bottle_productor: Option<String>,
    /// Snapshot: vintage at event time.
    #[serde(default)]
    pub bottle_year: Option<i32>,
    /// Snapshot: wine color at event time.
    #[serde(default)]
    pub bottle_color: Option<String>,
    /// Units affected, always positive.
    pub quantity: u32,
    /// When the event happened.
    pub date: DateTime<Utc>,
}

/// A history event waiting to be recorded: everything but the
/// synthesized `id` and (optionally) `date`.
#[derive(Debug, Clone)]
pub struct EventDraft {
    /// Event type.
    pub kind: EventKind,
    /// Upstream bottle identifier.
    pub bottle_id: i64,
    /// Snapshot: wine name.
    pub bottle_name: String,
    /// Snapshot: producer.
    pub bottle_productor: Option<String>,
    /// Snapshot: vintage.
    pub bottle_year: Option<i32>,
    /// Snapshot: wine color.
    pub bottle_color: Option<String>,
    /// Units affected.
    pub quantity: u32,
    /// Explicit event time; when `None` the recording clock is used.
    pub date: Option<DateTime<Utc>>,
}

impl EventDraft {
    /// Builds a draft whose snapshot fields are copied from a bottle.
    #[must_use]
    pub fn for_bottle(kind: EventKind, bottle: &Bottle, quantity: u32) -> Self {
        Self {
            kind,
            bottle_id: bottle.id,
            bottle_name: bottle.name.clone(),
            bottle_productor: bottle.productor.clone(),
            bottle_year: bottle.year,
            bottle_color: bottle.color.clone(),
            quantity,
            date: None,
        }
    }

    /// Pins the event time, e.g. to backdate a migrated event to the
    /// bottle's `date_added`.
    #[must_use]
    pub fn backdated(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// Validates the draft at the recording boundary.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `quantity` is zero.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.quantity == 0 {
            return Err(DomainError::Validation(format!(
                "event quantity must be positive (bottle {})",
                self.bottle_id
            )));
        }
        Ok(())
    }

    /// Completes the draft into a full event.
    #[must_use]
    pub fn into_event(self, id: Uuid, recorded_at: DateTime<Utc>) -> HistoryEvent {
        HistoryEvent {
            id,
            kind: self.kind,
            bottle_id: self.bottle_id,
            bottle_name: self.bottle_name,
            bottle_productor: self.bottle_productor,
            bottle_year: self.bottle_year,
            bottle_color: self.bottle_color,
            quantity: self.quantity,
            date: self.date.unwrap_or(recorded_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellier_core::bottle::BottleStatus;
    use chrono::{NaiveDate, TimeZone};

    fn bottle() -> Bottle {
        Bottle {
            id: 42,
            name: "Château Margaux".to_owned(),
            productor: Some("Château Margaux".to_owned()),
            year: Some(2015),
            color: Some("Rouge".to_owned()),
            quantity: 3,
            status: BottleStatus::InCellar,
            date_added: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_event_serializes_with_original_field_names() {
        let recorded_at = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        let event = EventDraft::for_bottle(EventKind::Consumed, &bottle(), 2)
            .into_event(Uuid::nil(), recorded_at);

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "consumed");
        assert_eq!(json["bottleId"], 42);
        assert_eq!(json["bottleName"], "Château Margaux");
        assert_eq!(json["bottleYear"], 2015);
        assert_eq!(json["bottleColor"], "Rouge");
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["date"], "2024-01-10T12:00:00Z");
    }

    #[test]
    fn test_event_round_trips_through_json() {
        let recorded_at = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        let event = EventDraft::for_bottle(EventKind::Added, &bottle(), 3)
            .into_event(Uuid::new_v4(), recorded_at);

        let json = serde_json::to_string(&event).unwrap();
        let parsed: HistoryEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_draft_rejects_zero_quantity() {
        let draft = EventDraft::for_bottle(EventKind::Deleted, &bottle(), 0);
        let err = draft.validate().unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("42")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_backdated_draft_keeps_explicit_date() {
        let explicit = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
        let recorded_at = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        let event = EventDraft::for_bottle(EventKind::Added, &bottle(), 3)
            .backdated(explicit)
            .into_event(Uuid::new_v4(), recorded_at);
        assert_eq!(event.date, explicit);
    }

    #[test]
    fn test_draft_without_date_uses_recording_time() {
        let recorded_at = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        let event = EventDraft::for_bottle(EventKind::Added, &bottle(), 3)
            .into_event(Uuid::new_v4(), recorded_at);
        assert_eq!(event.date, recorded_at);
    }
}
