//! Bottle entity owned by the upstream bottle API.
//!
//! The cellar service never persists bottles itself. It reads them from
//! the collaborator and computes the next `quantity` value to request
//! via update operations.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Bottle status as stored by the upstream API. The status strings are
/// the legacy French markers used by the original cellar database.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BottleStatus {
    /// The bottle is in the cellar.
    #[default]
    #[serde(rename = "En cave")]
    InCellar,
    /// Legacy marker for a bottle recorded as fully drunk before the
    /// history ledger existed.
    #[serde(rename = "Bue")]
    Drunk,
}

/// A bottle as returned by the upstream bottle API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bottle {
    /// Upstream identifier.
    pub id: i64,
    /// Wine name.
    pub name: String,
    /// Producer.
    #[serde(default)]
    pub productor: Option<String>,
    /// Vintage year.
    #[serde(default)]
    pub year: Option<i32>,
    /// Wine color (e.g. "Rouge", "Blanc").
    #[serde(default)]
    pub color: Option<String>,
    /// Units currently in stock. A bottle at zero is exhausted but kept.
    pub quantity: u32,
    /// Cellar status.
    #[serde(default)]
    pub status: BottleStatus,
    /// Date the bottle entered the cellar.
    pub date_added: NaiveDate,
}

impl Bottle {
    /// The moment this bottle entered the cellar, as a UTC timestamp.
    ///
    /// The upstream API only stores a date, so midnight UTC stands in
    /// for the time of day.
    #[must_use]
    pub fn added_at(&self) -> DateTime<Utc> {
        self.date_added.and_time(NaiveTime::MIN).and_utc()
    }
}

/// Payload for creating (or fully replacing) a bottle upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBottle {
    /// Wine name.
    pub name: String,
    /// Producer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub productor: Option<String>,
    /// Vintage year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Wine color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Units to stock.
    pub quantity: u32,
    /// Initial status.
    #[serde(default)]
    pub status: BottleStatus,
}

/// Partial update for a bottle. Only the fields the cellar service
/// mutates are modeled; absent fields are left untouched upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BottlePatch {
    /// New stock quantity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    /// New status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BottleStatus>,
}

impl BottlePatch {
    /// A patch that only changes the stock quantity.
    #[must_use]
    pub fn quantity(quantity: u32) -> Self {
        Self {
            quantity: Some(quantity),
            status: None,
        }
    }
}
