//! Stub bottle collaborator — in-memory `BottleService` for tests.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use cellier_core::bottle::{Bottle, BottlePatch, NewBottle};
use cellier_core::error::DomainError;
use cellier_core::service::BottleService;
use chrono::NaiveDate;

/// In-memory bottle API stub. Serves bottles from a map, records every
/// mutation for later assertions, and can be switched into a mode where
/// all mutations fail (to exercise the record-event-first contract).
#[derive(Debug)]
pub struct StubBottleService {
    bottles: Mutex<BTreeMap<i64, Bottle>>,
    next_id: AtomicI64,
    fail_mutations: bool,
    patches: Mutex<Vec<(i64, BottlePatch)>>,
    deleted: Mutex<Vec<i64>>,
}

impl StubBottleService {
    /// Date assigned to bottles created through the stub.
    #[must_use]
    pub fn created_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid fixed date")
    }

    /// Creates a stub serving the given bottles.
    #[must_use]
    pub fn with_bottles(bottles: Vec<Bottle>) -> Self {
        let next_id = bottles.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        Self {
            bottles: Mutex::new(bottles.into_iter().map(|b| (b.id, b)).collect()),
            next_id: AtomicI64::new(next_id),
            fail_mutations: false,
            patches: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
        }
    }

    /// Creates an empty stub.
    #[must_use]
    pub fn new() -> Self {
        Self::with_bottles(Vec::new())
    }

    /// Creates a stub whose mutations (create/update/patch/delete) all
    /// fail with an upstream error, while reads keep working.
    #[must_use]
    pub fn failing_mutations(bottles: Vec<Bottle>) -> Self {
        Self {
            fail_mutations: true,
            ..Self::with_bottles(bottles)
        }
    }

    /// Patches issued so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn patches(&self) -> Vec<(i64, BottlePatch)> {
        self.patches.lock().unwrap().clone()
    }

    /// Identifiers of bottles deleted so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn deleted(&self) -> Vec<i64> {
        self.deleted.lock().unwrap().clone()
    }

    /// The bottle as currently stored, if it still exists.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn stored(&self, id: i64) -> Option<Bottle> {
        self.bottles.lock().unwrap().get(&id).cloned()
    }

    fn check_mutation(&self) -> Result<(), DomainError> {
        if self.fail_mutations {
            return Err(DomainError::Upstream("bottle api offline".into()));
        }
        Ok(())
    }
}

impl Default for StubBottleService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BottleService for StubBottleService {
    async fn list_bottles(&self) -> Result<Vec<Bottle>, DomainError> {
        Ok(self.bottles.lock().unwrap().values().cloned().collect())
    }

    async fn get_bottle(&self, id: i64) -> Result<Bottle, DomainError> {
        self.bottles
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(DomainError::BottleNotFound(id))
    }

    async fn create_bottle(&self, data: &NewBottle) -> Result<Bottle, DomainError> {
        self.check_mutation()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let bottle = Bottle {
            id,
            name: data.name.clone(),
            productor: data.productor.clone(),
            year: data.year,
            color: data.color.clone(),
            quantity: data.quantity,
            status: data.status,
            date_added: Self::created_date(),
        };
        self.bottles.lock().unwrap().insert(id, bottle.clone());
        Ok(bottle)
    }

    async fn update_bottle(&self, id: i64, data: &NewBottle) -> Result<Bottle, DomainError> {
        self.check_mutation()?;
        let mut bottles = self.bottles.lock().unwrap();
        let existing = bottles
            .get_mut(&id)
            .ok_or(DomainError::BottleNotFound(id))?;
        existing.name = data.name.clone();
        existing.productor = data.productor.clone();
        existing.year = data.year;
        existing.color = data.color.clone();
        existing.quantity = data.quantity;
        existing.status = data.status;
        Ok(existing.clone())
    }

    async fn patch_bottle(&self, id: i64, patch: &BottlePatch) -> Result<Bottle, DomainError> {
        self.check_mutation()?;
        self.patches.lock().unwrap().push((id, patch.clone()));
        let mut bottles = self.bottles.lock().unwrap();
        let existing = bottles
            .get_mut(&id)
            .ok_or(DomainError::BottleNotFound(id))?;
        if let Some(quantity) = patch.quantity {
            existing.quantity = quantity;
        }
        if let Some(status) = patch.status {
            existing.status = status;
        }
        Ok(existing.clone())
    }

    async fn delete_bottle(&self, id: i64) -> Result<(), DomainError> {
        self.check_mutation()?;
        self.deleted.lock().unwrap().push(id);
        self.bottles
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::BottleNotFound(id))
    }
}
