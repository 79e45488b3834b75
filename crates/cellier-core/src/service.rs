//! Port for the external bottle CRUD collaborator.

use async_trait::async_trait;

use crate::bottle::{Bottle, BottlePatch, NewBottle};
use crate::error::DomainError;

/// Interface to the upstream bottle API. The cellar service consumes
/// this port; the HTTP implementation lives in `cellier-bottles` and
/// tests substitute an in-memory stub.
#[async_trait]
pub trait BottleService: Send + Sync {
    /// Fetch all bottles.
    async fn list_bottles(&self) -> Result<Vec<Bottle>, DomainError>;

    /// Fetch one bottle by its upstream identifier.
    async fn get_bottle(&self, id: i64) -> Result<Bottle, DomainError>;

    /// Create a bottle and return it with its assigned identifier.
    async fn create_bottle(&self, data: &NewBottle) -> Result<Bottle, DomainError>;

    /// Replace a bottle wholesale.
    async fn update_bottle(&self, id: i64, data: &NewBottle) -> Result<Bottle, DomainError>;

    /// Apply a partial update to a bottle.
    async fn patch_bottle(&self, id: i64, patch: &BottlePatch) -> Result<Bottle, DomainError>;

    /// Delete a bottle entity entirely.
    async fn delete_bottle(&self, id: i64) -> Result<(), DomainError>;
}
