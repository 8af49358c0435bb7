//! Storage seam: the driver-level primitives the repository composes.

use super::PersonError;
use crate::models::{NewPerson, Person, PersonChanges};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

/// Each call is a single atomic operation against the backing store.
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait PersonStore: Send + Sync {
    /// Inserts a record and returns the id the store assigned.
    async fn insert(&self, person: &NewPerson) -> Result<ObjectId, PersonError>;

    async fn find_one(&self, id: &ObjectId) -> Result<Option<Person>, PersonError>;

    /// Up to `limit` records in the store's natural order.
    async fn find_many(&self, limit: usize) -> Result<Vec<Person>, PersonError>;

    /// Applies `changes` with `$set` semantics. Returns whether a record matched.
    async fn update_one(&self, id: &ObjectId, changes: &PersonChanges)
        -> Result<bool, PersonError>;

    /// Returns whether a record was removed.
    async fn delete_one(&self, id: &ObjectId) -> Result<bool, PersonError>;

    async fn ping(&self) -> Result<(), PersonError>;

    /// Releases the underlying connection, if any.
    async fn close(&self) {}
}
