//! Person repository: the service's persistence operations over a [`PersonStore`].
//!
//! Writes are followed by a read of the same record. MongoDB gives
//! read-your-writes on a single client with the default primary read
//! preference; a store without that guarantee must return the written
//! document from the write call instead.

use super::{PersonError, PersonStore};
use crate::models::{NewPerson, Person, PersonChanges};
use metrics::counter;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;

/// Maximum number of records returned by a listing.
pub const LIST_LIMIT: usize = 999;

#[derive(Clone)]
pub struct PersonRepository {
    store: Arc<dyn PersonStore>,
}

impl PersonRepository {
    pub fn new(store: Arc<dyn PersonStore>) -> Self {
        Self { store }
    }

    /// Inserts a new record and returns it as stored, including its id.
    pub async fn create(&self, person: NewPerson) -> Result<Person, PersonError> {
        let id = self.store.insert(&person).await?;
        counter!("persons_mutations_total", "operation" => "create").increment(1);

        self.store.find_one(&id).await?.ok_or_else(|| {
            PersonError::Internal(anyhow::anyhow!(
                "Person {} was inserted but could not be read back",
                id
            ))
        })
    }

    pub async fn list_all(&self, limit: usize) -> Result<Vec<Person>, PersonError> {
        self.store.find_many(limit).await
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Person>, PersonError> {
        self.store.find_one(id).await
    }

    /// Applies the provided fields and returns the updated record.
    ///
    /// Existence is checked before the changes are inspected, so a missing
    /// record is reported as `NotFound` even for an empty patch. A record
    /// deleted between the check and the write is also `NotFound`.
    pub async fn update(
        &self,
        id: &ObjectId,
        changes: &PersonChanges,
    ) -> Result<Person, PersonError> {
        if self.store.find_one(id).await?.is_none() {
            return Err(PersonError::NotFound);
        }

        if changes.is_empty() {
            return Err(PersonError::EmptyUpdate);
        }

        if !self.store.update_one(id, changes).await? {
            tracing::warn!(person_id = %id, "Person disappeared before update was applied");
            return Err(PersonError::NotFound);
        }
        counter!("persons_mutations_total", "operation" => "update").increment(1);

        self.store
            .find_one(id)
            .await?
            .ok_or(PersonError::NotFound)
    }

    /// Hard delete. Returns `false` when no record had this id.
    pub async fn delete(&self, id: &ObjectId) -> Result<bool, PersonError> {
        let deleted = self.store.delete_one(id).await?;
        if deleted {
            counter!("persons_mutations_total", "operation" => "delete").increment(1);
        }
        Ok(deleted)
    }

    pub async fn ping(&self) -> Result<(), PersonError> {
        self.store.ping().await
    }

    pub async fn close(&self) {
        self.store.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::InMemoryPersonStore;
    use async_trait::async_trait;

    fn ada() -> NewPerson {
        NewPerson {
            name: "Ada".to_string(),
            occupation: "Engineer".to_string(),
            address: "1 Infinite Loop".to_string(),
        }
    }

    fn repository() -> (PersonRepository, Arc<InMemoryPersonStore>) {
        let store = Arc::new(InMemoryPersonStore::new());
        (PersonRepository::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_create_then_find_returns_same_record() {
        let (repo, _) = repository();
        let created = repo.create(ada()).await.unwrap();

        let found = repo.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(found, ada().with_id(created.id));
    }

    #[tokio::test]
    async fn test_update_missing_record_is_not_found_even_when_empty() {
        let (repo, _) = repository();
        let err = repo
            .update(&ObjectId::new(), &PersonChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PersonError::NotFound));
    }

    #[tokio::test]
    async fn test_empty_update_leaves_record_unchanged() {
        let (repo, _) = repository();
        let created = repo.create(ada()).await.unwrap();

        let err = repo
            .update(&created.id, &PersonChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PersonError::EmptyUpdate));
        assert_eq!(repo.find_by_id(&created.id).await.unwrap().unwrap(), created);
    }

    #[tokio::test]
    async fn test_partial_update_only_touches_given_fields() {
        let (repo, _) = repository();
        let created = repo.create(ada()).await.unwrap();

        let updated = repo
            .update(
                &created.id,
                &PersonChanges {
                    occupation: Some("Senior Engineer".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.occupation, "Senior Engineer");
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.address, created.address);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let (repo, store) = repository();
        let created = repo.create(ada()).await.unwrap();

        assert!(repo.delete(&created.id).await.unwrap());
        assert!(!repo.delete(&created.id).await.unwrap());
        assert!(store.is_empty());
    }

    /// Reports the record as present, then loses it before the write lands.
    struct VanishingStore {
        inner: InMemoryPersonStore,
    }

    #[async_trait]
    impl PersonStore for VanishingStore {
        async fn insert(&self, person: &NewPerson) -> Result<ObjectId, PersonError> {
            self.inner.insert(person).await
        }

        async fn find_one(&self, id: &ObjectId) -> Result<Option<Person>, PersonError> {
            self.inner.find_one(id).await
        }

        async fn find_many(&self, limit: usize) -> Result<Vec<Person>, PersonError> {
            self.inner.find_many(limit).await
        }

        async fn update_one(
            &self,
            id: &ObjectId,
            changes: &PersonChanges,
        ) -> Result<bool, PersonError> {
            self.inner.delete_one(id).await?;
            self.inner.update_one(id, changes).await
        }

        async fn delete_one(&self, id: &ObjectId) -> Result<bool, PersonError> {
            self.inner.delete_one(id).await
        }

        async fn ping(&self) -> Result<(), PersonError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_concurrent_delete_during_update_is_not_found() {
        let repo = PersonRepository::new(Arc::new(VanishingStore {
            inner: InMemoryPersonStore::new(),
        }));
        let created = repo.create(ada()).await.unwrap();

        let err = repo
            .update(
                &created.id,
                &PersonChanges {
                    name: Some("Grace".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PersonError::NotFound));
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let (repo, store) = repository();
        store.set_unavailable(true);
        assert!(matches!(
            repo.list_all(LIST_LIMIT).await,
            Err(PersonError::Internal(_))
        ));
    }
}
