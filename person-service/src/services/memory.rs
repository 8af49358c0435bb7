use super::{PersonError, PersonStore};
use crate::models::{NewPerson, Person, PersonChanges};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Process-local [`PersonStore`] keeping records in insertion order.
///
/// Used by router tests and for running the service without MongoDB.
#[derive(Default)]
pub struct InMemoryPersonStore {
    persons: Mutex<Vec<Person>>,
    unavailable: AtomicBool,
}

impl InMemoryPersonStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail as if the store were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.persons.lock().map(|p| p.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Person>>, PersonError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PersonError::Internal(anyhow::anyhow!(
                "In-memory store marked unavailable"
            )));
        }
        self.persons
            .lock()
            .map_err(|e| PersonError::Internal(anyhow::anyhow!("Person store mutex poisoned: {}", e)))
    }
}

#[async_trait]
impl PersonStore for InMemoryPersonStore {
    async fn insert(&self, person: &NewPerson) -> Result<ObjectId, PersonError> {
        let id = ObjectId::new();
        self.lock()?.push(person.clone().with_id(id));
        Ok(id)
    }

    async fn find_one(&self, id: &ObjectId) -> Result<Option<Person>, PersonError> {
        Ok(self.lock()?.iter().find(|p| p.id == *id).cloned())
    }

    async fn find_many(&self, limit: usize) -> Result<Vec<Person>, PersonError> {
        Ok(self.lock()?.iter().take(limit).cloned().collect())
    }

    async fn update_one(
        &self,
        id: &ObjectId,
        changes: &PersonChanges,
    ) -> Result<bool, PersonError> {
        let mut persons = self.lock()?;
        match persons.iter_mut().find(|p| p.id == *id) {
            Some(person) => {
                changes.apply_to(person);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_one(&self, id: &ObjectId) -> Result<bool, PersonError> {
        let mut persons = self.lock()?;
        let before = persons.len();
        persons.retain(|p| p.id != *id);
        Ok(persons.len() < before)
    }

    async fn ping(&self) -> Result<(), PersonError> {
        self.lock().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_person(name: &str) -> NewPerson {
        NewPerson {
            name: name.to_string(),
            occupation: "Engineer".to_string(),
            address: "1 Infinite Loop".to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_many_respects_limit_and_order() {
        let store = InMemoryPersonStore::new();
        for name in ["a", "b", "c"] {
            store.insert(&new_person(name)).await.unwrap();
        }

        let names: Vec<_> = store
            .find_many(2)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_update_and_delete_report_matches() {
        let store = InMemoryPersonStore::new();
        let id = store.insert(&new_person("Ada")).await.unwrap();
        let missing = ObjectId::new();
        let changes = PersonChanges {
            name: Some("Grace".to_string()),
            ..Default::default()
        };

        assert!(store.update_one(&id, &changes).await.unwrap());
        assert!(!store.update_one(&missing, &changes).await.unwrap());
        assert_eq!(store.find_one(&id).await.unwrap().unwrap().name, "Grace");

        assert!(store.delete_one(&id).await.unwrap());
        assert!(!store.delete_one(&id).await.unwrap());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_calls() {
        let store = InMemoryPersonStore::new();
        store.set_unavailable(true);
        assert!(store.ping().await.is_err());
        assert!(store.find_many(10).await.is_err());
    }
}
