use super::{PersonError, PersonStore};
use crate::models::{NewPerson, Person, PersonChanges};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::{ClientOptions, FindOptions},
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    /// Creates the process-wide client. The driver pools connections and is
    /// safe for concurrent use, so one handle is shared by every request.
    pub async fn connect(uri: &str, database: &str, app_name: &str) -> Result<Self, AppError> {
        let mut client_options = ClientOptions::parse(uri).await.map_err(|e| {
            tracing::error!("Failed to parse MongoDB connection string: {}", e);
            AppError::from(e)
        })?;
        client_options.app_name = Some(app_name.to_string());

        let client = MongoClient::with_options(client_options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Connected to MongoDB");
        Ok(Self { client, db })
    }

    pub async fn health_check(&self) -> Result<(), mongodb::error::Error> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                e
            })?;
        Ok(())
    }

    pub fn persons(&self, collection: &str) -> Collection<Person> {
        self.db.collection(collection)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }
}

/// [`PersonStore`] over a single MongoDB collection.
#[derive(Clone)]
pub struct MongoPersonStore {
    db: MongoDb,
    collection: Collection<Person>,
}

impl MongoPersonStore {
    pub fn new(db: MongoDb, collection: &str) -> Self {
        let collection = db.persons(collection);
        Self { db, collection }
    }
}

#[async_trait]
impl PersonStore for MongoPersonStore {
    async fn insert(&self, person: &NewPerson) -> Result<ObjectId, PersonError> {
        let result = self
            .collection
            .clone_with_type::<NewPerson>()
            .insert_one(person, None)
            .await?;

        result.inserted_id.as_object_id().ok_or_else(|| {
            PersonError::Internal(anyhow::anyhow!(
                "Store assigned a non-ObjectId _id: {}",
                result.inserted_id
            ))
        })
    }

    async fn find_one(&self, id: &ObjectId) -> Result<Option<Person>, PersonError> {
        Ok(self.collection.find_one(doc! { "_id": *id }, None).await?)
    }

    async fn find_many(&self, limit: usize) -> Result<Vec<Person>, PersonError> {
        let options = FindOptions::builder()
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .build();

        let cursor = self.collection.find(None, options).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn update_one(
        &self,
        id: &ObjectId,
        changes: &PersonChanges,
    ) -> Result<bool, PersonError> {
        let result = self
            .collection
            .update_one(doc! { "_id": *id }, changes.to_set_document(), None)
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete_one(&self, id: &ObjectId) -> Result<bool, PersonError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": *id }, None)
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> Result<(), PersonError> {
        Ok(self.db.health_check().await?)
    }

    async fn close(&self) {
        tracing::info!("Closing MongoDB client");
        self.db.client().clone().shutdown().await;
    }
}
