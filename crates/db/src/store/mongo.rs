//! MongoDB-backed [`DocumentStore`].

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};

use super::{owned_filter, DocumentStore, StoreError, UpdateOutcome};

/// Application name reported to the MongoDB server.
const APP_NAME: &str = "poopyrus";

/// Store backed by a MongoDB database; the driver's client pools connections.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Parse `uri`, build a client and select `database`.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first operation (or [`DocumentStore::ping`]) rather than here.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some(APP_NAME.to_string());
        let client = Client::with_options(options)?;
        tracing::debug!(database, "MongoDB client created");
        Ok(Self {
            db: client.database(database),
        })
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection::<Document>(name)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let mut cursor = self.collection(collection).find(doc! {}).await?;
        let mut documents = Vec::new();
        while cursor.advance().await? {
            documents.push(cursor.deserialize_current()?);
        }
        Ok(documents)
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: ObjectId,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self
            .collection(collection)
            .find_one(doc! { "_id": id })
            .await?)
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<ObjectId, StoreError> {
        let result = self.collection(collection).insert_one(document).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Unavailable("insert did not return an ObjectId".into()))
    }

    async fn update_owned(
        &self,
        collection: &str,
        id: ObjectId,
        owner: &str,
        set: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        let filter = owned_filter(id, owner);

        // MongoDB rejects an empty `$set`.
        if set.is_empty() {
            let matched = self.collection(collection).count_documents(filter).await?;
            return Ok(UpdateOutcome {
                matched,
                modified: 0,
            });
        }

        let result = self
            .collection(collection)
            .update_one(filter, doc! { "$set": set })
            .await?;
        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_owned(
        &self,
        collection: &str,
        id: ObjectId,
        owner: &str,
    ) -> Result<u64, StoreError> {
        let result = self
            .collection(collection)
            .delete_one(owned_filter(id, owner))
            .await?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
