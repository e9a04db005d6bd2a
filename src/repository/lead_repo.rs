use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::TryStreamExt;
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use tracing::{error, info, instrument};

use crate::model::lead::{ContactDetails, Lead};
use crate::repository::mongo::LEADS;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait LeadRepository: Send + Sync {
    async fn find_all(&self) -> RepositoryResult<Vec<Lead>>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Lead>>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Lead>>;
    async fn insert(&self, lead: Lead) -> RepositoryResult<Lead>;
    /// Sets the contact fields; `quiz_result` is written only when given.
    async fn update_contact(&self, id: &ObjectId, contact: &ContactDetails, quiz_result: Option<&str>) -> RepositoryResult<()>;
    async fn touch(&self, id: &ObjectId, timestamp: &str) -> RepositoryResult<()>;
    async fn add_to_wishlist(&self, id: &ObjectId, fragrance_id: &ObjectId) -> RepositoryResult<()>;
    async fn remove_from_wishlist(&self, id: &ObjectId, fragrance_id: &ObjectId) -> RepositoryResult<()>;
    async fn delete(&self, id: &ObjectId) -> RepositoryResult<()>;
    async fn delete_many(&self, ids: &[ObjectId]) -> RepositoryResult<u64>;
}

pub struct MongoLeadRepository {
    collection: Collection<Lead>,
}

impl MongoLeadRepository {
    pub fn new(db: &Database) -> Self {
        MongoLeadRepository { collection: db.collection::<Lead>(LEADS) }
    }

    /// Email is the natural key of a lead; the store enforces it.
    pub async fn ensure_indexes(&self) -> RepositoryResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).name("email_unique".to_string()).build())
            .build();
        self.collection.create_index(index, None).await?;
        info!("Lead indexes ensured");
        Ok(())
    }

    async fn expect_match(&self, id: &ObjectId, update: bson::Document) -> RepositoryResult<()> {
        let result = self.collection.update_one(doc! { "_id": *id }, update, None).await?;
        if result.matched_count == 0 {
            return Err(RepositoryError::missing_document(LEADS, id));
        }
        Ok(())
    }
}

#[async_trait]
impl LeadRepository for MongoLeadRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Lead>> {
        let cursor = self.collection.find(None, None).await?;
        let leads: Vec<Lead> = cursor
            .try_collect()
            .await
            .map_err(|e| RepositoryError::serialization(format!("Failed to deserialize lead: {}", e)))?;
        Ok(leads)
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Lead>> {
        self.collection
            .find_one(doc! { "_id": *id }, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find lead by id: {}", e)))
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Lead>> {
        self.collection
            .find_one(doc! { "email": email }, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find lead by email: {}", e)))
    }

    #[instrument(skip(self, lead), fields(email = %lead.email))]
    async fn insert(&self, mut lead: Lead) -> RepositoryResult<Lead> {
        lead.id = Some(ObjectId::new());
        match self.collection.insert_one(&lead, None).await {
            Ok(_) => {
                info!("Lead inserted");
                Ok(lead)
            }
            Err(e) => {
                error!("Failed to insert lead: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[instrument(skip(self, contact), fields(id = %id))]
    async fn update_contact(&self, id: &ObjectId, contact: &ContactDetails, quiz_result: Option<&str>) -> RepositoryResult<()> {
        let mut set = bson::to_document(contact)?;
        if let Some(result) = quiz_result {
            set.insert("quizResult", result);
        }
        self.expect_match(id, doc! { "$set": set }).await
    }

    async fn touch(&self, id: &ObjectId, timestamp: &str) -> RepositoryResult<()> {
        self.expect_match(id, doc! { "$set": { "timestamp": timestamp } }).await
    }

    #[instrument(skip(self), fields(id = %id, fragrance_id = %fragrance_id))]
    async fn add_to_wishlist(&self, id: &ObjectId, fragrance_id: &ObjectId) -> RepositoryResult<()> {
        self.expect_match(id, doc! { "$addToSet": { "wishlist": *fragrance_id } }).await
    }

    #[instrument(skip(self), fields(id = %id, fragrance_id = %fragrance_id))]
    async fn remove_from_wishlist(&self, id: &ObjectId, fragrance_id: &ObjectId) -> RepositoryResult<()> {
        self.expect_match(id, doc! { "$pull": { "wishlist": *fragrance_id } }).await
    }

    async fn delete(&self, id: &ObjectId) -> RepositoryResult<()> {
        let result = self.collection.delete_one(doc! { "_id": *id }, None).await?;
        if result.deleted_count == 0 {
            return Err(RepositoryError::missing_document(LEADS, id));
        }
        Ok(())
    }

    async fn delete_many(&self, ids: &[ObjectId]) -> RepositoryResult<u64> {
        let result = self
            .collection
            .delete_many(doc! { "_id": { "$in": ids.to_vec() } }, None)
            .await?;
        Ok(result.deleted_count)
    }
}
