use async_trait::async_trait;
use bson::doc;
use futures::stream::TryStreamExt;
use mongodb::options::UpdateOptions;
use mongodb::{Collection, Database};
use tracing::instrument;

use crate::model::metadata::{MetadataCategory, MetadataDocument};
use crate::repository::mongo::METADATA;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait MetadataRepository: Send + Sync {
    async fn find_all(&self) -> RepositoryResult<Vec<MetadataDocument>>;
    async fn find(&self, category: MetadataCategory) -> RepositoryResult<Option<MetadataDocument>>;
    async fn save_values(&self, category: MetadataCategory, values: &[String]) -> RepositoryResult<()>;
}

pub struct MongoMetadataRepository {
    collection: Collection<MetadataDocument>,
}

impl MongoMetadataRepository {
    pub fn new(db: &Database) -> Self {
        MongoMetadataRepository { collection: db.collection::<MetadataDocument>(METADATA) }
    }
}

#[async_trait]
impl MetadataRepository for MongoMetadataRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<MetadataDocument>> {
        let cursor = self.collection.find(None, None).await?;
        cursor
            .try_collect()
            .await
            .map_err(|e| RepositoryError::serialization(format!("Failed to deserialize metadata: {}", e)))
    }

    async fn find(&self, category: MetadataCategory) -> RepositoryResult<Option<MetadataDocument>> {
        Ok(self.collection.find_one(doc! { "_id": category.as_str() }, None).await?)
    }

    #[instrument(skip(self, values), fields(category = %category, count = values.len()))]
    async fn save_values(&self, category: MetadataCategory, values: &[String]) -> RepositoryResult<()> {
        let options = UpdateOptions::builder().upsert(true).build();
        self.collection
            .update_one(
                doc! { "_id": category.as_str() },
                doc! { "$set": { "values": values.to_vec() } },
                options,
            )
            .await?;
        Ok(())
    }
}
