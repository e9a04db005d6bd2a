use async_trait::async_trait;
use bson::doc;
use mongodb::options::UpdateOptions;
use mongodb::{Collection, Database};
use tracing::instrument;

use crate::model::settings::{Settings, SettingsUpdate, SETTINGS_DOCUMENT_ID};
use crate::repository::mongo::SETTINGS;
use crate::repository::repository_error::RepositoryResult;

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// `None` when the singleton document was never written.
    async fn get(&self) -> RepositoryResult<Option<Settings>>;
    async fn merge(&self, update: &SettingsUpdate) -> RepositoryResult<()>;
}

pub struct MongoSettingsRepository {
    collection: Collection<Settings>,
}

impl MongoSettingsRepository {
    pub fn new(db: &Database) -> Self {
        MongoSettingsRepository { collection: db.collection::<Settings>(SETTINGS) }
    }
}

#[async_trait]
impl SettingsRepository for MongoSettingsRepository {
    async fn get(&self) -> RepositoryResult<Option<Settings>> {
        Ok(self.collection.find_one(doc! { "_id": SETTINGS_DOCUMENT_ID }, None).await?)
    }

    #[instrument(skip(self))]
    async fn merge(&self, update: &SettingsUpdate) -> RepositoryResult<()> {
        let set = bson::to_document(update)?;
        if set.is_empty() {
            return Ok(());
        }
        let options = UpdateOptions::builder().upsert(true).build();
        self.collection
            .update_one(doc! { "_id": SETTINGS_DOCUMENT_ID }, doc! { "$set": set }, options)
            .await?;
        Ok(())
    }
}
