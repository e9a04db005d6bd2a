use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument, warn};

use crate::model::metadata::{insert_sorted, Metadata, MetadataCategory};
use crate::model::seed::default_metadata;
use crate::repository::metadata_repo::MetadataRepository;
use crate::util::error::ServiceError;

#[async_trait]
pub trait MetadataService: Send + Sync {
    /// Every vocabulary; the built-in defaults when the store is empty or unreadable.
    async fn get_all(&self) -> Metadata;
    async fn add_item(&self, category: MetadataCategory, item: &str) -> Result<Vec<String>, ServiceError>;
    async fn remove_item(&self, category: MetadataCategory, item: &str) -> Result<Vec<String>, ServiceError>;
    async fn rename_item(&self, category: MetadataCategory, from: &str, to: &str) -> Result<Vec<String>, ServiceError>;
    async fn seed(&self) -> Result<(), ServiceError>;
}

pub struct MetadataServiceImpl {
    pub metadata_repo: Arc<dyn MetadataRepository>,
}

impl MetadataServiceImpl {
    pub fn new(metadata_repo: Arc<dyn MetadataRepository>) -> Self {
        Self { metadata_repo }
    }

    async fn current_values(&self, category: MetadataCategory) -> Result<Option<Vec<String>>, ServiceError> {
        Ok(self.metadata_repo.find(category).await?.map(|d| d.values))
    }
}

fn clean_item(item: &str) -> Result<&str, ServiceError> {
    let item = item.trim();
    if item.is_empty() {
        return Err(ServiceError::InvalidInput("Item cannot be empty".to_string()));
    }
    Ok(item)
}

#[async_trait]
impl MetadataService for MetadataServiceImpl {
    async fn get_all(&self) -> Metadata {
        let docs = match self.metadata_repo.find_all().await {
            Ok(docs) => docs,
            Err(e) => {
                error!("Failed to read metadata, using defaults: {e}");
                return default_metadata();
            }
        };
        if docs.is_empty() {
            warn!("Metadata collection is empty, using defaults");
            return default_metadata();
        }
        let mut metadata = Metadata::default();
        for doc in docs {
            match doc.id.parse::<MetadataCategory>() {
                Ok(category) => metadata.set_values(category, doc.values),
                Err(_) => warn!(category = %doc.id, "Ignoring unknown metadata category"),
            }
        }
        metadata
    }

    #[instrument(skip(self), fields(category = %category))]
    async fn add_item(&self, category: MetadataCategory, item: &str) -> Result<Vec<String>, ServiceError> {
        let item = clean_item(item)?;
        let mut values = self.current_values(category).await?.unwrap_or_default();
        if insert_sorted(&mut values, item) {
            self.metadata_repo.save_values(category, &values).await?;
            info!("Metadata item added");
        }
        Ok(values)
    }

    #[instrument(skip(self), fields(category = %category))]
    async fn remove_item(&self, category: MetadataCategory, item: &str) -> Result<Vec<String>, ServiceError> {
        let Some(mut values) = self.current_values(category).await? else {
            return Ok(Vec::new());
        };
        let before = values.len();
        values.retain(|v| v != item);
        if values.len() != before {
            self.metadata_repo.save_values(category, &values).await?;
            info!("Metadata item removed");
        }
        Ok(values)
    }

    async fn rename_item(&self, category: MetadataCategory, from: &str, to: &str) -> Result<Vec<String>, ServiceError> {
        let to = clean_item(to)?;
        self.remove_item(category, from).await?;
        self.add_item(category, to).await
    }

    #[instrument(skip(self))]
    async fn seed(&self) -> Result<(), ServiceError> {
        let defaults = default_metadata();
        for category in MetadataCategory::ALL {
            self.metadata_repo.save_values(category, defaults.values(category)).await?;
        }
        info!("Default metadata seeded");
        Ok(())
    }
}
