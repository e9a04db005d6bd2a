use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use crate::model::fragrance::{Fragrance, Gender};
use crate::repository::fragrance_repo::FragranceRepository;
use crate::service::metadata_service::{MetadataService, MetadataServiceImpl};
use crate::util::error::ServiceError;

/// Any-of filters; an empty list does not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FragranceFilters {
    #[serde(default)]
    pub gender: Vec<Gender>,
    #[serde(default)]
    pub vendor: Vec<String>,
    #[serde(default)]
    pub occasion: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub genders: Vec<Gender>,
    pub vendors: Vec<String>,
    pub occasions: Vec<String>,
    pub notes: Vec<String>,
}

/// Case-insensitive substring on name or vendor, then every non-empty filter.
pub fn matches_search(fragrance: &Fragrance, text: &str, filters: &FragranceFilters) -> bool {
    let needle = text.trim().to_lowercase();
    if !needle.is_empty()
        && !fragrance.name.to_lowercase().contains(&needle)
        && !fragrance.vendor.to_lowercase().contains(&needle)
    {
        return false;
    }
    if !filters.gender.is_empty() && !filters.gender.contains(&fragrance.gender) {
        return false;
    }
    if !filters.vendor.is_empty() && !filters.vendor.contains(&fragrance.vendor) {
        return false;
    }
    if !filters.occasion.is_empty() && !fragrance.occasion.iter().any(|o| filters.occasion.contains(o)) {
        return false;
    }
    if !filters.notes.is_empty() && !fragrance.notes.all().any(|n| filters.notes.contains(n)) {
        return false;
    }
    true
}

#[async_trait]
pub trait FragranceService: Send + Sync {
    /// Whole catalog in store order; empty when the store is unreachable.
    async fn get_all(&self) -> Vec<Fragrance>;
    async fn get_by_id(&self, id: &str) -> Option<Fragrance>;
    /// Catalog entries among `ids`; ids that no longer exist are skipped.
    async fn get_by_ids(&self, ids: &[ObjectId]) -> Vec<Fragrance>;
    async fn search(&self, text: &str, filters: &FragranceFilters) -> Vec<Fragrance>;
    async fn filter_options(&self) -> FilterOptions;
    async fn add(&self, fragrance: Fragrance) -> Result<Fragrance, ServiceError>;
    async fn update(&self, id: &ObjectId, fragrance: Fragrance) -> Result<Fragrance, ServiceError>;
    async fn set_in_stock(&self, id: &ObjectId, in_stock: bool) -> Result<(), ServiceError>;
    async fn delete(&self, id: &ObjectId) -> Result<(), ServiceError>;
    async fn delete_many(&self, ids: &[ObjectId]) -> Result<u64, ServiceError>;
}

pub struct FragranceServiceImpl {
    pub fragrance_repo: Arc<dyn FragranceRepository>,
    pub metadata_service: Arc<MetadataServiceImpl>,
}

impl FragranceServiceImpl {
    pub fn new(fragrance_repo: Arc<dyn FragranceRepository>, metadata_service: Arc<MetadataServiceImpl>) -> Self {
        Self { fragrance_repo, metadata_service }
    }
}

fn check_fragrance(fragrance: &Fragrance) -> Result<(), ServiceError> {
    if fragrance.name.trim().is_empty() {
        return Err(ServiceError::InvalidInput("Fragrance name is required".to_string()));
    }
    if fragrance.vendor.trim().is_empty() {
        return Err(ServiceError::InvalidInput("Vendor is required".to_string()));
    }
    Ok(())
}

#[async_trait]
impl FragranceService for FragranceServiceImpl {
    async fn get_all(&self) -> Vec<Fragrance> {
        match self.fragrance_repo.find_all().await {
            Ok(all) => all,
            Err(e) => {
                error!("Failed to load catalog: {e}");
                Vec::new()
            }
        }
    }

    async fn get_by_id(&self, id: &str) -> Option<Fragrance> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            warn!(id, "Malformed fragrance id");
            return None;
        };
        match self.fragrance_repo.find_by_id(&oid).await {
            Ok(found) => found,
            Err(e) => {
                error!("Failed to load fragrance {}: {e}", id);
                None
            }
        }
    }

    async fn get_by_ids(&self, ids: &[ObjectId]) -> Vec<Fragrance> {
        if ids.is_empty() {
            return Vec::new();
        }
        self.get_all()
            .await
            .into_iter()
            .filter(|f| f.id.as_ref().is_some_and(|id| ids.contains(id)))
            .collect()
    }

    #[instrument(skip(self, filters))]
    async fn search(&self, text: &str, filters: &FragranceFilters) -> Vec<Fragrance> {
        self.get_all().await.into_iter().filter(|f| matches_search(f, text, filters)).collect()
    }

    async fn filter_options(&self) -> FilterOptions {
        let metadata = self.metadata_service.get_all().await;
        FilterOptions {
            genders: Gender::ALL.to_vec(),
            vendors: metadata.vendors,
            occasions: metadata.occasions,
            notes: metadata.notes,
        }
    }

    #[instrument(skip(self, fragrance), fields(name = %fragrance.name))]
    async fn add(&self, fragrance: Fragrance) -> Result<Fragrance, ServiceError> {
        check_fragrance(&fragrance)?;
        let inserted = self.fragrance_repo.insert(fragrance).await?;
        info!("Fragrance added");
        Ok(inserted)
    }

    #[instrument(skip(self, fragrance), fields(id = %id))]
    async fn update(&self, id: &ObjectId, fragrance: Fragrance) -> Result<Fragrance, ServiceError> {
        check_fragrance(&fragrance)?;
        Ok(self.fragrance_repo.update(id, fragrance).await?)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn set_in_stock(&self, id: &ObjectId, in_stock: bool) -> Result<(), ServiceError> {
        self.fragrance_repo.set_in_stock(id, in_stock).await?;
        info!(in_stock, "Stock status changed");
        Ok(())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &ObjectId) -> Result<(), ServiceError> {
        Ok(self.fragrance_repo.delete(id).await?)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn delete_many(&self, ids: &[ObjectId]) -> Result<u64, ServiceError> {
        let deleted = self.fragrance_repo.delete_many(ids).await?;
        info!(deleted, "Fragrances deleted");
        Ok(deleted)
    }
}
