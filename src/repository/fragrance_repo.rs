use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::TryStreamExt;
use mongodb::{Collection, Database};
use tracing::{error, info, instrument};

use crate::model::fragrance::Fragrance;
use crate::repository::mongo::FRAGRANCES;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait FragranceRepository: Send + Sync {
    async fn find_all(&self) -> RepositoryResult<Vec<Fragrance>>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Fragrance>>;
    async fn insert(&self, fragrance: Fragrance) -> RepositoryResult<Fragrance>;
    async fn insert_many(&self, fragrances: Vec<Fragrance>) -> RepositoryResult<usize>;
    async fn update(&self, id: &ObjectId, fragrance: Fragrance) -> RepositoryResult<Fragrance>;
    async fn set_in_stock(&self, id: &ObjectId, in_stock: bool) -> RepositoryResult<()>;
    async fn delete(&self, id: &ObjectId) -> RepositoryResult<()>;
    async fn delete_many(&self, ids: &[ObjectId]) -> RepositoryResult<u64>;
    async fn count(&self) -> RepositoryResult<u64>;
}

pub struct MongoFragranceRepository {
    collection: Collection<Fragrance>,
}

impl MongoFragranceRepository {
    pub fn new(db: &Database) -> Self {
        MongoFragranceRepository { collection: db.collection::<Fragrance>(FRAGRANCES) }
    }
}

#[async_trait]
impl FragranceRepository for MongoFragranceRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> RepositoryResult<Vec<Fragrance>> {
        let cursor = self.collection.find(None, None).await.map_err(|e| {
            error!("Failed to list fragrances: {}", e);
            RepositoryError::from(e)
        })?;
        let fragrances: Vec<Fragrance> = cursor.try_collect().await.map_err(|e| {
            error!("Failed to deserialize fragrance: {}", e);
            RepositoryError::serialization(format!("Failed to deserialize fragrance: {}", e))
        })?;
        info!("Fetched {} fragrances", fragrances.len());
        Ok(fragrances)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Fragrance>> {
        self.collection
            .find_one(doc! { "_id": *id }, None)
            .await
            .map_err(RepositoryError::from)
    }

    #[instrument(skip(self, fragrance), fields(name = %fragrance.name))]
    async fn insert(&self, mut fragrance: Fragrance) -> RepositoryResult<Fragrance> {
        fragrance.id = Some(ObjectId::new());
        self.collection.insert_one(&fragrance, None).await.map_err(|e| {
            error!("Failed to create fragrance: {}", e);
            RepositoryError::from(e)
        })?;
        info!("Fragrance created");
        Ok(fragrance)
    }

    async fn insert_many(&self, fragrances: Vec<Fragrance>) -> RepositoryResult<usize> {
        if fragrances.is_empty() {
            return Ok(0);
        }
        let docs: Vec<Fragrance> = fragrances
            .into_iter()
            .map(|mut f| {
                f.id = Some(ObjectId::new());
                f
            })
            .collect();
        let result = self.collection.insert_many(docs, None).await?;
        Ok(result.inserted_ids.len())
    }

    #[instrument(skip(self, fragrance), fields(id = %id))]
    async fn update(&self, id: &ObjectId, mut fragrance: Fragrance) -> RepositoryResult<Fragrance> {
        let mut set = bson::to_document(&fragrance)?;
        set.remove("_id");
        let result = self
            .collection
            .update_one(doc! { "_id": *id }, doc! { "$set": set }, None)
            .await
            .map_err(|e| {
                error!("Failed to update fragrance: {}", e);
                RepositoryError::from(e)
            })?;
        if result.matched_count == 0 {
            return Err(RepositoryError::missing_document(FRAGRANCES, id));
        }
        fragrance.id = Some(*id);
        Ok(fragrance)
    }

    #[instrument(skip(self), fields(id = %id, in_stock = in_stock))]
    async fn set_in_stock(&self, id: &ObjectId, in_stock: bool) -> RepositoryResult<()> {
        let result = self
            .collection
            .update_one(doc! { "_id": *id }, doc! { "$set": { "inStock": in_stock } }, None)
            .await?;
        if result.matched_count == 0 {
            return Err(RepositoryError::missing_document(FRAGRANCES, id));
        }
        Ok(())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &ObjectId) -> RepositoryResult<()> {
        let result = self.collection.delete_one(doc! { "_id": *id }, None).await?;
        if result.deleted_count == 0 {
            return Err(RepositoryError::missing_document(FRAGRANCES, id));
        }
        Ok(())
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn delete_many(&self, ids: &[ObjectId]) -> RepositoryResult<u64> {
        let result = self
            .collection
            .delete_many(doc! { "_id": { "$in": ids.to_vec() } }, None)
            .await?;
        info!("Deleted {} fragrances", result.deleted_count);
        Ok(result.deleted_count)
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.collection.count_documents(None, None).await?)
    }
}
