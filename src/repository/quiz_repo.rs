use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::TryStreamExt;
use mongodb::{Collection, Database};
use tracing::{error, info, instrument};

use crate::model::quiz::Quiz;
use crate::repository::mongo::QUIZZES;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn find_all(&self) -> RepositoryResult<Vec<Quiz>>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Quiz>>;
    async fn insert(&self, quiz: Quiz) -> RepositoryResult<Quiz>;
    async fn update(&self, id: &ObjectId, quiz: Quiz) -> RepositoryResult<Quiz>;
    async fn delete(&self, id: &ObjectId) -> RepositoryResult<()>;
    async fn delete_many(&self, ids: &[ObjectId]) -> RepositoryResult<u64>;
    async fn count(&self) -> RepositoryResult<u64>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        MongoQuizRepository { collection: db.collection::<Quiz>(QUIZZES) }
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Quiz>> {
        let cursor = self.collection.find(None, None).await?;
        let quizzes: Vec<Quiz> = cursor.try_collect().await.map_err(|e| {
            error!("Failed to deserialize quiz: {}", e);
            RepositoryError::serialization(format!("Failed to deserialize quiz: {}", e))
        })?;
        Ok(quizzes)
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Quiz>> {
        Ok(self.collection.find_one(doc! { "_id": *id }, None).await?)
    }

    #[instrument(skip(self, quiz), fields(title = %quiz.title))]
    async fn insert(&self, mut quiz: Quiz) -> RepositoryResult<Quiz> {
        quiz.id = Some(ObjectId::new());
        self.collection.insert_one(&quiz, None).await.map_err(|e| {
            error!("Failed to create quiz: {}", e);
            RepositoryError::from(e)
        })?;
        info!("Quiz created");
        Ok(quiz)
    }

    #[instrument(skip(self, quiz), fields(id = %id))]
    async fn update(&self, id: &ObjectId, mut quiz: Quiz) -> RepositoryResult<Quiz> {
        let questions = bson::to_bson(&quiz.questions)?;
        let update = doc! {
            "$set": {
                "title": quiz.title.clone(),
                "description": quiz.description.clone(),
                "active": quiz.active,
                "questions": questions,
            }
        };
        let result = self.collection.update_one(doc! { "_id": *id }, update, None).await?;
        if result.matched_count == 0 {
            return Err(RepositoryError::missing_document(QUIZZES, id));
        }
        quiz.id = Some(*id);
        Ok(quiz)
    }

    async fn delete(&self, id: &ObjectId) -> RepositoryResult<()> {
        let result = self.collection.delete_one(doc! { "_id": *id }, None).await?;
        if result.deleted_count == 0 {
            return Err(RepositoryError::missing_document(QUIZZES, id));
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

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.collection.count_documents(None, None).await?)
    }
}
