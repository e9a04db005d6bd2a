use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::model::lead::{ContactDetails, Lead};
use crate::model::quiz::Quiz;
use crate::recommendation::{recommend, AnswerValue, QuizAnswers, ScoredFragrance};
use crate::repository::quiz_repo::QuizRepository;
use crate::service::fragrance_service::{FragranceService, FragranceServiceImpl};
use crate::service::lead_service::{LeadService, LeadServiceImpl};
use crate::service::settings_service::{SettingsService, SettingsServiceImpl};
use crate::session::SessionStore;
use crate::util::error::ServiceError;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOutcome {
    pub recommendations: Vec<ScoredFragrance>,
    pub user: Option<Lead>,
}

#[async_trait]
pub trait QuizService: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Quiz>, ServiceError>;
    async fn get_active(&self) -> Vec<Quiz>;
    /// Inserts when the quiz has no id, otherwise replaces its content.
    async fn save(&self, quiz: Quiz) -> Result<Quiz, ServiceError>;
    async fn delete(&self, id: &ObjectId) -> Result<(), ServiceError>;
    async fn delete_many(&self, ids: &[ObjectId]) -> Result<u64, ServiceError>;
    async fn recommendations(&self, answers: &QuizAnswers) -> Vec<ScoredFragrance>;
    async fn complete_quiz(
        &self,
        quiz_id: &ObjectId,
        responses: HashMap<String, AnswerValue>,
        contact: Option<ContactDetails>,
    ) -> Result<QuizOutcome, ServiceError>;
}

pub struct QuizServiceImpl {
    pub quiz_repo: Arc<dyn QuizRepository>,
    pub fragrance_service: Arc<FragranceServiceImpl>,
    pub lead_service: Arc<LeadServiceImpl>,
    pub settings_service: Arc<SettingsServiceImpl>,
    pub session: Arc<SessionStore>,
    pub recommendation_limit: usize,
}

impl QuizServiceImpl {
    pub fn new(
        quiz_repo: Arc<dyn QuizRepository>,
        fragrance_service: Arc<FragranceServiceImpl>,
        lead_service: Arc<LeadServiceImpl>,
        settings_service: Arc<SettingsServiceImpl>,
        session: Arc<SessionStore>,
        recommendation_limit: usize,
    ) -> Self {
        Self { quiz_repo, fragrance_service, lead_service, settings_service, session, recommendation_limit }
    }
}

#[async_trait]
impl QuizService for QuizServiceImpl {
    async fn get_all(&self) -> Result<Vec<Quiz>, ServiceError> {
        Ok(self.quiz_repo.find_all().await?)
    }

    async fn get_active(&self) -> Vec<Quiz> {
        match self.quiz_repo.find_all().await {
            Ok(quizzes) => quizzes.into_iter().filter(|q| q.active).collect(),
            Err(e) => {
                error!("Failed to load quizzes: {e}");
                Vec::new()
            }
        }
    }

    #[instrument(skip(self, quiz), fields(title = %quiz.title))]
    async fn save(&self, quiz: Quiz) -> Result<Quiz, ServiceError> {
        if quiz.title.trim().is_empty() {
            return Err(ServiceError::InvalidInput("Quiz title is required".to_string()));
        }
        let saved = match quiz.id {
            Some(id) => self.quiz_repo.update(&id, quiz).await?,
            None => self.quiz_repo.insert(quiz).await?,
        };
        info!("Quiz saved");
        Ok(saved)
    }

    async fn delete(&self, id: &ObjectId) -> Result<(), ServiceError> {
        Ok(self.quiz_repo.delete(id).await?)
    }

    async fn delete_many(&self, ids: &[ObjectId]) -> Result<u64, ServiceError> {
        Ok(self.quiz_repo.delete_many(ids).await?)
    }

    async fn recommendations(&self, answers: &QuizAnswers) -> Vec<ScoredFragrance> {
        let catalog = self.fragrance_service.get_all().await;
        recommend(answers, &catalog, self.recommendation_limit)
    }

    #[instrument(skip(self, responses, contact), fields(quiz = %quiz_id))]
    async fn complete_quiz(
        &self,
        quiz_id: &ObjectId,
        responses: HashMap<String, AnswerValue>,
        contact: Option<ContactDetails>,
    ) -> Result<QuizOutcome, ServiceError> {
        let quiz = self
            .quiz_repo
            .find_by_id(quiz_id)
            .await?
            .filter(|q| q.active && q.is_playable())
            .ok_or_else(|| ServiceError::NotFound(format!("No active quiz {}", quiz_id)))?;

        let settings = self.settings_service.get().await;
        let signed_in = self.session.get_user().is_some();
        if settings.collect_user_info && !signed_in && contact.is_none() {
            return Err(ServiceError::InvalidInput("Contact details are required".to_string()));
        }

        let answers = QuizAnswers::from_responses(&quiz, &responses);
        let recommendations = self.recommendations(&answers).await;
        info!(matches = recommendations.len(), "Quiz completed");

        if let (false, Some(contact)) = (signed_in, contact) {
            let top_match = recommendations.first().map(|r| r.fragrance.name.clone());
            self.lead_service.identify(contact, top_match).await?;
        }

        Ok(QuizOutcome { recommendations, user: self.session.get_user() })
    }
}
