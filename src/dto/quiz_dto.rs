use std::collections::HashMap;

use serde::Deserialize;
use validator::Validate;

use crate::dto::contact_dto::ContactRequest;
use crate::model::quiz::{Quiz, QuizQuestion};
use crate::recommendation::AnswerValue;

/// Answers keyed by question id, plus the contact form when it was shown.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteQuizRequest {
    #[serde(default)]
    pub responses: HashMap<String, AnswerValue>,
    #[serde(default)]
    pub contact: Option<ContactRequest>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuizRequest {
    #[validate(length(min = 1, max = 120))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
}

impl QuizRequest {
    pub fn into_quiz(self, id: Option<bson::oid::ObjectId>) -> Quiz {
        Quiz { id, title: self.title, description: self.description, active: self.active, questions: self.questions }
    }
}
