use axum::{extract::{Path, State}, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::dto::quiz_dto::CompleteQuizRequest;
use crate::recommendation::QuizAnswers;
use crate::service::quiz_service::{QuizService, QuizServiceImpl};
use crate::util::error::{parse_object_id, HandlerError};

pub async fn active_quizzes_handler(
    State(service): State<Arc<QuizServiceImpl>>,
) -> impl IntoResponse {
    Json(service.get_active().await)
}

pub async fn recommendations_handler(
    State(service): State<Arc<QuizServiceImpl>>,
    Json(answers): Json<QuizAnswers>,
) -> impl IntoResponse {
    Json(service.recommendations(&answers).await)
}

pub async fn complete_quiz_handler(
    State(service): State<Arc<QuizServiceImpl>>,
    Path(id): Path<String>,
    Json(payload): Json<CompleteQuizRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let quiz_id = parse_object_id(&id)?;
    if let Some(contact) = &payload.contact {
        contact.validate()?;
    }
    info!(quiz = %quiz_id, answers = payload.responses.len(), "Quiz submitted");
    let outcome = service
        .complete_quiz(&quiz_id, payload.responses, payload.contact.map(Into::into))
        .await?;
    Ok(Json(outcome))
}
