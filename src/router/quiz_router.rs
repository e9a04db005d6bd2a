use axum::{Router, routing::{get, post}};
use std::sync::Arc;

use crate::handler::quiz_handler::{active_quizzes_handler, complete_quiz_handler, recommendations_handler};
use crate::service::quiz_service::QuizServiceImpl;

pub fn quiz_router(service: Arc<QuizServiceImpl>) -> Router {
    Router::new()
        .route("/quizzes/active", get(active_quizzes_handler))
        .route("/quizzes/recommendations", post(recommendations_handler))
        .route("/quizzes/{id}/complete", post(complete_quiz_handler))
        .with_state(service)
}
