use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::dto::admin_dto::{BatchDeleteRequest, LeadRequest, MetadataItemRequest, MetadataRenameRequest, UnlockRequest};
use crate::dto::fragrance_dto::{FragranceRequest, StockRequest};
use crate::dto::quiz_dto::QuizRequest;
use crate::model::settings::SettingsUpdate;
use crate::service::analytics_service::{AnalyticsService, AnalyticsServiceImpl};
use crate::service::fragrance_service::{FragranceService, FragranceServiceImpl};
use crate::service::lead_service::{LeadService, LeadServiceImpl};
use crate::service::metadata_service::{MetadataService, MetadataServiceImpl};
use crate::service::quiz_service::{QuizService, QuizServiceImpl};
use crate::service::settings_service::{SettingsService, SettingsServiceImpl};
use crate::util::error::{parse_object_id, HandlerError, ServiceError};
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};

pub struct AdminState {
    pub fragrance_service: Arc<FragranceServiceImpl>,
    pub quiz_service: Arc<QuizServiceImpl>,
    pub lead_service: Arc<LeadServiceImpl>,
    pub metadata_service: Arc<MetadataServiceImpl>,
    pub settings_service: Arc<SettingsServiceImpl>,
    pub analytics_service: Arc<AnalyticsServiceImpl>,
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

fn parse_ids(raw: &[String]) -> Result<Vec<bson::oid::ObjectId>, ServiceError> {
    raw.iter().map(|id| parse_object_id(id)).collect()
}

// Unlock

pub async fn unlock_handler(
    State(state): State<Arc<AdminState>>,
    Json(payload): Json<UnlockRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate()?;
    state.settings_service.verify_pin(&payload.pin).await?;
    let token = state
        .jwt_utils
        .generate_admin_token()
        .map_err(|e| HandlerError::from(ServiceError::InternalError(e.to_string())))?;
    info!("Admin dashboard unlocked");
    Ok(Json(token))
}

// Inventory

pub async fn list_inventory_handler(State(state): State<Arc<AdminState>>) -> impl IntoResponse {
    Json(state.fragrance_service.get_all().await)
}

pub async fn create_fragrance_handler(
    State(state): State<Arc<AdminState>>,
    Json(payload): Json<FragranceRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate()?;
    let created = state.fragrance_service.add(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_fragrance_handler(
    State(state): State<Arc<AdminState>>,
    Path(id): Path<String>,
    Json(payload): Json<FragranceRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id)?;
    payload.validate()?;
    let updated = state.fragrance_service.update(&id, payload.into()).await?;
    Ok(Json(updated))
}

pub async fn set_stock_handler(
    State(state): State<Arc<AdminState>>,
    Path(id): Path<String>,
    Json(payload): Json<StockRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id)?;
    state.fragrance_service.set_in_stock(&id, payload.in_stock).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_fragrance_handler(
    State(state): State<Arc<AdminState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id)?;
    state.fragrance_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn batch_delete_fragrances_handler(
    State(state): State<Arc<AdminState>>,
    Json(payload): Json<BatchDeleteRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate()?;
    let deleted = state.fragrance_service.delete_many(&parse_ids(&payload.ids)?).await?;
    Ok(Json(json!({ "deleted": deleted })))
}

// Quizzes

pub async fn list_quizzes_handler(State(state): State<Arc<AdminState>>) -> Result<impl IntoResponse, HandlerError> {
    Ok(Json(state.quiz_service.get_all().await?))
}

pub async fn create_quiz_handler(
    State(state): State<Arc<AdminState>>,
    Json(payload): Json<QuizRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate()?;
    let saved = state.quiz_service.save(payload.into_quiz(None)).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn update_quiz_handler(
    State(state): State<Arc<AdminState>>,
    Path(id): Path<String>,
    Json(payload): Json<QuizRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id)?;
    payload.validate()?;
    Ok(Json(state.quiz_service.save(payload.into_quiz(Some(id))).await?))
}

pub async fn delete_quiz_handler(
    State(state): State<Arc<AdminState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    state.quiz_service.delete(&parse_object_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn batch_delete_quizzes_handler(
    State(state): State<Arc<AdminState>>,
    Json(payload): Json<BatchDeleteRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate()?;
    let deleted = state.quiz_service.delete_many(&parse_ids(&payload.ids)?).await?;
    Ok(Json(json!({ "deleted": deleted })))
}

// Leads

pub async fn list_leads_handler(State(state): State<Arc<AdminState>>) -> Result<impl IntoResponse, HandlerError> {
    Ok(Json(state.lead_service.list().await?))
}

pub async fn create_lead_handler(
    State(state): State<Arc<AdminState>>,
    Json(payload): Json<LeadRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate()?;
    let (contact, quiz_result) = payload.into_parts();
    let lead = state.lead_service.create(contact, quiz_result).await?;
    Ok((StatusCode::CREATED, Json(lead)))
}

pub async fn get_lead_handler(
    State(state): State<Arc<AdminState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    Ok(Json(state.lead_service.get(&parse_object_id(&id)?).await?))
}

pub async fn update_lead_handler(
    State(state): State<Arc<AdminState>>,
    Path(id): Path<String>,
    Json(payload): Json<LeadRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id)?;
    payload.validate()?;
    let (contact, quiz_result) = payload.into_parts();
    Ok(Json(state.lead_service.update(&id, contact, quiz_result).await?))
}

pub async fn delete_lead_handler(
    State(state): State<Arc<AdminState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    state.lead_service.delete(&parse_object_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn batch_delete_leads_handler(
    State(state): State<Arc<AdminState>>,
    Json(payload): Json<BatchDeleteRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate()?;
    let deleted = state.lead_service.delete_many(&parse_ids(&payload.ids)?).await?;
    Ok(Json(json!({ "deleted": deleted })))
}

pub async fn lead_wishlist_handler(
    State(state): State<Arc<AdminState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    Ok(Json(state.lead_service.wishlist_items(&parse_object_id(&id)?).await?))
}

// Parameters

pub async fn get_metadata_handler(State(state): State<Arc<AdminState>>) -> impl IntoResponse {
    Json(state.metadata_service.get_all().await)
}

pub async fn add_metadata_handler(
    State(state): State<Arc<AdminState>>,
    Json(payload): Json<MetadataItemRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate()?;
    let values = state.metadata_service.add_item(payload.category, &payload.item).await?;
    Ok(Json(json!({ "category": payload.category, "values": values })))
}

pub async fn remove_metadata_handler(
    State(state): State<Arc<AdminState>>,
    Json(payload): Json<MetadataItemRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate()?;
    let values = state.metadata_service.remove_item(payload.category, &payload.item).await?;
    Ok(Json(json!({ "category": payload.category, "values": values })))
}

pub async fn rename_metadata_handler(
    State(state): State<Arc<AdminState>>,
    Json(payload): Json<MetadataRenameRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate()?;
    let values = state
        .metadata_service
        .rename_item(payload.category, &payload.from, &payload.to)
        .await?;
    Ok(Json(json!({ "category": payload.category, "values": values })))
}

// Settings and stats

pub async fn get_settings_handler(State(state): State<Arc<AdminState>>) -> impl IntoResponse {
    Json(state.settings_service.get().await)
}

pub async fn update_settings_handler(
    State(state): State<Arc<AdminState>>,
    Json(payload): Json<SettingsUpdate>,
) -> Result<impl IntoResponse, HandlerError> {
    if payload.is_empty() {
        return Err(HandlerError::bad_request("No settings to update"));
    }
    Ok(Json(state.settings_service.update(payload).await?))
}

pub async fn stats_handler(State(state): State<Arc<AdminState>>) -> Result<impl IntoResponse, HandlerError> {
    Ok(Json(state.analytics_service.stats().await?))
}
