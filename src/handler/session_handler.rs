use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::dto::contact_dto::{ContactRequest, LoginRequest};
use crate::model::lead::Lead;
use crate::service::lead_service::{LeadService, LeadServiceImpl};
use crate::util::error::{parse_object_id, HandlerError};

fn session_lead(service: &LeadServiceImpl) -> Result<Lead, HandlerError> {
    service
        .session
        .get_user()
        .ok_or_else(|| HandlerError::unauthorized("No active session"))
}

fn lead_id(lead: &Lead) -> Result<bson::oid::ObjectId, HandlerError> {
    lead.id.ok_or_else(|| HandlerError::unauthorized("Session lead has no id"))
}

pub async fn current_session_handler(
    State(service): State<Arc<LeadServiceImpl>>,
) -> impl IntoResponse {
    Json(json!({ "user": service.session.get_user() }))
}

pub async fn identify_handler(
    State(service): State<Arc<LeadServiceImpl>>,
    Json(payload): Json<ContactRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate()?;
    let lead = service.identify(payload.into(), None).await?;
    Ok(Json(json!({ "user": lead })))
}

/// Unknown emails are a normal outcome: `{"user": null}`.
pub async fn login_handler(
    State(service): State<Arc<LeadServiceImpl>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate()?;
    let lead = service.login(&payload.email).await?;
    Ok(Json(json!({ "user": lead })))
}

pub async fn logout_handler(
    State(service): State<Arc<LeadServiceImpl>>,
) -> impl IntoResponse {
    service.logout();
    StatusCode::NO_CONTENT
}

pub async fn wishlist_handler(
    State(service): State<Arc<LeadServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let lead = session_lead(&service)?;
    let items = service.wishlist_items(&lead_id(&lead)?).await?;
    Ok(Json(items))
}

pub async fn toggle_wishlist_handler(
    State(service): State<Arc<LeadServiceImpl>>,
    Path(fragrance_id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let fragrance_id = parse_object_id(&fragrance_id)?;
    let lead = session_lead(&service)?;
    let wishlist = service.toggle_wishlist(&lead_id(&lead)?, &fragrance_id).await?;
    Ok(Json(json!({ "wishlist": wishlist })))
}
