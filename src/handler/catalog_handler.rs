use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use std::sync::Arc;

use crate::dto::fragrance_dto::{SearchParams, SearchRequest};
use crate::service::fragrance_service::{FragranceService, FragranceServiceImpl};
use crate::util::error::HandlerError;

pub async fn list_fragrances_handler(
    State(service): State<Arc<FragranceServiceImpl>>,
) -> impl IntoResponse {
    Json(service.get_all().await)
}

pub async fn get_fragrance_handler(
    State(service): State<Arc<FragranceServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service
        .get_by_id(&id)
        .await
        .map(Json)
        .ok_or_else(|| HandlerError::not_found(format!("Fragrance {} not found", id)))
}

pub async fn search_query_handler(
    State(service): State<Arc<FragranceServiceImpl>>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, HandlerError> {
    let search = params.into_search().map_err(HandlerError::bad_request)?;
    Ok(Json(service.search(&search.query, &search.filters).await))
}

pub async fn search_handler(
    State(service): State<Arc<FragranceServiceImpl>>,
    Json(search): Json<SearchRequest>,
) -> impl IntoResponse {
    Json(service.search(&search.query, &search.filters).await)
}

pub async fn filter_options_handler(
    State(service): State<Arc<FragranceServiceImpl>>,
) -> impl IntoResponse {
    Json(service.filter_options().await)
}
