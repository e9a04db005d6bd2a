use axum::{Router, routing::get};
use std::sync::Arc;

use crate::handler::catalog_handler::{
    filter_options_handler,
    get_fragrance_handler,
    list_fragrances_handler,
    search_handler,
    search_query_handler,
};
use crate::service::fragrance_service::FragranceServiceImpl;

pub fn catalog_router(service: Arc<FragranceServiceImpl>) -> Router {
    Router::new()
        .route("/fragrances", get(list_fragrances_handler))
        .route("/fragrances/search", get(search_query_handler).post(search_handler))
        .route("/fragrances/filters", get(filter_options_handler))
        .route("/fragrances/{id}", get(get_fragrance_handler))
        .with_state(service)
}
