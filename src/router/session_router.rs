use axum::{Router, routing::{get, post}};
use std::sync::Arc;

use crate::handler::session_handler::{
    current_session_handler,
    identify_handler,
    login_handler,
    logout_handler,
    toggle_wishlist_handler,
    wishlist_handler,
};
use crate::service::lead_service::LeadServiceImpl;

pub fn session_router(service: Arc<LeadServiceImpl>) -> Router {
    Router::new()
        .route("/session", get(current_session_handler).delete(logout_handler))
        .route("/session/identify", post(identify_handler))
        .route("/session/login", post(login_handler))
        .route("/session/wishlist", get(wishlist_handler))
        .route("/session/wishlist/{fragrance_id}", post(toggle_wishlist_handler))
        .with_state(service)
}
