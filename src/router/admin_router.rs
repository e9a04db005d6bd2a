use axum::{Router, routing::{get, post, put}, middleware};
use std::sync::Arc;

use crate::handler::admin_handler::*;
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};

pub fn admin_router(state: Arc<AdminState>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    // PIN unlock is the only public admin route
    let public = Router::new()
        .route("/admin/unlock", post(unlock_handler));

    let protected = Router::new()
        .route("/admin/fragrances", get(list_inventory_handler).post(create_fragrance_handler))
        .route("/admin/fragrances/batch-delete", post(batch_delete_fragrances_handler))
        .route("/admin/fragrances/{id}", put(update_fragrance_handler).delete(delete_fragrance_handler))
        .route("/admin/fragrances/{id}/stock", put(set_stock_handler))
        .route("/admin/quizzes", get(list_quizzes_handler).post(create_quiz_handler))
        .route("/admin/quizzes/batch-delete", post(batch_delete_quizzes_handler))
        .route("/admin/quizzes/{id}", put(update_quiz_handler).delete(delete_quiz_handler))
        .route("/admin/leads", get(list_leads_handler).post(create_lead_handler))
        .route("/admin/leads/batch-delete", post(batch_delete_leads_handler))
        .route(
            "/admin/leads/{id}",
            get(get_lead_handler).put(update_lead_handler).delete(delete_lead_handler),
        )
        .route("/admin/leads/{id}/wishlist", get(lead_wishlist_handler))
        .route("/admin/metadata", get(get_metadata_handler).post(add_metadata_handler))
        .route("/admin/metadata/remove", post(remove_metadata_handler))
        .route("/admin/metadata/rename", post(rename_metadata_handler))
        .route("/admin/settings", get(get_settings_handler).put(update_settings_handler))
        .route("/admin/stats", get(stats_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth));

    public
        .merge(protected)
        .with_state(state)
}
