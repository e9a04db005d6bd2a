use axum::{Router, routing::{get, post}};
use std::sync::Arc;

use crate::handler::kiosk_handler::{
    activity_handler,
    navigate_handler,
    public_settings_handler,
    watchdog_status_handler,
    KioskState,
};

pub fn kiosk_router(state: Arc<KioskState>) -> Router {
    Router::new()
        .route("/kiosk/activity", post(activity_handler))
        .route("/kiosk/navigate", post(navigate_handler))
        .route("/kiosk/watchdog", get(watchdog_status_handler))
        .route("/kiosk/settings", get(public_settings_handler))
        .with_state(state)
}
