use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::dto::kiosk_dto::{NavigateRequest, NavigationAction, RouteResponse};
use crate::service::settings_service::{SettingsService, SettingsServiceImpl};
use crate::util::error::HandlerError;
use crate::watchdog::{KioskNavigator, Navigator, WatchdogHandle};

pub struct KioskState {
    pub navigator: Arc<KioskNavigator>,
    pub watchdog: WatchdogHandle,
    pub settings_service: Arc<SettingsServiceImpl>,
}

pub async fn activity_handler(State(state): State<Arc<KioskState>>) -> impl IntoResponse {
    state.watchdog.interact().await;
    Json(state.watchdog.status())
}

pub async fn navigate_handler(
    State(state): State<Arc<KioskState>>,
    Json(payload): Json<NavigateRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate()?;
    match (payload.action, payload.path.as_deref()) {
        (NavigationAction::Push, Some(path)) => state.navigator.push(path),
        (NavigationAction::Replace, Some(path)) => state.navigator.replace(path),
        (NavigationAction::Back, _) => state.navigator.back(),
        (_, None) => return Err(HandlerError::bad_request("A path is required for push and replace")),
    }
    let path = state.navigator.current_path();
    debug!(%path, "Kiosk navigated");
    state.watchdog.route_changed().await;
    Ok(Json(RouteResponse { path }))
}

pub async fn watchdog_status_handler(State(state): State<Arc<KioskState>>) -> impl IntoResponse {
    Json(state.watchdog.status())
}

pub async fn public_settings_handler(State(state): State<Arc<KioskState>>) -> impl IntoResponse {
    Json(state.settings_service.get().await.public_view())
}
