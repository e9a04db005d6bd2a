mod common;

use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use serde_json::json;

use common::{send, test_app};
use essence_kiosk::app::App;
use essence_kiosk::model::settings::Settings;
use essence_kiosk::service::settings_service::SettingsService;
use essence_kiosk::watchdog::Navigator;

async fn advance(secs: f64) {
    tokio::time::sleep(Duration::from_secs_f64(secs)).await;
}

/// A kiosk with the given idle timeout, already browsing the catalog.
async fn browsing(timeout_enabled: bool, timeout_seconds: u64) -> (App, Router) {
    let settings = Settings { timeout_enabled, timeout_seconds, ..Settings::default() };
    let (app, _stores) = test_app(settings).await;
    app.settings_service.refresh().await;
    advance(0.1).await;
    let router = app.router();
    let (status, _) = send(
        &router,
        "POST",
        "/kiosk/navigate",
        Some(json!({ "action": "push", "path": "/catalog" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    advance(0.1).await;
    (app, router)
}

#[tokio::test(start_paused = true)]
async fn test_disabled_timeout_never_warns() {
    let (app, router) = browsing(false, 5).await;
    advance(120.0).await;

    let (_, status) = send(&router, "GET", "/kiosk/watchdog", None, None).await;
    assert_eq!(status["phase"], "idle");
    assert_eq!(status["enabled"], false);
    assert_eq!(app.navigator.current_path(), "/catalog");
}

#[tokio::test(start_paused = true)]
async fn test_warning_counts_down() {
    let (_app, router) = browsing(true, 5).await;
    advance(5.5).await;

    let (_, status) = send(&router, "GET", "/kiosk/watchdog", None, None).await;
    assert_eq!(status["phase"], "warning");
    assert_eq!(status["countdown"], 10);

    advance(4.0).await;
    let (_, status) = send(&router, "GET", "/kiosk/watchdog", None, None).await;
    assert_eq!(status["countdown"], 6);
}

#[tokio::test(start_paused = true)]
async fn test_interaction_dismisses_warning() {
    let (app, router) = browsing(true, 5).await;
    advance(5.5).await;
    assert_eq!(app.watchdog.status().countdown, Some(10));

    let (status, _) = send(&router, "POST", "/kiosk/activity", None, None).await;
    assert_eq!(status, StatusCode::OK);
    advance(0.1).await;

    let current = app.watchdog.status();
    assert_eq!(current.countdown, None);
    assert_eq!(app.navigator.current_path(), "/catalog");

    // The idle timer starts over from the interaction.
    advance(4.0).await;
    assert!(app.watchdog.status().countdown.is_none());
    advance(1.5).await;
    assert_eq!(app.watchdog.status().countdown, Some(10));
}

#[tokio::test(start_paused = true)]
async fn test_disabling_timeout_cancels_warning() {
    let (app, router) = browsing(true, 5).await;
    advance(5.5).await;
    assert!(app.watchdog.status().countdown.is_some());

    let (_, token) = send(&router, "POST", "/admin/unlock", Some(json!({})), None).await;
    let token = token["accessToken"].as_str().unwrap().to_string();
    // Unlocking does not navigate; the frontend stays on the catalog underneath.
    let (status, _) = send(
        &router,
        "PUT",
        "/admin/settings",
        Some(json!({ "timeoutEnabled": false })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    advance(0.1).await;

    let current = app.watchdog.status();
    assert!(current.countdown.is_none());
    assert!(!current.enabled);

    advance(60.0).await;
    assert_eq!(app.navigator.current_path(), "/catalog");
}

#[tokio::test(start_paused = true)]
async fn test_admin_routes_suspend_timer() {
    let (app, router) = browsing(true, 5).await;
    send(
        &router,
        "POST",
        "/kiosk/navigate",
        Some(json!({ "action": "push", "path": "/admin/inventory" })),
        None,
    )
    .await;
    advance(60.0).await;

    let current = app.watchdog.status();
    assert!(current.suspended);
    assert!(current.countdown.is_none());
    assert_eq!(app.navigator.current_path(), "/admin/inventory");
}

#[tokio::test(start_paused = true)]
async fn test_expiry_returns_home() {
    let (app, router) = browsing(true, 5).await;
    send(
        &router,
        "POST",
        "/kiosk/navigate",
        Some(json!({ "action": "push", "path": "/fragrance/123" })),
        None,
    )
    .await;
    advance(5.5 + 10.5).await;

    assert_eq!(app.navigator.current_path(), "/");
    let (_, status) = send(&router, "GET", "/kiosk/watchdog", None, None).await;
    assert_eq!(status["phase"], "idle");
    assert_eq!(status["suspended"], true);
}

#[tokio::test(start_paused = true)]
async fn test_expiry_keeps_identified_shopper() {
    let (app, router) = browsing(true, 5).await;
    send(
        &router,
        "POST",
        "/session/identify",
        Some(json!({ "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com" })),
        None,
    )
    .await;
    // Identifying is not a touch on its own; report one like the frontend does.
    send(&router, "POST", "/kiosk/activity", None, None).await;
    advance(16.0).await;

    assert_eq!(app.navigator.current_path(), "/");
    assert!(app.session.get_user().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_stored_oversized_timeout_keeps_watchdog_running() {
    // Written straight to the store, past the dashboard's validation.
    let (app, _router) = browsing(true, i64::MAX as u64).await;

    assert!(app.watchdog.interact().await);
    advance(3_600.0).await;
    assert!(app.watchdog.status().countdown.is_none());

    // Capped at one day from the interaction.
    advance(82_800.5).await;
    assert_eq!(app.watchdog.status().countdown, Some(10));
    assert!(app.watchdog.interact().await);
}
