use crate::alert::{ActiveNotice, AlertSetting, NoticeKind};
use crate::session::Session;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Request body for the toggle-setting intent
#[derive(Deserialize)]
pub struct ToggleRequest {
    pub enabled: bool,
}

/// Request body for the trigger-test-alert intent
#[derive(Deserialize)]
pub struct TestAlertRequest {
    /// Defaults to the danger-zone alert, the test panel's initial selection
    #[serde(default = "default_test_kind")]
    pub kind: NoticeKind,
}

fn default_test_kind() -> NoticeKind {
    NoticeKind::DangerZone
}

/// Create alert API router
pub fn create_alert_router(session: Arc<Session>) -> Router {
    Router::new()
        .route("/api/alerts/settings", get(list_settings))
        .route("/api/alerts/settings/:id", put(toggle_setting))
        .route("/api/alerts/test", post(trigger_test_alert))
        .route(
            "/api/alerts/active",
            get(current_notice).delete(dismiss_notice),
        )
        .with_state(session)
}

/// GET /api/alerts/settings - Settings in fixed definition order
async fn list_settings(State(session): State<Arc<Session>>) -> Json<Vec<AlertSetting>> {
    Json(session.settings.list())
}

/// PUT /api/alerts/settings/:id - Toggle an alert category
///
/// Unknown ids answer 204 as well: NotFound is non-fatal here.
async fn toggle_setting(
    State(session): State<Arc<Session>>,
    Path(id): Path<String>,
    Json(request): Json<ToggleRequest>,
) -> StatusCode {
    session.set_alert_enabled(&id, request.enabled);
    StatusCode::NO_CONTENT
}

/// POST /api/alerts/test - Raise a test alert banner
async fn trigger_test_alert(
    State(session): State<Arc<Session>>,
    Json(request): Json<TestAlertRequest>,
) -> Json<ActiveNotice> {
    Json(session.trigger_test_alert(request.kind))
}

/// GET /api/alerts/active - The active notice, or null when idle
async fn current_notice(State(session): State<Arc<Session>>) -> Json<Option<ActiveNotice>> {
    Json(session.notifier.current())
}

/// DELETE /api/alerts/active - Dismiss the active notice (idempotent)
async fn dismiss_notice(State(session): State<Arc<Session>>) -> StatusCode {
    session.dismiss_alert();
    StatusCode::NO_CONTENT
}
