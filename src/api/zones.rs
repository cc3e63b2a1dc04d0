use crate::session::Session;
use crate::zone::{Zone, ZoneKind};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, put},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Request body for add and update zone intents
#[derive(Deserialize)]
pub struct ZoneRequest {
    pub name: String,
    pub kind: ZoneKind,
    /// Opaque region payload; defaults to an empty boundary
    pub boundary: Option<Value>,
}

/// Query parameters for zone listing
#[derive(Deserialize)]
pub struct ListZonesQuery {
    pub kind: Option<ZoneKind>,
}

/// Error response
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Create zone API router
pub fn create_zone_router(session: Arc<Session>) -> Router {
    Router::new()
        .route("/api/zones", get(list_zones).post(add_zone))
        .route("/api/zones/:id", put(update_zone).delete(delete_zone))
        .with_state(session)
}

/// GET /api/zones - List zones in insertion order, optionally by kind
async fn list_zones(
    State(session): State<Arc<Session>>,
    Query(query): Query<ListZonesQuery>,
) -> Json<Vec<Zone>> {
    Json(session.zones.list(query.kind))
}

/// POST /api/zones - Add a zone
async fn add_zone(
    State(session): State<Arc<Session>>,
    Json(request): Json<ZoneRequest>,
) -> Result<Json<Zone>, ZoneError> {
    if request.name.trim().is_empty() {
        return Err(ZoneError::EmptyName);
    }

    let boundary = request.boundary.unwrap_or(Value::Array(Vec::new()));
    let zone = session.add_zone(&request.name, request.kind, boundary);
    Ok(Json(zone))
}

/// PUT /api/zones/:id - Replace a zone in place
///
/// An unknown id is a silent no-op: the dashboard treats NotFound as
/// non-fatal.
async fn update_zone(
    State(session): State<Arc<Session>>,
    Path(id): Path<String>,
    Json(request): Json<ZoneRequest>,
) -> Result<StatusCode, ZoneError> {
    if request.name.trim().is_empty() {
        return Err(ZoneError::EmptyName);
    }

    match session.zones.get(&id) {
        Some(existing) => {
            let zone = Zone {
                id: existing.id,
                name: request.name,
                kind: request.kind,
                boundary: request.boundary.unwrap_or(existing.boundary),
                created_at: existing.created_at,
            };
            session.update_zone(zone);
        }
        None => debug!(zone_id = %id, "Update ignored: zone not found"),
    }

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/zones/:id - Delete a zone (idempotent)
async fn delete_zone(
    State(session): State<Arc<Session>>,
    Path(id): Path<String>,
) -> StatusCode {
    session.delete_zone(&id);
    StatusCode::NO_CONTENT
}

/// Zone API error types
enum ZoneError {
    EmptyName,
}

impl IntoResponse for ZoneError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ZoneError::EmptyName => (
                StatusCode::BAD_REQUEST,
                "Zone name must not be empty".to_string(),
            ),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NestkeeperConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::util::ServiceExt;

    fn test_session() -> Arc<Session> {
        Arc::new(Session::new(&NestkeeperConfig::default()))
    }

    fn create_test_app(session: Arc<Session>) -> Router {
        create_zone_router(session)
    }

    #[tokio::test]
    async fn test_add_zone_success() {
        let app = create_test_app(test_session());

        let request = Request::builder()
            .method("POST")
            .uri("/api/zones")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({"name": "Home", "kind": "safe"}).to_string(),
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let zone: Zone = serde_json::from_slice(&body).unwrap();

        assert_eq!(zone.name, "Home");
        assert_eq!(zone.kind, ZoneKind::Safe);
        assert_eq!(zone.boundary, json!([]));
        assert!(!zone.id.is_empty());
    }

    #[tokio::test]
    async fn test_add_zone_blank_name_rejected() {
        let app = create_test_app(test_session());

        let request = Request::builder()
            .method("POST")
            .uri("/api/zones")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({"name": "   ", "kind": "safe"}).to_string(),
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_zones_filter_by_kind() {
        let session = Arc::new(Session::with_sample_data(&NestkeeperConfig::default()));
        let app = create_test_app(session);

        let request = Request::builder()
            .method("GET")
            .uri("/api/zones?kind=danger")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let zones: Vec<Zone> = serde_json::from_slice(&body).unwrap();

        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].name, "Busy Street");
    }

    #[tokio::test]
    async fn test_update_zone_replaces_fields() {
        let session = test_session();
        let zone = session.add_zone("Park", ZoneKind::Safe, json!([]));
        let app = create_test_app(Arc::clone(&session));

        let request = Request::builder()
            .method("PUT")
            .uri(format!("/api/zones/{}", zone.id))
            .header("content-type", "application/json")
            .body(Body::from(
                json!({"name": "Old Park", "kind": "danger"}).to_string(),
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let stored = session.zones.get(&zone.id).unwrap();
        assert_eq!(stored.name, "Old Park");
        assert_eq!(stored.kind, ZoneKind::Danger);
        assert_eq!(stored.created_at, zone.created_at);
    }

    #[tokio::test]
    async fn test_update_unknown_zone_is_silent_noop() {
        let session = test_session();
        session.add_zone("Home", ZoneKind::Safe, json!([]));
        let app = create_test_app(Arc::clone(&session));

        let request = Request::builder()
            .method("PUT")
            .uri("/api/zones/nonexistent")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({"name": "Ghost", "kind": "danger"}).to_string(),
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(session.zones.count(), 1);
        assert_eq!(session.zones.list(None)[0].name, "Home");
    }

    #[tokio::test]
    async fn test_delete_zone_idempotent() {
        let session = test_session();
        let zone = session.add_zone("Home", ZoneKind::Safe, json!([]));
        let app = create_test_app(Arc::clone(&session));

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/api/zones/{}", zone.id))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(session.zones.count(), 0);

        // Deleting again still answers 204
        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/api/zones/{}", zone.id))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
