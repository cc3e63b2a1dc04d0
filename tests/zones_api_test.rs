// Integration tests for the zone API surface

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use nestkeeper::config::NestkeeperConfig;
use nestkeeper::session::Session;
use nestkeeper::zone::{Zone, ZoneKind};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

fn create_test_app() -> (Arc<Session>, Router) {
    let session = Arc::new(Session::new(&NestkeeperConfig::default()));
    let app = nestkeeper::api::create_router(Arc::clone(&session), false);
    (session, app)
}

async fn post_zone(app: &Router, name: &str, kind: &str) -> Zone {
    let request = Request::builder()
        .method("POST")
        .uri("/api/zones")
        .header("content-type", "application/json")
        .body(Body::from(json!({"name": name, "kind": kind}).to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn list_zones(app: &Router, uri: &str) -> Vec<Zone> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Starting from a single "Home" zone, adding "School" yields two zones in
/// insertion order with distinct ids.
#[tokio::test]
async fn test_add_zone_preserves_order_and_id_uniqueness() {
    let (_session, app) = create_test_app();

    post_zone(&app, "Home", "safe").await;
    post_zone(&app, "School", "safe").await;

    let zones = list_zones(&app, "/api/zones").await;
    assert_eq!(zones.len(), 2);
    assert_eq!(zones[0].name, "Home");
    assert_eq!(zones[1].name, "School");
    assert_ne!(zones[0].id, zones[1].id);
}

#[tokio::test]
async fn test_zone_crud_flow() {
    let (_session, app) = create_test_app();

    let home = post_zone(&app, "Home", "safe").await;
    let street = post_zone(&app, "Busy Street", "danger").await;

    // Filtered listing
    let safe = list_zones(&app, "/api/zones?kind=safe").await;
    assert_eq!(safe.len(), 1);
    assert_eq!(safe[0].id, home.id);

    // Update the danger zone in place
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/zones/{}", street.id))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"name": "Main Street", "kind": "danger"}).to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let zones = list_zones(&app, "/api/zones").await;
    assert_eq!(zones[1].id, street.id);
    assert_eq!(zones[1].name, "Main Street");

    // Delete it; a repeated delete stays 204
    for _ in 0..2 {
        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/api/zones/{}", street.id))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let zones = list_zones(&app, "/api/zones").await;
    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0].id, home.id);
}

#[tokio::test]
async fn test_update_unknown_zone_leaves_state_unchanged() {
    let (session, app) = create_test_app();

    post_zone(&app, "Home", "safe").await;
    let before = session.zones.list(None);

    let request = Request::builder()
        .method("PUT")
        .uri("/api/zones/no-such-zone")
        .header("content-type", "application/json")
        .body(Body::from(json!({"name": "Ghost", "kind": "safe"}).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(session.zones.list(None), before);
}

#[tokio::test]
async fn test_blank_zone_name_rejected() {
    let (session, app) = create_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/zones")
        .header("content-type", "application/json")
        .body(Body::from(json!({"name": "", "kind": "safe"}).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(session.zones.count(), 0);
}

#[tokio::test]
async fn test_sample_session_serves_demo_zones() {
    let session = Arc::new(Session::with_sample_data(&NestkeeperConfig::default()));
    let app = nestkeeper::api::create_router(session, false);

    let zones = list_zones(&app, "/api/zones").await;
    let names: Vec<&str> = zones.iter().map(|z| z.name.as_str()).collect();
    assert_eq!(names, vec!["Home", "School", "Playground", "Busy Street"]);

    assert_eq!(
        zones.iter().filter(|z| z.kind == ZoneKind::Danger).count(),
        1
    );
}
