// HTTP and WebSocket APIs

pub mod alerts;
pub mod child;
pub mod websocket;
pub mod zones;

use crate::session::Session;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub use alerts::create_alert_router;
pub use child::create_child_router;
pub use websocket::create_ws_router;
pub use zones::create_zone_router;

/// Assemble the full dashboard API router
pub fn create_router(session: Arc<Session>, cors_enabled: bool) -> Router {
    let router = Router::new()
        .merge(create_zone_router(Arc::clone(&session)))
        .merge(create_alert_router(Arc::clone(&session)))
        .merge(create_child_router(Arc::clone(&session)))
        .merge(create_ws_router(session));

    if cors_enabled {
        // Local frontend dev servers run on a different origin
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
