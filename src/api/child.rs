use crate::child::{BatteryBand, GeoPoint};
use crate::session::Session;
use axum::{extract::State, response::Json, routing::get, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Child status as shown on the profile card and map
#[derive(Serialize, Deserialize)]
pub struct ChildStatusResponse {
    pub name: String,
    #[serde(rename = "deviceId")]
    pub device_id: String,
    #[serde(rename = "batteryPercent")]
    pub battery_percent: u8,
    #[serde(rename = "batteryBand")]
    pub battery_band: BatteryBand,
    pub online: bool,
    #[serde(rename = "lastSeen")]
    pub last_seen: String,
    pub location: GeoPoint,
}

/// Create child status API router
pub fn create_child_router(session: Arc<Session>) -> Router {
    Router::new()
        .route("/api/child", get(get_child_status))
        .with_state(session)
}

/// GET /api/child - Tracked child and device status
async fn get_child_status(State(session): State<Arc<Session>>) -> Json<ChildStatusResponse> {
    let child = &session.child;
    Json(ChildStatusResponse {
        name: child.name.clone(),
        device_id: child.device_id.clone(),
        battery_percent: child.battery_percent,
        battery_band: child.battery_band(),
        online: child.is_online(),
        last_seen: child.last_seen.to_rfc3339(),
        location: child.location.clone(),
    })
}
