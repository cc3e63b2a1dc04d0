use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last known position of the tracked device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
    /// Display label for the position marker
    pub label: String,
}

/// Battery band thresholds mirror the dashboard gauge colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatteryBand {
    Good,
    Low,
    Critical,
}

/// Tracked child and device status shown on the dashboard
///
/// Read-only in current scope: there is no real location ingestion, the
/// values come from the demo sample data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildStatus {
    pub name: String,
    #[serde(rename = "deviceId")]
    pub device_id: String,
    #[serde(rename = "batteryPercent")]
    pub battery_percent: u8,
    #[serde(rename = "lastSeen")]
    pub last_seen: DateTime<Utc>,
    pub location: GeoPoint,
}

impl ChildStatus {
    /// The hardcoded demo profile
    pub fn sample() -> Self {
        Self {
            name: "Alyssa".to_string(),
            device_id: "NK-2023-789456".to_string(),
            battery_percent: 68,
            last_seen: Utc::now(),
            location: GeoPoint {
                lat: 37.7749,
                lng: -122.4194,
                label: "Alyssa".to_string(),
            },
        }
    }

    /// Battery band: >50 good, >20 low, otherwise critical
    pub fn battery_band(&self) -> BatteryBand {
        if self.battery_percent > 50 {
            BatteryBand::Good
        } else if self.battery_percent > 20 {
            BatteryBand::Low
        } else {
            BatteryBand::Critical
        }
    }

    /// The status dot on the profile card: online while the battery is above
    /// the critical band
    pub fn is_online(&self) -> bool {
        self.battery_percent > 20
    }
}
