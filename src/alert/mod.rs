use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

pub mod notifier;

pub use notifier::AlertNotifier;

/// Alert categories the dashboard can raise
///
/// Closed set: covers the test-panel alert types plus the safe-zone-exit
/// banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoticeKind {
    SafeZoneExit,
    DangerZone,
    Speed,
    BatteryLow,
    RoutineChange,
}

impl NoticeKind {
    /// Render the banner message for this kind with the child's name
    pub fn message(&self, child_name: &str) -> String {
        match self {
            Self::SafeZoneExit => format!("ALERT: {} has left the safe zone!", child_name),
            Self::DangerZone => format!("ALERT: {} has entered a danger zone!", child_name),
            Self::Speed => format!("ALERT: {} is moving at an unusual speed!", child_name),
            Self::BatteryLow => {
                format!("ALERT: {}'s device battery is critically low!", child_name)
            }
            Self::RoutineChange => {
                format!("ALERT: {} has deviated from normal routine!", child_name)
            }
        }
    }
}

/// The single currently-displayed alert banner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveNotice {
    pub kind: NoticeKind,
    pub message: String,
    #[serde(rename = "raisedAt")]
    pub raised_at: DateTime<Utc>,
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
}

/// A toggleable category of notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertSetting {
    pub id: String,
    pub name: String,
    pub description: String,
    /// The only mutable field
    pub enabled: bool,
}

impl AlertSetting {
    fn new(id: &str, name: &str, description: &str, enabled: bool) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            enabled,
        }
    }
}

/// The fixed alert-category catalog, in definition order
fn catalog() -> Vec<AlertSetting> {
    vec![
        AlertSetting::new(
            "safety-zone",
            "Safe Zone Alerts",
            "Alert when child leaves defined safe zones",
            true,
        ),
        AlertSetting::new(
            "danger-zone",
            "Danger Zone Alerts",
            "Alert when child enters defined danger zones",
            true,
        ),
        AlertSetting::new(
            "speed",
            "Speed Alerts",
            "Alert when child is moving faster than walking speed",
            false,
        ),
        AlertSetting::new(
            "battery",
            "Battery Alerts",
            "Alert when device battery is below 20%",
            true,
        ),
        AlertSetting::new(
            "routine",
            "Routine Deviation",
            "Alert when child deviates from normal routine",
            false,
        ),
    ]
}

/// Alert setting store over the fixed category catalog
///
/// The set of ids is defined at construction and never changes; mutation only
/// ever flips `enabled` for an existing id. Unknown ids are reported as
/// `false` and treated by callers as a no-op.
pub struct AlertSettingStore {
    settings: Mutex<Vec<AlertSetting>>,
}

impl AlertSettingStore {
    /// Create the store seeded with the fixed catalog
    pub fn new() -> Self {
        Self {
            settings: Mutex::new(catalog()),
        }
    }

    /// Flip the `enabled` flag for the matching setting
    pub fn set_enabled(&self, id: &str, enabled: bool) -> bool {
        let mut settings = self.settings.lock().unwrap();
        match settings.iter_mut().find(|s| s.id == id) {
            Some(setting) => {
                setting.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Check whether a category is currently enabled
    pub fn is_enabled(&self, id: &str) -> bool {
        let settings = self.settings.lock().unwrap();
        settings.iter().any(|s| s.id == id && s.enabled)
    }

    /// Return all settings in their fixed definition order
    pub fn list(&self) -> Vec<AlertSetting> {
        self.settings.lock().unwrap().clone()
    }
}

impl Default for AlertSettingStore {
    fn default() -> Self {
        Self::new()
    }
}
