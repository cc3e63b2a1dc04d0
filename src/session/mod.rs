use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::alert::{ActiveNotice, AlertNotifier, AlertSettingStore, NoticeKind};
use crate::child::ChildStatus;
use crate::config::NestkeeperConfig;
use crate::zone::{Zone, ZoneKind, ZoneRegistry};

/// Dashboard update pushed to WebSocket clients after each mutation
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DashboardEvent {
    ZoneAdded { zone: Zone },
    ZoneUpdated { zone: Zone },
    ZoneRemoved { id: String },
    SettingChanged { id: String, enabled: bool },
    NoticeRaised { notice: ActiveNotice },
    NoticeCleared { expired: bool },
}

/// The dashboard session owning all in-memory state
///
/// The stores live here, never as ambient globals; handlers receive the
/// session as shared state and go through its mutation methods so every
/// change is logged and broadcast to connected clients.
pub struct Session {
    pub zones: ZoneRegistry,
    pub settings: AlertSettingStore,
    pub notifier: AlertNotifier,
    pub child: ChildStatus,
    updates: broadcast::Sender<DashboardEvent>,
}

impl Session {
    /// Create a session with empty zone state
    pub fn new(config: &NestkeeperConfig) -> Self {
        Self::build(config, ZoneRegistry::new())
    }

    /// Create a session seeded with the demo sample zones
    pub fn with_sample_data(config: &NestkeeperConfig) -> Self {
        Self::build(config, ZoneRegistry::with_samples())
    }

    fn build(config: &NestkeeperConfig, zones: ZoneRegistry) -> Self {
        let (updates, _) = broadcast::channel(256);
        let child = ChildStatus::sample();
        let notifier = AlertNotifier::new(
            config.alerts.display_duration(),
            &child.name,
            updates.clone(),
        );

        Self {
            zones,
            settings: AlertSettingStore::new(),
            notifier,
            child,
            updates,
        }
    }

    /// Subscribe to dashboard updates
    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.updates.subscribe()
    }

    /// Add a zone and broadcast the change
    pub fn add_zone(&self, name: &str, kind: ZoneKind, boundary: Value) -> Zone {
        let zone = self.zones.add(name, kind, boundary);
        info!(zone_id = %zone.id, name = %zone.name, kind = ?zone.kind, "Zone added");
        let _ = self.updates.send(DashboardEvent::ZoneAdded { zone: zone.clone() });
        zone
    }

    /// Update a zone; unknown ids are a silent no-op
    pub fn update_zone(&self, zone: Zone) -> bool {
        let id = zone.id.clone();
        let found = self.zones.update(zone.clone());
        if found {
            info!(zone_id = %id, name = %zone.name, "Zone updated");
            let _ = self.updates.send(DashboardEvent::ZoneUpdated { zone });
        } else {
            debug!(zone_id = %id, "Update ignored: zone not found");
        }
        found
    }

    /// Delete a zone; idempotent
    pub fn delete_zone(&self, id: &str) -> bool {
        let found = self.zones.delete(id);
        if found {
            info!(zone_id = %id, "Zone deleted");
            let _ = self.updates.send(DashboardEvent::ZoneRemoved { id: id.to_string() });
        } else {
            debug!(zone_id = %id, "Delete ignored: zone not found");
        }
        found
    }

    /// Toggle an alert category; unknown ids are a silent no-op
    pub fn set_alert_enabled(&self, id: &str, enabled: bool) -> bool {
        let found = self.settings.set_enabled(id, enabled);
        if found {
            info!(setting_id = %id, enabled = enabled, "Alert setting changed");
            let _ = self.updates.send(DashboardEvent::SettingChanged {
                id: id.to_string(),
                enabled,
            });
        } else {
            debug!(setting_id = %id, "Toggle ignored: setting not found");
        }
        found
    }

    /// Raise a test alert banner
    pub fn trigger_test_alert(&self, kind: NoticeKind) -> ActiveNotice {
        info!(kind = ?kind, "Test alert triggered");
        self.notifier.trigger(kind)
    }

    /// Dismiss the active banner; idempotent
    pub fn dismiss_alert(&self) -> bool {
        let dismissed = self.notifier.dismiss();
        if dismissed {
            info!("Active alert dismissed");
        }
        dismissed
    }
}
