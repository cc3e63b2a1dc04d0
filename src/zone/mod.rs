use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Mutex;
use uuid::Uuid;


/// Zone kind - closed set, fixed at creation, changed only via an explicit update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    Safe,
    Danger,
}

/// A named geographic region tagged safe or danger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Store-generated UUIDv7 (time-ordered, unique across the collection)
    pub id: String,
    /// Display label (free text)
    pub name: String,
    pub kind: ZoneKind,
    /// Opaque region descriptor owned by the zone (empty array until real
    /// geometry exists)
    pub boundary: Value,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Zone registry manages the ordered zone collection
///
/// Zones keep insertion order under `list`. All operations are synchronous
/// in-memory state transitions; the only failure condition is an unknown id,
/// reported as `false` and treated by callers as a no-op.
pub struct ZoneRegistry {
    zones: Mutex<Vec<Zone>>,
}

impl ZoneRegistry {
    /// Create new empty registry
    pub fn new() -> Self {
        Self {
            zones: Mutex::new(Vec::new()),
        }
    }

    /// Create a registry pre-seeded with the sample zones from the demo data
    pub fn with_samples() -> Self {
        let registry = Self::new();
        registry.add("Home", ZoneKind::Safe, Value::Array(Vec::new()));
        registry.add("School", ZoneKind::Safe, Value::Array(Vec::new()));
        registry.add("Playground", ZoneKind::Safe, Value::Array(Vec::new()));
        registry.add("Busy Street", ZoneKind::Danger, Value::Array(Vec::new()));
        registry
    }

    /// Add a new zone with a generated id, appended at the end
    ///
    /// Never fails: empty-name rejection is an API-layer validation concern,
    /// not a store invariant.
    pub fn add(&self, name: &str, kind: ZoneKind, boundary: Value) -> Zone {
        let zone = Zone {
            id: Uuid::now_v7().to_string(),
            name: name.to_string(),
            kind,
            boundary,
            created_at: Utc::now(),
        };

        let mut zones = self.zones.lock().unwrap();
        zones.push(zone.clone());
        zone
    }

    /// Replace the stored entry whose id matches, preserving collection order
    ///
    /// Returns `false` (leaving the collection unchanged) if no entry has
    /// that id.
    pub fn update(&self, zone: Zone) -> bool {
        let mut zones = self.zones.lock().unwrap();
        match zones.iter_mut().find(|z| z.id == zone.id) {
            Some(entry) => {
                *entry = zone;
                true
            }
            None => false,
        }
    }

    /// Remove the entry with that id if present; idempotent
    pub fn delete(&self, id: &str) -> bool {
        let mut zones = self.zones.lock().unwrap();
        let before = zones.len();
        zones.retain(|z| z.id != id);
        zones.len() != before
    }

    /// Look up a zone by id
    pub fn get(&self, id: &str) -> Option<Zone> {
        let zones = self.zones.lock().unwrap();
        zones.iter().find(|z| z.id == id).cloned()
    }

    /// Return zones in stable insertion order, optionally filtered by kind
    pub fn list(&self, filter: Option<ZoneKind>) -> Vec<Zone> {
        let zones = self.zones.lock().unwrap();
        match filter {
            Some(kind) => zones.iter().filter(|z| z.kind == kind).cloned().collect(),
            None => zones.clone(),
        }
    }

    /// Get count of stored zones
    pub fn count(&self) -> usize {
        self.zones.lock().unwrap().len()
    }
}

impl Default for ZoneRegistry {
    fn default() -> Self {
        Self::new()
    }
}
