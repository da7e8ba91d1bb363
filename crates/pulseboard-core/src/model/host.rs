// ── Host domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operating system of a monitored host.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[non_exhaustive]
pub enum Platform {
    Windows,
    Macos,
    Linux,
    Unknown,
}

/// A monitored machine.
///
/// Uniquely keyed by `id`; the store holds the authoritative ordered
/// collection. Mutated by partial-field patches from API responses and
/// stream events alike, last write wins per field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    pub id: String,
    pub name: String,
    pub hostname: String,
    pub platform: Platform,
    pub last_seen: DateTime<Utc>,
    pub is_online: bool,
    pub version: String,
    pub timezone: String,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Partial host update. Only set fields are applied.
#[derive(Debug, Clone, Default)]
pub struct HostPatch {
    pub name: Option<String>,
    pub is_online: Option<bool>,
    pub last_seen: Option<DateTime<Utc>>,
    pub version: Option<String>,
    pub timezone: Option<String>,
    /// Outer `Some` applies; inner `None` clears the group assignment.
    pub group_id: Option<Option<String>>,
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl HostPatch {
    pub(crate) fn apply_to(&self, host: &mut Host) {
        if let Some(ref name) = self.name {
            host.name = name.clone();
        }
        if let Some(is_online) = self.is_online {
            host.is_online = is_online;
        }
        if let Some(last_seen) = self.last_seen {
            host.last_seen = last_seen;
        }
        if let Some(ref version) = self.version {
            host.version = version.clone();
        }
        if let Some(ref timezone) = self.timezone {
            host.timezone = timezone.clone();
        }
        if let Some(ref group_id) = self.group_id {
            host.group_id = group_id.clone();
        }
        if let Some(ref metadata) = self.metadata {
            host.metadata = Some(metadata.clone());
        }
    }
}
