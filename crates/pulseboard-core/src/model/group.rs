// ── Host group domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named collection of hosts with shared monitoring settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostGroup {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Display color, e.g. `"#4f9cf9"`.
    pub color: String,
    /// Member host ids.
    pub hosts: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub settings: GroupSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSettings {
    pub working_hours: WorkingHours,
    pub productivity_categories: ProductivityCategories,
    pub alerts: AlertToggles,
}

/// Expected working window used for overtime/downtime evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHours {
    /// `"HH:mm"` format.
    pub start: String,
    /// `"HH:mm"` format.
    pub end: String,
    pub timezone: String,
    /// 0-6 (Sunday-Saturday).
    pub workdays: Vec<u8>,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start: "09:00".into(),
            end: "17:00".into(),
            timezone: String::new(),
            workdays: vec![1, 2, 3, 4, 5],
        }
    }
}

/// App/domain name lists that drive productivity categorization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductivityCategories {
    pub productive: Vec<String>,
    pub neutral: Vec<String>,
    pub distracting: Vec<String>,
}

/// Which alert kinds this group wants raised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertToggles {
    pub overtime: bool,
    pub downtime: bool,
    pub low_activity: bool,
}

/// Partial group update. Only set fields are applied.
#[derive(Debug, Clone, Default)]
pub struct HostGroupPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub hosts: Option<Vec<String>>,
    pub settings: Option<GroupSettings>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl HostGroupPatch {
    pub(crate) fn apply_to(&self, group: &mut HostGroup) {
        if let Some(ref name) = self.name {
            group.name = name.clone();
        }
        if let Some(ref description) = self.description {
            group.description = description.clone();
        }
        if let Some(ref color) = self.color {
            group.color = color.clone();
        }
        if let Some(ref hosts) = self.hosts {
            group.hosts = hosts.clone();
        }
        if let Some(ref settings) = self.settings {
            group.settings = settings.clone();
        }
        if let Some(updated_at) = self.updated_at {
            group.updated_at = updated_at;
        }
    }
}
