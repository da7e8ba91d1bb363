// ── Alert domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What triggered the alert.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[non_exhaustive]
pub enum AlertKind {
    Overtime,
    Downtime,
    LowActivity,
    UnusualPattern,
    /// Backend kinds this build does not know about.
    #[serde(other)]
    Unknown,
}

/// Alert urgency. Ordered: `Low < Medium < High < Critical`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// A notification record.
///
/// Created by stream push or local action; mutated (read/resolved) by user
/// action; removed only by the explicit remove action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub host_id: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
    pub is_resolved: bool,
}

/// Partial alert update. Only set fields are applied.
#[derive(Debug, Clone, Default)]
pub struct AlertPatch {
    pub severity: Option<AlertSeverity>,
    pub title: Option<String>,
    pub message: Option<String>,
    pub is_read: Option<bool>,
    pub is_resolved: Option<bool>,
}

impl AlertPatch {
    pub(crate) fn apply_to(&self, alert: &mut Alert) {
        if let Some(severity) = self.severity {
            alert.severity = severity;
        }
        if let Some(ref title) = self.title {
            alert.title = title.clone();
        }
        if let Some(ref message) = self.message {
            alert.message = message.clone();
        }
        if let Some(is_read) = self.is_read {
            alert.is_read = is_read;
        }
        if let Some(is_resolved) = self.is_resolved {
            alert.is_resolved = is_resolved;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(AlertSeverity::Low < AlertSeverity::Medium);
        assert!(AlertSeverity::Medium < AlertSeverity::High);
        assert!(AlertSeverity::High < AlertSeverity::Critical);
    }

    #[test]
    fn unknown_kind_round_trips_through_serde() {
        let kind: AlertKind = serde_json::from_str("\"weird_new_kind\"").expect("deserializes");
        assert_eq!(kind, AlertKind::Unknown);
    }
}
