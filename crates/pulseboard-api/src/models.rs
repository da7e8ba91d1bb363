// Backend wire types
//
// Models for the Pulseboard backend's JSON API. Entity types that the core
// store holds are prefixed `Api` and normalized by `pulseboard-core`;
// display-only analytics types are consumed as-is. Fields use
// `#[serde(default)]` liberally because the backend is inconsistent about
// field presence across versions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Hosts ────────────────────────────────────────────────────────────

/// Monitored host as the backend sends it.
///
/// `platform` stays a raw string here; core normalizes it into an enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHost {
    pub id: String,
    pub name: String,
    pub hostname: String,
    #[serde(default)]
    pub platform: String,
    pub last_seen: DateTime<Utc>,
    #[serde(default)]
    pub is_online: bool,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Partial host update for `PATCH /api/hosts/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

// ── Host groups ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHostGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub hosts: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub settings: ApiGroupSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGroupSettings {
    #[serde(default)]
    pub working_hours: ApiWorkingHours,
    #[serde(default)]
    pub productivity_categories: ApiProductivityCategories,
    #[serde(default)]
    pub alerts: ApiAlertToggles,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiWorkingHours {
    /// `"HH:mm"` format.
    #[serde(default)]
    pub start: String,
    /// `"HH:mm"` format.
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub timezone: String,
    /// 0-6 (Sunday-Saturday).
    #[serde(default)]
    pub workdays: Vec<u8>,
}

impl Default for ApiWorkingHours {
    fn default() -> Self {
        Self {
            start: "09:00".into(),
            end: "17:00".into(),
            timezone: String::new(),
            workdays: vec![1, 2, 3, 4, 5],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiProductivityCategories {
    #[serde(default)]
    pub productive: Vec<String>,
    #[serde(default)]
    pub neutral: Vec<String>,
    #[serde(default)]
    pub distracting: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAlertToggles {
    #[serde(default)]
    pub overtime: bool,
    #[serde(default)]
    pub downtime: bool,
    #[serde(default)]
    pub low_activity: bool,
}

/// Body for `POST /api/groups`. The backend assigns id and timestamps.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCreate {
    pub name: String,
    pub description: String,
    pub color: String,
    pub hosts: Vec<String>,
    pub settings: ApiGroupSettings,
}

/// Partial group update for `PATCH /api/groups/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosts: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<ApiGroupSettings>,
}

// ── Alerts ───────────────────────────────────────────────────────────

/// Alert record as pushed by the backend (REST and event stream share
/// this shape). `kind`/`severity` stay raw strings; core normalizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAlert {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub host_id: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub is_resolved: bool,
}

// ── Users ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub preferences: ApiUserPreferences,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUserPreferences {
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub date_format: String,
    #[serde(default)]
    pub time_format: String,
    #[serde(default)]
    pub default_time_range: String,
    #[serde(default)]
    pub notifications: ApiNotificationPreferences,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiNotificationPreferences {
    #[serde(default)]
    pub email: bool,
    #[serde(default)]
    pub browser: bool,
    #[serde(default)]
    pub alerts: bool,
}

// ── Time ranges ──────────────────────────────────────────────────────

/// Query window for metrics and activity endpoints.
#[derive(Debug, Clone)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// The last `hours` hours, ending now.
    pub fn last_hours(hours: i64) -> Self {
        let end = Utc::now();
        Self {
            start: end - chrono::Duration::hours(hours),
            end,
        }
    }
}

// ── Productivity metrics ─────────────────────────────────────────────

/// Aggregate productivity numbers. All durations are seconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductivityMetrics {
    #[serde(default)]
    pub total_time: u64,
    #[serde(default)]
    pub active_time: u64,
    #[serde(default)]
    pub idle_time: u64,
    #[serde(default)]
    pub productive_time: u64,
    #[serde(default)]
    pub neutral_time: u64,
    #[serde(default)]
    pub distracting_time: u64,
    #[serde(default)]
    pub afk_time: u64,
    #[serde(default)]
    pub working_hours: u64,
    #[serde(default)]
    pub overtime: u64,
    /// 0-100.
    #[serde(default)]
    pub productivity_score: f64,
}

/// Per-host analytics for a query period.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostMetrics {
    pub host_id: String,
    #[serde(default)]
    pub period: String,
    #[serde(flatten)]
    pub metrics: ProductivityMetrics,
    #[serde(default)]
    pub applications: Vec<ApplicationUsage>,
    #[serde(default)]
    pub websites: Vec<WebsiteUsage>,
    #[serde(default)]
    pub activity_heatmap: Vec<HeatmapCell>,
    #[serde(default)]
    pub peak_hours: Vec<u8>,
    #[serde(default)]
    pub downtime_events: Vec<DowntimeEvent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationUsage {
    pub name: String,
    #[serde(default)]
    pub time: u64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sessions: u32,
    #[serde(default)]
    pub avg_session_duration: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteUsage {
    pub domain: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub time: u64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub visits: u32,
    #[serde(default)]
    pub avg_visit_duration: f64,
}

/// One cell of the hour-by-weekday activity heatmap.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapCell {
    pub hour: u8,
    /// 0-6 (Sunday-Saturday).
    pub day: u8,
    /// 0-1.
    #[serde(default)]
    pub intensity: f64,
    /// Seconds of activity in this cell.
    #[serde(default)]
    pub activity: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DowntimeEvent {
    pub id: String,
    pub host_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub duration: u64,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Group-level rollup across member hosts.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupAnalytics {
    pub group_id: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub total_hosts: u32,
    #[serde(default)]
    pub online_hosts: u32,
    #[serde(default)]
    pub metrics: ProductivityMetrics,
    #[serde(default)]
    pub host_metrics: Vec<HostMetrics>,
    #[serde(default)]
    pub trends: Trends,
    #[serde(default)]
    pub top_applications: Vec<ApplicationUsage>,
    #[serde(default)]
    pub top_websites: Vec<WebsiteUsage>,
    #[serde(default)]
    pub alerts: Vec<ApiAlert>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trends {
    #[serde(default)]
    pub productivity: Vec<TrendPoint>,
    #[serde(default)]
    pub activity: Vec<TrendPoint>,
    #[serde(default)]
    pub downtime: Vec<TrendPoint>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    #[serde(default)]
    pub label: Option<String>,
}

// ── Activity events ──────────────────────────────────────────────────

/// A single tracked activity window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    pub id: String,
    pub host_id: String,
    pub timestamp: DateTime<Utc>,
    /// Seconds.
    #[serde(default)]
    pub duration: u64,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub data: ActivityData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityData {
    #[serde(default)]
    pub app: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

// ── Health ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}
