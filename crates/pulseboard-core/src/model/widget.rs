// ── Dashboard customization types ──

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[non_exhaustive]
pub enum WidgetKind {
    Chart,
    Metric,
    List,
    Gauge,
}

/// Grid placement of a widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetPosition {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// One configurable dashboard tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardWidget {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    pub title: String,
    pub position: WidgetPosition,
    /// Widget-specific settings; opaque to the store.
    #[serde(default)]
    pub config: serde_json::Value,
}

/// Partial widget update. Only set fields are applied.
#[derive(Debug, Clone, Default)]
pub struct WidgetPatch {
    pub title: Option<String>,
    pub position: Option<WidgetPosition>,
    pub config: Option<serde_json::Value>,
}

impl WidgetPatch {
    pub(crate) fn apply_to(&self, widget: &mut DashboardWidget) {
        if let Some(ref title) = self.title {
            widget.title = title.clone();
        }
        if let Some(position) = self.position {
            widget.position = position;
        }
        if let Some(ref config) = self.config {
            widget.config = config.clone();
        }
    }
}

/// Overall dashboard arrangement.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Layout {
    #[default]
    Grid,
    List,
}
