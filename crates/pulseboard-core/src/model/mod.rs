// ── Canonical domain model ──
//
// Store-resident entity types, normalized from the backend wire shapes by
// `convert`. Serde renames mirror the backend's camelCase so persisted
// records stay wire-compatible.

mod alert;
mod group;
mod host;
mod user;
mod widget;

pub use alert::{Alert, AlertKind, AlertPatch, AlertSeverity};
pub use group::{
    AlertToggles, GroupSettings, HostGroup, HostGroupPatch, ProductivityCategories, WorkingHours,
};
pub use host::{Host, HostPatch, Platform};
pub use user::{
    NotificationPreferences, NotificationPreferencesPatch, Role, Theme, TimeFormat, User,
    UserPreferences, UserPreferencesPatch,
};
pub use widget::{DashboardWidget, Layout, WidgetKind, WidgetPatch, WidgetPosition};
