// ── Durable state subset ──

use serde::{Deserialize, Serialize};

use crate::model::{DashboardWidget, Layout, Theme, User};

/// The slice of store state that survives across sessions.
///
/// Mirrored into its own watch channel on every mutation that touches one
/// of these fields; a writer task owned by the consumer flushes it to disk.
/// Everything else in the store starts from fixed defaults each session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    pub theme: Theme,
    pub sidebar_open: bool,
    pub layout: Layout,
    pub widgets: Vec<DashboardWidget>,
    pub user: Option<User>,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            sidebar_open: true,
            layout: Layout::Grid,
            widgets: Vec::new(),
            user: None,
        }
    }
}
