// ── Central reactive store ──
//
// Single source of truth for all cross-component state, with named
// mutation actions and push-based change notification.

mod dashboard_store;
mod persist;

pub use dashboard_store::{AlertsState, DashboardStore, UiState};
pub use persist::PersistedState;
