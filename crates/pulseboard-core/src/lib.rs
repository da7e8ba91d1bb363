// pulseboard-core: Reactive data layer between pulseboard-api and consumers.

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod session;
pub mod store;
pub mod stream_ext;
pub mod sync;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::SessionConfig;
pub use error::CoreError;
pub use session::DashboardSession;
pub use store::{DashboardStore, PersistedState};
pub use stream_ext::SliceStream;
pub use sync::apply_stream_message;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Core entities
    Alert, AlertKind, AlertSeverity, DashboardWidget, Host, HostGroup, User,
    // Patches
    AlertPatch, HostGroupPatch, HostPatch, UserPreferencesPatch, WidgetPatch,
    // Supporting types
    AlertToggles, GroupSettings, Layout, NotificationPreferences, Platform,
    ProductivityCategories, Role, Theme, TimeFormat, UserPreferences, WidgetKind,
    WidgetPosition, WorkingHours,
};
