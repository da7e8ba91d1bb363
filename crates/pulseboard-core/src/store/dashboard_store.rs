// ── Central reactive data store ──
//
// Every state slice lives in a `watch` channel holding an immutable
// snapshot; an action builds the next snapshot and publishes it with
// `send_modify`, so subscribers are woken synchronously with the call, in
// invocation order, with no batching across actions. Reads never block.
// External code mutates only through the named actions here.

use std::sync::Arc;

use tokio::sync::watch;

use super::persist::PersistedState;
use crate::model::{
    Alert, AlertPatch, DashboardWidget, Host, HostGroup, HostGroupPatch, HostPatch, Layout, Theme,
    User, UserPreferencesPatch, WidgetPatch,
};
use crate::stream_ext::SliceStream;

/// Alert list plus the denormalized unread counter.
///
/// The two share one slice so every alert action updates both in a single
/// publish -- no subscriber can observe them out of sync.
#[derive(Debug, Clone, Default)]
pub struct AlertsState {
    /// Most-recent-first.
    pub alerts: Arc<Vec<Alert>>,
    pub unread: u64,
}

/// Session-scoped UI state. Starts from fixed defaults except where
/// rehydrated from [`PersistedState`].
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub selected_group_id: Option<String>,
    pub selected_host_id: Option<String>,
    pub sidebar_open: bool,
    pub theme: Theme,
    pub layout: Layout,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            selected_group_id: None,
            selected_host_id: None,
            sidebar_open: true,
            theme: Theme::Light,
            layout: Layout::Grid,
            loading: false,
            error: None,
        }
    }
}

/// Central reactive store for all dashboard state.
///
/// Sole destination for API results and stream events; the API and
/// event-stream clients hold no entity data themselves. Collections are
/// ordered and last-write-wins at the field level.
pub struct DashboardStore {
    session: watch::Sender<Option<User>>,
    hosts: watch::Sender<Arc<Vec<Host>>>,
    host_groups: watch::Sender<Arc<Vec<HostGroup>>>,
    alerts: watch::Sender<AlertsState>,
    widgets: watch::Sender<Arc<Vec<DashboardWidget>>>,
    ui: watch::Sender<UiState>,
    persisted: watch::Sender<PersistedState>,
}

impl DashboardStore {
    /// Create a store with fixed defaults for every slice.
    pub fn new() -> Self {
        Self::with_persisted(PersistedState::default())
    }

    /// Create a store rehydrated from a previously saved
    /// [`PersistedState`]; all other slices start from defaults.
    pub fn with_persisted(state: PersistedState) -> Self {
        let (session, _) = watch::channel(state.user.clone());
        let (hosts, _) = watch::channel(Arc::new(Vec::new()));
        let (host_groups, _) = watch::channel(Arc::new(Vec::new()));
        let (alerts, _) = watch::channel(AlertsState::default());
        let (widgets, _) = watch::channel(Arc::new(state.widgets.clone()));
        let (ui, _) = watch::channel(UiState {
            sidebar_open: state.sidebar_open,
            theme: state.theme,
            layout: state.layout,
            ..UiState::default()
        });
        let (persisted, _) = watch::channel(state);

        Self {
            session,
            hosts,
            host_groups,
            alerts,
            widgets,
            ui,
            persisted,
        }
    }

    // ── Session actions ──────────────────────────────────────────────

    pub fn set_user(&self, user: Option<User>) {
        self.session.send_modify(|current| *current = user);
        self.mirror_persisted();
    }

    /// Deep-merge preferences into the active session. No-op when no
    /// session is active.
    pub fn update_user_preferences(&self, patch: &UserPreferencesPatch) {
        self.session.send_modify(|current| {
            if let Some(user) = current.as_mut() {
                patch.apply_to(&mut user.preferences);
            }
        });
        self.mirror_persisted();
    }

    // ── Host actions ─────────────────────────────────────────────────

    /// Replace the whole host collection (used after a full fetch).
    pub fn set_hosts(&self, hosts: Vec<Host>) {
        self.hosts.send_modify(|current| *current = Arc::new(hosts));
    }

    /// Append a host unconditionally. Uniqueness is the caller's job;
    /// this layer does not reject duplicate ids.
    pub fn add_host(&self, host: Host) {
        self.hosts.send_modify(|current| {
            let mut next = current.as_ref().clone();
            next.push(host);
            *current = Arc::new(next);
        });
    }

    /// Merge a partial patch into the host with the given id. Silent
    /// no-op when no host matches -- a stale update racing a removal is
    /// benign, not an error.
    pub fn update_host(&self, host_id: &str, patch: &HostPatch) {
        self.hosts.send_modify(|current| {
            let next = current
                .iter()
                .map(|host| {
                    if host.id == host_id {
                        let mut updated = host.clone();
                        patch.apply_to(&mut updated);
                        updated
                    } else {
                        host.clone()
                    }
                })
                .collect();
            *current = Arc::new(next);
        });
    }

    /// Remove the host with the given id. No-op when absent.
    pub fn remove_host(&self, host_id: &str) {
        self.hosts.send_modify(|current| {
            let next = current
                .iter()
                .filter(|host| host.id != host_id)
                .cloned()
                .collect();
            *current = Arc::new(next);
        });
    }

    // ── Group actions ────────────────────────────────────────────────

    pub fn set_host_groups(&self, groups: Vec<HostGroup>) {
        self.host_groups
            .send_modify(|current| *current = Arc::new(groups));
    }

    pub fn add_host_group(&self, group: HostGroup) {
        self.host_groups.send_modify(|current| {
            let mut next = current.as_ref().clone();
            next.push(group);
            *current = Arc::new(next);
        });
    }

    /// Merge a partial patch into the group with the given id. Silent
    /// no-op when absent.
    pub fn update_host_group(&self, group_id: &str, patch: &HostGroupPatch) {
        self.host_groups.send_modify(|current| {
            let next = current
                .iter()
                .map(|group| {
                    if group.id == group_id {
                        let mut updated = group.clone();
                        patch.apply_to(&mut updated);
                        updated
                    } else {
                        group.clone()
                    }
                })
                .collect();
            *current = Arc::new(next);
        });
    }

    pub fn remove_host_group(&self, group_id: &str) {
        self.host_groups.send_modify(|current| {
            let next = current
                .iter()
                .filter(|group| group.id != group_id)
                .cloned()
                .collect();
            *current = Arc::new(next);
        });
    }

    // ── Alert actions ────────────────────────────────────────────────

    /// Replace the whole alert collection (used after a full fetch),
    /// resetting the unread counter from the incoming records.
    pub fn set_alerts(&self, alerts: Vec<Alert>) {
        self.alerts.send_modify(|state| {
            state.unread = alerts.iter().filter(|a| !a.is_read).count() as u64;
            state.alerts = Arc::new(alerts);
        });
    }

    /// Prepend an alert (most-recent-first) and bump the unread counter.
    ///
    /// The counter increments unconditionally -- callers hand in alerts
    /// that have not been read yet.
    pub fn add_alert(&self, alert: Alert) {
        self.alerts.send_modify(|state| {
            let mut next = Vec::with_capacity(state.alerts.len() + 1);
            next.push(alert);
            next.extend(state.alerts.iter().cloned());
            state.alerts = Arc::new(next);
            state.unread += 1;
        });
    }

    /// Merge a partial patch into the alert with the given id, keeping
    /// the unread counter in step when the patch flips `is_read`.
    pub fn update_alert(&self, alert_id: &str, patch: &AlertPatch) {
        self.alerts.send_modify(|state| {
            let mut unread_delta: i64 = 0;
            let next = state
                .alerts
                .iter()
                .map(|alert| {
                    if alert.id == alert_id {
                        let mut updated = alert.clone();
                        patch.apply_to(&mut updated);
                        match (alert.is_read, updated.is_read) {
                            (false, true) => unread_delta -= 1,
                            (true, false) => unread_delta += 1,
                            _ => {}
                        }
                        updated
                    } else {
                        alert.clone()
                    }
                })
                .collect();
            state.alerts = Arc::new(next);
            state.unread = state
                .unread
                .saturating_add_signed(unread_delta);
        });
    }

    /// Remove the alert with the given id, decrementing the unread
    /// counter if it was still unread. No-op when absent.
    pub fn remove_alert(&self, alert_id: &str) {
        self.alerts.send_modify(|state| {
            let mut removed_unread = false;
            let next = state
                .alerts
                .iter()
                .filter(|alert| {
                    if alert.id == alert_id {
                        removed_unread |= !alert.is_read;
                        false
                    } else {
                        true
                    }
                })
                .cloned()
                .collect();
            state.alerts = Arc::new(next);
            if removed_unread {
                state.unread = state.unread.saturating_sub(1);
            }
        });
    }

    /// Mark one alert read. Idempotent: a second call for the same id
    /// leaves the counter untouched, and the counter never goes negative.
    pub fn mark_alert_read(&self, alert_id: &str) {
        self.alerts.send_modify(|state| {
            let mut was_unread = false;
            let next = state
                .alerts
                .iter()
                .map(|alert| {
                    if alert.id == alert_id && !alert.is_read {
                        was_unread = true;
                        let mut updated = alert.clone();
                        updated.is_read = true;
                        updated
                    } else {
                        alert.clone()
                    }
                })
                .collect();
            state.alerts = Arc::new(next);
            if was_unread {
                state.unread = state.unread.saturating_sub(1);
            }
        });
    }

    /// Mark every alert read and zero the counter in one publish.
    pub fn mark_all_alerts_read(&self) {
        self.alerts.send_modify(|state| {
            let next = state
                .alerts
                .iter()
                .map(|alert| {
                    let mut updated = alert.clone();
                    updated.is_read = true;
                    updated
                })
                .collect();
            state.alerts = Arc::new(next);
            state.unread = 0;
        });
    }

    // ── Widget actions ───────────────────────────────────────────────

    pub fn set_widgets(&self, widgets: Vec<DashboardWidget>) {
        self.widgets
            .send_modify(|current| *current = Arc::new(widgets));
        self.mirror_persisted();
    }

    pub fn update_widget(&self, widget_id: &str, patch: &WidgetPatch) {
        self.widgets.send_modify(|current| {
            let next = current
                .iter()
                .map(|widget| {
                    if widget.id == widget_id {
                        let mut updated = widget.clone();
                        patch.apply_to(&mut updated);
                        updated
                    } else {
                        widget.clone()
                    }
                })
                .collect();
            *current = Arc::new(next);
        });
        self.mirror_persisted();
    }

    // ── UI actions ───────────────────────────────────────────────────

    pub fn set_selected_group(&self, group_id: Option<String>) {
        self.ui
            .send_modify(|ui| ui.selected_group_id = group_id);
    }

    pub fn set_selected_host(&self, host_id: Option<String>) {
        self.ui.send_modify(|ui| ui.selected_host_id = host_id);
    }

    pub fn toggle_sidebar(&self) {
        self.ui.send_modify(|ui| ui.sidebar_open = !ui.sidebar_open);
        self.mirror_persisted();
    }

    pub fn set_theme(&self, theme: Theme) {
        self.ui.send_modify(|ui| ui.theme = theme);
        self.mirror_persisted();
    }

    pub fn set_layout(&self, layout: Layout) {
        self.ui.send_modify(|ui| ui.layout = layout);
        self.mirror_persisted();
    }

    pub fn set_loading(&self, loading: bool) {
        self.ui.send_modify(|ui| ui.loading = loading);
    }

    pub fn set_error(&self, error: Option<String>) {
        self.ui.send_modify(|ui| ui.error = error);
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn user(&self) -> Option<User> {
        self.session.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_some()
    }

    pub fn hosts(&self) -> Arc<Vec<Host>> {
        self.hosts.borrow().clone()
    }

    pub fn host_groups(&self) -> Arc<Vec<HostGroup>> {
        self.host_groups.borrow().clone()
    }

    pub fn alerts(&self) -> Arc<Vec<Alert>> {
        self.alerts.borrow().alerts.clone()
    }

    pub fn unread_alerts(&self) -> u64 {
        self.alerts.borrow().unread
    }

    pub fn widgets(&self) -> Arc<Vec<DashboardWidget>> {
        self.widgets.borrow().clone()
    }

    pub fn ui(&self) -> UiState {
        self.ui.borrow().clone()
    }

    pub fn persisted(&self) -> PersistedState {
        self.persisted.borrow().clone()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_session(&self) -> SliceStream<Option<User>> {
        SliceStream::new(self.session.subscribe())
    }

    pub fn subscribe_hosts(&self) -> SliceStream<Arc<Vec<Host>>> {
        SliceStream::new(self.hosts.subscribe())
    }

    pub fn subscribe_host_groups(&self) -> SliceStream<Arc<Vec<HostGroup>>> {
        SliceStream::new(self.host_groups.subscribe())
    }

    pub fn subscribe_alerts(&self) -> SliceStream<AlertsState> {
        SliceStream::new(self.alerts.subscribe())
    }

    pub fn subscribe_widgets(&self) -> SliceStream<Arc<Vec<DashboardWidget>>> {
        SliceStream::new(self.widgets.subscribe())
    }

    pub fn subscribe_ui(&self) -> SliceStream<UiState> {
        SliceStream::new(self.ui.subscribe())
    }

    /// Raw receiver for the durable subset; the persistence writer tails
    /// this and flushes to disk on change.
    pub fn subscribe_persisted(&self) -> watch::Receiver<PersistedState> {
        self.persisted.subscribe()
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Republish the durable subset. Called by every action that touches
    /// one of its fields.
    fn mirror_persisted(&self) {
        let ui = self.ui.borrow().clone();
        let widgets = self.widgets.borrow().clone();
        let user = self.session.borrow().clone();

        self.persisted.send_modify(|state| {
            state.theme = ui.theme;
            state.sidebar_open = ui.sidebar_open;
            state.layout = ui.layout;
            state.widgets = widgets.as_ref().clone();
            state.user = user;
        });
    }
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{
        AlertKind, AlertSeverity, NotificationPreferencesPatch, Platform, Role, TimeFormat,
        UserPreferences,
    };

    fn host(id: &str) -> Host {
        Host {
            id: id.into(),
            name: format!("workstation-{id}"),
            hostname: format!("{id}.corp.local"),
            platform: Platform::Linux,
            last_seen: Utc::now(),
            is_online: true,
            version: "2.4.1".into(),
            timezone: "UTC".into(),
            group_id: None,
            metadata: None,
        }
    }

    fn alert(id: &str, severity: AlertSeverity) -> Alert {
        Alert {
            id: id.into(),
            kind: AlertKind::Downtime,
            severity,
            title: "Host offline".into(),
            message: "stopped reporting".into(),
            host_id: Some("h1".into()),
            group_id: None,
            timestamp: Utc::now(),
            is_read: false,
            is_resolved: false,
        }
    }

    fn user() -> User {
        User {
            id: "u1".into(),
            name: "Alex".into(),
            email: "alex@example.com".into(),
            role: Role::Manager,
            permissions: vec!["alerts:read".into()],
            preferences: UserPreferences::default(),
        }
    }

    fn unread_count(store: &DashboardStore) -> u64 {
        store.alerts().iter().filter(|a| !a.is_read).count() as u64
    }

    // ── Alert counter invariant ──────────────────────────────────────

    #[test]
    fn unread_counter_tracks_collection_across_action_sequences() {
        let store = DashboardStore::new();

        store.add_alert(alert("a1", AlertSeverity::Low));
        store.add_alert(alert("a2", AlertSeverity::High));
        store.add_alert(alert("a3", AlertSeverity::Critical));
        assert_eq!(store.unread_alerts(), 3);
        assert_eq!(store.unread_alerts(), unread_count(&store));

        store.mark_alert_read("a2");
        assert_eq!(store.unread_alerts(), 2);
        assert_eq!(store.unread_alerts(), unread_count(&store));

        store.remove_alert("a1");
        assert_eq!(store.unread_alerts(), 1);
        assert_eq!(store.unread_alerts(), unread_count(&store));

        store.mark_all_alerts_read();
        assert_eq!(store.unread_alerts(), 0);
        assert_eq!(store.unread_alerts(), unread_count(&store));
    }

    #[test]
    fn set_alerts_recomputes_unread_from_collection() {
        let store = DashboardStore::new();
        store.add_alert(alert("stale", AlertSeverity::Low));

        let mut read_alert = alert("a1", AlertSeverity::Low);
        read_alert.is_read = true;
        store.set_alerts(vec![read_alert, alert("a2", AlertSeverity::High)]);

        assert_eq!(store.alerts().len(), 2);
        assert_eq!(store.unread_alerts(), 1);
        assert_eq!(store.unread_alerts(), unread_count(&store));
    }

    #[test]
    fn add_alert_prepends_most_recent_first() {
        let store = DashboardStore::new();
        store.add_alert(alert("a1", AlertSeverity::Low));
        store.add_alert(alert("a2", AlertSeverity::High));

        let alerts = store.alerts();
        assert_eq!(alerts[0].id, "a2");
        assert_eq!(alerts[1].id, "a1");
    }

    #[test]
    fn mark_alert_read_is_idempotent_and_never_negative() {
        let store = DashboardStore::new();
        assert_eq!(store.unread_alerts(), 0);

        store.add_alert(alert("a1", AlertSeverity::Critical));
        assert_eq!(store.unread_alerts(), 1);
        assert_eq!(store.alerts()[0].id, "a1");

        store.mark_alert_read("a1");
        assert_eq!(store.unread_alerts(), 0);

        // Second invocation on the same id: counter stays at 0, not -1.
        store.mark_alert_read("a1");
        assert_eq!(store.unread_alerts(), 0);
        assert!(store.alerts()[0].is_read);
    }

    #[test]
    fn mark_alert_read_on_missing_id_is_a_no_op() {
        let store = DashboardStore::new();
        store.add_alert(alert("a1", AlertSeverity::Low));

        store.mark_alert_read("ghost");
        assert_eq!(store.unread_alerts(), 1);
        assert!(!store.alerts()[0].is_read);
    }

    #[test]
    fn mark_all_alerts_read_always_zeroes() {
        let store = DashboardStore::new();
        store.add_alert(alert("a1", AlertSeverity::Low));
        store.add_alert(alert("a2", AlertSeverity::High));
        store.mark_alert_read("a1");

        store.mark_all_alerts_read();
        assert_eq!(store.unread_alerts(), 0);
        assert!(store.alerts().iter().all(|a| a.is_read));

        // Regardless of prior state, including already-empty.
        store.mark_all_alerts_read();
        assert_eq!(store.unread_alerts(), 0);
    }

    #[test]
    fn remove_alert_of_read_alert_keeps_counter() {
        let store = DashboardStore::new();
        store.add_alert(alert("a1", AlertSeverity::Low));
        store.add_alert(alert("a2", AlertSeverity::Low));
        store.mark_alert_read("a1");
        assert_eq!(store.unread_alerts(), 1);

        store.remove_alert("a1");
        assert_eq!(store.unread_alerts(), 1);
        assert_eq!(store.alerts().len(), 1);
    }

    #[test]
    fn update_alert_flipping_read_state_adjusts_counter() {
        let store = DashboardStore::new();
        store.add_alert(alert("a1", AlertSeverity::Low));

        store.update_alert(
            "a1",
            &AlertPatch {
                is_read: Some(true),
                ..AlertPatch::default()
            },
        );
        assert_eq!(store.unread_alerts(), 0);

        store.update_alert(
            "a1",
            &AlertPatch {
                is_read: Some(false),
                severity: Some(AlertSeverity::Critical),
                ..AlertPatch::default()
            },
        );
        assert_eq!(store.unread_alerts(), 1);
        assert_eq!(store.alerts()[0].severity, AlertSeverity::Critical);
    }

    // ── Host / group upserts ─────────────────────────────────────────

    #[test]
    fn update_host_merges_patch_fields() {
        let store = DashboardStore::new();
        store.set_hosts(vec![host("h1"), host("h2")]);

        store.update_host(
            "h1",
            &HostPatch {
                is_online: Some(false),
                ..HostPatch::default()
            },
        );

        let hosts = store.hosts();
        assert!(!hosts[0].is_online);
        // Untouched fields and other entries survive.
        assert_eq!(hosts[0].name, "workstation-h1");
        assert!(hosts[1].is_online);
    }

    #[test]
    fn update_host_on_missing_id_leaves_collection_unchanged() {
        let store = DashboardStore::new();
        store.set_hosts(vec![host("h1")]);
        let before = store.hosts();

        store.update_host(
            "ghost",
            &HostPatch {
                is_online: Some(false),
                ..HostPatch::default()
            },
        );

        let after = store.hosts();
        assert_eq!(*before, *after);
        assert_eq!(after.len(), 1);
    }

    #[test]
    fn add_host_appends_even_duplicate_ids() {
        let store = DashboardStore::new();
        store.add_host(host("h1"));
        store.add_host(host("h1"));
        assert_eq!(store.hosts().len(), 2);
    }

    #[test]
    fn remove_host_filters_by_id() {
        let store = DashboardStore::new();
        store.set_hosts(vec![host("h1"), host("h2")]);

        store.remove_host("h1");
        assert_eq!(store.hosts().len(), 1);
        assert_eq!(store.hosts()[0].id, "h2");

        // Absent id: no-op.
        store.remove_host("h1");
        assert_eq!(store.hosts().len(), 1);
    }

    #[test]
    fn update_host_group_on_missing_id_is_a_no_op() {
        let store = DashboardStore::new();
        let before = store.host_groups();

        store.update_host_group(
            "ghost",
            &HostGroupPatch {
                name: Some("renamed".into()),
                ..HostGroupPatch::default()
            },
        );

        assert_eq!(*before, *store.host_groups());
    }

    // ── Session and preferences ──────────────────────────────────────

    #[test]
    fn update_user_preferences_without_session_is_a_no_op() {
        let store = DashboardStore::new();
        store.update_user_preferences(&UserPreferencesPatch {
            theme: Some(Theme::Dark),
            ..UserPreferencesPatch::default()
        });
        assert!(store.user().is_none());
    }

    #[test]
    fn update_user_preferences_deep_merges_notifications() {
        let store = DashboardStore::new();
        let mut u = user();
        u.preferences.notifications.email = true;
        u.preferences.time_format = TimeFormat::Hour12;
        store.set_user(Some(u));

        store.update_user_preferences(&UserPreferencesPatch {
            theme: Some(Theme::Dark),
            notifications: Some(NotificationPreferencesPatch {
                browser: Some(true),
                ..NotificationPreferencesPatch::default()
            }),
            ..UserPreferencesPatch::default()
        });

        let prefs = store.user().unwrap().preferences;
        assert_eq!(prefs.theme, Theme::Dark);
        // Sibling notification fields survive the nested merge.
        assert!(prefs.notifications.email);
        assert!(prefs.notifications.browser);
        assert_eq!(prefs.time_format, TimeFormat::Hour12);
    }

    // ── UI state ─────────────────────────────────────────────────────

    #[test]
    fn toggle_sidebar_flips() {
        let store = DashboardStore::new();
        assert!(store.ui().sidebar_open);
        store.toggle_sidebar();
        assert!(!store.ui().sidebar_open);
        store.toggle_sidebar();
        assert!(store.ui().sidebar_open);
    }

    // ── Persistence mirror ───────────────────────────────────────────

    #[test]
    fn persisted_subset_mirrors_qualifying_mutations() {
        let store = DashboardStore::new();
        let mut rx = store.subscribe_persisted();

        store.set_theme(Theme::Dark);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().theme, Theme::Dark);

        store.set_user(Some(user()));
        assert_eq!(
            rx.borrow_and_update().user.as_ref().unwrap().id,
            "u1"
        );

        // Non-qualifying mutations do not republish the subset.
        store.set_loading(true);
        store.add_alert(alert("a1", AlertSeverity::Low));
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn with_persisted_rehydrates_subset_only() {
        let saved = PersistedState {
            theme: Theme::Dark,
            sidebar_open: false,
            layout: Layout::List,
            widgets: Vec::new(),
            user: Some(user()),
        };
        let store = DashboardStore::with_persisted(saved);

        let ui = store.ui();
        assert_eq!(ui.theme, Theme::Dark);
        assert!(!ui.sidebar_open);
        assert_eq!(ui.layout, Layout::List);
        assert!(store.is_authenticated());

        // Non-persisted slices start fresh.
        assert!(store.hosts().is_empty());
        assert_eq!(store.unread_alerts(), 0);
        assert!(!ui.loading);
    }

    // ── Notification ordering ────────────────────────────────────────

    #[test]
    fn subscribers_are_notified_synchronously_per_action() {
        let store = DashboardStore::new();
        let mut rx = store.subscribe_persisted();

        store.set_theme(Theme::Dark);
        // The publish happened before set_theme returned.
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        store.set_theme(Theme::Light);
        assert!(rx.has_changed().unwrap());
    }
}
