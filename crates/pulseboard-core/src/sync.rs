// ── Stream-to-store bridge ──
//
// Translates one decoded event-stream message into store mutations.
// Pure and synchronous; the session facade pumps the broadcast receiver
// through here.

use pulseboard_api::StreamMessage;
use tracing::debug;

use crate::model::{Alert, HostPatch};
use crate::store::DashboardStore;

/// Apply one inbound message to the store.
///
/// Matched exhaustively over the recognized kinds. Activity and metrics
/// updates are informational in the current scope: logged, no store
/// mutation. A host-status event for a host the store does not hold is a
/// silent no-op per the upsert contract.
pub fn apply_stream_message(store: &DashboardStore, message: &StreamMessage) {
    match message {
        StreamMessage::HostStatus(event) => {
            store.update_host(
                &event.host_id,
                &HostPatch {
                    is_online: Some(event.is_online),
                    last_seen: event.last_activity,
                    ..HostPatch::default()
                },
            );
        }
        StreamMessage::ActivityUpdate(event) => {
            debug!(host_id = %event.host_id, "activity update");
        }
        StreamMessage::MetricsUpdate(event) => {
            debug!(
                host_id = ?event.host_id,
                group_id = ?event.group_id,
                "metrics update"
            );
        }
        StreamMessage::Alert(alert) => {
            store.add_alert(Alert::from(alert.clone()));
        }
        StreamMessage::Unknown { kind } => {
            debug!(kind, "ignoring unknown event kind");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use pulseboard_api::models::ApiAlert;
    use pulseboard_api::stream::{ActivityUpdateEvent, HostStatusEvent};

    use super::*;
    use crate::model::{Host, Platform};

    fn host(id: &str, online: bool) -> Host {
        Host {
            id: id.into(),
            name: id.into(),
            hostname: format!("{id}.local"),
            platform: Platform::Linux,
            last_seen: Utc::now(),
            is_online: online,
            version: String::new(),
            timezone: String::new(),
            group_id: None,
            metadata: None,
        }
    }

    #[test]
    fn host_status_patches_online_flag_and_last_seen() {
        let store = DashboardStore::new();
        store.set_hosts(vec![host("h1", true)]);

        let seen = Utc::now();
        apply_stream_message(
            &store,
            &StreamMessage::HostStatus(HostStatusEvent {
                host_id: "h1".into(),
                is_online: false,
                last_activity: Some(seen),
                current_app: None,
            }),
        );

        let hosts = store.hosts();
        assert!(!hosts[0].is_online);
        assert_eq!(hosts[0].last_seen, seen);
    }

    #[test]
    fn host_status_for_unknown_host_creates_nothing() {
        let store = DashboardStore::new();
        let before = store.hosts();

        apply_stream_message(
            &store,
            &StreamMessage::HostStatus(HostStatusEvent {
                host_id: "h1".into(),
                is_online: false,
                last_activity: Some(Utc::now()),
                current_app: None,
            }),
        );

        assert_eq!(*before, *store.hosts());
        assert!(store.hosts().is_empty());
    }

    #[test]
    fn alert_push_lands_in_store_and_bumps_unread() {
        let store = DashboardStore::new();

        apply_stream_message(
            &store,
            &StreamMessage::Alert(ApiAlert {
                id: "a1".into(),
                kind: "downtime".into(),
                severity: "high".into(),
                title: "Host offline".into(),
                message: String::new(),
                host_id: Some("h1".into()),
                group_id: None,
                timestamp: Utc::now(),
                is_read: false,
                is_resolved: false,
            }),
        );

        assert_eq!(store.unread_alerts(), 1);
        assert_eq!(store.alerts()[0].id, "a1");
    }

    #[test]
    fn informational_and_unknown_kinds_leave_store_untouched() {
        let store = DashboardStore::new();
        store.set_hosts(vec![host("h1", true)]);
        let before = store.hosts();

        apply_stream_message(
            &store,
            &StreamMessage::ActivityUpdate(ActivityUpdateEvent {
                host_id: "h1".into(),
                activity: serde_json::json!({ "app": "editor" }),
            }),
        );
        apply_stream_message(
            &store,
            &StreamMessage::Unknown {
                kind: "server_gossip".into(),
            },
        );

        assert_eq!(*before, *store.hosts());
        assert_eq!(store.unread_alerts(), 0);
    }
}
