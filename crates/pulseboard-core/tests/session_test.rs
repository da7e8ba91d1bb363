// End-to-end session tests against a wiremock backend.
//
// The event stream stays disabled here: its reconnect behavior has its own
// tests in pulseboard-api. These cover the connect → refresh → store path
// and auth-expiry teardown.

#![allow(clippy::unwrap_used)]

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pulseboard_core::{CoreError, DashboardSession, PersistedState, SessionConfig, Theme};

fn wrap(data: serde_json::Value) -> serde_json::Value {
    json!({
        "data": data,
        "success": true,
        "timestamp": "2026-03-01T12:00:00Z"
    })
}

fn session_for(server: &MockServer) -> DashboardSession {
    let config = SessionConfig {
        url: server.uri().parse().unwrap(),
        credential: SecretString::from("test-token"),
        stream_enabled: false,
        refresh_interval_secs: 0,
        ..SessionConfig::default()
    };
    DashboardSession::new(config, PersistedState::default()).unwrap()
}

async fn mount_happy_backend(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wrap(json!({
            "id": "u1",
            "name": "Alex",
            "email": "alex@example.com",
            "role": "manager",
            "permissions": ["alerts:read"]
        }))))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/hosts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wrap(json!([
            {
                "id": "h1",
                "name": "workstation-1",
                "hostname": "ws1.corp.local",
                "platform": "linux",
                "lastSeen": "2026-03-01T11:59:00Z",
                "isOnline": true,
                "version": "2.4.1",
                "timezone": "Europe/Berlin"
            },
            {
                "id": "h2",
                "name": "workstation-2",
                "hostname": "ws2.corp.local",
                "platform": "windows",
                "lastSeen": "2026-02-28T20:00:00Z",
                "isOnline": false,
                "version": "2.4.0",
                "timezone": "Europe/Berlin",
                "groupId": "g1"
            }
        ]))))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wrap(json!([
            {
                "id": "g1",
                "name": "Engineering",
                "description": "",
                "color": "#4f9cf9",
                "hosts": ["h2"],
                "createdAt": "2026-01-01T00:00:00Z",
                "updatedAt": "2026-02-01T00:00:00Z"
            }
        ]))))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": "b1",
                "type": "downtime",
                "severity": "medium",
                "title": "Host offline overnight",
                "message": "",
                "hostId": "h2",
                "timestamp": "2026-03-01T02:00:00Z",
                "isRead": false,
                "isResolved": false
            }],
            "success": true,
            "timestamp": "2026-03-01T12:00:00Z",
            "pagination": { "page": 1, "limit": 50, "total": 1, "totalPages": 1 }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn connect_authenticates_and_populates_store() {
    let server = MockServer::start().await;
    mount_happy_backend(&server).await;

    let session = session_for(&server);
    session.connect().await.unwrap();

    let store = session.store();
    assert!(store.is_authenticated());
    assert_eq!(store.user().unwrap().name, "Alex");

    let hosts = store.hosts();
    assert_eq!(hosts.len(), 2);
    assert_eq!(hosts[0].id, "h1");
    assert!(!hosts[1].is_online);
    assert_eq!(hosts[1].group_id.as_deref(), Some("g1"));

    assert_eq!(store.host_groups().len(), 1);

    // The first page of alerts lands in the store with the counter set.
    assert_eq!(store.alerts().len(), 1);
    assert_eq!(store.alerts()[0].id, "b1");
    assert_eq!(store.unread_alerts(), 1);

    assert!(store.ui().error.is_none());
    assert!(!store.ui().loading);

    session.disconnect().await;
}

#[tokio::test]
async fn expired_credential_clears_session_without_store_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let session = session_for(&server);
    let err = session.connect().await.unwrap_err();

    assert!(matches!(err, CoreError::AuthenticationFailed { .. }));

    let store = session.store();
    assert!(!store.is_authenticated());
    // Auth expiry is recovered by clearing the session, not surfaced as a
    // store error.
    assert!(store.ui().error.is_none());
    assert!(!store.ui().loading);
}

#[tokio::test]
async fn write_through_alert_actions_update_backend_and_store() {
    let server = MockServer::start().await;
    mount_happy_backend(&server).await;

    Mock::given(method("PATCH"))
        .and(path("/api/alerts/a1/read"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wrap(json!(null))))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server);
    session.connect().await.unwrap();

    // One unread alert ("b1") came from the refresh; simulate a pushed
    // alert on top, then acknowledge it.
    session.store().add_alert(pulseboard_core::Alert {
        id: "a1".into(),
        kind: pulseboard_core::AlertKind::Downtime,
        severity: pulseboard_core::AlertSeverity::High,
        title: "Host offline".into(),
        message: String::new(),
        host_id: Some("h2".into()),
        group_id: None,
        timestamp: "2026-03-01T10:00:00Z".parse().unwrap(),
        is_read: false,
        is_resolved: false,
    });
    assert_eq!(session.store().unread_alerts(), 2);

    session.mark_alert_read("a1").await.unwrap();
    assert_eq!(session.store().unread_alerts(), 1);
    assert!(session.store().alerts()[0].is_read);

    session.disconnect().await;
}

#[tokio::test]
async fn persisted_writer_flushes_on_qualifying_changes() {
    let server = MockServer::start().await;
    mount_happy_backend(&server).await;

    let session = session_for(&server);
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    session.spawn_persistence(move |state| {
        let _ = tx.send(state.clone());
    });

    session.connect().await.unwrap();
    session.store().set_theme(Theme::Dark);

    // connect() stored the user; the theme change follows.
    let mut last = None;
    while let Ok(state) =
        tokio::time::timeout(std::time::Duration::from_secs(1), rx.recv()).await
    {
        let Some(state) = state else { break };
        let done = state.theme == Theme::Dark;
        last = Some(state);
        if done {
            break;
        }
    }

    let last = last.expect("persistence writer never fired");
    assert_eq!(last.theme, Theme::Dark);
    assert_eq!(last.user.unwrap().id, "u1");

    session.disconnect().await;
}
