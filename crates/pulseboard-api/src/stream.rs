//! Real-time event stream with auto-reconnect.
//!
//! Maintains at most one live WebSocket connection to the backend's event
//! channel, decodes inbound pushes into [`StreamMessage`], and fans them out
//! through a [`tokio::sync::broadcast`] channel. Reconnects with exponential
//! backoff up to a fixed attempt ceiling, then parks in
//! [`ConnectionState::Failed`] until [`connect`](EventStreamClient::connect)
//! is called again.
//!
//! # Example
//!
//! ```rust,ignore
//! use pulseboard_api::{EventStreamClient, RetryPolicy};
//! use secrecy::SecretString;
//! use url::Url;
//!
//! let ws_url = Url::parse("wss://dash.example.com/events")?;
//! let client = EventStreamClient::new(ws_url, RetryPolicy::default());
//! let mut rx = client.subscribe();
//!
//! client.connect(SecretString::from("token"));
//! while let Ok(message) = rx.recv().await {
//!     println!("{message:?}");
//! }
//! client.disconnect();
//! ```

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use futures_util::{SinkExt, StreamExt};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc, watch};
use tokio_tungstenite::tungstenite::{self, ClientRequestBuilder};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::Error;
use crate::models::ApiAlert;
use crate::retry::RetryPolicy;

// ── Channel capacities ───────────────────────────────────────────────

const MESSAGE_CHANNEL_CAPACITY: usize = 1024;
const OUTBOUND_CHANNEL_CAPACITY: usize = 64;

// ── User-visible notices ─────────────────────────────────────────────

/// Shown while automatic reconnection is still in progress.
pub const NOTICE_RETRYING: &str = "Connection failed. Retrying...";

/// Shown once the attempt ceiling is reached; recovery needs an explicit
/// `connect`.
pub const NOTICE_CONNECTION_LOST: &str = "Connection lost. Please reload.";

// ── Connection state ─────────────────────────────────────────────────

/// Connection state observable by consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting { attempt: u32 },
    Failed,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

/// Connection state plus the user-visible notice that goes with it.
///
/// The notice is what the store surfaces as its error field: transient
/// while retrying, persistent once reconnection is exhausted, absent
/// while connected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamStatus {
    pub state: ConnectionState,
    pub notice: Option<String>,
}

impl Default for StreamStatus {
    fn default() -> Self {
        Self {
            state: ConnectionState::Disconnected,
            notice: None,
        }
    }
}

// ── Inbound messages ─────────────────────────────────────────────────

/// Host presence change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostStatusEvent {
    pub host_id: String,
    pub is_online: bool,
    pub last_activity: Option<DateTime<Utc>>,
    pub current_app: Option<String>,
}

/// Live activity sample for one host. Informational in the current scope;
/// the payload stays raw JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityUpdateEvent {
    pub host_id: String,
    pub activity: serde_json::Value,
}

/// Live metrics sample for a host or group. Informational in the current
/// scope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricsUpdateEvent {
    pub host_id: Option<String>,
    pub group_id: Option<String>,
    pub metrics: serde_json::Value,
}

/// A decoded push from the backend's event channel.
///
/// Everything outside the four recognized kinds lands in `Unknown` so
/// consumers can match exhaustively and still ignore new server-side
/// event types without erroring.
#[derive(Debug, Clone)]
pub enum StreamMessage {
    HostStatus(HostStatusEvent),
    ActivityUpdate(ActivityUpdateEvent),
    MetricsUpdate(MetricsUpdateEvent),
    Alert(ApiAlert),
    Unknown { kind: String },
}

// ── Wire envelope ────────────────────────────────────────────────────

/// Raw envelope for both directions: `{ "type": ..., "data": ... }`
/// (inbound additionally carries `timestamp`).
#[derive(Debug, Deserialize)]
struct WireEnvelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: serde_json::Value,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
struct OutboundFrame {
    #[serde(rename = "type")]
    kind: &'static str,
    data: serde_json::Value,
}

// ── EventStreamClient ────────────────────────────────────────────────

/// Handle to the event-stream connection.
///
/// Cheaply cloneable. Holds no entity data -- decoded messages are handed
/// to subscribers, who write them into the store.
#[derive(Clone)]
pub struct EventStreamClient {
    inner: Arc<StreamInner>,
}

struct StreamInner {
    ws_url: Url,
    retry: RetryPolicy,
    status: watch::Sender<StreamStatus>,
    messages: broadcast::Sender<Arc<StreamMessage>>,
    conn: Mutex<Option<ConnHandle>>,
}

/// Per-`connect` resources, torn down by `disconnect`.
struct ConnHandle {
    cancel: CancellationToken,
    outbound_tx: mpsc::Sender<OutboundFrame>,
}

impl EventStreamClient {
    /// Create a client for the given event-channel URL. Does not connect.
    pub fn new(ws_url: Url, retry: RetryPolicy) -> Self {
        let (status, _) = watch::channel(StreamStatus::default());
        let (messages, _) = broadcast::channel(MESSAGE_CHANNEL_CAPACITY);

        Self {
            inner: Arc::new(StreamInner {
                ws_url,
                retry,
                status,
                messages,
                conn: Mutex::new(None),
            }),
        }
    }

    /// Start the connection loop, authenticating the handshake with the
    /// given bearer credential.
    ///
    /// Idempotent: a no-op while a connection is live or being retried.
    /// From `Disconnected` or `Failed` it starts a fresh loop with the
    /// attempt counter reset. Must be called from within a tokio runtime.
    pub fn connect(&self, credential: SecretString) {
        let mut conn = self.inner.conn.lock().unwrap_or_else(|e| e.into_inner());

        if conn.is_some() {
            let state = self.inner.status.borrow().state.clone();
            if state == ConnectionState::Failed {
                // The previous loop gave up; replace it.
                if let Some(old) = conn.take() {
                    old.cancel.cancel();
                }
            } else {
                tracing::debug!("connect called while already connected, ignoring");
                return;
            }
        }

        let cancel = CancellationToken::new();
        let (outbound_tx, outbound_rx) = mpsc::channel(OUTBOUND_CHANNEL_CAPACITY);

        self.inner
            .set_status(ConnectionState::Connecting, None);

        let inner = Arc::clone(&self.inner);
        let task_cancel = cancel.clone();
        tokio::spawn(async move {
            run_loop(inner, credential, outbound_rx, task_cancel).await;
        });

        *conn = Some(ConnHandle { cancel, outbound_tx });
    }

    /// Tear down the connection and any pending reconnect timer.
    ///
    /// No further automatic reconnection occurs until the next `connect`.
    pub fn disconnect(&self) {
        let handle = self
            .inner
            .conn
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();

        if let Some(handle) = handle {
            handle.cancel.cancel();
        }
        self.inner.set_status(ConnectionState::Disconnected, None);
        tracing::debug!("event stream disconnected");
    }

    /// Get a new broadcast receiver for decoded messages.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<StreamMessage>> {
        self.inner.messages.subscribe()
    }

    /// Subscribe to connection status changes.
    pub fn status(&self) -> watch::Receiver<StreamStatus> {
        self.inner.status.subscribe()
    }

    /// The current connection state.
    pub fn state(&self) -> ConnectionState {
        self.inner.status.borrow().state.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.state().is_connected()
    }

    // ── Outbound subscriptions ───────────────────────────────────────
    //
    // Best-effort: frames are sent only while connected and silently
    // dropped otherwise. Subscription intent is NOT replayed after a
    // reconnect -- callers re-subscribe when they observe `Connected`.

    /// Ask the backend to push events for one host.
    pub fn subscribe_to_host(&self, host_id: &str) {
        self.send_frame("subscribe_host", serde_json::Value::from(host_id));
    }

    pub fn unsubscribe_from_host(&self, host_id: &str) {
        self.send_frame("unsubscribe_host", serde_json::Value::from(host_id));
    }

    /// Ask the backend to push events for one group.
    pub fn subscribe_to_group(&self, group_id: &str) {
        self.send_frame("subscribe_group", serde_json::Value::from(group_id));
    }

    pub fn unsubscribe_from_group(&self, group_id: &str) {
        self.send_frame("unsubscribe_group", serde_json::Value::from(group_id));
    }

    /// Escape hatch: send an arbitrary named frame.
    pub fn emit(&self, kind: &'static str, payload: serde_json::Value) {
        self.send_frame(kind, payload);
    }

    fn send_frame(&self, kind: &'static str, data: serde_json::Value) {
        if !self.is_connected() {
            tracing::debug!(kind, "not connected, dropping outbound frame");
            return;
        }

        let conn = self.inner.conn.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(ref handle) = *conn {
            if handle.outbound_tx.try_send(OutboundFrame { kind, data }).is_err() {
                tracing::debug!(kind, "outbound channel full or closed, dropping frame");
            }
        }
    }
}

impl StreamInner {
    fn set_status(&self, state: ConnectionState, notice: Option<&str>) {
        self.status.send_modify(|s| {
            s.state = state;
            s.notice = notice.map(String::from);
        });
    }
}

// ── Background reconnection loop ─────────────────────────────────────

/// Main loop: connect → read → on drop, backoff → reconnect, up to the
/// attempt ceiling.
async fn run_loop(
    inner: Arc<StreamInner>,
    credential: SecretString,
    mut outbound_rx: mpsc::Receiver<OutboundFrame>,
    cancel: CancellationToken,
) {
    let mut attempt: u32 = 0;

    loop {
        inner.set_status(ConnectionState::Connecting, None);

        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            result = connect_and_read(&inner, &credential, &mut outbound_rx, &cancel, &mut attempt) => {
                if cancel.is_cancelled() {
                    break;
                }
                match result {
                    Ok(()) => tracing::info!("event stream dropped"),
                    Err(e) => tracing::warn!(error = %e, attempt, "event stream error"),
                }

                attempt += 1;
                if inner.retry.is_exhausted(attempt) {
                    tracing::error!(
                        max_attempts = inner.retry.max_attempts,
                        "event stream reconnection limit reached, giving up"
                    );
                    inner.set_status(ConnectionState::Failed, Some(NOTICE_CONNECTION_LOST));
                    break;
                }

                let delay = inner.retry.delay_for(attempt);
                inner.set_status(
                    ConnectionState::Reconnecting { attempt },
                    Some(NOTICE_RETRYING),
                );
                tracing::info!(
                    delay_ms = delay.as_millis() as u64,
                    attempt,
                    "waiting before reconnect"
                );

                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    _ = tokio::time::sleep(delay) => {}
                }
            }
        }
    }

    tracing::debug!("event stream loop exiting");
}

// ── Single connection lifecycle ──────────────────────────────────────

/// Establish one WebSocket connection, then pump frames both ways until
/// it drops. Resets the attempt counter once the handshake succeeds.
async fn connect_and_read(
    inner: &StreamInner,
    credential: &SecretString,
    outbound_rx: &mut mpsc::Receiver<OutboundFrame>,
    cancel: &CancellationToken,
    attempt: &mut u32,
) -> Result<(), Error> {
    tracing::info!(url = %inner.ws_url, "connecting to event stream");

    let uri: tungstenite::http::Uri = inner
        .ws_url
        .as_str()
        .parse()
        .map_err(|e: tungstenite::http::uri::InvalidUri| Error::StreamConnect(e.to_string()))?;

    let request = ClientRequestBuilder::new(uri).with_header(
        "Authorization",
        format!("Bearer {}", credential.expose_secret()),
    );

    let (ws_stream, _response) = tokio_tungstenite::connect_async(request)
        .await
        .map_err(|e| Error::StreamConnect(e.to_string()))?;

    tracing::info!("event stream connected");
    *attempt = 0;
    inner.set_status(ConnectionState::Connected, None);

    let (mut write, mut read) = ws_stream.split();

    // Drop frames that raced into the outbound queue while no connection
    // was live -- subscription intent is not replayed.
    while outbound_rx.try_recv().is_ok() {}

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(()),
            frame = outbound_rx.recv() => {
                let Some(frame) = frame else { return Ok(()) };
                match serde_json::to_string(&frame) {
                    Ok(text) => {
                        if let Err(e) = write.send(tungstenite::Message::Text(text.into())).await {
                            return Err(Error::StreamConnect(e.to_string()));
                        }
                    }
                    Err(e) => tracing::debug!(error = %e, "failed to encode outbound frame"),
                }
            }
            frame = read.next() => {
                match frame {
                    Some(Ok(tungstenite::Message::Text(text))) => {
                        decode_and_broadcast(&text, &inner.messages);
                    }
                    Some(Ok(tungstenite::Message::Ping(_))) => {
                        // tungstenite handles pong replies automatically
                        tracing::trace!("event stream ping");
                    }
                    Some(Ok(tungstenite::Message::Close(frame))) => {
                        if let Some(ref cf) = frame {
                            tracing::info!(
                                code = %cf.code,
                                reason = %cf.reason,
                                "event stream close frame received"
                            );
                        } else {
                            tracing::info!("event stream close frame received (no payload)");
                        }
                        return Ok(());
                    }
                    Some(Err(e)) => {
                        return Err(Error::StreamConnect(e.to_string()));
                    }
                    None => {
                        // Stream ended without a close frame
                        tracing::info!("event stream ended");
                        return Ok(());
                    }
                    _ => {
                        // Binary, Pong, Frame -- ignore
                    }
                }
            }
        }
    }
}

// ── Message decoding ─────────────────────────────────────────────────

/// Decode a text frame and broadcast the result. Malformed frames are
/// logged at debug and skipped; they never terminate the connection.
fn decode_and_broadcast(text: &str, messages: &broadcast::Sender<Arc<StreamMessage>>) {
    if let Some(message) = decode_message(text) {
        // Ignore send errors -- just means no active subscribers right now
        let _ = messages.send(Arc::new(message));
    }
}

/// Decode one inbound envelope into a [`StreamMessage`].
///
/// Typed deserialization is attempted first; on mismatch, fields are
/// pulled from the raw JSON with fallback defaults so a partially-formed
/// payload still yields a usable message.
fn decode_message(text: &str) -> Option<StreamMessage> {
    let envelope: WireEnvelope = match serde_json::from_str(text) {
        Ok(e) => e,
        Err(e) => {
            tracing::debug!(error = %e, "failed to decode event envelope");
            return None;
        }
    };

    let message = match envelope.kind.as_str() {
        "host_status" => StreamMessage::HostStatus(
            serde_json::from_value(envelope.data.clone())
                .unwrap_or_else(|_| host_status_from_raw(&envelope.data)),
        ),
        "activity_update" => StreamMessage::ActivityUpdate(
            serde_json::from_value(envelope.data).unwrap_or_default(),
        ),
        "metrics_update" => StreamMessage::MetricsUpdate(
            serde_json::from_value(envelope.data).unwrap_or_default(),
        ),
        "alert" => StreamMessage::Alert(
            match serde_json::from_value(envelope.data.clone()) {
                Ok(alert) => alert,
                Err(e) => {
                    tracing::debug!(error = %e, "alert payload incomplete, filling defaults");
                    alert_from_raw(&envelope.data, envelope.timestamp)
                }
            },
        ),
        other => StreamMessage::Unknown { kind: other.to_string() },
    };

    Some(message)
}

/// Build a [`HostStatusEvent`] from raw JSON when typed deserialization
/// fails.
fn host_status_from_raw(data: &serde_json::Value) -> HostStatusEvent {
    HostStatusEvent {
        host_id: data["hostId"].as_str().unwrap_or_default().to_string(),
        is_online: data["isOnline"].as_bool().unwrap_or(false),
        last_activity: data["lastActivity"]
            .as_str()
            .and_then(|s| s.parse().ok()),
        current_app: data["currentApp"].as_str().map(String::from),
    }
}

/// Build an [`ApiAlert`] from raw JSON when typed deserialization fails.
fn alert_from_raw(data: &serde_json::Value, envelope_ts: Option<DateTime<Utc>>) -> ApiAlert {
    ApiAlert {
        id: data["id"].as_str().unwrap_or_default().to_string(),
        kind: data["type"].as_str().unwrap_or_default().to_string(),
        severity: data["severity"].as_str().unwrap_or("low").to_string(),
        title: data["title"].as_str().unwrap_or_default().to_string(),
        message: data["message"].as_str().unwrap_or_default().to_string(),
        host_id: data["hostId"].as_str().map(String::from),
        group_id: data["groupId"].as_str().map(String::from),
        timestamp: data["timestamp"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .or(envelope_ts)
            .unwrap_or_else(Utc::now),
        is_read: data["isRead"].as_bool().unwrap_or(false),
        is_resolved: data["isResolved"].as_bool().unwrap_or(false),
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_host_status() {
        let raw = json!({
            "type": "host_status",
            "data": {
                "hostId": "h1",
                "isOnline": false,
                "lastActivity": "2026-03-01T12:00:00Z"
            },
            "timestamp": "2026-03-01T12:00:01Z"
        });

        let message = decode_message(&raw.to_string()).unwrap();
        let StreamMessage::HostStatus(event) = message else {
            panic!("expected HostStatus, got {message:?}");
        };
        assert_eq!(event.host_id, "h1");
        assert!(!event.is_online);
        assert!(event.last_activity.is_some());
    }

    #[test]
    fn decode_host_status_with_missing_fields() {
        let raw = json!({
            "type": "host_status",
            "data": { "hostId": "h2" }
        });

        let message = decode_message(&raw.to_string()).unwrap();
        let StreamMessage::HostStatus(event) = message else {
            panic!("expected HostStatus, got {message:?}");
        };
        assert_eq!(event.host_id, "h2");
        assert!(!event.is_online);
        assert!(event.last_activity.is_none());
    }

    #[test]
    fn decode_alert_fills_defaults_from_raw() {
        // Missing id and timestamp would fail typed deserialization;
        // the raw fallback fills defaults instead of dropping the alert.
        let raw = json!({
            "type": "alert",
            "data": {
                "severity": "critical",
                "title": "CPU pegged",
                "hostId": "h1"
            },
            "timestamp": "2026-03-01T09:30:00Z"
        });

        let message = decode_message(&raw.to_string()).unwrap();
        let StreamMessage::Alert(alert) = message else {
            panic!("expected Alert, got {message:?}");
        };
        assert_eq!(alert.severity, "critical");
        assert_eq!(alert.title, "CPU pegged");
        assert_eq!(alert.host_id.as_deref(), Some("h1"));
        assert_eq!(alert.timestamp.to_rfc3339(), "2026-03-01T09:30:00+00:00");
        assert!(!alert.is_read);
    }

    #[test]
    fn decode_unknown_kind() {
        let raw = json!({
            "type": "server_gossip",
            "data": { "anything": true }
        });

        let message = decode_message(&raw.to_string()).unwrap();
        assert!(matches!(
            message,
            StreamMessage::Unknown { ref kind } if kind == "server_gossip"
        ));
    }

    #[test]
    fn decode_malformed_frame_is_skipped() {
        assert!(decode_message("not json at all").is_none());
        assert!(decode_message("{\"data\": {}}").is_none()); // no type tag
    }

    #[test]
    fn decode_non_object_payload_does_not_panic() {
        let raw = json!({ "type": "host_status", "data": 42 });
        let message = decode_message(&raw.to_string()).unwrap();
        let StreamMessage::HostStatus(event) = message else {
            panic!("expected HostStatus, got {message:?}");
        };
        assert_eq!(event.host_id, "");
    }

    #[test]
    fn outbound_frame_shape() {
        let frame = OutboundFrame {
            kind: "subscribe_host",
            data: serde_json::Value::from("h1"),
        };
        let encoded = serde_json::to_value(&frame).unwrap();
        assert_eq!(encoded, json!({ "type": "subscribe_host", "data": "h1" }));
    }

    #[tokio::test]
    async fn subscribe_while_disconnected_drops_silently() {
        let client = EventStreamClient::new(
            Url::parse("ws://127.0.0.1:9/events").unwrap(),
            RetryPolicy::default(),
        );

        // No connection -- must not panic, must not queue.
        client.subscribe_to_host("h1");
        client.emit("custom", json!({ "x": 1 }));
        assert_eq!(client.state(), ConnectionState::Disconnected);
    }
}
