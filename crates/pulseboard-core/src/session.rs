// ── Session facade ──
//
// Full lifecycle management for one backend session: authentication,
// initial data load, the event-stream bridge tasks, and the persistence
// writer. Consumers read and mutate through the store; async work funnels
// through here.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use pulseboard_api::stream::StreamStatus;
use pulseboard_api::transport::{TlsMode, TransportConfig};
use pulseboard_api::{ApiClient, ConnectionState, EventStreamClient, RetryPolicy, StreamMessage};

use crate::config::{SessionConfig, TlsVerification};
use crate::error::CoreError;
use crate::model::{Alert, AlertPatch, Host, HostGroup};
use crate::store::{DashboardStore, PersistedState};
use crate::sync::apply_stream_message;

/// Alerts pulled in with each full refresh; older pages stay on demand.
const ALERT_PAGE_SIZE: u32 = 50;

// ── DashboardSession ─────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<SessionInner>`. Owns the API client, the
/// event-stream client, and the store; wires stream events and status
/// notices into store mutations.
#[derive(Clone)]
pub struct DashboardSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    config: SessionConfig,
    store: Arc<DashboardStore>,
    api: ApiClient,
    stream: EventStreamClient,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl DashboardSession {
    /// Create a session from configuration, rehydrating the store from a
    /// previously saved [`PersistedState`]. Does NOT connect -- call
    /// [`connect()`](Self::connect) to authenticate and start background
    /// tasks.
    pub fn new(config: SessionConfig, persisted: PersistedState) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let api = ApiClient::new(config.url.clone(), config.credential.clone(), &transport)?;

        let stream_url = config.stream_url().map_err(|e| CoreError::Config {
            message: format!("cannot derive event stream URL: {e}"),
        })?;
        let stream = EventStreamClient::new(stream_url, RetryPolicy::default());

        Ok(Self {
            inner: Arc::new(SessionInner {
                config,
                store: Arc::new(DashboardStore::with_persisted(persisted)),
                api,
                stream,
                cancel: CancellationToken::new(),
                task_handles: Mutex::new(Vec::new()),
            }),
        })
    }

    /// Access the session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// Access the central store.
    pub fn store(&self) -> &Arc<DashboardStore> {
        &self.inner.store
    }

    /// Access the REST client directly (for display-only data that never
    /// lands in the store: metrics, analytics, activity history).
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Access the event-stream client (for per-host/group subscriptions).
    pub fn stream(&self) -> &EventStreamClient {
        &self.inner.stream
    }

    /// Subscribe to event-stream connection status changes.
    pub fn connection_status(&self) -> watch::Receiver<StreamStatus> {
        self.inner.stream.status()
    }

    // ── Connection lifecycle ─────────────────────────────────────

    /// Connect to the backend.
    ///
    /// Resolves the credential to a user, performs the initial data
    /// refresh, starts the event stream, and spawns the bridge tasks
    /// (message pump, status bridge, optional periodic refresh).
    pub async fn connect(&self) -> Result<(), CoreError> {
        self.inner.store.set_loading(true);
        self.inner.store.set_error(None);

        let result = self.connect_inner().await;
        self.inner.store.set_loading(false);
        result
    }

    async fn connect_inner(&self) -> Result<(), CoreError> {
        let user = self.check_auth(self.inner.api.current_user().await)?;
        self.inner.store.set_user(Some(user.into()));
        debug!("authenticated");

        self.full_refresh().await?;

        let mut handles = self
            .inner
            .task_handles
            .lock()
            .unwrap_or_else(|e| e.into_inner());

        if self.inner.config.stream_enabled {
            self.inner
                .stream
                .connect(self.inner.config.credential.clone());

            let store = Arc::clone(&self.inner.store);
            let rx = self.inner.stream.subscribe();
            handles.push(tokio::spawn(stream_pump_task(
                store,
                rx,
                self.inner.cancel.clone(),
            )));

            let store = Arc::clone(&self.inner.store);
            let status_rx = self.inner.stream.status();
            handles.push(tokio::spawn(status_bridge_task(
                store,
                status_rx,
                self.inner.cancel.clone(),
            )));
        }

        let interval_secs = self.inner.config.refresh_interval_secs;
        if interval_secs > 0 {
            let session = self.clone();
            let cancel = self.inner.cancel.clone();
            handles.push(tokio::spawn(refresh_task(session, interval_secs, cancel)));
        }

        info!("session connected");
        Ok(())
    }

    /// Disconnect from the backend.
    ///
    /// Cancels background tasks and tears down the event stream,
    /// including any pending reconnect timer.
    pub async fn disconnect(&self) {
        self.inner.cancel.cancel();

        let handles: Vec<JoinHandle<()>> = {
            let mut guard = self
                .inner
                .task_handles
                .lock()
                .unwrap_or_else(|e| e.into_inner());
            guard.drain(..).collect()
        };
        for handle in handles {
            let _ = handle.await;
        }

        self.inner.stream.disconnect();
        debug!("session disconnected");
    }

    /// Fetch hosts, groups, and the first page of alerts from the backend
    /// and replace the store collections. Concurrently arriving stream
    /// events interleave with this on a last-write-wins basis.
    pub async fn full_refresh(&self) -> Result<(), CoreError> {
        let api = &self.inner.api;
        let (hosts_res, groups_res, alerts_res) = tokio::join!(
            api.list_hosts(),
            api.list_groups(),
            api.list_alerts(1, ALERT_PAGE_SIZE),
        );

        let hosts: Vec<Host> = self
            .check_auth(hosts_res)?
            .into_iter()
            .map(Host::from)
            .collect();
        let groups: Vec<HostGroup> = self
            .check_auth(groups_res)?
            .into_iter()
            .map(HostGroup::from)
            .collect();
        let alerts: Vec<Alert> = self
            .check_auth(alerts_res)?
            .items
            .into_iter()
            .map(Alert::from)
            .collect();

        self.inner.store.set_hosts(hosts);
        self.inner.store.set_host_groups(groups);
        self.inner.store.set_alerts(alerts);

        debug!(
            hosts = self.inner.store.hosts().len(),
            groups = self.inner.store.host_groups().len(),
            alerts = self.inner.store.alerts().len(),
            "data refresh complete"
        );
        Ok(())
    }

    // ── One-shot convenience ─────────────────────────────────────

    /// One-shot: connect, run closure, disconnect.
    ///
    /// Optimized for CLI use: disables the event stream and periodic
    /// refresh since only a single request-response cycle is needed.
    pub async fn oneshot<F, Fut, T>(config: SessionConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(DashboardSession) -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let mut cfg = config;
        cfg.stream_enabled = false;
        cfg.refresh_interval_secs = 0;

        let session = DashboardSession::new(cfg, PersistedState::default())?;
        session.connect().await?;
        let result = f(session.clone()).await;
        session.disconnect().await;
        result
    }

    // ── Write-through actions ────────────────────────────────────
    //
    // Backend call first, then the matching store mutation, so the
    // local view converges even if a push for the same change never
    // arrives.

    /// Mark an alert read on the backend and in the store.
    pub async fn mark_alert_read(&self, alert_id: &str) -> Result<(), CoreError> {
        self.check_auth(self.inner.api.mark_alert_read(alert_id).await)?;
        self.inner.store.mark_alert_read(alert_id);
        Ok(())
    }

    /// Mark every alert read on the backend and in the store.
    pub async fn mark_all_alerts_read(&self) -> Result<(), CoreError> {
        self.check_auth(self.inner.api.mark_all_alerts_read().await)?;
        self.inner.store.mark_all_alerts_read();
        Ok(())
    }

    /// Resolve an alert on the backend and in the store.
    pub async fn resolve_alert(&self, alert_id: &str) -> Result<(), CoreError> {
        self.check_auth(self.inner.api.resolve_alert(alert_id).await)?;
        self.inner.store.update_alert(
            alert_id,
            &AlertPatch {
                is_resolved: Some(true),
                ..AlertPatch::default()
            },
        );
        Ok(())
    }

    // ── Persistence ──────────────────────────────────────────────

    /// Spawn the writer that flushes the durable subset on every change.
    ///
    /// The `save` closure owns the actual storage (the config crate's
    /// UI-state file in the CLI). Stops with the session.
    pub fn spawn_persistence<F>(&self, mut save: F)
    where
        F: FnMut(&PersistedState) + Send + 'static,
    {
        let mut rx = self.inner.store.subscribe_persisted();
        let cancel = self.inner.cancel.clone();

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    changed = rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let state = rx.borrow_and_update().clone();
                        save(&state);
                    }
                }
            }
        });

        self.inner
            .task_handles
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(handle);
    }

    // ── Helpers ──────────────────────────────────────────────────

    /// Unwrap an API result, translating credential expiry into session
    /// teardown: the user is cleared and the stream stopped. Auth expiry
    /// is never surfaced through the store's error field.
    fn check_auth<T>(&self, result: Result<T, pulseboard_api::Error>) -> Result<T, CoreError> {
        match result {
            Ok(value) => Ok(value),
            Err(err) => {
                if err.is_auth_expired() {
                    warn!("credential rejected, clearing session");
                    self.inner.store.set_user(None);
                    self.inner.stream.disconnect();
                }
                Err(err.into())
            }
        }
    }
}

// ── Background tasks ─────────────────────────────────────────────

/// Pump decoded stream messages into store mutations.
async fn stream_pump_task(
    store: Arc<DashboardStore>,
    mut rx: broadcast::Receiver<Arc<StreamMessage>>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            message = rx.recv() => {
                match message {
                    Ok(message) => apply_stream_message(&store, &message),
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        warn!(missed, "stream consumer lagged, messages dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }
}

/// Copy stream status notices into the store's error field: transient
/// while retrying, persistent after exhaustion, cleared on connect.
async fn status_bridge_task(
    store: Arc<DashboardStore>,
    mut status_rx: watch::Receiver<StreamStatus>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            changed = status_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let status = status_rx.borrow_and_update().clone();
                match status.state {
                    ConnectionState::Connected => store.set_error(None),
                    _ => {
                        if let Some(notice) = status.notice {
                            store.set_error(Some(notice));
                        }
                    }
                }
            }
        }
    }
}

/// Periodically refresh data from the backend.
async fn refresh_task(session: DashboardSession, interval_secs: u64, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                if let Err(e) = session.full_refresh().await {
                    warn!(error = %e, "periodic refresh failed");
                }
            }
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────

/// Build a [`TransportConfig`] from the session configuration.
fn build_transport(config: &SessionConfig) -> TransportConfig {
    TransportConfig {
        tls: match &config.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        },
        timeout: config.timeout,
    }
}
