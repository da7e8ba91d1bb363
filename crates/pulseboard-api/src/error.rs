use thiserror::Error;

/// Top-level error type for the `pulseboard-api` crate.
///
/// Covers every failure mode across both API surfaces: REST transport,
/// backend envelope errors, and the real-time event stream.
/// `pulseboard-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The backend rejected the bearer credential (HTTP 401).
    ///
    /// Recovery is credential clearing plus a return to the login
    /// surface -- this is never surfaced as a store error.
    #[error("Credential rejected -- re-authentication required")]
    AuthExpired,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Backend envelope ────────────────────────────────────────────
    /// The backend returned `success: false` or a non-2xx status with
    /// a structured message.
    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    // ── Event stream ────────────────────────────────────────────────
    /// Event-stream connection (handshake) failed.
    #[error("Event stream connection failed: {0}")]
    StreamConnect(String),

    /// Event stream closed unexpectedly.
    #[error("Event stream closed (code {code}): {reason}")]
    StreamClosed { code: u16, reason: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error indicates the credential has expired
    /// and re-authentication might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired)
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } | Self::StreamConnect(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: Some(404), .. } => true,
            _ => false,
        }
    }
}
