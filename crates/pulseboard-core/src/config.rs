// ── Runtime connection configuration ──
//
// Describes *how* to reach a Pulseboard backend. Carries the credential and
// connection tuning, but never touches disk -- the CLI constructs a
// `SessionConfig` from its config layer and hands it in.

use secrecy::SecretString;
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict). Default.
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-hosted backends with self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for one backend session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Backend base URL (e.g. `https://dash.example.com`).
    pub url: Url,
    /// Bearer credential used for both REST and the event stream.
    pub credential: SecretString,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: std::time::Duration,
    /// How often to perform a full refresh (seconds). 0 = never.
    pub refresh_interval_secs: u64,
    /// Enable the real-time event stream.
    pub stream_enabled: bool,
}

impl SessionConfig {
    /// Derive the event-channel URL from the backend base URL:
    /// the scheme flips to ws(s) and the path becomes `/events`.
    pub fn stream_url(&self) -> Result<Url, url::ParseError> {
        let mut ws = self.url.clone();
        let scheme = if self.url.scheme() == "https" { "wss" } else { "ws" };
        // set_scheme only rejects invalid transitions; ws/wss from http/https is fine.
        let _ = ws.set_scheme(scheme);
        ws.join("/events")
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:5600".parse().expect("default URL is valid"),
            credential: SecretString::from(String::new()),
            tls: TlsVerification::default(),
            timeout: std::time::Duration::from_secs(10),
            refresh_interval_secs: 300,
            stream_enabled: true,
        }
    }
}
