//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use pulseboard_config::ConfigError;
use pulseboard_core::CoreError;

/// Exit codes for scripting.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach backend at {url}")]
    #[diagnostic(
        code(pulseboard::connection_failed),
        help(
            "Check that the backend is running and accessible.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Backend request timed out")]
    #[diagnostic(
        code(pulseboard::timeout),
        help("Increase --timeout or check the network path to the backend.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(pulseboard::auth_failed),
        help(
            "The backend rejected your token.\n\
             Provide a fresh one via --token or the PULSEBOARD_TOKEN environment variable."
        )
    )]
    AuthFailed,

    #[error("No credential configured for profile '{profile}'")]
    #[diagnostic(
        code(pulseboard::no_credentials),
        help(
            "Set token or token_env in your profile, or pass --token.\n\
             Run: pulseboard config init"
        )
    )]
    NoCredentials { profile: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("No configuration found")]
    #[diagnostic(
        code(pulseboard::no_config),
        help(
            "Create a config with: pulseboard config init\n\
             Expected at: {path}\n\
             Or pass --server and --token directly."
        )
    )]
    NoConfig { path: String },

    #[error("Invalid {field}: {reason}")]
    #[diagnostic(code(pulseboard::validation))]
    Validation { field: String, reason: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(code(pulseboard::not_found))]
    NotFound {
        resource_type: String,
        identifier: String,
    },

    // ── Everything else ──────────────────────────────────────────────
    #[error("Backend error: {message}")]
    #[diagnostic(code(pulseboard::api_error))]
    Api { message: String },

    #[error("{message}")]
    #[diagnostic(code(pulseboard::config_error))]
    Config { message: String },

    #[error(transparent)]
    #[diagnostic(code(pulseboard::io_error))]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::NoConfig { .. } | Self::Validation { .. } | Self::Config { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::AuthenticationFailed { .. } => Self::AuthFailed,
            CoreError::Timeout { .. } => Self::Timeout,
            CoreError::HostNotFound { identifier } => Self::NotFound {
                resource_type: "Host".into(),
                identifier,
            },
            CoreError::GroupNotFound { identifier } => Self::NotFound {
                resource_type: "Group".into(),
                identifier,
            },
            CoreError::NotFound {
                entity_type,
                identifier,
            } => Self::NotFound {
                resource_type: entity_type,
                identifier,
            },
            CoreError::Api { message, .. } => Self::Api { message },
            CoreError::Config { message } => Self::Config { message },
            CoreError::Disconnected => Self::ConnectionFailed {
                url: String::new(),
                reason: "not connected".into(),
            },
            CoreError::Internal(message) => Self::Api { message },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config {
                message: other.to_string(),
            },
        }
    }
}
