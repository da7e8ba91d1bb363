// Profile resolution with CLI flag overrides.
//
// Precedence per setting: CLI flag > profile value > global default.

use std::time::Duration;

use secrecy::SecretString;

use pulseboard_config as cfg;
use pulseboard_core::SessionConfig;
use pulseboard_core::config::TlsVerification;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Build a `SessionConfig` from the config file, active profile, and CLI
/// overrides.
pub fn build_session_config(global: &GlobalOpts) -> Result<SessionConfig, CliError> {
    let config = cfg::load_config_or_default();
    let profile_name = cfg::active_profile_name(global.profile.as_deref(), &config);

    let mut session = if let Some(profile) = config.profiles.get(&profile_name) {
        cfg::profile_to_session_config(profile, &profile_name, &config.defaults)?
    } else {
        // No profile on disk -- flags and env vars must carry everything.
        from_flags_only(global, &profile_name)?
    };

    if let Some(ref server) = global.server {
        session.url = parse_url(server)?;
    }
    if let Some(ref token) = global.token {
        session.credential = SecretString::from(token.clone());
    }
    if global.insecure {
        session.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(timeout) = global.timeout {
        session.timeout = Duration::from_secs(timeout);
    }

    Ok(session)
}

fn from_flags_only(global: &GlobalOpts, profile_name: &str) -> Result<SessionConfig, CliError> {
    let server = global.server.as_deref().ok_or_else(|| CliError::NoConfig {
        path: cfg::config_path().display().to_string(),
    })?;

    let token = global
        .token
        .clone()
        .ok_or_else(|| CliError::NoCredentials {
            profile: profile_name.to_string(),
        })?;

    Ok(SessionConfig {
        url: parse_url(server)?,
        credential: SecretString::from(token),
        ..SessionConfig::default()
    })
}

fn parse_url(raw: &str) -> Result<url::Url, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {raw}"),
    })
}
