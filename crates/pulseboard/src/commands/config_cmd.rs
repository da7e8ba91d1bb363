// `pulseboard config` -- config file management.

use std::collections::HashMap;

use pulseboard_config as cfg;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;

pub fn handle(args: ConfigArgs) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Path => {
            println!("{}", cfg::config_path().display());
            Ok(())
        }

        ConfigAction::Show => {
            let config = cfg::load_config_or_default();
            print!("{}", format_config_redacted(&config));
            Ok(())
        }

        ConfigAction::Init => init(),
    }
}

fn init() -> Result<(), CliError> {
    let path = cfg::config_path();
    if path.exists() {
        return Err(CliError::Validation {
            field: "config".into(),
            reason: format!("{} already exists", path.display()),
        });
    }

    let mut profiles = HashMap::new();
    profiles.insert(
        "default".to_string(),
        cfg::Profile {
            server: "http://localhost:5600".into(),
            token_env: Some("PULSEBOARD_TOKEN".into()),
            ..cfg::Profile::default()
        },
    );

    let config = cfg::Config {
        default_profile: Some("default".into()),
        profiles,
        ..cfg::Config::default()
    };
    cfg::save_config(&config)?;

    eprintln!("Configuration written to {}", path.display());
    eprintln!("  Set your token: export PULSEBOARD_TOKEN=...");
    eprintln!("  Test it: pulseboard hosts");
    Ok(())
}

/// Format config for display, masking sensitive fields.
fn format_config_redacted(config: &cfg::Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = config.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "insecure = {}", config.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", config.defaults.timeout);

    let mut names: Vec<_> = config.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &config.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "server = \"{}\"", p.server);
        if p.token.is_some() {
            let _ = writeln!(out, "token = \"****\"");
        }
        if let Some(ref env) = p.token_env {
            let _ = writeln!(out, "token_env = \"{env}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        if let Some(refresh) = p.refresh_interval {
            let _ = writeln!(out, "refresh_interval = {refresh}");
        }
        if let Some(stream) = p.stream {
            let _ = writeln!(out, "stream = {stream}");
        }
    }

    out
}
