//! Command-line interface definition.

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "pulseboard",
    version,
    about = "Client for the Pulseboard activity-monitoring dashboard",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config profile to use.
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Backend base URL (overrides the profile).
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Bearer token (overrides the profile).
    #[arg(long, global = true, env = "PULSEBOARD_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Skip TLS certificate verification.
    #[arg(short = 'k', long, global = true)]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List monitored hosts.
    Hosts(HostsArgs),

    /// List host groups.
    Groups,

    /// List and acknowledge alerts.
    Alerts(AlertsArgs),

    /// Show productivity metrics for one host.
    Metrics(MetricsArgs),

    /// Connect and tail live events until Ctrl-C.
    Watch,

    /// Manage configuration.
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct HostsArgs {
    /// Only hosts currently online.
    #[arg(long)]
    pub online: bool,
}

#[derive(Debug, Args)]
pub struct AlertsArgs {
    #[command(subcommand)]
    pub action: Option<AlertsAction>,

    /// Only unread alerts (list mode).
    #[arg(long)]
    pub unread: bool,
}

#[derive(Debug, Subcommand)]
pub enum AlertsAction {
    /// Mark one alert read.
    Read { id: String },

    /// Mark every alert read.
    ReadAll,

    /// Resolve an alert.
    Resolve { id: String },
}

#[derive(Debug, Args)]
pub struct MetricsArgs {
    /// Host id.
    pub host_id: String,

    /// Look-back window in hours.
    #[arg(long, default_value_t = 24)]
    pub hours: i64,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the resolved config file path.
    Path,

    /// Show the loaded configuration (tokens redacted).
    Show,

    /// Write a starter config file.
    Init,
}
