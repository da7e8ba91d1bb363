// Command handlers.

pub mod alerts;
pub mod config_cmd;
pub mod groups;
pub mod hosts;
pub mod metrics;
pub mod watch;

use pulseboard_core::SessionConfig;

use crate::cli::Command;
use crate::error::CliError;

pub async fn dispatch(cmd: Command, config: SessionConfig) -> Result<(), CliError> {
    match cmd {
        Command::Hosts(args) => hosts::handle(args, config).await,
        Command::Groups => groups::handle(config).await,
        Command::Alerts(args) => alerts::handle(args, config).await,
        Command::Metrics(args) => metrics::handle(args, config).await,
        Command::Watch => watch::handle(config).await,
        // Handled in main before a session config is built.
        Command::Config(_) => Ok(()),
    }
}
