// `pulseboard hosts` -- host inventory listing.

use pulseboard_core::{DashboardSession, SessionConfig};

use crate::cli::HostsArgs;
use crate::error::CliError;
use crate::output::{self, HostRow};

pub async fn handle(args: HostsArgs, config: SessionConfig) -> Result<(), CliError> {
    let hosts = DashboardSession::oneshot(config, |session| async move {
        Ok(session.store().hosts())
    })
    .await?;

    let rows: Vec<HostRow> = hosts
        .iter()
        .filter(|host| !args.online || host.is_online)
        .map(HostRow::from)
        .collect();

    if rows.is_empty() {
        println!("No hosts.");
        return Ok(());
    }

    let online = hosts.iter().filter(|h| h.is_online).count();
    output::print_table(rows);
    println!("{online} of {} hosts online", hosts.len());
    Ok(())
}
