// `pulseboard groups` -- host group listing.

use pulseboard_core::{DashboardSession, SessionConfig};

use crate::error::CliError;
use crate::output::{self, GroupRow};

pub async fn handle(config: SessionConfig) -> Result<(), CliError> {
    let groups = DashboardSession::oneshot(config, |session| async move {
        Ok(session.store().host_groups())
    })
    .await?;

    if groups.is_empty() {
        println!("No groups.");
        return Ok(());
    }

    output::print_table(groups.iter().map(GroupRow::from).collect());
    Ok(())
}
