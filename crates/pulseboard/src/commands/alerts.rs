// `pulseboard alerts` -- alert listing and acknowledgment.

use pulseboard_core::{Alert, CoreError, DashboardSession, SessionConfig};

use crate::cli::{AlertsAction, AlertsArgs};
use crate::error::CliError;
use crate::output::{self, AlertRow};

pub async fn handle(args: AlertsArgs, config: SessionConfig) -> Result<(), CliError> {
    match args.action {
        Some(AlertsAction::Read { id }) => {
            let done_id = id.clone();
            DashboardSession::oneshot(config, move |session| async move {
                session.mark_alert_read(&id).await
            })
            .await?;
            println!("Alert {done_id} marked read.");
            Ok(())
        }

        Some(AlertsAction::ReadAll) => {
            DashboardSession::oneshot(config, |session| async move {
                session.mark_all_alerts_read().await
            })
            .await?;
            println!("All alerts marked read.");
            Ok(())
        }

        Some(AlertsAction::Resolve { id }) => {
            let done_id = id.clone();
            DashboardSession::oneshot(config, move |session| async move {
                session.resolve_alert(&id).await
            })
            .await?;
            println!("Alert {done_id} resolved.");
            Ok(())
        }

        None => list(args.unread, config).await,
    }
}

async fn list(unread_only: bool, config: SessionConfig) -> Result<(), CliError> {
    let page = DashboardSession::oneshot(config, |session| async move {
        session
            .api()
            .list_alerts(1, 50)
            .await
            .map_err(CoreError::from)
    })
    .await?;

    let alerts: Vec<Alert> = page.items.into_iter().map(Alert::from).collect();
    let rows: Vec<AlertRow> = alerts
        .iter()
        .filter(|alert| !unread_only || !alert.is_read)
        .map(AlertRow::from)
        .collect();

    if rows.is_empty() {
        println!("No alerts.");
        return Ok(());
    }

    let shown = rows.len();
    output::print_table(rows);
    println!("{shown} shown, {} total", page.pagination.total);
    Ok(())
}
