// `pulseboard watch` -- connect a full session and tail live events.
//
// Unlike the one-shot commands this keeps the event stream and the
// persistence writer running until Ctrl-C, exercising the complete
// reactive path: stream -> store -> subscriber.

use owo_colors::OwoColorize;
use tokio::sync::broadcast::error::RecvError;

use pulseboard_api::StreamMessage;
use pulseboard_config as cfg;
use pulseboard_core::{Alert, DashboardSession, SessionConfig};

use crate::error::CliError;
use crate::output;

pub async fn handle(mut config: SessionConfig) -> Result<(), CliError> {
    config.stream_enabled = true;

    let session = DashboardSession::new(config, cfg::load_ui_state())?;
    session.spawn_persistence(|state| {
        if let Err(e) = cfg::save_ui_state(state) {
            tracing::warn!(error = %e, "failed to save UI state");
        }
    });

    session.connect().await?;

    let store = session.store();
    println!(
        "Connected. {} hosts, {} groups. Watching for events, Ctrl-C to stop.",
        store.hosts().len(),
        store.host_groups().len()
    );

    let mut messages = session.stream().subscribe();
    let mut status = session.connection_status();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = status.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = status.borrow_and_update().clone();
                if let Some(notice) = current.notice {
                    eprintln!("{}", notice.yellow());
                }
            }
            message = messages.recv() => {
                match message {
                    Ok(message) => print_message(&message),
                    Err(RecvError::Lagged(missed)) => {
                        eprintln!("{}", format!("({missed} events dropped)").dimmed());
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }

    println!("Stopping.");
    session.disconnect().await;
    Ok(())
}

fn print_message(message: &StreamMessage) {
    let now = chrono::Utc::now().format("%H:%M:%S");
    match message {
        StreamMessage::HostStatus(event) => {
            let status = if event.is_online {
                "online".green().to_string()
            } else {
                "offline".red().to_string()
            };
            println!("{now}  host {} is {status}", event.host_id.bold());
        }
        StreamMessage::ActivityUpdate(event) => {
            println!("{now}  activity on {}", event.host_id);
        }
        StreamMessage::MetricsUpdate(event) => {
            let scope = event
                .host_id
                .as_deref()
                .or(event.group_id.as_deref())
                .unwrap_or("all");
            println!("{now}  metrics update for {scope}");
        }
        StreamMessage::Alert(alert) => {
            let alert = Alert::from(alert.clone());
            println!(
                "{now}  {} {} {}",
                output::severity_cell(alert.severity),
                alert.title.bold(),
                alert.host_id.as_deref().unwrap_or_default()
            );
        }
        StreamMessage::Unknown { .. } => {}
    }
}
