// `pulseboard metrics` -- per-host productivity summary.

use owo_colors::OwoColorize;
use tabled::Tabled;

use pulseboard_api::models::TimeRange;
use pulseboard_core::{CoreError, DashboardSession, SessionConfig};

use crate::cli::MetricsArgs;
use crate::error::CliError;
use crate::output::{self, fmt_duration};

#[derive(Tabled)]
struct AppRow {
    #[tabled(rename = "Application")]
    name: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Sessions")]
    sessions: u32,
}

pub async fn handle(args: MetricsArgs, config: SessionConfig) -> Result<(), CliError> {
    let range = TimeRange::last_hours(args.hours);
    let host_id = args.host_id.clone();

    let metrics = DashboardSession::oneshot(config, move |session| async move {
        session
            .api()
            .host_metrics(&host_id, &range)
            .await
            .map_err(CoreError::from)
    })
    .await?;

    println!(
        "{} -- last {}h",
        metrics.host_id.bold(),
        args.hours
    );
    println!(
        "  active {}  idle {}  afk {}",
        fmt_duration(metrics.metrics.active_time),
        fmt_duration(metrics.metrics.idle_time),
        fmt_duration(metrics.metrics.afk_time),
    );
    println!(
        "  productive {}  neutral {}  distracting {}",
        fmt_duration(metrics.metrics.productive_time).green(),
        fmt_duration(metrics.metrics.neutral_time),
        fmt_duration(metrics.metrics.distracting_time).red(),
    );
    println!(
        "  productivity score: {:.0}/100",
        metrics.metrics.productivity_score
    );

    if !metrics.applications.is_empty() {
        println!();
        let rows: Vec<AppRow> = metrics
            .applications
            .iter()
            .take(10)
            .map(|app| AppRow {
                name: app.name.clone(),
                time: fmt_duration(app.time),
                category: app.category.clone(),
                sessions: app.sessions,
            })
            .collect();
        output::print_table(rows);
    }

    Ok(())
}
