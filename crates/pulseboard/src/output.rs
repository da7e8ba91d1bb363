// Table rendering and formatting helpers for list commands.

use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use pulseboard_core::{Alert, AlertSeverity, Host, HostGroup};

pub fn print_table<R: Tabled>(rows: Vec<R>) {
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{table}");
}

// ── Hosts ────────────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct HostRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Hostname")]
    pub hostname: String,
    #[tabled(rename = "Platform")]
    pub platform: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Last seen")]
    pub last_seen: String,
}

impl From<&Host> for HostRow {
    fn from(host: &Host) -> Self {
        Self {
            id: host.id.clone(),
            name: host.name.clone(),
            hostname: host.hostname.clone(),
            platform: host.platform.to_string(),
            status: if host.is_online {
                "online".green().to_string()
            } else {
                "offline".red().to_string()
            },
            last_seen: host.last_seen.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

// ── Groups ───────────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct GroupRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Hosts")]
    pub hosts: usize,
    #[tabled(rename = "Description")]
    pub description: String,
}

impl From<&HostGroup> for GroupRow {
    fn from(group: &HostGroup) -> Self {
        Self {
            id: group.id.clone(),
            name: group.name.clone(),
            hosts: group.hosts.len(),
            description: group.description.clone(),
        }
    }
}

// ── Alerts ───────────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct AlertRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Severity")]
    pub severity: String,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Host")]
    pub host: String,
    #[tabled(rename = "When")]
    pub when: String,
    #[tabled(rename = "Read")]
    pub read: String,
}

impl From<&Alert> for AlertRow {
    fn from(alert: &Alert) -> Self {
        Self {
            id: alert.id.clone(),
            severity: severity_cell(alert.severity),
            title: alert.title.clone(),
            host: alert.host_id.clone().unwrap_or_default(),
            when: alert.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            read: if alert.is_read { "yes".into() } else { "no".bold().to_string() },
        }
    }
}

pub fn severity_cell(severity: AlertSeverity) -> String {
    let label = severity.to_string();
    match severity {
        AlertSeverity::Low => label.dimmed().to_string(),
        AlertSeverity::Medium => label.yellow().to_string(),
        AlertSeverity::High => label.truecolor(255, 140, 0).to_string(),
        AlertSeverity::Critical => label.red().bold().to_string(),
    }
}

// ── Durations ────────────────────────────────────────────────────────

/// Render seconds as `"3h 24m"` / `"18m"` / `"45s"`.
pub fn fmt_duration(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes:02}m")
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        format!("{secs}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_formatting() {
        assert_eq!(fmt_duration(45), "45s");
        assert_eq!(fmt_duration(18 * 60), "18m");
        assert_eq!(fmt_duration(3 * 3600 + 24 * 60), "3h 24m");
    }
}
