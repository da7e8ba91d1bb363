// ── API-to-domain type conversions ──
//
// Bridges raw `pulseboard_api` wire types into canonical
// `pulseboard_core::model` domain types. Each `From` impl parses string
// tags into strong enums and fills defaults for missing optional data;
// unrecognized tags degrade to fallback variants rather than erroring.

use std::str::FromStr;

use pulseboard_api::models::{
    ApiAlert, ApiGroupSettings, ApiHost, ApiHostGroup, ApiUser, ApiUserPreferences,
};

use crate::model::{
    Alert, AlertKind, AlertSeverity, AlertToggles, GroupSettings, Host, HostGroup,
    NotificationPreferences, Platform, ProductivityCategories, Role, Theme, TimeFormat, User,
    UserPreferences, WorkingHours,
};

// ── Helpers ──────────────────────────────────────────────────────────

fn parse_platform(raw: &str) -> Platform {
    Platform::from_str(raw).unwrap_or(Platform::Unknown)
}

fn parse_severity(raw: &str) -> AlertSeverity {
    AlertSeverity::from_str(raw).unwrap_or(AlertSeverity::Low)
}

fn parse_kind(raw: &str) -> AlertKind {
    AlertKind::from_str(raw).unwrap_or(AlertKind::Unknown)
}

fn parse_role(raw: &str) -> Role {
    Role::from_str(raw).unwrap_or(Role::Viewer)
}

fn parse_time_format(raw: &str) -> TimeFormat {
    match raw {
        "12h" => TimeFormat::Hour12,
        _ => TimeFormat::Hour24,
    }
}

// ── Host ─────────────────────────────────────────────────────────────

impl From<ApiHost> for Host {
    fn from(h: ApiHost) -> Self {
        Self {
            id: h.id,
            name: h.name,
            hostname: h.hostname,
            platform: parse_platform(&h.platform),
            last_seen: h.last_seen,
            is_online: h.is_online,
            version: h.version,
            timezone: h.timezone,
            group_id: h.group_id,
            metadata: h.metadata,
        }
    }
}

// ── Host group ───────────────────────────────────────────────────────

impl From<ApiGroupSettings> for GroupSettings {
    fn from(s: ApiGroupSettings) -> Self {
        Self {
            working_hours: WorkingHours {
                start: s.working_hours.start,
                end: s.working_hours.end,
                timezone: s.working_hours.timezone,
                workdays: s.working_hours.workdays,
            },
            productivity_categories: ProductivityCategories {
                productive: s.productivity_categories.productive,
                neutral: s.productivity_categories.neutral,
                distracting: s.productivity_categories.distracting,
            },
            alerts: AlertToggles {
                overtime: s.alerts.overtime,
                downtime: s.alerts.downtime,
                low_activity: s.alerts.low_activity,
            },
        }
    }
}

impl From<ApiHostGroup> for HostGroup {
    fn from(g: ApiHostGroup) -> Self {
        Self {
            id: g.id,
            name: g.name,
            description: g.description,
            color: g.color,
            hosts: g.hosts,
            created_at: g.created_at,
            updated_at: g.updated_at,
            settings: g.settings.into(),
        }
    }
}

// ── Alert ────────────────────────────────────────────────────────────

impl From<ApiAlert> for Alert {
    fn from(a: ApiAlert) -> Self {
        Self {
            id: a.id,
            kind: parse_kind(&a.kind),
            severity: parse_severity(&a.severity),
            title: a.title,
            message: a.message,
            host_id: a.host_id,
            group_id: a.group_id,
            timestamp: a.timestamp,
            is_read: a.is_read,
            is_resolved: a.is_resolved,
        }
    }
}

// ── User ─────────────────────────────────────────────────────────────

impl From<ApiUserPreferences> for UserPreferences {
    fn from(p: ApiUserPreferences) -> Self {
        Self {
            theme: Theme::from_str(&p.theme).unwrap_or_default(),
            timezone: p.timezone,
            date_format: p.date_format,
            time_format: parse_time_format(&p.time_format),
            default_time_range: p.default_time_range,
            notifications: NotificationPreferences {
                email: p.notifications.email,
                browser: p.notifications.browser,
                alerts: p.notifications.alerts,
            },
        }
    }
}

impl From<ApiUser> for User {
    fn from(u: ApiUser) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: parse_role(&u.role),
            permissions: u.permissions,
            preferences: u.preferences.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn host_platform_parses_with_unknown_fallback() {
        let api_host = ApiHost {
            id: "h1".into(),
            name: "box".into(),
            hostname: "box.local".into(),
            platform: "macos".into(),
            last_seen: Utc::now(),
            is_online: true,
            version: "1.0".into(),
            timezone: "UTC".into(),
            group_id: None,
            metadata: None,
        };
        let host = Host::from(api_host.clone());
        assert_eq!(host.platform, Platform::Macos);

        let weird = ApiHost {
            platform: "beos".into(),
            ..api_host
        };
        assert_eq!(Host::from(weird).platform, Platform::Unknown);
    }

    #[test]
    fn alert_tags_degrade_to_fallbacks() {
        let api_alert = ApiAlert {
            id: "a1".into(),
            kind: "something_new".into(),
            severity: "catastrophic".into(),
            title: String::new(),
            message: String::new(),
            host_id: None,
            group_id: None,
            timestamp: Utc::now(),
            is_read: false,
            is_resolved: false,
        };

        let alert = Alert::from(api_alert);
        assert_eq!(alert.kind, AlertKind::Unknown);
        assert_eq!(alert.severity, AlertSeverity::Low);
    }

    #[test]
    fn known_alert_tags_parse() {
        let api_alert = ApiAlert {
            id: "a1".into(),
            kind: "low_activity".into(),
            severity: "critical".into(),
            title: String::new(),
            message: String::new(),
            host_id: None,
            group_id: None,
            timestamp: Utc::now(),
            is_read: false,
            is_resolved: false,
        };

        let alert = Alert::from(api_alert);
        assert_eq!(alert.kind, AlertKind::LowActivity);
        assert_eq!(alert.severity, AlertSeverity::Critical);
    }
}
