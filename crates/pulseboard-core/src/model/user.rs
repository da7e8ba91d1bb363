// ── User and preference domain types ──

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[non_exhaustive]
pub enum Role {
    Admin,
    Manager,
    Viewer,
}

/// Color scheme choice. `Auto` follows the ambient preference.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Auto,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    #[serde(rename = "12h")]
    Hour12,
    #[default]
    #[serde(rename = "24h")]
    Hour24,
}

/// The authenticated user owning this session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub permissions: Vec<String>,
    pub preferences: UserPreferences,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub theme: Theme,
    pub timezone: String,
    pub date_format: String,
    pub time_format: TimeFormat,
    pub default_time_range: String,
    pub notifications: NotificationPreferences,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub email: bool,
    pub browser: bool,
    pub alerts: bool,
}

/// Deep-merge patch for [`UserPreferences`]. The nested notifications
/// block merges field-wise rather than being replaced wholesale.
#[derive(Debug, Clone, Default)]
pub struct UserPreferencesPatch {
    pub theme: Option<Theme>,
    pub timezone: Option<String>,
    pub date_format: Option<String>,
    pub time_format: Option<TimeFormat>,
    pub default_time_range: Option<String>,
    pub notifications: Option<NotificationPreferencesPatch>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationPreferencesPatch {
    pub email: Option<bool>,
    pub browser: Option<bool>,
    pub alerts: Option<bool>,
}

impl UserPreferencesPatch {
    pub(crate) fn apply_to(&self, prefs: &mut UserPreferences) {
        if let Some(theme) = self.theme {
            prefs.theme = theme;
        }
        if let Some(ref timezone) = self.timezone {
            prefs.timezone = timezone.clone();
        }
        if let Some(ref date_format) = self.date_format {
            prefs.date_format = date_format.clone();
        }
        if let Some(time_format) = self.time_format {
            prefs.time_format = time_format;
        }
        if let Some(ref default_time_range) = self.default_time_range {
            prefs.default_time_range = default_time_range.clone();
        }
        if let Some(ref notifications) = self.notifications {
            if let Some(email) = notifications.email {
                prefs.notifications.email = email;
            }
            if let Some(browser) = notifications.browser {
                prefs.notifications.browser = browser;
            }
            if let Some(alerts) = notifications.alerts {
                prefs.notifications.alerts = alerts;
            }
        }
    }
}
