use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const SETTINGS_DOCUMENT_ID: &str = "global";

/// Longest idle timeout accepted from the dashboard (one day).
pub const MAX_TIMEOUT_SECONDS: u64 = 86_400;

/// Kiosk-wide switches edited from the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub collect_user_info: bool,
    #[serde(default = "default_timeout_enabled")]
    pub timeout_enabled: bool,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub pin_enabled: bool,
    #[serde(default = "default_admin_pin")]
    pub admin_pin: String,
}

fn default_timeout_enabled() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_admin_pin() -> String {
    "1234".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            collect_user_info: false,
            timeout_enabled: default_timeout_enabled(),
            timeout_seconds: default_timeout_seconds(),
            pin_enabled: false,
            admin_pin: default_admin_pin(),
        }
    }
}

impl Settings {
    /// What the inactivity watchdog runs with before the first successful fetch.
    pub fn watchdog_fallback() -> Self {
        Settings { timeout_enabled: false, ..Settings::default() }
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.clamp(1, MAX_TIMEOUT_SECONDS))
    }

    pub fn public_view(&self) -> PublicSettings {
        PublicSettings {
            collect_user_info: self.collect_user_info,
            timeout_enabled: self.timeout_enabled,
            timeout_seconds: self.timeout_seconds,
            pin_enabled: self.pin_enabled,
        }
    }

    pub fn apply(&mut self, update: &SettingsUpdate) {
        if let Some(v) = update.collect_user_info {
            self.collect_user_info = v;
        }
        if let Some(v) = update.timeout_enabled {
            self.timeout_enabled = v;
        }
        if let Some(v) = update.timeout_seconds {
            self.timeout_seconds = v;
        }
        if let Some(v) = update.pin_enabled {
            self.pin_enabled = v;
        }
        if let Some(ref v) = update.admin_pin {
            self.admin_pin = v.clone();
        }
    }
}

/// Settings as shown to shoppers; never carries the PIN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSettings {
    pub collect_user_info: bool,
    pub timeout_enabled: bool,
    pub timeout_seconds: u64,
    pub pin_enabled: bool,
}

/// Partial settings write; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collect_user_info: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_pin: Option<String>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        *self == SettingsUpdate::default()
    }
}
