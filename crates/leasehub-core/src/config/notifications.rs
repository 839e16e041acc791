//! Notification settings, history, and delivery provider configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Notification subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Directory holding the persisted settings and history files.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// File name of the persisted settings object.
    #[serde(default = "default_settings_file")]
    pub settings_file: String,
    /// File name of the persisted history log.
    #[serde(default = "default_history_file")]
    pub history_file: String,
    /// Maximum number of history events retained.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// Window applied to history queries that do not specify one.
    #[serde(default = "default_history_days")]
    pub default_history_days: i64,
    /// Email provider settings.
    #[serde(default)]
    pub email: EmailProviderConfig,
    /// SMS provider settings.
    #[serde(default)]
    pub sms: SmsProviderConfig,
    /// Internal (staff inbox) provider settings.
    #[serde(default)]
    pub internal: InternalProviderConfig,
}

/// Outgoing email identity and mock latency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailProviderConfig {
    /// Sender address.
    #[serde(default = "default_from_email")]
    pub from_email: String,
    /// Sender display name.
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Simulated provider latency in milliseconds.
    #[serde(default = "default_email_latency")]
    pub simulated_latency_ms: u64,
}

/// Outgoing SMS identity and mock latency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsProviderConfig {
    /// Sender phone number.
    #[serde(default = "default_from_number")]
    pub from_number: String,
    /// Simulated provider latency in milliseconds.
    #[serde(default = "default_sms_latency")]
    pub simulated_latency_ms: u64,
}

/// Staff inbox settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternalProviderConfig {
    /// Number of inbox entries returned when no limit is given.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
    /// Maximum number of notifications kept in the inbox.
    #[serde(default = "default_inbox_capacity")]
    pub inbox_capacity: usize,
}

impl NotificationsConfig {
    /// Full path of the settings file.
    pub fn settings_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.settings_file)
    }

    /// Full path of the history file.
    pub fn history_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.history_file)
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            settings_file: default_settings_file(),
            history_file: default_history_file(),
            history_capacity: default_history_capacity(),
            default_history_days: default_history_days(),
            email: EmailProviderConfig::default(),
            sms: SmsProviderConfig::default(),
            internal: InternalProviderConfig::default(),
        }
    }
}

impl Default for EmailProviderConfig {
    fn default() -> Self {
        Self {
            from_email: default_from_email(),
            from_name: default_from_name(),
            simulated_latency_ms: default_email_latency(),
        }
    }
}

impl Default for SmsProviderConfig {
    fn default() -> Self {
        Self {
            from_number: default_from_number(),
            simulated_latency_ms: default_sms_latency(),
        }
    }
}

impl Default for InternalProviderConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
            inbox_capacity: default_inbox_capacity(),
        }
    }
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_settings_file() -> String {
    "notification-settings.json".to_string()
}

fn default_history_file() -> String {
    "notification-history.json".to_string()
}

fn default_history_capacity() -> usize {
    1000
}

fn default_history_days() -> i64 {
    7
}

fn default_from_email() -> String {
    "noreply@leasehub.com".to_string()
}

fn default_from_name() -> String {
    "LeaseHub Suite".to_string()
}

fn default_email_latency() -> u64 {
    100
}

fn default_from_number() -> String {
    "+1234567890".to_string()
}

fn default_sms_latency() -> u64 {
    150
}

fn default_recent_limit() -> usize {
    50
}

fn default_inbox_capacity() -> usize {
    1000
}
