//! Response DTOs.

use serde::{Deserialize, Serialize};

use leasehub_entity::notification::{InternalNotification, NotificationEvent, NotificationSettings};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Count response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    /// Count value.
    pub count: usize,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Uptime.
    pub uptime_seconds: u64,
}

/// Current notification settings.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsResponse {
    pub settings: NotificationSettings,
}

/// Settings after a successful save.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsSavedResponse {
    pub message: String,
    pub settings: NotificationSettings,
}

/// Outcome of a dispatch that delivered on at least one channel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResponse {
    pub message: String,
    pub sent_channels: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Filtered history, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<NotificationEvent>,
}

/// Staff inbox listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxResponse {
    pub notifications: Vec<InternalNotification>,
    pub unread_count: usize,
}
