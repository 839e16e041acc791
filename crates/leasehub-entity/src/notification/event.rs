//! Notification history events.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use leasehub_core::AppError;

use super::kind::{Channel, NotificationType};

/// Maximum number of characters of message content kept in a history event.
pub const CONTENT_PREVIEW_CHARS: usize = 100;

/// Which kind of thing a history event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    NotificationSent,
    NotificationError,
    SettingsUpdated,
}

impl EventType {
    /// Return the event type as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotificationSent => "notification_sent",
            Self::NotificationError => "notification_error",
            Self::SettingsUpdated => "settings_updated",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "notification_sent" => Ok(Self::NotificationSent),
            "notification_error" => Ok(Self::NotificationError),
            "settings_updated" => Ok(Self::SettingsUpdated),
            _ => Err(AppError::validation(format!(
                "Invalid event type: '{s}'. Expected one of: notification_sent, notification_error, settings_updated"
            ))),
        }
    }
}

/// One immutable entry in the notification history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// Millisecond-derived identifier, strictly increasing within a process.
    pub id: i64,
    /// When the event was recorded.
    pub timestamp: DateTime<Utc>,
    /// Event-specific fields, tagged by `type`.
    #[serde(flatten)]
    pub kind: NotificationEventKind,
}

/// The event-specific payload of a [`NotificationEvent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationEventKind {
    /// A channel delivered a notification.
    #[serde(rename_all = "camelCase")]
    NotificationSent {
        notification_type: NotificationType,
        channel: Channel,
        recipient: String,
        content: String,
        status: String,
    },
    /// A channel failed to deliver a notification.
    #[serde(rename_all = "camelCase")]
    NotificationError {
        notification_type: NotificationType,
        channel: Channel,
        recipient: String,
        error: String,
    },
    /// The settings object was saved.
    SettingsUpdated {
        action: String,
        settings: Vec<String>,
    },
}

impl NotificationEventKind {
    /// A successful delivery, with the content cut to its preview length.
    pub fn sent(
        notification_type: NotificationType,
        channel: Channel,
        recipient: impl Into<String>,
        content: &str,
    ) -> Self {
        Self::NotificationSent {
            notification_type,
            channel,
            recipient: recipient.into(),
            content: content.chars().take(CONTENT_PREVIEW_CHARS).collect(),
            status: "sent".to_string(),
        }
    }

    /// A failed delivery.
    pub fn error(
        notification_type: NotificationType,
        channel: Channel,
        recipient: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self::NotificationError {
            notification_type,
            channel,
            recipient: recipient.into(),
            error: error.into(),
        }
    }

    /// A settings save listing the keys that were written.
    pub fn settings_saved(settings: Vec<String>) -> Self {
        Self::SettingsUpdated {
            action: "settings_saved".to_string(),
            settings,
        }
    }

    /// The discriminant of this event kind.
    pub fn event_type(&self) -> EventType {
        match self {
            Self::NotificationSent { .. } => EventType::NotificationSent,
            Self::NotificationError { .. } => EventType::NotificationError,
            Self::SettingsUpdated { .. } => EventType::SettingsUpdated,
        }
    }

    /// The notification type, for delivery events.
    pub fn notification_type(&self) -> Option<NotificationType> {
        match self {
            Self::NotificationSent {
                notification_type, ..
            }
            | Self::NotificationError {
                notification_type, ..
            } => Some(*notification_type),
            Self::SettingsUpdated { .. } => None,
        }
    }

    /// The channel, for delivery events.
    pub fn channel(&self) -> Option<Channel> {
        match self {
            Self::NotificationSent { channel, .. } | Self::NotificationError { channel, .. } => {
                Some(*channel)
            }
            Self::SettingsUpdated { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_sent_event_wire_shape() {
        let event = NotificationEvent {
            id: 1_700_000_000_000,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            kind: NotificationEventKind::sent(
                NotificationType::PickupReminders,
                Channel::Sms,
                "+15551234567",
                "LeaseHub: pickup soon",
            ),
        };
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json["type"], "notification_sent");
        assert_eq!(json["notificationType"], "pickupReminders");
        assert_eq!(json["channel"], "sms");
        assert_eq!(json["status"], "sent");
        assert_eq!(json["timestamp"], "2024-03-01T12:00:00Z");

        let back: NotificationEvent = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, event);
    }

    #[test]
    fn test_content_is_truncated_by_characters() {
        let long = "é".repeat(250);
        let kind = NotificationEventKind::sent(
            NotificationType::ReturnReminders,
            Channel::Email,
            "a@b.c",
            &long,
        );
        match kind {
            NotificationEventKind::NotificationSent { content, .. } => {
                assert_eq!(content.chars().count(), CONTENT_PREVIEW_CHARS);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_settings_event_has_no_channel() {
        let kind = NotificationEventKind::settings_saved(vec!["overdueAlerts".into()]);
        assert_eq!(kind.event_type(), EventType::SettingsUpdated);
        assert!(kind.channel().is_none());
        assert!(kind.notification_type().is_none());
        let json = serde_json::to_value(&kind).expect("serialize");
        assert_eq!(json["action"], "settings_saved");
    }
}
