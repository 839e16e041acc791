//! Notification type, delivery channel, and audience tab enumerations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use leasehub_core::AppError;

/// The closed set of notifications the rental backend knows how to send.
///
/// Ordering follows declaration order, which is also the order settings are
/// stored and displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationType {
    /// Reminder that a rental is due back soon.
    ReturnReminders,
    /// Reminder that a payment is due.
    PaymentReminders,
    /// Alert that a rental is past its return date.
    OverdueAlerts,
    /// Reminder of an upcoming pickup.
    PickupReminders,
    /// Confirmation sent after checkout.
    OrderConfirmation,
}

impl NotificationType {
    /// Every notification type, in declaration order.
    pub const ALL: [NotificationType; 5] = [
        Self::ReturnReminders,
        Self::PaymentReminders,
        Self::OverdueAlerts,
        Self::PickupReminders,
        Self::OrderConfirmation,
    ];

    /// Return the type as its camelCase wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReturnReminders => "returnReminders",
            Self::PaymentReminders => "paymentReminders",
            Self::OverdueAlerts => "overdueAlerts",
            Self::PickupReminders => "pickupReminders",
            Self::OrderConfirmation => "orderConfirmation",
        }
    }

    /// Whether this type is scheduled relative to a rental event.
    pub fn has_lead_time(&self) -> bool {
        !matches!(self, Self::OrderConfirmation)
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("Unknown notification type: '{s}'")))
    }
}

/// A delivery medium for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Email to the customer.
    Email,
    /// Text message to the customer.
    Sms,
    /// In-app alert to staff.
    Internal,
}

impl Channel {
    /// Return the channel as its lowercase wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
            Self::Internal => "internal",
        }
    }

    /// Human-facing label used in dispatch reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Sms => "SMS",
            Self::Internal => "Internal",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Channel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "sms" => Ok(Self::Sms),
            "internal" => Ok(Self::Internal),
            _ => Err(AppError::validation(format!(
                "Invalid channel: '{s}'. Expected one of: email, sms, internal"
            ))),
        }
    }
}

/// Settings page tab a test notification was triggered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudienceTab {
    /// Customer-facing notifications.
    Customer,
    /// Staff-facing notifications.
    Internal,
}

impl AudienceTab {
    /// Return the tab as its lowercase wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Internal => "internal",
        }
    }

    /// Notification types exercised when a test names no specific type.
    pub fn notification_types(&self) -> &'static [NotificationType] {
        match self {
            Self::Customer => &NotificationType::ALL,
            Self::Internal => &[NotificationType::OverdueAlerts],
        }
    }
}

impl fmt::Display for AudienceTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_type_round_trips_wire_name() {
        for ty in NotificationType::ALL {
            let parsed: NotificationType = ty.as_str().parse().expect("parse");
            assert_eq!(parsed, ty);
            let json = serde_json::to_string(&ty).expect("serialize");
            assert_eq!(json, format!("\"{}\"", ty.as_str()));
        }
    }

    #[test]
    fn test_unknown_notification_type_is_rejected() {
        let err = "birthdayGreetings".parse::<NotificationType>().unwrap_err();
        assert_eq!(err.kind, leasehub_core::error::ErrorKind::Validation);
        assert!(serde_json::from_str::<NotificationType>("\"birthdayGreetings\"").is_err());
    }

    #[test]
    fn test_channel_labels() {
        assert_eq!(Channel::Email.label(), "Email");
        assert_eq!(Channel::Sms.label(), "SMS");
        assert_eq!(Channel::Internal.label(), "Internal");
    }

    #[test]
    fn test_internal_tab_covers_overdue_only() {
        assert_eq!(
            AudienceTab::Internal.notification_types(),
            &[NotificationType::OverdueAlerts]
        );
        assert_eq!(AudienceTab::Customer.notification_types().len(), 5);
    }
}
