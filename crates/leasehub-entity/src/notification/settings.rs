//! Per-type notification settings.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::kind::{Channel, NotificationType};

/// Delivery settings for one notification type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationTypeConfig {
    /// Whether this notification is sent at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Days before the rental event the notification fires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_time: Option<u32>,
    /// Channels to deliver on. An empty set mutes the notification.
    #[serde(default)]
    pub channels: BTreeSet<Channel>,
    /// Whether customers receive this notification.
    #[serde(default = "default_true")]
    pub customer_enabled: bool,
    /// Whether staff receive this notification.
    #[serde(default)]
    pub internal_enabled: bool,
}

impl NotificationTypeConfig {
    fn new(lead_time: Option<u32>, channels: &[Channel], internal_enabled: bool) -> Self {
        Self {
            enabled: true,
            lead_time,
            channels: channels.iter().copied().collect(),
            customer_enabled: true,
            internal_enabled,
        }
    }

    /// Channels to attempt: empty when disabled.
    pub fn active_channels(&self) -> Vec<Channel> {
        if self.enabled {
            self.channels.iter().copied().collect()
        } else {
            Vec::new()
        }
    }

    /// The fixed default for a notification type.
    pub fn default_for(ty: NotificationType) -> Self {
        use Channel::{Email, Internal, Sms};

        match ty {
            NotificationType::ReturnReminders => Self::new(Some(3), &[Email, Sms], true),
            NotificationType::PaymentReminders => Self::new(Some(7), &[Email], false),
            NotificationType::OverdueAlerts => Self::new(Some(1), &[Email, Sms, Internal], true),
            NotificationType::PickupReminders => Self::new(Some(1), &[Email, Sms], true),
            NotificationType::OrderConfirmation => Self::new(None, &[Email], true),
        }
    }
}

/// The full settings object, keyed by notification type.
///
/// Saved wholesale; a type missing from the map has no channels to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationSettings(BTreeMap<NotificationType, NotificationTypeConfig>);

impl NotificationSettings {
    /// The seeded defaults for all five notification types.
    pub fn defaults() -> Self {
        NotificationType::ALL
            .into_iter()
            .map(|ty| (ty, NotificationTypeConfig::default_for(ty)))
            .collect()
    }

    /// Settings for one notification type.
    pub fn get(&self, ty: NotificationType) -> Option<&NotificationTypeConfig> {
        self.0.get(&ty)
    }

    /// Replace the settings for one notification type.
    pub fn insert(&mut self, ty: NotificationType, config: NotificationTypeConfig) {
        self.0.insert(ty, config);
    }

    /// Channels to attempt for a type, honoring `enabled`.
    pub fn active_channels(&self, ty: NotificationType) -> Vec<Channel> {
        self.get(ty)
            .map(NotificationTypeConfig::active_channels)
            .unwrap_or_default()
    }

    /// Wire names of the types present in this object, in canonical
    /// declaration order rather than the order they were submitted in.
    pub fn keys(&self) -> Vec<String> {
        self.0.keys().map(|ty| ty.as_str().to_string()).collect()
    }

    /// Whether no notification type is configured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(NotificationType, NotificationTypeConfig)> for NotificationSettings {
    fn from_iter<I: IntoIterator<Item = (NotificationType, NotificationTypeConfig)>>(
        iter: I,
    ) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn default_true() -> bool {
    true
}
