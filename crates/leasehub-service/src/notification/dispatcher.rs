//! Notification dispatch: resolve channels from settings, send on each
//! concurrently, and aggregate per-channel outcomes.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use serde::Serialize;
use tracing::{debug, info};

use leasehub_core::error::AppError;
use leasehub_entity::notification::{
    AudienceTab, Channel, NotificationData, NotificationSettings, NotificationType,
};

use super::email::EmailSender;
use super::internal::InternalSender;
use super::provider::DeliveryReceipt;
use super::settings::NotificationSettingsStore;
use super::sms::SmsSender;

/// Returned when no channel delivered anything.
pub const NOTHING_SENT_MESSAGE: &str =
    "No notifications were sent. Please check your settings and test credentials.";

/// Contact details a settings-page test sends to.
#[derive(Debug, Clone, Default)]
pub struct TestContacts {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Aggregated result of one dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReport {
    /// Labels of channels that delivered at least once, first-seen order.
    pub sent_channels: Vec<String>,
    /// One `"<channel>: <message>"` entry per failed send.
    pub errors: Vec<String>,
}

impl DispatchReport {
    /// A dispatch succeeds when any channel delivered.
    pub fn is_success(&self) -> bool {
        !self.sent_channels.is_empty()
    }

    /// Convert an all-failed report into the "nothing was sent" error.
    pub fn into_result(self) -> Result<Self, AppError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(AppError::validation(NOTHING_SENT_MESSAGE))
        }
    }

    fn absorb(&mut self, outcome: ChannelOutcome) {
        match outcome {
            ChannelOutcome::Sent(channel) => {
                let label = channel.label();
                if !self.sent_channels.iter().any(|sent| sent == label) {
                    self.sent_channels.push(label.to_string());
                }
            }
            ChannelOutcome::Failed(channel, message) => {
                self.errors.push(format!("{channel}: {message}"));
            }
        }
    }
}

enum ChannelOutcome {
    Sent(Channel),
    Failed(Channel, String),
}

impl ChannelOutcome {
    fn from_result(channel: Channel, result: Result<DeliveryReceipt, AppError>) -> Self {
        match result {
            Ok(_) => Self::Sent(channel),
            Err(e) => Self::Failed(channel, e.message),
        }
    }
}

fn recipient(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Routes notifications to the channel senders.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    settings: Arc<NotificationSettingsStore>,
    email: EmailSender,
    sms: SmsSender,
    internal: InternalSender,
}

impl NotificationDispatcher {
    /// Creates a dispatcher over the given store and senders.
    pub fn new(
        settings: Arc<NotificationSettingsStore>,
        email: EmailSender,
        sms: SmsSender,
        internal: InternalSender,
    ) -> Self {
        Self {
            settings,
            email,
            sms,
            internal,
        }
    }

    /// Send test notifications using caller-supplied settings.
    ///
    /// With `only` set just that type is tested; otherwise every type the
    /// audience tab covers. Email and SMS are skipped without a contact.
    pub async fn dispatch_test(
        &self,
        tab: AudienceTab,
        only: Option<NotificationType>,
        settings: &NotificationSettings,
        contacts: &TestContacts,
    ) -> DispatchReport {
        let types: Vec<NotificationType> = match only {
            Some(ty) => vec![ty],
            None => tab.notification_types().to_vec(),
        };

        let mut sends: Vec<BoxFuture<'_, ChannelOutcome>> = Vec::new();
        for ty in types {
            for channel in settings.active_channels(ty) {
                let send = match channel {
                    Channel::Email => recipient(&contacts.email).map(move |to| {
                        async move {
                            ChannelOutcome::from_result(
                                channel,
                                self.email.send_test(to, ty, tab).await,
                            )
                        }
                        .boxed()
                    }),
                    Channel::Sms => recipient(&contacts.phone).map(move |to| {
                        async move {
                            ChannelOutcome::from_result(
                                channel,
                                self.sms.send_test(to, ty, tab).await,
                            )
                        }
                        .boxed()
                    }),
                    Channel::Internal => Some(
                        async move {
                            ChannelOutcome::from_result(
                                channel,
                                self.internal.send_test(ty, tab).await,
                            )
                        }
                        .boxed(),
                    ),
                };
                match send {
                    Some(send) => sends.push(send),
                    None => debug!(notification_type = %ty, %channel, "Skipping channel without a test contact"),
                }
            }
        }

        let report = Self::collect(sends).await;
        info!(
            tab = %tab,
            sent = ?report.sent_channels,
            failures = report.errors.len(),
            "Test notification dispatch finished"
        );
        report
    }

    /// Send a real notification using the persisted settings.
    ///
    /// Customer channels go to the contact details in `data`.
    pub async fn dispatch(&self, ty: NotificationType, data: &NotificationData) -> DispatchReport {
        let channels = self
            .settings
            .settings_for(ty)
            .await
            .map(|config| config.active_channels())
            .unwrap_or_default();

        let mut sends: Vec<BoxFuture<'_, ChannelOutcome>> = Vec::new();
        for channel in channels {
            let send = match channel {
                Channel::Email => recipient(&data.customer_email).map(move |to| {
                    async move {
                        ChannelOutcome::from_result(
                            channel,
                            self.email.send_production(to, ty, data).await,
                        )
                    }
                    .boxed()
                }),
                Channel::Sms => recipient(&data.customer_phone).map(move |to| {
                    async move {
                        ChannelOutcome::from_result(
                            channel,
                            self.sms.send_production(to, ty, data).await,
                        )
                    }
                    .boxed()
                }),
                Channel::Internal => Some(
                    async move {
                        ChannelOutcome::from_result(
                            channel,
                            self.internal.send_production(ty, data).await,
                        )
                    }
                    .boxed(),
                ),
            };
            match send {
                Some(send) => sends.push(send),
                None => debug!(notification_type = %ty, %channel, order_id = %data.order_id, "Skipping channel without a customer contact"),
            }
        }

        let report = Self::collect(sends).await;
        info!(
            notification_type = %ty,
            order_id = %data.order_id,
            sent = ?report.sent_channels,
            failures = report.errors.len(),
            "Notification dispatch finished"
        );
        report
    }

    async fn collect(sends: Vec<BoxFuture<'_, ChannelOutcome>>) -> DispatchReport {
        let mut report = DispatchReport::default();
        for outcome in join_all(sends).await {
            report.absorb(outcome);
        }
        report
    }
}
