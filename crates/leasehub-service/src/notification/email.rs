//! Email channel sender.

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use leasehub_core::config::EmailProviderConfig;
use leasehub_core::error::AppError;
use leasehub_entity::notification::{
    AudienceTab, Channel, NotificationData, NotificationEventKind, NotificationType,
};

use super::history::HistoryLog;
use super::provider::{DeliveryReceipt, EmailMessage, EmailProvider};
use super::templates::{self, EmailContent};

/// Formats, sends, and records customer emails.
#[derive(Debug, Clone)]
pub struct EmailSender {
    provider: Arc<dyn EmailProvider>,
    history: Arc<HistoryLog>,
    from_email: String,
    from_name: String,
}

impl EmailSender {
    /// Creates a sender with the configured identity.
    pub fn new(
        config: &EmailProviderConfig,
        provider: Arc<dyn EmailProvider>,
        history: Arc<HistoryLog>,
    ) -> Self {
        Self {
            provider,
            history,
            from_email: config.from_email.clone(),
            from_name: config.from_name.clone(),
        }
    }

    /// Send the test email for a notification type.
    pub async fn send_test(
        &self,
        to: &str,
        ty: NotificationType,
        tab: AudienceTab,
    ) -> Result<DeliveryReceipt, AppError> {
        self.deliver(to, ty, templates::email_test(ty, tab, Utc::now()))
            .await
    }

    /// Send the email for a real order event.
    pub async fn send_production(
        &self,
        to: &str,
        ty: NotificationType,
        data: &NotificationData,
    ) -> Result<DeliveryReceipt, AppError> {
        self.deliver(to, ty, templates::email_production(ty, data))
            .await
    }

    async fn deliver(
        &self,
        to: &str,
        ty: NotificationType,
        content: EmailContent,
    ) -> Result<DeliveryReceipt, AppError> {
        let message = EmailMessage {
            to: to.to_string(),
            from_email: self.from_email.clone(),
            from_name: self.from_name.clone(),
            subject: content.subject,
            text: content.text,
            html: content.html,
        };

        match self.provider.send(&message).await {
            Ok(receipt) => {
                self.history
                    .record(NotificationEventKind::sent(
                        ty,
                        Channel::Email,
                        to,
                        &message.text,
                    ))
                    .await;
                Ok(receipt)
            }
            Err(e) => {
                warn!(to = %to, notification_type = %ty, error = %e, "Email delivery failed");
                self.history
                    .record(NotificationEventKind::error(
                        ty,
                        Channel::Email,
                        to,
                        e.message.clone(),
                    ))
                    .await;
                Err(AppError::external_service(format!(
                    "Failed to send email: {}",
                    e.message
                )))
            }
        }
    }
}
