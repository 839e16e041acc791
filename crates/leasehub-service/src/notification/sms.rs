//! SMS channel sender and phone number helpers.

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use leasehub_core::config::SmsProviderConfig;
use leasehub_core::error::AppError;
use leasehub_entity::notification::{
    AudienceTab, Channel, NotificationData, NotificationEventKind, NotificationType,
};

use super::history::HistoryLog;
use super::provider::{DeliveryReceipt, SmsMessage, SmsProvider};
use super::templates;

/// Normalize a North American number to E.164.
///
/// Ten digits gain a `+1` prefix and eleven digits starting with `1` gain a
/// `+`. Anything else is returned unchanged.
pub fn format_phone_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        10 => format!("+1{digits}"),
        11 if digits.starts_with('1') => format!("+{digits}"),
        _ => phone.to_string(),
    }
}

/// Whether a number is valid E.164 once formatted.
pub fn validate_phone_number(phone: &str) -> bool {
    let formatted = format_phone_number(phone);
    let Some(rest) = formatted.strip_prefix('+') else {
        return false;
    };
    (2..=15).contains(&rest.len())
        && rest.chars().all(|c| c.is_ascii_digit())
        && !rest.starts_with('0')
}

/// Formats, sends, and records customer text messages.
#[derive(Debug, Clone)]
pub struct SmsSender {
    provider: Arc<dyn SmsProvider>,
    history: Arc<HistoryLog>,
    from_number: String,
}

impl SmsSender {
    /// Creates a sender with the configured sender number.
    pub fn new(
        config: &SmsProviderConfig,
        provider: Arc<dyn SmsProvider>,
        history: Arc<HistoryLog>,
    ) -> Self {
        Self {
            provider,
            history,
            from_number: config.from_number.clone(),
        }
    }

    /// Send the test text for a notification type.
    pub async fn send_test(
        &self,
        to: &str,
        ty: NotificationType,
        tab: AudienceTab,
    ) -> Result<DeliveryReceipt, AppError> {
        self.deliver(to, ty, templates::sms_test(ty, tab, Utc::now()))
            .await
    }

    /// Send the text for a real order event.
    pub async fn send_production(
        &self,
        to: &str,
        ty: NotificationType,
        data: &NotificationData,
    ) -> Result<DeliveryReceipt, AppError> {
        self.deliver(to, ty, templates::sms_production(ty, data))
            .await
    }

    async fn deliver(
        &self,
        to: &str,
        ty: NotificationType,
        body: String,
    ) -> Result<DeliveryReceipt, AppError> {
        let result = if validate_phone_number(to) {
            let message = SmsMessage {
                to: format_phone_number(to),
                from: self.from_number.clone(),
                body,
            };
            self.provider
                .send(&message)
                .await
                .map(|receipt| (receipt, message.body))
        } else {
            Err(AppError::validation(format!("Invalid phone number: {to}")))
        };

        match result {
            Ok((receipt, body)) => {
                self.history
                    .record(NotificationEventKind::sent(ty, Channel::Sms, to, &body))
                    .await;
                Ok(receipt)
            }
            Err(e) => {
                warn!(to = %to, notification_type = %ty, error = %e, "SMS delivery failed");
                self.history
                    .record(NotificationEventKind::error(
                        ty,
                        Channel::Sms,
                        to,
                        e.message.clone(),
                    ))
                    .await;
                Err(AppError::external_service(format!(
                    "Failed to send SMS: {}",
                    e.message
                )))
            }
        }
    }
}
