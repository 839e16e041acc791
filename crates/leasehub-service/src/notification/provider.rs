//! Delivery provider abstractions and the built-in simulated providers.
//!
//! Real gateways (an email API, an SMS API, a websocket fan-out) plug in by
//! implementing these traits. The mocks log each delivery and succeed after
//! a configurable delay.

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use leasehub_core::config::{EmailProviderConfig, SmsProviderConfig};
use leasehub_core::result::AppResult;
use leasehub_entity::notification::InternalNotification;

/// An outbound email.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub from_email: String,
    pub from_name: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// An outbound text message.
#[derive(Debug, Clone)]
pub struct SmsMessage {
    pub to: String,
    pub from: String,
    pub body: String,
}

/// Provider acknowledgement of an accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReceipt {
    /// Provider-assigned message identifier.
    pub message_id: String,
    /// Provider-reported status.
    pub status: String,
}

/// Sends email through an external gateway.
#[async_trait]
pub trait EmailProvider: Send + Sync + Debug + 'static {
    /// Hand one message to the gateway.
    async fn send(&self, message: &EmailMessage) -> AppResult<DeliveryReceipt>;
}

/// Sends text messages through an external gateway.
#[async_trait]
pub trait SmsProvider: Send + Sync + Debug + 'static {
    /// Hand one message to the gateway.
    async fn send(&self, message: &SmsMessage) -> AppResult<DeliveryReceipt>;
}

/// Pushes staff notifications to connected dashboards.
#[async_trait]
pub trait InternalProvider: Send + Sync + Debug + 'static {
    /// Broadcast one notification to every connected staff client.
    async fn broadcast(&self, notification: &InternalNotification) -> AppResult<DeliveryReceipt>;
}

fn mock_message_id() -> String {
    format!("mock-{}", Utc::now().timestamp_millis())
}

/// Simulated email gateway.
#[derive(Debug, Clone)]
pub struct MockEmailProvider {
    latency: Duration,
}

impl MockEmailProvider {
    /// Creates a mock gateway using the configured latency.
    pub fn new(config: &EmailProviderConfig) -> Self {
        Self {
            latency: Duration::from_millis(config.simulated_latency_ms),
        }
    }
}

#[async_trait]
impl EmailProvider for MockEmailProvider {
    async fn send(&self, message: &EmailMessage) -> AppResult<DeliveryReceipt> {
        tokio::time::sleep(self.latency).await;

        let preview: String = message.text.chars().take(100).collect();
        info!(
            to = %message.to,
            from = %message.from_email,
            subject = %message.subject,
            text = %preview,
            has_html = !message.html.is_empty(),
            "Simulated email sent"
        );

        Ok(DeliveryReceipt {
            message_id: mock_message_id(),
            status: "accepted".to_string(),
        })
    }
}

/// Simulated SMS gateway.
#[derive(Debug, Clone)]
pub struct MockSmsProvider {
    latency: Duration,
}

impl MockSmsProvider {
    /// Creates a mock gateway using the configured latency.
    pub fn new(config: &SmsProviderConfig) -> Self {
        Self {
            latency: Duration::from_millis(config.simulated_latency_ms),
        }
    }
}

#[async_trait]
impl SmsProvider for MockSmsProvider {
    async fn send(&self, message: &SmsMessage) -> AppResult<DeliveryReceipt> {
        tokio::time::sleep(self.latency).await;

        let message_id = mock_message_id();
        info!(
            to = %message.to,
            from = %message.from,
            body = %message.body,
            message_id = %message_id,
            "Simulated SMS sent"
        );

        Ok(DeliveryReceipt {
            message_id,
            status: "delivered".to_string(),
        })
    }
}

/// Simulated staff broadcast with no connected clients.
#[derive(Debug, Clone, Default)]
pub struct MockBroadcastProvider;

impl MockBroadcastProvider {
    /// Creates the simulated broadcaster.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl InternalProvider for MockBroadcastProvider {
    async fn broadcast(&self, notification: &InternalNotification) -> AppResult<DeliveryReceipt> {
        info!(
            kind = ?notification.level,
            title = %notification.title,
            message = %notification.message,
            "Simulated staff notification broadcast"
        );

        Ok(DeliveryReceipt {
            message_id: format!("internal-{}", Utc::now().timestamp_millis()),
            status: "broadcast".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_email_returns_mock_id() {
        let provider = MockEmailProvider::new(&EmailProviderConfig {
            simulated_latency_ms: 0,
            ..EmailProviderConfig::default()
        });
        let receipt = provider
            .send(&EmailMessage {
                to: "renter@example.com".into(),
                from_email: "noreply@leasehub.com".into(),
                from_name: "LeaseHub Suite".into(),
                subject: "hi".into(),
                text: "hello".into(),
                html: String::new(),
            })
            .await
            .expect("send");
        assert!(receipt.message_id.starts_with("mock-"));
    }

    #[tokio::test]
    async fn test_mock_sms_reports_delivered() {
        let provider = MockSmsProvider::new(&SmsProviderConfig {
            simulated_latency_ms: 0,
            ..SmsProviderConfig::default()
        });
        let receipt = provider
            .send(&SmsMessage {
                to: "+15551234567".into(),
                from: "+1234567890".into(),
                body: "hello".into(),
            })
            .await
            .expect("send");
        assert_eq!(receipt.status, "delivered");
    }
}
