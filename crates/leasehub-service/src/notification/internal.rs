//! Internal (staff) channel sender and the in-memory staff inbox.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::warn;
use uuid::Uuid;

use leasehub_core::config::InternalProviderConfig;
use leasehub_core::error::AppError;
use leasehub_entity::notification::{
    AlertCategory, AlertPriority, AudienceTab, Channel, InternalNotification, NotificationData,
    NotificationEventKind, NotificationType,
};

use super::history::HistoryLog;
use super::provider::{DeliveryReceipt, InternalProvider};
use super::templates::{self, InternalContent};

/// Recipient recorded in history for staff broadcasts.
pub const ALL_STAFF: &str = "All Staff";

/// Every staff notification broadcast by this process, oldest first.
#[derive(Debug)]
pub struct StaffInbox {
    entries: RwLock<VecDeque<InternalNotification>>,
    capacity: usize,
}

impl StaffInbox {
    /// Creates an empty inbox holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::new()),
            capacity,
        }
    }

    /// Store a notification, evicting the oldest when full.
    pub async fn push(&self, notification: InternalNotification) {
        let mut entries = self.entries.write().await;
        entries.push_back(notification);
        while entries.len() > self.capacity {
            entries.pop_front();
        }
    }

    /// Up to `limit` most recent notifications, newest first.
    pub async fn recent(&self, limit: usize) -> Vec<InternalNotification> {
        self.entries
            .read()
            .await
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }

    /// Number of unread notifications.
    pub async fn unread_count(&self) -> usize {
        self.entries
            .read()
            .await
            .iter()
            .filter(|n| !n.read)
            .count()
    }

    /// Notifications routed to one team, newest first.
    pub async fn by_category(&self, category: AlertCategory) -> Vec<InternalNotification> {
        self.filtered(|n| n.category == category).await
    }

    /// Notifications of one urgency, newest first.
    pub async fn by_priority(&self, priority: AlertPriority) -> Vec<InternalNotification> {
        self.filtered(|n| n.priority == priority).await
    }

    /// Mark a notification read. Returns the updated entry if it exists.
    pub async fn mark_as_read(&self, id: &str) -> Option<InternalNotification> {
        let mut entries = self.entries.write().await;
        let entry = entries.iter_mut().find(|n| n.id == id)?;
        entry.mark_read(Utc::now());
        Some(entry.clone())
    }

    async fn filtered<F>(&self, predicate: F) -> Vec<InternalNotification>
    where
        F: Fn(&InternalNotification) -> bool,
    {
        self.entries
            .read()
            .await
            .iter()
            .rev()
            .filter(|n| predicate(n))
            .cloned()
            .collect()
    }
}

/// Builds, broadcasts, stores, and records staff notifications.
#[derive(Debug, Clone)]
pub struct InternalSender {
    provider: Arc<dyn InternalProvider>,
    history: Arc<HistoryLog>,
    inbox: Arc<StaffInbox>,
    recent_limit: usize,
}

impl InternalSender {
    /// Creates a sender that stores into `inbox`.
    pub fn new(
        config: &InternalProviderConfig,
        provider: Arc<dyn InternalProvider>,
        history: Arc<HistoryLog>,
        inbox: Arc<StaffInbox>,
    ) -> Self {
        Self {
            provider,
            history,
            inbox,
            recent_limit: config.recent_limit,
        }
    }

    /// The inbox this sender writes to.
    pub fn inbox(&self) -> &Arc<StaffInbox> {
        &self.inbox
    }

    /// Default page size for inbox listings.
    pub fn recent_limit(&self) -> usize {
        self.recent_limit
    }

    /// Broadcast the test notification for a type.
    pub async fn send_test(
        &self,
        ty: NotificationType,
        tab: AudienceTab,
    ) -> Result<DeliveryReceipt, AppError> {
        self.deliver(ty, "test", templates::internal_test(ty, tab), None)
            .await
    }

    /// Broadcast the notification for a real order event.
    pub async fn send_production(
        &self,
        ty: NotificationType,
        data: &NotificationData,
    ) -> Result<DeliveryReceipt, AppError> {
        self.deliver(
            ty,
            "internal",
            templates::internal_production(ty, data),
            Some(data.clone()),
        )
        .await
    }

    async fn deliver(
        &self,
        ty: NotificationType,
        id_prefix: &str,
        content: InternalContent,
        data: Option<NotificationData>,
    ) -> Result<DeliveryReceipt, AppError> {
        let notification = InternalNotification {
            id: format!("{id_prefix}-{}", Uuid::now_v7().simple()),
            level: content.level,
            title: content.title,
            message: content.message,
            priority: content.priority,
            category: content.category,
            timestamp: Utc::now(),
            read: false,
            read_at: None,
            data,
        };

        match self.provider.broadcast(&notification).await {
            Ok(receipt) => {
                self.history
                    .record(NotificationEventKind::sent(
                        ty,
                        Channel::Internal,
                        ALL_STAFF,
                        &notification.message,
                    ))
                    .await;
                self.inbox.push(notification).await;
                Ok(receipt)
            }
            Err(e) => {
                warn!(notification_type = %ty, error = %e, "Staff notification failed");
                self.history
                    .record(NotificationEventKind::error(
                        ty,
                        Channel::Internal,
                        ALL_STAFF,
                        e.message.clone(),
                    ))
                    .await;
                Err(AppError::external_service(format!(
                    "Failed to send internal notification: {}",
                    e.message
                )))
            }
        }
    }
}
