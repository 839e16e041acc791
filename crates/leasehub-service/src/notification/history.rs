//! Append-only, capped notification history persisted as a JSON array.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use leasehub_core::config::NotificationsConfig;
use leasehub_core::error::AppError;
use leasehub_entity::notification::{
    Channel, EventType, NotificationEvent, NotificationEventKind, NotificationType,
};

use super::storage;

/// Criteria for a history query.
#[derive(Debug, Clone)]
pub struct HistoryQuery {
    /// Keep only deliveries of this notification type.
    pub notification_type: Option<NotificationType>,
    /// Keep only deliveries on this channel.
    pub channel: Option<Channel>,
    /// Keep only events of this kind.
    pub event: Option<EventType>,
    /// Trailing window in days. Events exactly this old are kept.
    pub days: i64,
}

impl HistoryQuery {
    /// Query everything within the trailing window.
    pub fn last_days(days: i64) -> Self {
        Self {
            notification_type: None,
            channel: None,
            event: None,
            days,
        }
    }

    /// Whether an event passes every filter relative to `now`.
    pub fn matches(&self, event: &NotificationEvent, now: DateTime<Utc>) -> bool {
        if let Some(ty) = self.notification_type {
            if event.kind.notification_type() != Some(ty) {
                return false;
            }
        }
        if let Some(channel) = self.channel {
            if event.kind.channel() != Some(channel) {
                return false;
            }
        }
        if let Some(kind) = self.event {
            if event.kind.event_type() != kind {
                return false;
            }
        }
        match self.window_start(now) {
            Some(start) => event.timestamp >= start,
            None => true,
        }
    }

    /// Oldest timestamp inside the window, or `None` when the window reaches
    /// past the earliest representable time.
    fn window_start(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        TimeDelta::try_days(self.days).and_then(|window| now.checked_sub_signed(window))
    }
}

/// File-backed notification history, newest first.
///
/// Every read-modify-write cycle holds `write_lock`, so appends from one
/// process never lose each other's events.
#[derive(Debug)]
pub struct HistoryLog {
    path: PathBuf,
    capacity: usize,
    write_lock: Mutex<()>,
}

impl HistoryLog {
    /// Creates a history log backed by the configured file.
    pub fn new(config: &NotificationsConfig) -> Self {
        Self::with_path(config.history_path(), config.history_capacity)
    }

    /// Creates a history log at an explicit path.
    pub fn with_path(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity,
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Prepend an event, trimming the log to capacity.
    pub async fn append(&self, kind: NotificationEventKind) -> Result<NotificationEvent, AppError> {
        let _guard = self.write_lock.lock().await;

        let mut history: Vec<NotificationEvent> =
            storage::read_json(&self.path).await?.unwrap_or_default();

        let now = Utc::now();
        let newest_id = history.first().map(|event| event.id).unwrap_or(i64::MIN);
        let event = NotificationEvent {
            id: now.timestamp_millis().max(newest_id.saturating_add(1)),
            timestamp: now,
            kind,
        };

        history.insert(0, event.clone());
        history.truncate(self.capacity);

        storage::write_json(&self.path, &history).await?;

        debug!(
            event_id = event.id,
            event_type = %event.kind.event_type(),
            retained = history.len(),
            "Notification history event recorded"
        );

        Ok(event)
    }

    /// Append without failing the caller; failures are logged.
    pub async fn record(&self, kind: NotificationEventKind) {
        if let Err(e) = self.append(kind).await {
            warn!(error = %e, path = %self.path.display(), "Failed to record notification history event");
        }
    }

    /// All stored events, newest first. A missing file yields an empty log.
    pub async fn load(&self) -> Result<Vec<NotificationEvent>, AppError> {
        Ok(storage::read_json(&self.path).await?.unwrap_or_default())
    }

    /// Events matching a query, in storage order.
    pub async fn query(&self, query: &HistoryQuery) -> Result<Vec<NotificationEvent>, AppError> {
        let now = Utc::now();
        Ok(self
            .load()
            .await?
            .into_iter()
            .filter(|event| query.matches(event, now))
            .collect())
    }
}
