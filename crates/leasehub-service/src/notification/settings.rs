//! Notification settings persistence and history access.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use leasehub_core::config::NotificationsConfig;
use leasehub_core::error::AppError;
use leasehub_entity::notification::{
    NotificationEvent, NotificationEventKind, NotificationSettings, NotificationType,
    NotificationTypeConfig,
};

use super::history::{HistoryLog, HistoryQuery};
use super::storage;

/// Reads, seeds, and saves the notification settings file.
#[derive(Debug)]
pub struct NotificationSettingsStore {
    path: PathBuf,
    write_lock: Mutex<()>,
    history: Arc<HistoryLog>,
}

impl NotificationSettingsStore {
    /// Creates a store backed by the configured settings file.
    pub fn new(config: &NotificationsConfig, history: Arc<HistoryLog>) -> Self {
        Self::with_path(config.settings_path(), history)
    }

    /// Creates a store at an explicit path.
    pub fn with_path(path: impl Into<PathBuf>, history: Arc<HistoryLog>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            history,
        }
    }

    /// Current settings, seeding and persisting the defaults on first read.
    ///
    /// Unreadable or corrupt state is logged and answered with the defaults
    /// without overwriting the file.
    pub async fn get_settings(&self) -> NotificationSettings {
        let _guard = self.write_lock.lock().await;

        match storage::read_json::<NotificationSettings>(&self.path).await {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                let defaults = NotificationSettings::defaults();
                match storage::write_json(&self.path, &defaults).await {
                    Ok(()) => {
                        info!(path = %self.path.display(), "Seeded default notification settings");
                        self.history
                            .record(NotificationEventKind::settings_saved(defaults.keys()))
                            .await;
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to persist default notification settings");
                    }
                }
                defaults
            }
            Err(e) => {
                warn!(error = %e, "Failed to read notification settings, using defaults");
                NotificationSettings::defaults()
            }
        }
    }

    /// Replace the settings wholesale and record the save in history.
    pub async fn save_settings(&self, settings: &NotificationSettings) -> Result<(), AppError> {
        {
            let _guard = self.write_lock.lock().await;
            storage::write_json(&self.path, settings).await.map_err(|e| {
                AppError::storage(format!("Failed to save notification settings: {}", e.message))
            })?;
        }

        let keys = settings.keys();
        info!(types = ?keys, "Notification settings saved");
        self.history
            .record(NotificationEventKind::settings_saved(keys))
            .await;
        Ok(())
    }

    /// Settings for a single notification type from the persisted object.
    pub async fn settings_for(&self, ty: NotificationType) -> Option<NotificationTypeConfig> {
        self.get_settings().await.get(ty).cloned()
    }

    /// History matching a query. An unreadable log is logged and reads empty.
    pub async fn get_history(&self, query: &HistoryQuery) -> Vec<NotificationEvent> {
        match self.history.query(query).await {
            Ok(events) => events,
            Err(e) => {
                warn!(error = %e, "Failed to read notification history");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use leasehub_entity::notification::{Channel, EventType};

    use super::*;

    fn store(dir: &tempfile::TempDir) -> NotificationSettingsStore {
        let history = Arc::new(HistoryLog::with_path(dir.path().join("history.json"), 1000));
        NotificationSettingsStore::with_path(dir.path().join("settings.json"), history)
    }

    #[tokio::test]
    async fn test_first_read_seeds_and_persists_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store(&dir);

        let first = store.get_settings().await;
        assert_eq!(first, NotificationSettings::defaults());
        assert!(dir.path().join("settings.json").exists());

        let second = store.get_settings().await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_save_replaces_wholesale_and_logs_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store(&dir);

        let mut config = NotificationTypeConfig::default_for(NotificationType::PickupReminders);
        config.enabled = false;
        let saved: NotificationSettings =
            std::iter::once((NotificationType::PickupReminders, config)).collect();
        store.save_settings(&saved).await.expect("save");

        let read = store.get_settings().await;
        assert_eq!(read, saved);
        assert!(read.get(NotificationType::ReturnReminders).is_none());

        let events = store
            .get_history(&HistoryQuery {
                event: Some(EventType::SettingsUpdated),
                ..HistoryQuery::last_days(7)
            })
            .await;
        assert_eq!(events.len(), 1);
        match &events[0].kind {
            NotificationEventKind::SettingsUpdated { action, settings } => {
                assert_eq!(action, "settings_saved");
                assert_eq!(settings, &vec!["pickupReminders".to_string()]);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_corrupt_file_degrades_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        tokio::fs::write(dir.path().join("settings.json"), b"{not json")
            .await
            .expect("write");
        let store = store(&dir);
        assert_eq!(store.get_settings().await, NotificationSettings::defaults());
    }

    #[tokio::test]
    async fn test_save_failure_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("blocker");
        tokio::fs::write(&blocker, b"file").await.expect("write");
        let history = Arc::new(HistoryLog::with_path(dir.path().join("h.json"), 1000));
        let store = NotificationSettingsStore::with_path(blocker.join("settings.json"), history);

        let err = store
            .save_settings(&NotificationSettings::defaults())
            .await
            .unwrap_err();
        assert_eq!(err.kind, leasehub_core::error::ErrorKind::Storage);
    }

    #[tokio::test]
    async fn test_settings_for_single_type() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store(&dir);
        let overdue = store
            .settings_for(NotificationType::OverdueAlerts)
            .await
            .expect("seeded");
        assert!(overdue.channels.contains(&Channel::Internal));
    }
}
