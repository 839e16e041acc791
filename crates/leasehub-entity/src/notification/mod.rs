//! Notification domain entities.

pub mod event;
pub mod internal;
pub mod kind;
pub mod payload;
pub mod settings;

pub use event::{EventType, NotificationEvent, NotificationEventKind};
pub use internal::{AlertCategory, AlertLevel, AlertPriority, InternalNotification};
pub use kind::{AudienceTab, Channel, NotificationType};
pub use payload::NotificationData;
pub use settings::{NotificationSettings, NotificationTypeConfig};
