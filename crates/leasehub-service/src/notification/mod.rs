//! Notification settings, history, channel senders, and dispatch.

pub mod dispatcher;
pub mod email;
pub mod history;
pub mod internal;
pub mod provider;
pub mod settings;
pub mod sms;
pub mod templates;

mod storage;

pub use dispatcher::{DispatchReport, NotificationDispatcher, TestContacts};
pub use email::EmailSender;
pub use history::{HistoryLog, HistoryQuery};
pub use internal::{InternalSender, StaffInbox};
pub use provider::{
    DeliveryReceipt, EmailProvider, InternalProvider, MockBroadcastProvider, MockEmailProvider,
    MockSmsProvider, SmsProvider,
};
pub use settings::NotificationSettingsStore;
pub use sms::{SmsSender, format_phone_number, validate_phone_number};
