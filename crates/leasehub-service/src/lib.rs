//! # leasehub-service
//!
//! Business logic service layer for LeaseHub. Each service owns its state
//! (in-memory maps or JSON files under the data directory) and implements
//! one area of the rental flow: pricing, carts and checkout, accounts, and
//! customer/staff notifications.
//!
//! Services follow constructor injection; all dependencies are provided
//! at construction time via `Arc` references.

pub mod cart;
pub mod notification;
pub mod pricing;
pub mod user;

pub use cart::{CartService, CartView, CheckoutContact, CheckoutReceipt};
pub use notification::{
    DispatchReport, EmailSender, HistoryLog, HistoryQuery, InternalSender,
    NotificationDispatcher, NotificationSettingsStore, SmsSender, StaffInbox, TestContacts,
};
pub use pricing::{CartTotals, ItemPricing};
pub use user::{AuthSession, LoginRequest, RegisterRequest, UserService};
