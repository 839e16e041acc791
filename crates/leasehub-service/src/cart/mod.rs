//! Rental cart sessions and checkout.

pub mod service;

pub use service::{CartService, CartView, CheckoutContact, CheckoutReceipt};
