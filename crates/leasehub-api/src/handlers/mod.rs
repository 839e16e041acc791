//! Request handlers grouped by domain.

pub mod auth;
pub mod cart;
pub mod health;
pub mod notification;
pub mod pricing;
