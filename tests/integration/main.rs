//! End-to-end tests driving the HTTP router in-process.

mod auth_test;
mod cart_test;
mod helpers;
mod notification_test;
