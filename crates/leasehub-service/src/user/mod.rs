//! Account registration, login, and profile services.

pub mod service;

pub use service::{AuthSession, LoginRequest, RegisterRequest, UserService};
