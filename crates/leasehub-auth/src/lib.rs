//! # leasehub-auth
//!
//! Credential handling for LeaseHub accounts.
//!
//! ## Modules
//!
//! - `jwt`: bearer token issuance and validation
//! - `password`: Argon2id hashing and length policy

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
