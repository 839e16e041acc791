//! # leasehub-entity
//!
//! Domain entity models for the LeaseHub rental backend. Every struct in
//! this crate is either a persisted record or a domain value object, and
//! derives `Debug`, `Clone`, `Serialize`, and `Deserialize`. Wire names are
//! camelCase to match the storefront's JSON.

pub mod cart;
pub mod notification;
pub mod user;
