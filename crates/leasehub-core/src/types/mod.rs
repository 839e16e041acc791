//! Core type definitions used across the LeaseHub workspace.

pub mod id;

pub use id::*;
