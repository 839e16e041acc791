//! Cart domain entities.

pub mod item;
pub mod model;

pub use item::{Availability, DeliveryOption, InsuranceOption, RentalLineItem};
pub use model::Cart;
