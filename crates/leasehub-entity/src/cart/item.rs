//! Rental line item and its configuration options.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use leasehub_core::AppError;

/// Delivery tier chosen for a rented product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryOption {
    /// Free standard delivery.
    #[default]
    Standard,
    /// Flat-fee express delivery.
    Express,
    /// Flat-fee same-day delivery.
    SameDay,
}

impl DeliveryOption {
    /// Return the option as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Express => "express",
            Self::SameDay => "same-day",
        }
    }
}

impl fmt::Display for DeliveryOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeliveryOption {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "express" => Ok(Self::Express),
            "same-day" => Ok(Self::SameDay),
            _ => Err(AppError::validation(format!(
                "Invalid delivery option: '{s}'. Expected one of: standard, express, same-day"
            ))),
        }
    }
}

/// Damage cover chosen for a rented product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsuranceOption {
    /// Included basic cover.
    #[default]
    Basic,
    /// Per-day premium cover.
    Premium,
}

impl InsuranceOption {
    /// Return the option as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Premium => "premium",
        }
    }
}

impl fmt::Display for InsuranceOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsuranceOption {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "premium" => Ok(Self::Premium),
            _ => Err(AppError::validation(format!(
                "Invalid insurance option: '{s}'. Expected one of: basic, premium"
            ))),
        }
    }
}

/// Stock availability shown next to a product. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    /// In stock.
    #[default]
    Available,
    /// Few units left.
    Limited,
    /// Out of stock.
    Unavailable,
}

/// One product's rental configuration inside a cart.
///
/// `rental_days` never drops below `min_rental_days`; the cart clamps every
/// write through [`RentalLineItem::clamp_days`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalLineItem {
    /// Product identifier. A cart holds at most one line per product.
    pub id: String,
    /// Product display name.
    #[serde(default)]
    pub name: String,
    /// Product category.
    #[serde(default)]
    pub category: String,
    /// Product image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Daily rental price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price_per_day: Decimal,
    /// Number of rental days.
    pub rental_days: u32,
    /// Shortest rental the product allows.
    #[serde(default = "default_min_rental_days")]
    pub min_rental_days: u32,
    /// Delivery tier.
    #[serde(default)]
    pub delivery_option: DeliveryOption,
    /// Insurance tier.
    #[serde(default)]
    pub insurance_option: InsuranceOption,
    /// Stock availability.
    #[serde(default)]
    pub availability: Availability,
}

impl RentalLineItem {
    /// Clamp a requested day count to this item's minimum.
    pub fn clamp_days(&self, days: u32) -> u32 {
        days.max(self.min_rental_days)
    }
}

fn default_min_rental_days() -> u32 {
    1
}
