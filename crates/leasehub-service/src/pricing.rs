//! Rental pricing: per-item totals, subtotal, tax, and grand total.
//!
//! Every function here is pure. Rental days are assumed to already satisfy
//! each item's minimum, which the cart enforces on write, and prices to have
//! passed [`validate_item`].

use rust_decimal::Decimal;
use serde::Serialize;

use leasehub_core::error::AppError;
use leasehub_entity::cart::{DeliveryOption, InsuranceOption, RentalLineItem};

/// Largest accepted daily price. With `u32` rental days every total stays
/// far inside the `Decimal` range.
pub const MAX_PRICE_PER_DAY: i64 = 1_000_000_000;

/// Flat fee for express delivery.
const EXPRESS_DELIVERY_FEE: i64 = 500;
/// Flat fee for same-day delivery.
const SAME_DAY_DELIVERY_FEE: i64 = 1000;
/// Per-day fee for premium insurance.
const PREMIUM_INSURANCE_PER_DAY: i64 = 200;

/// The fixed 18% tax rate.
pub fn tax_rate() -> Decimal {
    Decimal::new(18, 2)
}

/// Reject a line item whose price cannot be totalled.
pub fn validate_item(item: &RentalLineItem) -> Result<(), AppError> {
    if item.price_per_day < Decimal::ZERO {
        return Err(AppError::validation("Price per day cannot be negative"));
    }
    if item.price_per_day > Decimal::from(MAX_PRICE_PER_DAY) {
        return Err(AppError::validation(format!(
            "Price per day cannot exceed {MAX_PRICE_PER_DAY}"
        )));
    }
    Ok(())
}

/// Delivery fee for an option, independent of rental length.
pub fn delivery_cost(option: DeliveryOption) -> Decimal {
    match option {
        DeliveryOption::Standard => Decimal::ZERO,
        DeliveryOption::Express => Decimal::from(EXPRESS_DELIVERY_FEE),
        DeliveryOption::SameDay => Decimal::from(SAME_DAY_DELIVERY_FEE),
    }
}

/// Insurance fee for an option over a number of days.
pub fn insurance_cost(option: InsuranceOption, days: u32) -> Decimal {
    match option {
        InsuranceOption::Basic => Decimal::ZERO,
        InsuranceOption::Premium => Decimal::from(PREMIUM_INSURANCE_PER_DAY) * Decimal::from(days),
    }
}

/// Price of one line item including delivery and insurance.
pub fn item_total(item: &RentalLineItem) -> Decimal {
    item.price_per_day * Decimal::from(item.rental_days)
        + delivery_cost(item.delivery_option)
        + insurance_cost(item.insurance_option, item.rental_days)
}

/// Sum of all item totals.
pub fn subtotal(items: &[RentalLineItem]) -> Decimal {
    items.iter().map(item_total).sum()
}

/// Tax owed on the subtotal.
pub fn tax(items: &[RentalLineItem]) -> Decimal {
    subtotal(items) * tax_rate()
}

/// Subtotal plus tax.
pub fn total(items: &[RentalLineItem]) -> Decimal {
    let subtotal = subtotal(items);
    subtotal + subtotal * tax_rate()
}

/// Cost breakdown of one line item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPricing {
    pub id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub rental_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub delivery_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub insurance_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Totals for a set of line items.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub items: Vec<ItemPricing>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Compute the full breakdown in one pass.
pub fn compute_totals(items: &[RentalLineItem]) -> CartTotals {
    let items: Vec<ItemPricing> = items
        .iter()
        .map(|item| ItemPricing {
            id: item.id.clone(),
            rental_cost: item.price_per_day * Decimal::from(item.rental_days),
            delivery_cost: delivery_cost(item.delivery_option),
            insurance_cost: insurance_cost(item.insurance_option, item.rental_days),
            total: item_total(item),
        })
        .collect();

    let subtotal: Decimal = items.iter().map(|pricing| pricing.total).sum();
    let tax = subtotal * tax_rate();

    CartTotals {
        items,
        subtotal,
        tax,
        total: subtotal + tax,
    }
}
