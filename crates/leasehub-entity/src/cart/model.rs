//! Cart entity: an ordered set of rental line items keyed by product id.

use serde::{Deserialize, Serialize};

use super::item::{DeliveryOption, InsuranceOption, RentalLineItem};

/// An ordered collection of line items, unique by product id.
///
/// The cart stores configuration only. Totals are derived on demand by the
/// pricing engine and never cached here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<RentalLineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[RentalLineItem] {
        &self.items
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a line item by product id.
    pub fn get(&self, id: &str) -> Option<&RentalLineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Add a product, or reconfigure it in place if already present.
    ///
    /// Re-adding an existing product overwrites its rental days, delivery,
    /// and insurance while keeping its position.
    pub fn add(&mut self, mut item: RentalLineItem) -> &RentalLineItem {
        let index = match self.items.iter().position(|existing| existing.id == item.id) {
            Some(index) => {
                let existing = &mut self.items[index];
                existing.rental_days = existing.clamp_days(item.rental_days);
                existing.delivery_option = item.delivery_option;
                existing.insurance_option = item.insurance_option;
                index
            }
            None => {
                item.rental_days = item.clamp_days(item.rental_days);
                self.items.push(item);
                self.items.len() - 1
            }
        };
        &self.items[index]
    }

    /// Remove a product. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Set rental days, clamped to the item's minimum.
    pub fn set_rental_days(&mut self, id: &str, days: u32) -> Option<&RentalLineItem> {
        let item = self.find_mut(id)?;
        item.rental_days = item.clamp_days(days);
        Some(&*item)
    }

    /// Change the delivery tier of a line item.
    pub fn set_delivery_option(
        &mut self,
        id: &str,
        option: DeliveryOption,
    ) -> Option<&RentalLineItem> {
        let item = self.find_mut(id)?;
        item.delivery_option = option;
        Some(&*item)
    }

    /// Change the insurance tier of a line item.
    pub fn set_insurance_option(
        &mut self,
        id: &str,
        option: InsuranceOption,
    ) -> Option<&RentalLineItem> {
        let item = self.find_mut(id)?;
        item.insurance_option = option;
        Some(&*item)
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut RentalLineItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }
}
