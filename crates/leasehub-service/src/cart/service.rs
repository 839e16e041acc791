//! Per-session cart operations and checkout.

use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use tracing::{info, warn};

use leasehub_core::error::AppError;
use leasehub_core::types::id::OrderId;
use leasehub_entity::cart::{Cart, DeliveryOption, InsuranceOption, RentalLineItem};
use leasehub_entity::notification::{NotificationData, NotificationType};

use crate::notification::{DispatchReport, NotificationDispatcher};
use crate::pricing::{self, CartTotals};

/// A cart's items together with their computed totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub cart_id: String,
    pub items: Vec<RentalLineItem>,
    pub totals: CartTotals,
}

impl CartView {
    fn new(cart_id: &str, cart: &Cart) -> Self {
        Self {
            cart_id: cart_id.to_string(),
            items: cart.items().to_vec(),
            totals: pricing::compute_totals(cart.items()),
        }
    }
}

/// Customer details used for the order confirmation.
#[derive(Debug, Clone, Default)]
pub struct CheckoutContact {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub pickup_date: Option<String>,
    pub return_date: Option<String>,
}

/// Outcome of a successful checkout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub order_id: OrderId,
    pub items: Vec<RentalLineItem>,
    pub totals: CartTotals,
    /// Order confirmation delivery; failures never undo the order.
    pub notification: DispatchReport,
}

/// In-memory carts keyed by cart session id.
#[derive(Debug, Clone)]
pub struct CartService {
    carts: Arc<DashMap<String, Cart>>,
    dispatcher: Arc<NotificationDispatcher>,
}

impl CartService {
    /// Creates a cart service with no carts.
    pub fn new(dispatcher: Arc<NotificationDispatcher>) -> Self {
        Self {
            carts: Arc::new(DashMap::new()),
            dispatcher,
        }
    }

    /// Items and totals of a cart. Unknown carts are empty.
    pub fn get_cart(&self, cart_id: &str) -> CartView {
        match self.carts.get(cart_id) {
            Some(cart) => CartView::new(cart_id, &cart),
            None => CartView::new(cart_id, &Cart::new()),
        }
    }

    /// Add a product, or reconfigure it if the cart already holds it.
    pub fn add_item(&self, cart_id: &str, item: RentalLineItem) -> Result<CartView, AppError> {
        if item.id.trim().is_empty() {
            return Err(AppError::validation("Item id is required"));
        }
        pricing::validate_item(&item)?;

        let mut cart = self.carts.entry(cart_id.to_string()).or_default();
        let stored = cart.add(item);
        info!(cart_id = %cart_id, item_id = %stored.id, rental_days = stored.rental_days, "Cart item added");
        Ok(CartView::new(cart_id, &cart))
    }

    /// Remove a product. Removing an absent product is a no-op.
    pub fn remove_item(&self, cart_id: &str, item_id: &str) -> CartView {
        match self.carts.get_mut(cart_id) {
            Some(mut cart) => {
                if cart.remove(item_id) {
                    info!(cart_id = %cart_id, item_id = %item_id, "Cart item removed");
                }
                CartView::new(cart_id, &cart)
            }
            None => CartView::new(cart_id, &Cart::new()),
        }
    }

    /// Set rental days, clamped to the item's minimum.
    pub fn set_rental_days(
        &self,
        cart_id: &str,
        item_id: &str,
        days: u32,
    ) -> Result<CartView, AppError> {
        self.update(cart_id, item_id, |cart| {
            cart.set_rental_days(item_id, days).is_some()
        })
    }

    /// Change the delivery tier of an item.
    pub fn set_delivery_option(
        &self,
        cart_id: &str,
        item_id: &str,
        option: DeliveryOption,
    ) -> Result<CartView, AppError> {
        self.update(cart_id, item_id, |cart| {
            cart.set_delivery_option(item_id, option).is_some()
        })
    }

    /// Change the insurance tier of an item.
    pub fn set_insurance_option(
        &self,
        cart_id: &str,
        item_id: &str,
        option: InsuranceOption,
    ) -> Result<CartView, AppError> {
        self.update(cart_id, item_id, |cart| {
            cart.set_insurance_option(item_id, option).is_some()
        })
    }

    /// Empty a cart.
    pub fn clear(&self, cart_id: &str) {
        if self.carts.remove(cart_id).is_some() {
            info!(cart_id = %cart_id, "Cart cleared");
        }
    }

    /// Place the order: price the cart, empty it, and confirm to the customer.
    pub async fn checkout(
        &self,
        cart_id: &str,
        contact: CheckoutContact,
    ) -> Result<CheckoutReceipt, AppError> {
        let cart = self
            .carts
            .remove_if(cart_id, |_, cart| !cart.is_empty())
            .map(|(_, cart)| cart)
            .ok_or_else(|| AppError::validation("Cannot check out an empty cart"))?;

        let totals = pricing::compute_totals(cart.items());
        let order_id = OrderId::new();

        info!(
            cart_id = %cart_id,
            order_id = %order_id,
            items = cart.len(),
            total = %totals.total,
            "Checkout completed"
        );

        let data = NotificationData {
            order_id: order_id.to_string(),
            amount: Some(totals.total),
            lead_time: None,
            pickup_date: contact.pickup_date,
            return_date: contact.return_date,
            customer_email: contact.email,
            customer_phone: contact.phone,
        };
        let notification = self
            .dispatcher
            .dispatch(NotificationType::OrderConfirmation, &data)
            .await;
        if !notification.is_success() {
            warn!(
                order_id = %order_id,
                errors = ?notification.errors,
                "Order confirmation was not delivered"
            );
        }

        Ok(CheckoutReceipt {
            order_id,
            items: cart.items().to_vec(),
            totals,
            notification,
        })
    }

    fn update<F>(&self, cart_id: &str, item_id: &str, apply: F) -> Result<CartView, AppError>
    where
        F: FnOnce(&mut Cart) -> bool,
    {
        let not_found = || AppError::not_found(format!("Cart item '{item_id}' not found"));

        let mut cart = self.carts.get_mut(cart_id).ok_or_else(not_found)?;
        if !apply(&mut *cart) {
            return Err(not_found());
        }
        Ok(CartView::new(cart_id, &cart))
    }
}

#[cfg(test)]
mod tests {
    use leasehub_core::config::{EmailProviderConfig, InternalProviderConfig, SmsProviderConfig};
    use leasehub_entity::cart::Availability;
    use rust_decimal::Decimal;

    use super::*;
    use crate::notification::{
        EmailSender, HistoryLog, InternalSender, MockBroadcastProvider, MockEmailProvider,
        MockSmsProvider, NotificationSettingsStore, SmsSender, StaffInbox,
    };

    fn service(dir: &tempfile::TempDir) -> CartService {
        let history = Arc::new(HistoryLog::with_path(dir.path().join("h.json"), 1000));
        let store = Arc::new(NotificationSettingsStore::with_path(
            dir.path().join("s.json"),
            history.clone(),
        ));
        let email_cfg = EmailProviderConfig {
            simulated_latency_ms: 0,
            ..EmailProviderConfig::default()
        };
        let sms_cfg = SmsProviderConfig {
            simulated_latency_ms: 0,
            ..SmsProviderConfig::default()
        };
        let dispatcher = NotificationDispatcher::new(
            store,
            EmailSender::new(
                &email_cfg,
                Arc::new(MockEmailProvider::new(&email_cfg)),
                history.clone(),
            ),
            SmsSender::new(
                &sms_cfg,
                Arc::new(MockSmsProvider::new(&sms_cfg)),
                history.clone(),
            ),
            InternalSender::new(
                &InternalProviderConfig::default(),
                Arc::new(MockBroadcastProvider::new()),
                history,
                Arc::new(StaffInbox::new(100)),
            ),
        );
        CartService::new(Arc::new(dispatcher))
    }

    fn item(id: &str, price: i64, days: u32) -> RentalLineItem {
        RentalLineItem {
            id: id.to_string(),
            name: id.to_string(),
            category: "audio".to_string(),
            image: None,
            price_per_day: Decimal::from(price),
            rental_days: days,
            min_rental_days: 2,
            delivery_option: DeliveryOption::Standard,
            insurance_option: InsuranceOption::Basic,
            availability: Availability::Limited,
        }
    }

    #[test]
    fn test_carts_are_isolated() {
        let dir = tempfile::tempdir().expect("tempdir");
        let svc = service(&dir);
        svc.add_item("alice", item("mic", 40, 3)).expect("add");
        assert_eq!(svc.get_cart("alice").items.len(), 1);
        assert!(svc.get_cart("bob").items.is_empty());
    }

    #[test]
    fn test_update_missing_item_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let svc = service(&dir);
        svc.add_item("c", item("mic", 40, 3)).expect("add");

        let err = svc.set_rental_days("c", "amp", 5).unwrap_err();
        assert_eq!(err.kind, leasehub_core::error::ErrorKind::NotFound);
        let err = svc
            .set_delivery_option("nobody", "mic", DeliveryOption::Express)
            .unwrap_err();
        assert_eq!(err.kind, leasehub_core::error::ErrorKind::NotFound);
        assert_eq!(svc.get_cart("c").items[0].rental_days, 3);
    }

    #[test]
    fn test_days_clamped_and_totals_recomputed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let svc = service(&dir);
        svc.add_item("c", item("mic", 100, 3)).expect("add");
        let view = svc.set_rental_days("c", "mic", 1).expect("update");
        assert_eq!(view.items[0].rental_days, 2);
        assert_eq!(view.totals.subtotal, Decimal::from(200));

        let view = svc
            .set_insurance_option("c", "mic", InsuranceOption::Premium)
            .expect("update");
        assert_eq!(view.totals.subtotal, Decimal::from(600));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let dir = tempfile::tempdir().expect("tempdir");
        let svc = service(&dir);
        svc.add_item("c", item("mic", 100, 3)).expect("add");
        let view = svc.remove_item("c", "ghost");
        assert_eq!(view.items.len(), 1);
    }

    #[test]
    fn test_negative_price_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let svc = service(&dir);
        let err = svc.add_item("c", item("mic", -1, 3)).unwrap_err();
        assert_eq!(err.kind, leasehub_core::error::ErrorKind::Validation);
    }

    #[test]
    fn test_oversized_price_rejected_before_storing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let svc = service(&dir);
        svc.add_item("c", item("mic", 40, 3)).expect("add");

        let mut big = item("big", 1, 10);
        big.price_per_day = Decimal::from_i128_with_scale(10_i128.pow(28), 0);
        let err = svc.add_item("c", big).unwrap_err();
        assert_eq!(err.kind, leasehub_core::error::ErrorKind::Validation);

        let view = svc.get_cart("c");
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.totals.subtotal, Decimal::from(120));
    }

    #[tokio::test]
    async fn test_checkout_clears_cart_and_confirms() {
        let dir = tempfile::tempdir().expect("tempdir");
        let svc = service(&dir);
        let mut mic = item("mic", 100, 3);
        mic.delivery_option = DeliveryOption::Express;
        mic.insurance_option = InsuranceOption::Premium;
        svc.add_item("c", mic).expect("add");

        let receipt = svc
            .checkout(
                "c",
                CheckoutContact {
                    email: Some("renter@example.com".into()),
                    ..CheckoutContact::default()
                },
            )
            .await
            .expect("checkout");

        assert_eq!(receipt.totals.total, Decimal::from(1652));
        assert_eq!(receipt.notification.sent_channels, vec!["Email".to_string()]);
        assert!(svc.get_cart("c").items.is_empty());
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let svc = service(&dir);
        let err = svc
            .checkout("c", CheckoutContact::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, leasehub_core::error::ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_checkout_without_contact_still_succeeds() {
        let dir = tempfile::tempdir().expect("tempdir");
        let svc = service(&dir);
        svc.add_item("c", item("mic", 10, 2)).expect("add");
        let receipt = svc
            .checkout("c", CheckoutContact::default())
            .await
            .expect("checkout");
        assert!(!receipt.notification.is_success());
        assert_eq!(receipt.items.len(), 1);
    }
}
