//! Production notification payload.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order details a production notification is rendered from.
///
/// Only `order_id` is always present; the rest depends on the notification type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    pub order_id: String,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
}

impl NotificationData {
    /// A payload carrying only the order id.
    pub fn for_order(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_payload() {
        let data: NotificationData =
            serde_json::from_str(r#"{"orderId": "A-17", "amount": 1652.5}"#).expect("parse");
        assert_eq!(data.order_id, "A-17");
        assert_eq!(data.amount, Some(Decimal::new(16525, 1)));
        assert!(data.customer_email.is_none());

        let json = serde_json::to_value(&data).expect("serialize");
        assert!(json.get("leadTime").is_none());
    }
}
