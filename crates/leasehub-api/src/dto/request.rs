//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use leasehub_entity::cart::{DeliveryOption, InsuranceOption, RentalLineItem};
use leasehub_entity::notification::{AudienceTab, NotificationData, NotificationSettings};
use leasehub_entity::user::UpdateUser;
use leasehub_service::cart::CheckoutContact;
use leasehub_service::user;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,
    pub phone: Option<String>,
}

impl From<RegisterRequest> for user::RegisterRequest {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            phone: req.phone,
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl From<LoginRequest> for user::LoginRequest {
    fn from(req: LoginRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
        }
    }
}

/// Update profile request. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(email(message = "A valid email is required"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub profile_picture: Option<String>,
}

impl From<UpdateProfileRequest> for UpdateUser {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
            address: req.address,
            profile_picture: req.profile_picture,
        }
    }
}

/// Add (or reconfigure) a cart line item.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddItemRequest {
    #[serde(flatten)]
    pub item: RentalLineItem,
}

/// Set rental days for a line item. Values below the item's minimum are
/// clamped by the cart rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetRentalDaysRequest {
    pub rental_days: u32,
}

/// Set the delivery tier for a line item.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetDeliveryRequest {
    pub delivery_option: DeliveryOption,
}

/// Set the insurance tier for a line item.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetInsuranceRequest {
    pub insurance_option: InsuranceOption,
}

/// Checkout request. Contact details drive the order confirmation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub pickup_date: Option<String>,
    pub return_date: Option<String>,
}

impl From<CheckoutRequest> for CheckoutContact {
    fn from(req: CheckoutRequest) -> Self {
        Self {
            email: req.email,
            phone: req.phone,
            pickup_date: req.pickup_date,
            return_date: req.return_date,
        }
    }
}

/// Ad-hoc price quote.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuoteRequest {
    pub items: Vec<RentalLineItem>,
}

/// Replace the persisted notification settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveSettingsRequest {
    pub settings: NotificationSettings,
}

/// Settings-page test dispatch.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TestNotificationRequest {
    /// Audience tab being tested.
    #[serde(rename = "type")]
    pub tab: AudienceTab,
    /// Restrict the test to one notification type.
    pub notification_type: Option<String>,
    /// Unsaved settings from the page; persisted settings when absent.
    pub settings: Option<NotificationSettings>,
    #[validate(email(message = "A valid test email is required"))]
    pub test_email: Option<String>,
    pub test_phone: Option<String>,
}

/// Production dispatch of one notification type.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationRequest {
    pub notification_type: String,
    pub data: NotificationData,
}

/// History filters. `days` defaults to the configured window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryParams {
    #[serde(rename = "type")]
    pub notification_type: Option<String>,
    pub channel: Option<String>,
    pub event: Option<String>,
    pub days: Option<i64>,
}

/// Staff inbox filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InboxParams {
    pub limit: Option<usize>,
    pub category: Option<String>,
    pub priority: Option<String>,
}
