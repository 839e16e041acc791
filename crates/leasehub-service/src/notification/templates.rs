//! Fixed per-type message templates for every channel.

use std::fmt::Display;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use leasehub_entity::notification::{
    AlertCategory, AlertLevel, AlertPriority, AudienceTab, NotificationData, NotificationType,
};

/// Rendered in place of a payload field the caller did not supply.
const MISSING: &str = "n/a";

/// Subject and bodies of one email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Presentation of one staff notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalContent {
    pub level: AlertLevel,
    pub priority: AlertPriority,
    pub category: AlertCategory,
    pub title: String,
    pub message: String,
}

fn or_missing<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

fn money(amount: Option<Decimal>) -> String {
    amount.map_or_else(
        || MISSING.to_string(),
        |a| format!("{:.2}", a.round_dp(2)),
    )
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Lowercase plural used in staff test messages.
fn plural_label(ty: NotificationType) -> &'static str {
    match ty {
        NotificationType::ReturnReminders => "return reminders",
        NotificationType::PaymentReminders => "payment reminders",
        NotificationType::OverdueAlerts => "overdue alerts",
        NotificationType::PickupReminders => "pickup reminders",
        NotificationType::OrderConfirmation => "order confirmations",
    }
}

/// Title-case singular used in test subjects and titles.
fn title_label(ty: NotificationType) -> &'static str {
    match ty {
        NotificationType::ReturnReminders => "Return Reminder",
        NotificationType::PaymentReminders => "Payment Reminder",
        NotificationType::OverdueAlerts => "Overdue Alert",
        NotificationType::PickupReminders => "Pickup Reminder",
        NotificationType::OrderConfirmation => "Order Confirmation",
    }
}

/// Sentence-case singular used in SMS tests.
fn sentence_label(ty: NotificationType) -> &'static str {
    match ty {
        NotificationType::ReturnReminders => "Return reminder",
        NotificationType::PaymentReminders => "Payment reminder",
        NotificationType::OverdueAlerts => "Overdue alert",
        NotificationType::PickupReminders => "Pickup reminder",
        NotificationType::OrderConfirmation => "Order confirmation",
    }
}

fn style(ty: NotificationType) -> (AlertLevel, AlertPriority, AlertCategory) {
    match ty {
        NotificationType::ReturnReminders => (
            AlertLevel::Warning,
            AlertPriority::Medium,
            AlertCategory::CustomerService,
        ),
        NotificationType::PaymentReminders => {
            (AlertLevel::Info, AlertPriority::Medium, AlertCategory::Finance)
        }
        NotificationType::OverdueAlerts => {
            (AlertLevel::Error, AlertPriority::High, AlertCategory::Urgent)
        }
        NotificationType::PickupReminders => (
            AlertLevel::Info,
            AlertPriority::Medium,
            AlertCategory::Operations,
        ),
        NotificationType::OrderConfirmation => {
            (AlertLevel::Success, AlertPriority::Low, AlertCategory::Sales)
        }
    }
}

fn html_page(title: &str, badge: Option<&str>, paragraphs: &[String]) -> String {
    let badge = badge
        .map(|b| format!("<span class=\"badge\">{b}</span>"))
        .unwrap_or_default();
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<p>{}</p>", p.replace('\n', "<br>")))
        .collect();
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n<div class=\"header\"><h1>LeaseHub Suite</h1>{badge}</div>\n\
         <div class=\"content\"><h2>{title}</h2>{body}</div>\n\
         <div class=\"footer\"><p>Best regards,<br>The LeaseHub Suite Team</p></div>\n\
         </body>\n</html>"
    )
}

/// Email sent by a settings-page test.
pub fn email_test(ty: NotificationType, tab: AudienceTab, sent_at: DateTime<Utc>) -> EmailContent {
    let sent = timestamp(sent_at);
    let text = format!(
        "This is a test notification for {ty} ({tab} tab).\n\n\
         This email was sent to verify your notification settings are working correctly.\n\n\
         Notification Type: {ty}\nTab Type: {tab}\nSent At: {sent}\n\n\
         If you received this email, your email notification settings are working properly.\n\n\
         Best regards,\nThe LeaseHub Suite Team"
    );
    let html = html_page(
        "Test Notification",
        Some("TEST NOTIFICATION"),
        &[
            format!("This is a test notification for <strong>{ty}</strong> ({tab} tab)."),
            "This email was sent to verify your notification settings are working correctly."
                .to_string(),
            format!("Type: {ty}\nTab: {tab}\nSent: {sent}"),
        ],
    );

    EmailContent {
        subject: format!("[TEST] {} - LeaseHub Suite", title_label(ty)),
        text,
        html,
    }
}

/// Email sent for a real order event.
pub fn email_production(ty: NotificationType, data: &NotificationData) -> EmailContent {
    let order = &data.order_id;
    let (subject, lines) = match ty {
        NotificationType::ReturnReminders => (
            format!("Return Reminder - Order #{order}"),
            vec![
                format!(
                    "Your rental for order #{order} is due back in {} days.",
                    or_missing(data.lead_time)
                ),
                format!("Please return all items by {}.", or_missing(data.return_date.as_deref())),
            ],
        ),
        NotificationType::PaymentReminders => (
            format!("Payment Due - Order #{order}"),
            vec![
                format!("A payment of ${} is due for order #{order}.", money(data.amount)),
                "Please complete payment to avoid late fees.".to_string(),
            ],
        ),
        NotificationType::OverdueAlerts => (
            format!("URGENT: Overdue Rental - Order #{order}"),
            vec![
                format!("Your rental for order #{order} is overdue."),
                "Please return the items immediately or contact us to arrange an extension."
                    .to_string(),
            ],
        ),
        NotificationType::PickupReminders => (
            format!("Pickup Reminder - Order #{order}"),
            vec![
                format!(
                    "Your rental pickup for order #{order} is scheduled for {}.",
                    or_missing(data.pickup_date.as_deref())
                ),
                "Please be available for delivery.".to_string(),
            ],
        ),
        NotificationType::OrderConfirmation => (
            format!("Order Confirmation - Order #{order}"),
            vec![
                format!("Thank you! Order #{order} is confirmed."),
                format!(
                    "Total: ${}\nPickup: {}\nReturn: {}",
                    money(data.amount),
                    or_missing(data.pickup_date.as_deref()),
                    or_missing(data.return_date.as_deref())
                ),
            ],
        ),
    };

    let text = format!(
        "{}\n\nBest regards,\nThe LeaseHub Suite Team",
        lines.join("\n\n")
    );
    let html = html_page(&subject, None, &lines);

    EmailContent {
        subject,
        text,
        html,
    }
}

/// Text message sent by a settings-page test.
pub fn sms_test(ty: NotificationType, tab: AudienceTab, sent_at: DateTime<Utc>) -> String {
    format!(
        "[TEST] LeaseHub: {} test for {ty} ({tab} tab). Sent at {}. Your SMS notifications are working!",
        sentence_label(ty),
        timestamp(sent_at)
    )
}

/// Text message sent for a real order event.
pub fn sms_production(ty: NotificationType, data: &NotificationData) -> String {
    let order = &data.order_id;
    match ty {
        NotificationType::ReturnReminders => format!(
            "LeaseHub: Your rental return is due in {} days. Order #{order}. Please return items by {}.",
            or_missing(data.lead_time),
            or_missing(data.return_date.as_deref())
        ),
        NotificationType::PaymentReminders => format!(
            "LeaseHub: Payment of ${} is due for order #{order}. Please complete payment to avoid late fees.",
            money(data.amount)
        ),
        NotificationType::OverdueAlerts => format!(
            "LeaseHub: URGENT - Your rental is overdue! Order #{order}. Please return items immediately or contact us."
        ),
        NotificationType::PickupReminders => format!(
            "LeaseHub: Your rental pickup is scheduled for {}. Order #{order}. Please be available for delivery.",
            or_missing(data.pickup_date.as_deref())
        ),
        NotificationType::OrderConfirmation => format!(
            "LeaseHub: Order #{order} confirmed! Total: ${}. Pickup: {}. Return: {}.",
            money(data.amount),
            or_missing(data.pickup_date.as_deref()),
            or_missing(data.return_date.as_deref())
        ),
    }
}

/// Staff notification raised by a settings-page test.
pub fn internal_test(ty: NotificationType, tab: AudienceTab) -> InternalContent {
    let (level, priority, category) = style(ty);
    InternalContent {
        level,
        priority,
        category,
        title: format!("[TEST] {}", title_label(ty)),
        message: format!(
            "Test notification for {} ({tab} tab). This is a test of the internal notification system.",
            plural_label(ty)
        ),
    }
}

/// Staff notification raised for a real order event.
pub fn internal_production(ty: NotificationType, data: &NotificationData) -> InternalContent {
    let (level, priority, category) = style(ty);
    let order = &data.order_id;
    let (title, message) = match ty {
        NotificationType::ReturnReminders => (
            "Return Reminder Due",
            format!(
                "Customer return reminder for order #{order} due in {} days.",
                or_missing(data.lead_time)
            ),
        ),
        NotificationType::PaymentReminders => (
            "Payment Reminder Sent",
            format!(
                "Payment reminder sent for order #{order} - ${} due.",
                money(data.amount)
            ),
        ),
        NotificationType::OverdueAlerts => (
            "URGENT: Overdue Rental",
            format!("Order #{order} is now overdue! Customer needs immediate contact."),
        ),
        NotificationType::PickupReminders => (
            "Pickup Scheduled",
            format!(
                "Pickup reminder sent for order #{order} - scheduled for {}.",
                or_missing(data.pickup_date.as_deref())
            ),
        ),
        NotificationType::OrderConfirmation => (
            "New Order Confirmed",
            format!("Order #{order} confirmed! Total: ${}.", money(data.amount)),
        ),
    };

    InternalContent {
        level,
        priority,
        category,
        title: title.to_string(),
        message,
    }
}
