//! Staff inbox notification entity.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use leasehub_core::AppError;

use super::payload::NotificationData;

/// Visual severity of a staff notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Urgency of a staff notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertPriority {
    Low,
    Medium,
    High,
}

impl AlertPriority {
    /// Return the priority as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for AlertPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AlertPriority {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(AppError::validation(format!(
                "Invalid priority: '{s}'. Expected one of: low, medium, high"
            ))),
        }
    }
}

/// Team a staff notification is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertCategory {
    CustomerService,
    Finance,
    Urgent,
    Operations,
    Sales,
}

impl AlertCategory {
    /// Return the category as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CustomerService => "customer_service",
            Self::Finance => "finance",
            Self::Urgent => "urgent",
            Self::Operations => "operations",
            Self::Sales => "sales",
        }
    }
}

impl fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AlertCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer_service" => Ok(Self::CustomerService),
            "finance" => Ok(Self::Finance),
            "urgent" => Ok(Self::Urgent),
            "operations" => Ok(Self::Operations),
            "sales" => Ok(Self::Sales),
            _ => Err(AppError::validation(format!("Invalid category: '{s}'"))),
        }
    }
}

/// A notification broadcast to staff and kept in the in-app inbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalNotification {
    pub id: String,
    #[serde(rename = "type")]
    pub level: AlertLevel,
    pub title: String,
    pub message: String,
    pub priority: AlertPriority,
    pub category: AlertCategory,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_at: Option<DateTime<Utc>>,
    /// Order payload for production notifications; absent for tests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<NotificationData>,
}

impl InternalNotification {
    /// Mark as read, keeping the first read time.
    pub fn mark_read(&mut self, at: DateTime<Utc>) {
        if !self.read {
            self.read = true;
            self.read_at = Some(at);
        }
    }
}
