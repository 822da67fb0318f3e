//! Status enums for orders and users.

use core::fmt;

use serde::{Deserialize, Serialize};

/// How the customer chose to pay.
///
/// Recorded on the order; the storefront never charges anything itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[serde(rename = "COD")]
    Cod,
    #[default]
    Online,
    GPay,
    PhonePe,
    Razorpay,
}

impl PaymentMethod {
    /// Display name, matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cod => "COD",
            Self::Online => "Online",
            Self::GPay => "GPay",
            Self::PhonePe => "PhonePe",
            Self::Razorpay => "Razorpay",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment state of an order, independent of fulfillment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
    Refunded,
}

/// Fulfillment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_serde_names() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Cod).expect("serialize"),
            "\"COD\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::GPay).expect("serialize"),
            "\"GPay\""
        );
        let back: PaymentMethod = serde_json::from_str("\"PhonePe\"").expect("deserialize");
        assert_eq!(back, PaymentMethod::PhonePe);
    }

    #[test]
    fn test_statuses_snake_case() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Shipped).expect("serialize"),
            "\"shipped\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Completed).expect("serialize"),
            "\"completed\""
        );
    }
}
