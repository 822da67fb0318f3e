//! Shipping addresses and their validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use skinaura_core::AddressId;

/// Field-level validation errors, keyed by the serialized field name.
///
/// Non-fatal: they block checkout submission and are re-presented inline on
/// the form, never treated as a server failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// Whether any field failed validation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The message recorded for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// A shipping address as entered on the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub full_name: String,
    pub address_line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone_number: String,
}

impl ShippingAddress {
    /// Validate the address for checkout.
    ///
    /// All fields except `address_line2` are required. The phone number must
    /// normalize (whitespace removed) to exactly 10 digits and the ZIP code
    /// to exactly 6 digits.
    ///
    /// # Errors
    ///
    /// Returns the full field-error map when any field fails.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let required: [(&'static str, &str); 6] = [
            ("fullName", &self.full_name),
            ("addressLine1", &self.address_line1),
            ("city", &self.city),
            ("state", &self.state),
            ("zipCode", &self.zip_code),
            ("phoneNumber", &self.phone_number),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                errors.push(field, "This field is required");
            }
        }

        if !self.phone_number.trim().is_empty() && !is_digits(&self.phone_number, 10) {
            errors.push("phoneNumber", "Please enter a valid 10-digit phone number");
        }

        if !self.zip_code.trim().is_empty() && !is_digits(&self.zip_code, 6) {
            errors.push("zipCode", "Please enter a valid 6-digit ZIP code");
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Whether `value`, with all whitespace removed, is exactly `len` ASCII
/// digits.
fn is_digits(value: &str, len: usize) -> bool {
    let normalized: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    normalized.len() == len && normalized.chars().all(|c| c.is_ascii_digit())
}

/// A shipping address saved to the user's address book.
///
/// Invariant: at most one saved address per user has `is_default` set; the
/// address book enforces this on every default change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedAddress {
    pub id: AddressId,
    #[serde(flatten)]
    pub address: ShippingAddress,
    #[serde(default)]
    pub is_default: bool,
}

/// Test fixtures shared across the crate's unit tests.
#[cfg(test)]
pub(crate) mod fixtures {
    use super::ShippingAddress;

    pub(crate) fn valid_address() -> ShippingAddress {
        ShippingAddress {
            full_name: "Priya Sharma".to_owned(),
            address_line1: "42 MG Road".to_owned(),
            address_line2: None,
            city: "Mumbai".to_owned(),
            state: "Maharashtra".to_owned(),
            zip_code: "400012".to_owned(),
            phone_number: "9876543210".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::valid_address;
    use super::*;

    #[test]
    fn test_valid_address_passes() {
        assert!(valid_address().validate().is_ok());
    }

    #[test]
    fn test_missing_required_fields() {
        let errors = ShippingAddress::default()
            .validate()
            .expect_err("empty address must fail");
        assert_eq!(errors.len(), 6);
        assert_eq!(errors.get("fullName"), Some("This field is required"));
        // address_line2 is optional and never reported.
        assert_eq!(errors.get("addressLine2"), None);
    }

    #[test]
    fn test_phone_number_length() {
        let mut address = valid_address();
        address.phone_number = "98765432".to_owned(); // 8 digits
        let errors = address.validate().expect_err("short phone must fail");
        assert_eq!(
            errors.get("phoneNumber"),
            Some("Please enter a valid 10-digit phone number")
        );

        address.phone_number = "9876543210".to_owned();
        assert!(address.validate().is_ok());
    }

    #[test]
    fn test_phone_number_whitespace_normalized() {
        let mut address = valid_address();
        address.phone_number = "98765 43210".to_owned();
        assert!(address.validate().is_ok());
    }

    #[test]
    fn test_zip_code_length() {
        let mut address = valid_address();
        address.zip_code = "40001".to_owned(); // 5 digits
        let errors = address.validate().expect_err("short zip must fail");
        assert_eq!(
            errors.get("zipCode"),
            Some("Please enter a valid 6-digit ZIP code")
        );

        address.zip_code = "400012".to_owned();
        assert!(address.validate().is_ok());
    }

    #[test]
    fn test_non_digit_phone_rejected() {
        let mut address = valid_address();
        address.phone_number = "98765abcde".to_owned();
        assert!(address.validate().is_err());
    }

    #[test]
    fn test_saved_address_serde_flatten() {
        let saved = SavedAddress {
            id: AddressId::new("addr-1"),
            address: valid_address(),
            is_default: true,
        };
        let json = serde_json::to_value(&saved).expect("serialize");
        // Flattened: address fields sit alongside id/isDefault.
        assert_eq!(json["fullName"], "Priya Sharma");
        assert_eq!(json["isDefault"], true);
        let back: SavedAddress = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, saved);
    }
}
