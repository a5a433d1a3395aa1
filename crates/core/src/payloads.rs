//! Mutation payloads and their client-side validation.
//!
//! Every payload is checked locally before it touches the network, and the
//! rejections use the same `{param, msg}` shape the backend produces, so a
//! form can surface either source of error next to the same field. The
//! `param` values are the wire (camelCase) field names for that reason.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::CategoryId;

/// A field-level rejection, matching the backend's `{param, msg}` wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Wire name of the offending field.
    pub param: String,
    /// Human-readable message for display next to the field.
    pub msg: String,
}

impl FieldError {
    /// Convenience constructor.
    #[must_use]
    pub fn new(param: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            msg: msg.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.param, self.msg)
    }
}

/// Client-side validation, run before any payload reaches the transport.
pub trait Validate {
    /// Check the payload.
    ///
    /// # Errors
    ///
    /// Returns every violated rule as a `{param, msg}` pair; an empty
    /// result list never occurs (a valid payload returns `Ok`).
    fn validate(&self) -> Result<(), Vec<FieldError>>;
}

fn require(errors: &mut Vec<FieldError>, param: &str, value: &str, msg: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(param, msg));
    }
}

fn finish(errors: Vec<FieldError>) -> Result<(), Vec<FieldError>> {
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// The owner-side order edit: `address` and `price`, nothing else.
///
/// Sent as one atomic write to the dedicated by-owner endpoint; it never
/// performs a status transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderOwnerUpdate {
    pub address: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl Validate for OrderOwnerUpdate {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        require(&mut errors, "address", &self.address, "Address is required");
        if self.price <= Decimal::ZERO {
            errors.push(FieldError::new("price", "Price must be greater than 0"));
        }
        finish(errors)
    }
}

/// Payload for creating a shipping address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress {
    pub alias: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub zip_code: String,
    #[serde(default)]
    pub is_default: bool,
}

impl Validate for NewAddress {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        require(&mut errors, "alias", &self.alias, "Alias is required");
        require(&mut errors, "street", &self.street, "Street is required");
        require(&mut errors, "city", &self.city, "City is required");
        require(&mut errors, "province", &self.province, "Province is required");
        require(&mut errors, "zipCode", &self.zip_code, "Zip code is required");
        finish(errors)
    }
}

/// Payload for creating or editing a schedule.
///
/// The times are carried as the raw form strings and validated against the
/// strict `HH:mm:ss` pattern; ordering between them is deliberately not
/// checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePayload {
    pub start_time: String,
    pub end_time: String,
}

impl SchedulePayload {
    const TIME_FORMAT_MSG: &'static str = "The time must be in the HH:mm:ss format (e.g. 14:30:00)";

    fn check_time(errors: &mut Vec<FieldError>, param: &str, value: &str, required_msg: &str) {
        if value.trim().is_empty() {
            errors.push(FieldError::new(param, required_msg));
        } else if value.parse::<crate::types::TimeOfDay>().is_err() {
            errors.push(FieldError::new(param, Self::TIME_FORMAT_MSG));
        }
    }
}

impl Validate for SchedulePayload {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        Self::check_time(
            &mut errors,
            "startTime",
            &self.start_time,
            "Start time is required",
        );
        Self::check_time(&mut errors, "endTime", &self.end_time, "End time is required");
        finish(errors)
    }
}

/// Payload for creating or editing a restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantPayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub address: String,
    pub postal_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping_costs: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub restaurant_category_id: CategoryId,
}

impl Validate for RestaurantPayload {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name, "Name is required");
        require(&mut errors, "address", &self.address, "Address is required");
        require(
            &mut errors,
            "postalCode",
            &self.postal_code,
            "Postal code is required",
        );
        if self.shipping_costs < Decimal::ZERO {
            errors.push(FieldError::new(
                "shippingCosts",
                "Shipping costs must be greater than or equal to 0",
            ));
        }
        finish(errors)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn order_update_rejects_zero_price_before_transport() {
        let payload = OrderOwnerUpdate {
            address: "1 Main St".to_owned(),
            price: Decimal::ZERO,
        };
        let errors = payload.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::new("price", "Price must be greater than 0")]
        );
    }

    #[test]
    fn order_update_accepts_positive_price() {
        let payload = OrderOwnerUpdate {
            address: "1 Main St".to_owned(),
            price: Decimal::new(1250, 2), // 12.50
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn order_update_requires_address() {
        let payload = OrderOwnerUpdate {
            address: "   ".to_owned(),
            price: Decimal::ONE,
        };
        let errors = payload.validate().unwrap_err();
        assert_eq!(errors, vec![FieldError::new("address", "Address is required")]);
    }

    #[test]
    fn schedule_payload_rejects_out_of_pattern_times() {
        let payload = SchedulePayload {
            start_time: "24:00:00".to_owned(),
            end_time: "12:60:00".to_owned(),
        };
        let errors = payload.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.msg.contains("HH:mm:ss")));
    }

    #[test]
    fn schedule_payload_reports_missing_times_as_required() {
        let payload = SchedulePayload {
            start_time: String::new(),
            end_time: "09:00:00".to_owned(),
        };
        let errors = payload.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::new("startTime", "Start time is required")]
        );
    }

    #[test]
    fn schedule_payload_allows_end_before_start() {
        // Cross-field ordering is not validated on this side.
        let payload = SchedulePayload {
            start_time: "22:00:00".to_owned(),
            end_time: "06:00:00".to_owned(),
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn address_payload_lists_every_missing_field() {
        let payload = NewAddress {
            alias: String::new(),
            street: String::new(),
            city: "Sevilla".to_owned(),
            province: "Sevilla".to_owned(),
            zip_code: String::new(),
            is_default: false,
        };
        let errors = payload.validate().unwrap_err();
        let params: Vec<&str> = errors.iter().map(|e| e.param.as_str()).collect();
        assert_eq!(params, vec!["alias", "street", "zipCode"]);
    }

    #[test]
    fn restaurant_payload_rejects_negative_shipping_costs() {
        let payload = RestaurantPayload {
            name: "Casa Pepe".to_owned(),
            description: None,
            address: "Calle Betis 1".to_owned(),
            postal_code: "41010".to_owned(),
            url: None,
            shipping_costs: Decimal::NEGATIVE_ONE,
            email: None,
            phone: None,
            restaurant_category_id: CategoryId::new(1),
        };
        let errors = payload.validate().unwrap_err();
        assert_eq!(errors[0].param, "shippingCosts");
    }
}
