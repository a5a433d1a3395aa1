//! Wire representations of backend records.
//!
//! Field names follow the backend's camelCase JSON. These structs are the
//! client's *transient* view of server-owned data: they are replaced
//! wholesale by a refetch after every mutation, never patched in place.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{
    AddressId, CategoryId, OrderId, OrderStatus, ProductId, RestaurantId, ScheduleId, TimeOfDay,
};

/// A customer order, as seen by the restaurant owner.
///
/// Owners may edit `address` and `price` (one atomic write) and advance
/// `status` through its transition actions; everything else is read-only
/// from this side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    pub address: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub restaurant_id: RestaurantId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A shipping address owned by the logged-in user.
///
/// At most one address per user carries `is_default = true`; the backend
/// enforces that, and the client re-reads the whole list rather than
/// flipping flags locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub id: AddressId,
    pub alias: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub zip_code: String,
    pub is_default: bool,
}

/// An opening-hours window of a restaurant.
///
/// `products` lists the products attached to this schedule and is read-only
/// here. Deleting a schedule detaches them server-side, so the list (and
/// any sibling's) is stale the moment a delete commits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: ScheduleId,
    pub restaurant_id: RestaurantId,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(default)]
    pub products: Vec<Product>,
}

/// A product offered by a restaurant. Read-only for the owner client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub availability: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_id: Option<ScheduleId>,
}

/// A restaurant owned by the logged-in user.
///
/// The detail endpoint nests `products` and `schedules`; the list endpoint
/// omits them, hence the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: RestaurantId,
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
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub schedules: Vec<Schedule>,
}

/// A restaurant category (pizza, burgers, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantCategory {
    pub id: CategoryId,
    pub name: String,
}

/// Daily order analytics for one restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    #[serde(with = "rust_decimal::serde::float")]
    pub invoiced_today: Decimal,
    pub num_pending_orders: i64,
    pub num_delivered_today_orders: i64,
    pub num_yesterday_orders: i64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn order_deserializes_from_backend_json() {
        let order: Order = serde_json::from_str(
            r#"{
                "id": 10,
                "status": "in process",
                "address": "1 Main St",
                "price": 12.5,
                "restaurantId": 3,
                "createdAt": "2026-03-01T12:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(order.id, OrderId::new(10));
        assert_eq!(order.status, OrderStatus::InProcess);
        assert_eq!(order.price, Decimal::new(125, 1));
    }

    #[test]
    fn schedule_products_default_to_empty() {
        let schedule: Schedule = serde_json::from_str(
            r#"{"id": 1, "restaurantId": 2, "startTime": "09:00:00", "endTime": "17:00:00"}"#,
        )
        .unwrap();
        assert!(schedule.products.is_empty());
        assert_eq!(schedule.start_time.to_string(), "09:00:00");
    }

    #[test]
    fn restaurant_list_entry_omits_nested_collections() {
        let restaurant: Restaurant = serde_json::from_str(
            r#"{
                "id": 1,
                "name": "Casa Pepe",
                "address": "Calle Betis 1",
                "postalCode": "41010",
                "shippingCosts": 2.5,
                "restaurantCategoryId": 4
            }"#,
        )
        .unwrap();
        assert!(restaurant.products.is_empty());
        assert!(restaurant.schedules.is_empty());
    }
}
