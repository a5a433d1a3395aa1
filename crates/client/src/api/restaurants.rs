//! Restaurant management operations.

use tracing::instrument;

use platter_core::{
    Analytics, Order, Restaurant, RestaurantCategory, RestaurantId, RestaurantPayload, Validate,
};

use super::OwnerClient;
use crate::error::ApiError;
use crate::session::SessionToken;

impl OwnerClient {
    /// List the restaurants owned by the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, session))]
    pub async fn get_my_restaurants(
        &self,
        session: &SessionToken,
    ) -> Result<Vec<Restaurant>, ApiError> {
        self.get_json("users/myrestaurants", session).await
    }

    /// Get one restaurant with its nested products and schedules.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, session), fields(restaurant_id = %id))]
    pub async fn get_restaurant_detail(
        &self,
        session: &SessionToken,
        id: RestaurantId,
    ) -> Result<Restaurant, ApiError> {
        self.get_json(&format!("restaurants/{id}"), session).await
    }

    /// List the available restaurant categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, session))]
    pub async fn get_restaurant_categories(
        &self,
        session: &SessionToken,
    ) -> Result<Vec<RestaurantCategory>, ApiError> {
        self.get_json("restaurantCategories", session).await
    }

    /// Create a restaurant.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the payload fails client-side
    /// checks or the backend rejects it.
    #[instrument(skip(self, session, payload))]
    pub async fn create_restaurant(
        &self,
        session: &SessionToken,
        payload: &RestaurantPayload,
    ) -> Result<Restaurant, ApiError> {
        payload.validate().map_err(ApiError::Validation)?;
        self.post_json("restaurants", session, payload).await
    }

    /// Update a restaurant.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the payload fails client-side
    /// checks or the backend rejects it.
    #[instrument(skip(self, session, payload), fields(restaurant_id = %id))]
    pub async fn update_restaurant(
        &self,
        session: &SessionToken,
        id: RestaurantId,
        payload: &RestaurantPayload,
    ) -> Result<Restaurant, ApiError> {
        payload.validate().map_err(ApiError::Validation)?;
        self.put_json(&format!("restaurants/{id}"), session, payload)
            .await
    }

    /// Delete a restaurant.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, session), fields(restaurant_id = %id))]
    pub async fn delete_restaurant(
        &self,
        session: &SessionToken,
        id: RestaurantId,
    ) -> Result<(), ApiError> {
        self.delete_resource(&format!("restaurants/{id}"), session)
            .await
    }

    /// List every order placed at a restaurant.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, session), fields(restaurant_id = %id))]
    pub async fn get_restaurant_orders(
        &self,
        session: &SessionToken,
        id: RestaurantId,
    ) -> Result<Vec<Order>, ApiError> {
        self.get_json(&format!("restaurants/{id}/orders"), session)
            .await
    }

    /// Get today's order analytics for a restaurant.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, session), fields(restaurant_id = %id))]
    pub async fn get_restaurant_analytics(
        &self,
        session: &SessionToken,
        id: RestaurantId,
    ) -> Result<Analytics, ApiError> {
        self.get_json(&format!("restaurants/{id}/analytics"), session)
            .await
    }
}
