//! Schedule operations, scoped to their owning restaurant.

use tracing::instrument;

use platter_core::{RestaurantId, Schedule, ScheduleId, SchedulePayload, Validate};

use super::OwnerClient;
use crate::error::ApiError;
use crate::session::SessionToken;

impl OwnerClient {
    /// List a restaurant's schedules.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, session), fields(restaurant_id = %restaurant_id))]
    pub async fn get_restaurant_schedules(
        &self,
        session: &SessionToken,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<Schedule>, ApiError> {
        self.get_json(&format!("restaurants/{restaurant_id}/schedules"), session)
            .await
    }

    /// Create a schedule for a restaurant.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if a time is missing or does not
    /// match the strict `HH:mm:ss` pattern, or if the backend rejects the
    /// payload.
    #[instrument(skip(self, session, payload), fields(restaurant_id = %restaurant_id))]
    pub async fn create_schedule(
        &self,
        session: &SessionToken,
        restaurant_id: RestaurantId,
        payload: &SchedulePayload,
    ) -> Result<Schedule, ApiError> {
        payload.validate().map_err(ApiError::Validation)?;
        self.post_json(
            &format!("restaurants/{restaurant_id}/schedules"),
            session,
            payload,
        )
        .await
    }

    /// Update a schedule.
    ///
    /// # Errors
    ///
    /// Same contract as [`OwnerClient::create_schedule`].
    #[instrument(skip(self, session, payload), fields(restaurant_id = %restaurant_id, schedule_id = %id))]
    pub async fn update_schedule(
        &self,
        session: &SessionToken,
        restaurant_id: RestaurantId,
        id: ScheduleId,
        payload: &SchedulePayload,
    ) -> Result<Schedule, ApiError> {
        payload.validate().map_err(ApiError::Validation)?;
        self.put_json(
            &format!("restaurants/{restaurant_id}/schedules/{id}"),
            session,
            payload,
        )
        .await
    }

    /// Delete a schedule.
    ///
    /// Deletion detaches the schedule's products server-side, so any
    /// cached product association (on this schedule or its siblings) is
    /// stale the moment this returns. Callers must refetch; the
    /// lifecycle layer does so unconditionally.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, session), fields(restaurant_id = %restaurant_id, schedule_id = %id))]
    pub async fn delete_schedule(
        &self,
        session: &SessionToken,
        restaurant_id: RestaurantId,
        id: ScheduleId,
    ) -> Result<(), ApiError> {
        self.delete_resource(
            &format!("restaurants/{restaurant_id}/schedules/{id}"),
            session,
        )
        .await
    }
}
