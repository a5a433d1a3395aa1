//! One restaurant's schedules.
//!
//! Deleting a schedule has a cascade effect: the server detaches every
//! product that referenced it, which also changes what sibling schedules
//! and the restaurant's product list report. The generic delete already
//! refetches the whole collection, and that is load-bearing here - a
//! local splice of the deleted ID would leave every cached product
//! association wrong.

use platter_core::{RestaurantId, Schedule, ScheduleId, SchedulePayload};

use super::{Collection, CollectionBackend, CreateBackend, DeleteBackend, UpdateBackend};
use crate::api::OwnerClient;
use crate::error::ApiError;
use crate::session::SessionToken;

/// Backend for the schedules of one restaurant.
pub struct ScheduleBackend {
    client: OwnerClient,
    session: SessionToken,
    restaurant_id: RestaurantId,
}

/// A restaurant's schedules under lifecycle management.
pub type ScheduleBoard = Collection<ScheduleBackend>;

impl ScheduleBoard {
    /// Open the schedule board of one restaurant.
    #[must_use]
    pub fn open(client: OwnerClient, session: SessionToken, restaurant_id: RestaurantId) -> Self {
        Self::new(ScheduleBackend {
            client,
            session,
            restaurant_id,
        })
    }

    /// Total number of products attached across cached schedules.
    ///
    /// Only meaningful right after a successful refresh; any mutation
    /// invalidates it until the reconciling refetch lands.
    #[must_use]
    pub fn total_products_attached(&self) -> usize {
        self.items().iter().map(|s| s.products.len()).sum()
    }
}

impl CollectionBackend for ScheduleBackend {
    type Item = Schedule;
    type Id = ScheduleId;

    fn id_of(item: &Schedule) -> ScheduleId {
        item.id
    }

    async fn fetch_all(&self) -> Result<Vec<Schedule>, ApiError> {
        self.client
            .get_restaurant_schedules(&self.session, self.restaurant_id)
            .await
    }
}

impl CreateBackend for ScheduleBackend {
    type CreatePayload = SchedulePayload;

    async fn create(&self, payload: &SchedulePayload) -> Result<Schedule, ApiError> {
        self.client
            .create_schedule(&self.session, self.restaurant_id, payload)
            .await
    }
}

impl UpdateBackend for ScheduleBackend {
    type UpdatePayload = SchedulePayload;

    async fn update(&self, id: ScheduleId, payload: &SchedulePayload) -> Result<Schedule, ApiError> {
        self.client
            .update_schedule(&self.session, self.restaurant_id, id, payload)
            .await
    }
}

impl DeleteBackend for ScheduleBackend {
    async fn delete(&self, id: ScheduleId) -> Result<(), ApiError> {
        self.client
            .delete_schedule(&self.session, self.restaurant_id, id)
            .await
    }
}
