//! The owner's restaurants.

use platter_core::{Restaurant, RestaurantId, RestaurantPayload};

use super::{Collection, CollectionBackend, CreateBackend, DeleteBackend, UpdateBackend};
use crate::api::OwnerClient;
use crate::error::ApiError;
use crate::session::SessionToken;

/// Backend for the restaurants owned by the logged-in user.
pub struct RestaurantBackend {
    client: OwnerClient,
    session: SessionToken,
}

/// The owner's restaurants under lifecycle management.
pub type RestaurantList = Collection<RestaurantBackend>;

impl RestaurantList {
    /// Open the restaurant list for one session.
    #[must_use]
    pub fn open(client: OwnerClient, session: SessionToken) -> Self {
        Self::new(RestaurantBackend { client, session })
    }
}

impl CollectionBackend for RestaurantBackend {
    type Item = Restaurant;
    type Id = RestaurantId;

    fn id_of(item: &Restaurant) -> RestaurantId {
        item.id
    }

    async fn fetch_all(&self) -> Result<Vec<Restaurant>, ApiError> {
        self.client.get_my_restaurants(&self.session).await
    }
}

impl CreateBackend for RestaurantBackend {
    type CreatePayload = RestaurantPayload;

    async fn create(&self, payload: &RestaurantPayload) -> Result<Restaurant, ApiError> {
        self.client.create_restaurant(&self.session, payload).await
    }
}

impl UpdateBackend for RestaurantBackend {
    type UpdatePayload = RestaurantPayload;

    async fn update(
        &self,
        id: RestaurantId,
        payload: &RestaurantPayload,
    ) -> Result<Restaurant, ApiError> {
        self.client
            .update_restaurant(&self.session, id, payload)
            .await
    }
}

impl DeleteBackend for RestaurantBackend {
    async fn delete(&self, id: RestaurantId) -> Result<(), ApiError> {
        self.client.delete_restaurant(&self.session, id).await
    }
}
