//! One restaurant's orders.
//!
//! Orders are never created or deleted by the owner, so this collection
//! only edits (the atomic address/price write) and advances status. Both
//! writes are followed by the usual full refetch.

use platter_core::{Order, OrderId, OrderOwnerUpdate, RestaurantId};

use super::{Collection, CollectionBackend, MutateError, Outcome, UpdateBackend};
use crate::api::OwnerClient;
use crate::error::ApiError;
use crate::session::SessionToken;

/// Backend for the orders of one restaurant.
pub struct OrderBackend {
    client: OwnerClient,
    session: SessionToken,
    restaurant_id: RestaurantId,
}

/// A restaurant's orders under lifecycle management.
pub type OrderList = Collection<OrderBackend>;

impl OrderList {
    /// Open the order list of one restaurant.
    #[must_use]
    pub fn open(client: OwnerClient, session: SessionToken, restaurant_id: RestaurantId) -> Self {
        Self::new(OrderBackend {
            client,
            session,
            restaurant_id,
        })
    }

    /// Advance one cached order to its next status, then refetch.
    ///
    /// The transition machine decides the endpoint from the order's
    /// *cached* status; the refetch then shows the server's view,
    /// including any orders that moved for other reasons.
    ///
    /// # Errors
    ///
    /// [`MutateError::Mutation`] wrapping [`ApiError::TerminalState`] if
    /// the cached order is already delivered, or
    /// [`ApiError::NotFound`] if `id` is not in the cached list; the
    /// usual create/refresh contract otherwise.
    pub async fn advance(&mut self, id: OrderId) -> Result<Outcome<Order>, MutateError> {
        if self.is_detached() {
            return Ok(Outcome::Discarded);
        }
        let Some(order) = self.get(id).cloned() else {
            return Err(MutateError::Mutation(ApiError::NotFound(format!(
                "order {id} is not in the fetched list"
            ))));
        };
        let backend = self.backend();
        let advanced = backend
            .client
            .advance_order_status(&backend.session, &order)
            .await
            .map_err(MutateError::Mutation)?;
        self.reconcile().await?;
        Ok(Outcome::Applied(advanced))
    }
}

impl CollectionBackend for OrderBackend {
    type Item = Order;
    type Id = OrderId;

    fn id_of(item: &Order) -> OrderId {
        item.id
    }

    async fn fetch_all(&self) -> Result<Vec<Order>, ApiError> {
        self.client
            .get_restaurant_orders(&self.session, self.restaurant_id)
            .await
    }
}

impl UpdateBackend for OrderBackend {
    type UpdatePayload = OrderOwnerUpdate;

    async fn update(&self, id: OrderId, payload: &OrderOwnerUpdate) -> Result<Order, ApiError> {
        self.client
            .update_order_by_owner(&self.session, id, payload)
            .await
    }
}
