//! Order operations for the restaurant owner.
//!
//! Two disjoint kinds of write exist here and must not be conflated:
//! the field-level edit (`address` and `price`, one atomic PUT against the
//! by-owner path, never touches `status`) and the status advance (a PATCH
//! whose endpoint is chosen by the transition machine).

use tracing::instrument;

use platter_core::{Order, OrderId, OrderOwnerUpdate, Validate};

use super::OwnerClient;
use crate::error::ApiError;
use crate::session::SessionToken;

impl OwnerClient {
    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, session), fields(order_id = %id))]
    pub async fn get_order(
        &self,
        session: &SessionToken,
        id: OrderId,
    ) -> Result<Order, ApiError> {
        self.get_json(&format!("orders/{id}"), session).await
    }

    /// Update the owner-editable fields of an order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the payload fails client-side
    /// checks (empty address, non-positive price) or the backend rejects
    /// it.
    #[instrument(skip(self, session, payload), fields(order_id = %id))]
    pub async fn update_order_by_owner(
        &self,
        session: &SessionToken,
        id: OrderId,
        payload: &OrderOwnerUpdate,
    ) -> Result<Order, ApiError> {
        payload.validate().map_err(ApiError::Validation)?;
        self.put_json(&format!("orders/{id}/by-owner"), session, payload)
            .await
    }

    /// Advance an order to its next status.
    ///
    /// The transition machine picks the single endpoint that moves the
    /// order forward by one step (`confirm`, `send`, or `deliver`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::TerminalState`] if the order is already
    /// delivered - a logic error in the calling layer, surfaced loudly
    /// rather than silently re-issuing the last transition.
    #[instrument(skip(self, session, order), fields(order_id = %order.id, status = %order.status))]
    pub async fn advance_order_status(
        &self,
        session: &SessionToken,
        order: &Order,
    ) -> Result<Order, ApiError> {
        let action = order.status.next_action()?;
        self.patch_json(
            &format!("orders/{}/{}", order.id, action.path_segment()),
            session,
        )
        .await
    }
}
