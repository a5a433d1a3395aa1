//! Shipping address operations.

use tracing::instrument;

use platter_core::{AddressId, NewAddress, ShippingAddress, Validate};

use super::OwnerClient;
use crate::error::ApiError;
use crate::session::SessionToken;

impl OwnerClient {
    /// List every shipping address of the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, session))]
    pub async fn get_addresses(
        &self,
        session: &SessionToken,
    ) -> Result<Vec<ShippingAddress>, ApiError> {
        self.get_json("shippingaddresses", session).await
    }

    /// Create a shipping address.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the payload fails client-side
    /// checks or the backend rejects it, with one `{param, msg}` pair per
    /// offending field.
    #[instrument(skip(self, session, payload))]
    pub async fn create_address(
        &self,
        session: &SessionToken,
        payload: &NewAddress,
    ) -> Result<ShippingAddress, ApiError> {
        payload.validate().map_err(ApiError::Validation)?;
        self.post_json("shippingaddresses", session, payload).await
    }

    /// Mark one address as the default.
    ///
    /// This is a dedicated partial update (PATCH) that mutates exactly one
    /// field; it is not interchangeable with a full-record replace. The
    /// backend clears the flag on whichever address previously held it, so
    /// the caller must refetch the list rather than flip flags locally.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, session), fields(address_id = %id))]
    pub async fn set_default_address(
        &self,
        session: &SessionToken,
        id: AddressId,
    ) -> Result<ShippingAddress, ApiError> {
        self.patch_json(&format!("shippingaddresses/{id}/default"), session)
            .await
    }

    /// Delete a shipping address.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, session), fields(address_id = %id))]
    pub async fn delete_address(
        &self,
        session: &SessionToken,
        id: AddressId,
    ) -> Result<(), ApiError> {
        self.delete_resource(&format!("shippingaddresses/{id}"), session)
            .await
    }
}
