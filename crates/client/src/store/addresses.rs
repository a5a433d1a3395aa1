//! The user's shipping address book.
//!
//! Addresses carry the default-singleton invariant: at most one address
//! per user is the default, and only the server decides which. Setting
//! the flag here is a dedicated partial update followed by a full
//! refetch - there is deliberately no code path that flips `is_default`
//! on a cached record.

use platter_core::{AddressId, NewAddress, ShippingAddress};

use super::{Collection, CollectionBackend, CreateBackend, DeleteBackend, MutateError, Outcome};
use crate::api::OwnerClient;
use crate::error::ApiError;
use crate::session::SessionToken;

/// Backend for the logged-in user's shipping addresses.
pub struct AddressBackend {
    client: OwnerClient,
    session: SessionToken,
}

/// The user's shipping addresses under lifecycle management.
pub type AddressBook = Collection<AddressBackend>;

impl AddressBook {
    /// Open the address book for one session.
    #[must_use]
    pub fn open(client: OwnerClient, session: SessionToken) -> Self {
        Self::new(AddressBackend { client, session })
    }

    /// Make `id` the default address, then refetch.
    ///
    /// The server clears the flag on whichever address previously held
    /// it; re-reading the list is the only way to learn the resulting
    /// set, which is why this never touches the cache directly.
    ///
    /// # Errors
    ///
    /// Same contract as [`Collection::create`].
    pub async fn set_default(&mut self, id: AddressId) -> Result<Outcome<()>, MutateError> {
        if self.is_detached() {
            return Ok(Outcome::Discarded);
        }
        let backend = self.backend();
        backend
            .client
            .set_default_address(&backend.session, id)
            .await
            .map_err(MutateError::Mutation)?;
        self.reconcile().await?;
        Ok(Outcome::Applied(()))
    }

    /// The current default address, if the cached list has one.
    #[must_use]
    pub fn default_address(&self) -> Option<&ShippingAddress> {
        self.items().iter().find(|address| address.is_default)
    }
}

impl CollectionBackend for AddressBackend {
    type Item = ShippingAddress;
    type Id = AddressId;

    fn id_of(item: &ShippingAddress) -> AddressId {
        item.id
    }

    async fn fetch_all(&self) -> Result<Vec<ShippingAddress>, ApiError> {
        self.client.get_addresses(&self.session).await
    }
}

impl CreateBackend for AddressBackend {
    type CreatePayload = NewAddress;

    async fn create(&self, payload: &NewAddress) -> Result<ShippingAddress, ApiError> {
        self.client.create_address(&self.session, payload).await
    }
}

impl DeleteBackend for AddressBackend {
    async fn delete(&self, id: AddressId) -> Result<(), ApiError> {
        self.client.delete_address(&self.session, id).await
    }
}
