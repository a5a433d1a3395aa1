//! Resource lifecycle layer: cached collections with a strict
//! mutate-then-refetch protocol.
//!
//! The client holds no durable state. A [`Collection`] caches the last
//! list the server returned and guarantees that after *every* successful
//! mutation the whole list is refetched before the collection is
//! considered consistent again. Items are never spliced in or out
//! locally: a create's response, a delete's acknowledgement, or a
//! flipped flag may all be accompanied by server-side effects on sibling
//! records (the default-address flag moving, a schedule delete detaching
//! products), and only a fresh read can observe those.
//!
//! Failure semantics:
//!
//! - A failed write ([`MutateError::Mutation`]) leaves the cached list
//!   untouched; validation failures carry their `{param, msg}` pairs for
//!   field-level display.
//! - A committed write whose reconciling refetch fails
//!   ([`MutateError::Refresh`]) marks the collection stale; the write
//!   stands on the server and the caller should offer a manual refresh.
//! - The pending-delete marker (UI confirmation state) is cleared whether
//!   the delete succeeds or fails, so no view is stuck confirming.
//!
//! A collection whose view has been torn down is [`Collection::detach`]ed:
//! operations on it complete as [`Outcome::Discarded`] without touching
//! state.

mod addresses;
mod orders;
mod restaurants;
mod schedules;

pub use addresses::{AddressBackend, AddressBook};
pub use orders::{OrderBackend, OrderList};
pub use restaurants::{RestaurantBackend, RestaurantList};
pub use schedules::{ScheduleBackend, ScheduleBoard};

use thiserror::Error;

use platter_core::FieldError;

use crate::error::ApiError;

/// Error from a mutating collection operation.
#[derive(Debug, Error)]
pub enum MutateError {
    /// The write itself failed. Local state is untouched; nothing changed
    /// on the server either, as far as this client can tell.
    #[error(transparent)]
    Mutation(ApiError),

    /// The write committed but the reconciling refetch failed. The cached
    /// list is stale until a manual [`Collection::refresh`] succeeds.
    #[error("write committed but refetch failed: {0}")]
    Refresh(ApiError),
}

impl MutateError {
    /// The field-level rejections, if the write failed validation.
    #[must_use]
    pub fn validation_errors(&self) -> Option<&[FieldError]> {
        match self {
            Self::Mutation(err) => err.validation_errors(),
            Self::Refresh(_) => None,
        }
    }
}

/// Whether an operation's result was applied to the collection or
/// discarded because the owning view is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    /// The operation ran and its result is reflected in the collection.
    Applied(T),
    /// The collection was detached; nothing was done and no state changed.
    Discarded,
}

impl<T> Outcome<T> {
    /// The applied value, if any.
    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Discarded => None,
        }
    }

    /// True if the result was thrown away due to a detached view.
    pub const fn is_discarded(&self) -> bool {
        matches!(self, Self::Discarded)
    }
}

/// Fetch-side contract every collection backend provides.
pub trait CollectionBackend {
    /// Record type held by the collection.
    type Item;
    /// Identifier for records of this collection.
    type Id: Copy + PartialEq + std::fmt::Display;

    /// The identifier of one record.
    fn id_of(item: &Self::Item) -> Self::Id;

    /// Re-read the entire collection for the current owner.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Self::Item>, ApiError>>;
}

/// Backends whose records the owner may create.
pub trait CreateBackend: CollectionBackend {
    /// Creation payload; validated client-side before transport.
    type CreatePayload;

    /// Create one record.
    fn create(
        &self,
        payload: &Self::CreatePayload,
    ) -> impl Future<Output = Result<Self::Item, ApiError>>;
}

/// Backends whose records the owner may edit.
pub trait UpdateBackend: CollectionBackend {
    /// Update payload; validated client-side before transport.
    type UpdatePayload;

    /// Update one record atomically.
    fn update(
        &self,
        id: Self::Id,
        payload: &Self::UpdatePayload,
    ) -> impl Future<Output = Result<Self::Item, ApiError>>;
}

/// Backends whose records the owner may delete.
pub trait DeleteBackend: CollectionBackend {
    /// Delete one record.
    fn delete(&self, id: Self::Id) -> impl Future<Output = Result<(), ApiError>>;
}

/// A refetch-driven cache of one server-owned collection.
///
/// Mutating methods take `&mut self`, so overlapping in-flight mutations
/// against one collection are unrepresentable - each user action awaits
/// the write *and* the reconciling refetch before the next can start.
pub struct Collection<B: CollectionBackend> {
    backend: B,
    items: Vec<B::Item>,
    pending_delete: Option<B::Id>,
    stale: bool,
    detached: bool,
}

impl<B: CollectionBackend> Collection<B> {
    /// Wrap a backend. The collection starts empty; call
    /// [`Collection::refresh`] to load it.
    pub const fn new(backend: B) -> Self {
        Self {
            backend,
            items: Vec::new(),
            pending_delete: None,
            stale: false,
            detached: false,
        }
    }

    /// The last list the server returned.
    pub fn items(&self) -> &[B::Item] {
        &self.items
    }

    /// Look up a cached record by ID.
    pub fn get(&self, id: B::Id) -> Option<&B::Item> {
        self.items.iter().find(|item| B::id_of(item) == id)
    }

    /// True if a committed write has not yet been reconciled by a
    /// successful refetch.
    pub const fn is_stale(&self) -> bool {
        self.stale
    }

    /// The record currently awaiting delete confirmation, if any.
    pub fn pending_delete(&self) -> Option<B::Id> {
        self.pending_delete
    }

    /// Record that the UI is asking the user to confirm a delete.
    pub fn mark_for_deletion(&mut self, id: B::Id) {
        self.pending_delete = Some(id);
    }

    /// The user backed out of the confirmation.
    pub fn clear_pending_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Detach the collection from its (now torn down) view. Subsequent
    /// operations complete as [`Outcome::Discarded`] without issuing
    /// network calls or touching cached state.
    pub fn detach(&mut self) {
        self.detached = true;
    }

    /// True once [`Collection::detach`] has been called.
    pub const fn is_detached(&self) -> bool {
        self.detached
    }

    pub(crate) const fn backend(&self) -> &B {
        &self.backend
    }

    /// Re-read the whole collection from the server.
    ///
    /// This is the single source of truth after every mutation, and is
    /// idempotent: absent intervening writes, two refreshes yield the
    /// same list.
    ///
    /// # Errors
    ///
    /// Transport-class failures are returned as-is; the cached list keeps
    /// its previous contents.
    pub async fn refresh(&mut self) -> Result<Outcome<()>, ApiError> {
        if self.detached {
            return Ok(Outcome::Discarded);
        }
        let items = self.backend.fetch_all().await?;
        self.items = items;
        self.stale = false;
        Ok(Outcome::Applied(()))
    }

    /// Refetch after a committed write. On failure the collection is
    /// stale: the write stands server-side and only a later successful
    /// refresh reconciles the cache.
    pub(crate) async fn reconcile(&mut self) -> Result<(), MutateError> {
        match self.backend.fetch_all().await {
            Ok(items) => {
                self.items = items;
                self.stale = false;
                Ok(())
            }
            Err(err) => {
                self.stale = true;
                Err(MutateError::Refresh(err))
            }
        }
    }
}

impl<B: CreateBackend> Collection<B> {
    /// Create a record, then refetch the whole collection.
    ///
    /// # Errors
    ///
    /// [`MutateError::Mutation`] if validation or the write fails (cache
    /// untouched); [`MutateError::Refresh`] if the write committed but
    /// the refetch did not.
    pub async fn create(
        &mut self,
        payload: &B::CreatePayload,
    ) -> Result<Outcome<B::Item>, MutateError> {
        if self.detached {
            return Ok(Outcome::Discarded);
        }
        let created = self
            .backend
            .create(payload)
            .await
            .map_err(MutateError::Mutation)?;
        self.reconcile().await?;
        Ok(Outcome::Applied(created))
    }
}

impl<B: UpdateBackend> Collection<B> {
    /// Update a record atomically, then refetch the whole collection.
    ///
    /// # Errors
    ///
    /// Same contract as [`Collection::create`].
    pub async fn update(
        &mut self,
        id: B::Id,
        payload: &B::UpdatePayload,
    ) -> Result<Outcome<B::Item>, MutateError> {
        if self.detached {
            return Ok(Outcome::Discarded);
        }
        let updated = self
            .backend
            .update(id, payload)
            .await
            .map_err(MutateError::Mutation)?;
        self.reconcile().await?;
        Ok(Outcome::Applied(updated))
    }
}

impl<B: DeleteBackend> Collection<B> {
    /// Delete a record, then refetch the whole collection.
    ///
    /// The pending-delete marker is cleared on success *and* on failure,
    /// so a view never sticks in its confirming state. The cached list is
    /// only ever replaced by the refetch - never by locally filtering out
    /// the deleted ID, which would leave sibling records' server-computed
    /// fields stale.
    ///
    /// # Errors
    ///
    /// Same contract as [`Collection::create`].
    pub async fn delete(&mut self, id: B::Id) -> Result<Outcome<()>, MutateError> {
        if self.detached {
            self.pending_delete = None;
            return Ok(Outcome::Discarded);
        }
        let result = self.backend.delete(id).await;
        self.pending_delete = None;
        result.map_err(MutateError::Mutation)?;
        self.reconcile().await?;
        Ok(Outcome::Applied(()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use reqwest::StatusCode;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Row {
        id: i32,
        name: String,
    }

    /// In-memory stand-in for the backend, with failure injection and a
    /// server-side side effect on create (a bonus row), so tests can tell
    /// a real refetch from a local splice.
    #[derive(Default)]
    struct FakeServer {
        rows: Mutex<Vec<Row>>,
        fail_next_fetch: AtomicBool,
        fail_next_delete: AtomicBool,
        bonus_row_on_create: AtomicBool,
    }

    impl FakeServer {
        fn transport_error() -> ApiError {
            ApiError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "injected failure".to_owned(),
            }
        }

        fn seed(rows: Vec<Row>) -> std::sync::Arc<Self> {
            let server = Self::default();
            *server.rows.lock().unwrap() = rows;
            std::sync::Arc::new(server)
        }
    }

    struct FakeBackend(std::sync::Arc<FakeServer>);

    impl CollectionBackend for FakeBackend {
        type Item = Row;
        type Id = i32;

        fn id_of(item: &Row) -> i32 {
            item.id
        }

        async fn fetch_all(&self) -> Result<Vec<Row>, ApiError> {
            if self.0.fail_next_fetch.swap(false, Ordering::SeqCst) {
                return Err(FakeServer::transport_error());
            }
            Ok(self.0.rows.lock().unwrap().clone())
        }
    }

    impl CreateBackend for FakeBackend {
        type CreatePayload = String;

        async fn create(&self, payload: &String) -> Result<Row, ApiError> {
            let mut rows = self.0.rows.lock().unwrap();
            let id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
            let row = Row {
                id,
                name: payload.clone(),
            };
            rows.push(row.clone());
            if self.0.bonus_row_on_create.load(Ordering::SeqCst) {
                rows.push(Row {
                    id: id + 1,
                    name: "server-side effect".to_owned(),
                });
            }
            Ok(row)
        }
    }

    impl DeleteBackend for FakeBackend {
        async fn delete(&self, id: i32) -> Result<(), ApiError> {
            if self.0.fail_next_delete.swap(false, Ordering::SeqCst) {
                return Err(FakeServer::transport_error());
            }
            self.0.rows.lock().unwrap().retain(|r| r.id != id);
            Ok(())
        }
    }

    fn collection(server: &std::sync::Arc<FakeServer>) -> Collection<FakeBackend> {
        Collection::new(FakeBackend(std::sync::Arc::clone(server)))
    }

    fn row(id: i32, name: &str) -> Row {
        Row {
            id,
            name: name.to_owned(),
        }
    }

    #[tokio::test]
    async fn refresh_is_idempotent_between_mutations() {
        let server = FakeServer::seed(vec![row(1, "a"), row(2, "b")]);
        let mut c = collection(&server);
        c.refresh().await.unwrap();
        let first = c.items().to_vec();
        c.refresh().await.unwrap();
        assert_eq!(c.items(), first.as_slice());
    }

    #[tokio::test]
    async fn create_reflects_server_side_effects_not_a_local_append() {
        let server = FakeServer::seed(vec![row(1, "a")]);
        server.bonus_row_on_create.store(true, Ordering::SeqCst);
        let mut c = collection(&server);
        c.refresh().await.unwrap();

        let created = c.create(&"b".to_owned()).await.unwrap().applied().unwrap();
        assert_eq!(created.name, "b");
        // The refetch picked up the extra row the server created as a
        // side effect - a local append would have missed it.
        assert_eq!(c.items().len(), 3);
    }

    #[tokio::test]
    async fn failed_delete_leaves_items_untouched_but_clears_marker() {
        let server = FakeServer::seed(vec![row(1, "a"), row(2, "b")]);
        let mut c = collection(&server);
        c.refresh().await.unwrap();

        c.mark_for_deletion(2);
        server.fail_next_delete.store(true, Ordering::SeqCst);
        let err = c.delete(2).await.unwrap_err();
        assert!(matches!(err, MutateError::Mutation(_)));
        assert_eq!(c.items().len(), 2);
        assert_eq!(c.pending_delete(), None);
        assert!(!c.is_stale());
    }

    #[tokio::test]
    async fn successful_delete_clears_marker_and_refetches() {
        let server = FakeServer::seed(vec![row(1, "a"), row(2, "b")]);
        let mut c = collection(&server);
        c.refresh().await.unwrap();

        c.mark_for_deletion(1);
        c.delete(1).await.unwrap();
        assert_eq!(c.pending_delete(), None);
        assert_eq!(c.items(), [row(2, "b")].as_slice());
    }

    #[tokio::test]
    async fn committed_delete_with_failed_refetch_is_reported_as_stale() {
        let server = FakeServer::seed(vec![row(1, "a"), row(2, "b")]);
        let mut c = collection(&server);
        c.refresh().await.unwrap();

        server.fail_next_fetch.store(true, Ordering::SeqCst);
        let err = c.delete(1).await.unwrap_err();
        assert!(matches!(err, MutateError::Refresh(_)));
        // The delete committed server-side; the cache still shows the old
        // list and says so.
        assert!(c.is_stale());
        assert_eq!(c.items().len(), 2);

        // A later manual refresh reconciles.
        c.refresh().await.unwrap();
        assert!(!c.is_stale());
        assert_eq!(c.items(), [row(2, "b")].as_slice());
    }

    #[tokio::test]
    async fn detached_collection_discards_results() {
        let server = FakeServer::seed(vec![row(1, "a")]);
        let mut c = collection(&server);
        c.refresh().await.unwrap();
        c.detach();

        assert!(c.refresh().await.unwrap().is_discarded());
        assert!(c.create(&"b".to_owned()).await.unwrap().is_discarded());
        assert!(c.delete(1).await.unwrap().is_discarded());
        // Nothing reached the server, nothing changed locally.
        assert_eq!(server.rows.lock().unwrap().len(), 1);
        assert_eq!(c.items().len(), 1);
    }

    #[tokio::test]
    async fn stale_cache_keeps_previous_items_on_failed_refresh() {
        let server = FakeServer::seed(vec![row(1, "a")]);
        let mut c = collection(&server);
        c.refresh().await.unwrap();

        server.fail_next_fetch.store(true, Ordering::SeqCst);
        assert!(c.refresh().await.is_err());
        assert_eq!(c.items(), [row(1, "a")].as_slice());
    }
}
