//! Platter Client - Owner-facing API client for the delivery platform.
//!
//! This crate talks to the platform backend on behalf of a restaurant
//! owner. It has two layers:
//!
//! - [`OwnerClient`] - typed operations over the REST endpoints
//!   (addresses, orders, restaurants, schedules), one method per backend
//!   operation, with the exact verbs the backend expects.
//! - [`store`] - the resource lifecycle layer: cached collections that
//!   follow a strict mutate-then-refetch protocol, so local state is only
//!   ever what the server last reported.
//!
//! The session token is injected by the caller on every operation; this
//! crate never acquires or persists credentials.
//!
//! # Example
//!
//! ```rust,ignore
//! use platter_client::{ClientConfig, OwnerClient, SessionToken};
//! use platter_client::store::AddressBook;
//!
//! let config = ClientConfig::from_env()?;
//! let client = OwnerClient::new(&config)?;
//! let session = SessionToken::new(token);
//!
//! // Direct endpoint access
//! let order = client.get_order(&session, order_id).await?;
//!
//! // Lifecycle-managed collection: every mutation refetches
//! let mut addresses = AddressBook::open(client.clone(), session.clone());
//! addresses.refresh().await?;
//! addresses.set_default(address_id).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod api;
pub mod config;
pub mod error;
pub mod session;
pub mod store;
mod transport;

pub use api::OwnerClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, FieldErrors};
pub use session::SessionToken;
