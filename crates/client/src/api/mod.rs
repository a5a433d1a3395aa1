//! Typed owner operations over the platform's REST endpoints.
//!
//! One method per backend operation, split into a module per resource.
//! Verbs are semantically significant and preserved exactly: partial
//! updates (set-default, status transitions) are PATCH, the owner's order
//! edit is PUT against its dedicated path, deletes are DELETE. Payload
//! structs validate client-side before anything is sent.

use std::sync::Arc;

use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;

mod addresses;
mod orders;
mod restaurants;
mod schedules;

/// Owner API client.
///
/// Cheap to clone; all clones share one connection pool. The session
/// token is *not* part of the client - callers inject it per operation,
/// so one client can serve several sessions (or a session refresh)
/// without rebuilding the pool.
#[derive(Clone)]
pub struct OwnerClient {
    inner: Arc<OwnerClientInner>,
}

struct OwnerClientInner {
    http: reqwest::Client,
    base_url: Url,
}

impl OwnerClient {
    /// Create a new owner client.
    ///
    /// # Arguments
    ///
    /// * `config` - base URL and transport timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        // `Url::join` treats the last path segment as a file unless the
        // base ends with a slash.
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(OwnerClientInner { http, base_url }),
        })
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.inner.base_url
    }
}
