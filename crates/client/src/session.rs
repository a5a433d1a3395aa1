//! Injected session tokens.
//!
//! Authentication lives outside this crate: whoever drives the client logs
//! in elsewhere and hands a bearer token to every operation. There is no
//! ambient "logged-in user" state here, and the token never appears in
//! `Debug` output or logs.

use secrecy::{ExposeSecret, SecretString};

/// A bearer token for an authenticated owner session.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct SessionToken(SecretString);

impl SessionToken {
    /// Wrap a raw bearer token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Expose the raw token for the `Authorization` header.
    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_the_token() {
        let token = SessionToken::new("super-secret-bearer");
        let debug = format!("{token:?}");
        assert!(!debug.contains("super-secret-bearer"));
        assert!(debug.contains("REDACTED"));
    }
}
