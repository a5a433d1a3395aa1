//! Errors returned by the owner API client.

use platter_core::{FieldError, TerminalStateError};
use reqwest::StatusCode;
use thiserror::Error;

/// The list of field-level rejections carried by a validation failure.
pub type FieldErrors = Vec<FieldError>;

/// Errors that can occur when interacting with the platform backend.
///
/// The three classes matter to callers in different ways:
///
/// - [`ApiError::Validation`] is recoverable - the user corrects the
///   offending fields and resubmits. The `{param, msg}` pairs are passed
///   through from the backend (or produced by client-side validation)
///   unmodified.
/// - [`ApiError::TerminalState`] is a logic error in the calling layer:
///   something asked to advance an already-delivered order.
/// - Everything else is a transport-class failure: reported to the caller,
///   never retried, and local state is left unchanged.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend (or client-side validation) rejected the payload.
    #[error("validation failed: {}", format_field_errors(.0))]
    Validation(FieldErrors),

    /// Attempted a status transition out of the terminal state.
    #[error(transparent)]
    TerminalState(#[from] TerminalStateError),

    /// HTTP request failed (connect, timeout, redirect loop, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend answered with a non-success status and no structured
    /// validation body.
    #[error("unexpected response status {status}: {body}")]
    Status {
        /// HTTP status code of the response.
        status: StatusCode,
        /// Raw response body, for diagnostics.
        body: String,
    },

    /// A response body could not be decoded.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A resource path could not be joined onto the base URL.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// The field-level rejections, if this is a validation failure.
    ///
    /// Callers use this to route errors to form fields instead of a
    /// banner.
    #[must_use]
    pub fn validation_errors(&self) -> Option<&[FieldError]> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_lists_every_field() {
        let err = ApiError::Validation(vec![
            FieldError::new("startTime", "Start time is required"),
            FieldError::new("endTime", "End time is required"),
        ]);
        assert_eq!(
            err.to_string(),
            "validation failed: startTime - Start time is required; endTime - End time is required"
        );
        assert_eq!(err.validation_errors().map(<[FieldError]>::len), Some(2));
    }

    #[test]
    fn terminal_state_error_passes_through() {
        let err = ApiError::from(TerminalStateError);
        assert_eq!(
            err.to_string(),
            "order is already delivered; no further status transition exists"
        );
        assert!(err.validation_errors().is_none());
    }

    #[test]
    fn status_error_display() {
        let err = ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "unexpected response status 500 Internal Server Error: boom"
        );
    }
}
