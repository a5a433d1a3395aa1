//! HTTP verb helpers shared by every endpoint module.
//!
//! The transport owns three things: joining resource paths onto the base
//! URL, injecting the caller's bearer token, and mapping responses into
//! the error taxonomy. A 4xx whose body carries the backend's structured
//! `{ "errors": [{"param", "msg"}] }` shape becomes
//! [`ApiError::Validation`] with the pairs passed through unmodified;
//! everything else non-success is a transport-class failure.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use url::Url;

use platter_core::FieldError;

use crate::api::OwnerClient;
use crate::error::ApiError;
use crate::session::SessionToken;

/// Wire shape of a backend validation rejection.
#[derive(Debug, Deserialize)]
struct ValidationBody {
    errors: Vec<FieldError>,
}

impl OwnerClient {
    fn resource_url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url().join(path)?)
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        session: &SessionToken,
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.resource_url(path)?;
        Ok(self.http().request(method, url).bearer_auth(session.expose()))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        session: &SessionToken,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path, session)?.send().await?;
        decode(response).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        session: &SessionToken,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .request(Method::POST, path, session)?
            .json(body)
            .send()
            .await?;
        decode(response).await
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        session: &SessionToken,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .request(Method::PUT, path, session)?
            .json(body)
            .send()
            .await?;
        decode(response).await
    }

    /// PATCH without a body - partial updates where the path itself names
    /// the change (set-default, status transitions).
    pub(crate) async fn patch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        session: &SessionToken,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::PATCH, path, session)?.send().await?;
        decode(response).await
    }

    /// DELETE, discarding whatever acknowledgement body the backend sends.
    pub(crate) async fn delete_resource(
        &self,
        path: &str,
        session: &SessionToken,
    ) -> Result<(), ApiError> {
        let response = self.request(Method::DELETE, path, session)?.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(error_from_response(status, body))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        return Ok(serde_json::from_str(&body)?);
    }
    Err(error_from_response(status, body))
}

fn error_from_response(status: StatusCode, body: String) -> ApiError {
    if status.is_client_error()
        && let Ok(validation) = serde_json::from_str::<ValidationBody>(&body)
        && !validation.errors.is_empty()
    {
        return ApiError::Validation(validation.errors);
    }
    ApiError::Status { status, body }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_4xx_body_becomes_a_validation_error() {
        let body = r#"{"errors": [{"param": "price", "msg": "Price must be greater than 0"}]}"#;
        let err = error_from_response(StatusCode::UNPROCESSABLE_ENTITY, body.to_owned());
        let errors = err.validation_errors().expect("validation error");
        assert_eq!(errors, [FieldError::new("price", "Price must be greater than 0")]);
    }

    #[test]
    fn unstructured_4xx_body_is_a_status_error() {
        let err = error_from_response(StatusCode::NOT_FOUND, "no such order".to_owned());
        assert!(matches!(err, ApiError::Status { status, .. } if status == StatusCode::NOT_FOUND));
    }

    #[test]
    fn empty_error_list_is_not_a_validation_error() {
        let err = error_from_response(StatusCode::BAD_REQUEST, r#"{"errors": []}"#.to_owned());
        assert!(matches!(err, ApiError::Status { .. }));
    }

    #[test]
    fn server_errors_never_parse_as_validation() {
        let body = r#"{"errors": [{"param": "x", "msg": "y"}]}"#;
        let err = error_from_response(StatusCode::INTERNAL_SERVER_ERROR, body.to_owned());
        assert!(matches!(err, ApiError::Status { .. }));
    }
}
