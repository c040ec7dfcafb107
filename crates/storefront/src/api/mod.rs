//! REST client for the shop backend.
//!
//! # Architecture
//!
//! - Plain JSON-over-REST against the backend's `/api` base path
//! - Bearer-token authentication: the token is attached to every request
//!   once set (`Authorization: Bearer <token>`)
//! - Order and cart reads are normalized by [`conversions`] before they are
//!   returned, so inconsistent payload shapes never escape this module
//!
//! # Example
//!
//! ```rust,ignore
//! use myshop_storefront::api::ApiClient;
//!
//! let api = ApiClient::new(&config)?;
//! let auth = api.login(&LoginRequest::new("alice", "secret")).await?;
//! api.set_token(auth.token.as_deref().unwrap_or_default());
//!
//! let cart = api.get_cart().await?;
//! let orders = api.list_orders().await?;
//! ```

pub mod conversions;
pub mod types;

mod cart;
mod orders;
mod products;
mod users;

pub use cart::CartBackend;

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::ShopConfig;

use types::ApiMessage;

/// Errors that can occur when talking to the shop backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request could not be sent or the response body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body was not the JSON we expected.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint path did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// HTTP status of the failure, when the backend answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Client for the shop REST API.
///
/// Cheap to clone; all clones share the same bearer token, so a login
/// through one handle authenticates every handle.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: Url,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a new API client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ShopConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.api_base_url.clone(),
                token: RwLock::new(None),
            }),
        })
    }

    /// Set the bearer token used for authenticated requests.
    pub fn set_token(&self, token: &str) {
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    /// Drop the bearer token; subsequent requests are anonymous.
    pub fn clear_token(&self) {
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// The current bearer token, if set.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether a bearer token is currently set.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let joined = format!(
            "{}/{}",
            self.inner.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&joined)?)
    }

    /// Send a request and decode the JSON response.
    ///
    /// An empty success body decodes as JSON `null`, so callers that only
    /// care about success can ask for `serde_json::Value`.
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&impl Serialize>,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        debug!(%method, %url, "api request");

        let mut request = self.inner.http.request(method, url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = self
            .inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_deref()
        {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Self::status_error(status, &text));
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(serde_json::from_str("null")?);
        }
        Ok(serde_json::from_str(trimmed)?)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.send(Method::GET, path, query, None::<&()>).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: Option<&impl Serialize>,
    ) -> Result<T, ApiError> {
        self.send(Method::POST, path, query, body).await
    }

    async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: Option<&impl Serialize>,
    ) -> Result<T, ApiError> {
        self.send(Method::PUT, path, query, body).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::DELETE, path, &[], None::<&()>).await
    }

    /// Build a `Status` error, preferring the backend's `{"message": ...}`
    /// body over the bare status code.
    fn status_error(status: StatusCode, body: &str) -> ApiError {
        let message = serde_json::from_str::<ApiMessage>(body)
            .ok()
            .and_then(|m| m.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        ApiError::Status {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ShopConfig;

    fn client() -> ApiClient {
        let config = ShopConfig::new("http://localhost:8080/api/", "/tmp/myshop-test").unwrap();
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let api = client();
        let url = api.endpoint("/users/login").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/users/login");
    }

    #[test]
    fn test_token_shared_across_clones() {
        let api = client();
        let clone = api.clone();
        api.set_token("abc");
        assert!(clone.has_token());
        clone.clear_token();
        assert!(!api.has_token());
    }

    #[test]
    fn test_status_error_prefers_backend_message() {
        let err = ApiClient::status_error(
            StatusCode::UNAUTHORIZED,
            r#"{"message": "Bad credentials"}"#,
        );
        assert_eq!(err.to_string(), "HTTP 401: Bad credentials");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_status_error_falls_back_to_reason() {
        let err = ApiClient::status_error(StatusCode::NOT_FOUND, "<html>nope</html>");
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }
}
