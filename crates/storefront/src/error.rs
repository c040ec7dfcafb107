//! Unified error handling for the storefront library.
//!
//! Each concern has its own `thiserror` enum (`ConfigError`, `ApiError`,
//! `SessionError`, `AuthError`); `AppError` unifies them for consumers that
//! do not care which layer failed. Nothing here is fatal: callers degrade to
//! a visible error state or a safe default (empty cart, logged-out session).

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::session::SessionError;

/// Application-level error type for the storefront client.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Backend API operation failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Persisted session storage failed.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::Api(ApiError::Status {
            status: 404,
            message: "Order not found".to_string(),
        });
        assert_eq!(err.to_string(), "API error: HTTP 404: Order not found");
    }
}
