//! User and authentication endpoints.

use myshop_core::SessionUser;

use super::types::{AuthResponse, LoginRequest, RegisterRequest};
use super::{ApiClient, ApiError};

impl ApiClient {
    /// `POST /users/login`.
    ///
    /// # Errors
    ///
    /// Returns an error on bad credentials or transport failure.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post("/users/login", &[], Some(request)).await
    }

    /// `POST /users/register`.
    ///
    /// # Errors
    ///
    /// Returns an error if registration is rejected (e.g., username taken).
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.post("/users/register", &[], Some(request)).await
    }

    /// `GET /users/me` - the authenticated user as the backend sees it.
    ///
    /// # Errors
    ///
    /// Returns an error when unauthenticated or on transport failure.
    pub async fn current_user(&self) -> Result<SessionUser, ApiError> {
        self.get("/users/me", &[]).await
    }
}
