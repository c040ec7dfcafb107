//! Authentication state.
//!
//! The service starts in a loading state. [`AuthService::bootstrap`]
//! resolves the persisted session exactly once: a readable session
//! restores the user without any network round trip, a corrupted one is
//! cleared, and either way the service ends up settled. Route guards
//! must treat `loading == true` as "don't decide yet".
//!
//! All mutations funnel through two internal transitions, apply-user and
//! reset, so the token on the API client, the persisted session, and the
//! in-memory snapshot can never disagree.

use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

use myshop_core::SessionUser;

use crate::api::types::{LoginRequest, RegisterRequest};
use crate::api::{ApiClient, ApiError};
use crate::session::{SessionError, SessionLoad, SessionStore};

/// Errors from the auth service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend accepted the credentials but returned no token.
    #[error("authentication response did not include a token")]
    MissingToken,

    /// The backend rejected the request.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Persisting the session failed.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// A point-in-time copy of the auth state.
#[derive(Debug, Clone)]
pub struct AuthSnapshot {
    /// The signed-in user, if any.
    pub user: Option<SessionUser>,
    /// Normalized `ROLE_<X>` tags for the signed-in user.
    pub roles: Vec<String>,
    /// Whether a user is signed in.
    pub is_authenticated: bool,
    /// True until [`AuthService::bootstrap`] has resolved the persisted
    /// session.
    pub loading: bool,
}

#[derive(Debug)]
struct AuthInner {
    user: Option<SessionUser>,
    loading: bool,
}

/// Owns the session lifecycle: bootstrap, login, register, logout.
pub struct AuthService {
    api: ApiClient,
    store: SessionStore,
    state: Mutex<AuthInner>,
    identity: watch::Sender<Option<String>>,
}

impl AuthService {
    /// Create the service in its initial loading state.
    #[must_use]
    pub fn new(api: ApiClient, store: SessionStore) -> Self {
        let (identity, _) = watch::channel(None);
        Self {
            api,
            store,
            state: Mutex::new(AuthInner {
                user: None,
                loading: true,
            }),
            identity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, AuthInner> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Install a user as the current identity. The watch channel only
    /// fires when the username actually changes.
    fn apply_user(&self, user: SessionUser) {
        let username = user.username.clone();
        {
            let mut inner = self.lock();
            inner.user = Some(user);
            inner.loading = false;
        }
        self.identity.send_if_modified(|current| {
            if current.as_deref() == Some(username.as_str()) {
                false
            } else {
                *current = Some(username);
                true
            }
        });
    }

    /// Drop to the logged-out state.
    fn reset(&self) {
        self.api.clear_token();
        {
            let mut inner = self.lock();
            inner.user = None;
            inner.loading = false;
        }
        self.identity.send_if_modified(|current| {
            if current.is_none() {
                false
            } else {
                *current = None;
                true
            }
        });
    }

    /// Resolve the persisted session. Call once at startup.
    ///
    /// Never fails: a corrupted session is cleared and the service
    /// settles logged-out.
    pub fn bootstrap(&self) {
        match self.store.load() {
            SessionLoad::Present { token, user } => {
                info!(username = %user.username, "restored persisted session");
                self.api.set_token(&token);
                self.apply_user(user);
            }
            SessionLoad::Corrupted => {
                warn!("clearing corrupted session");
                self.store.clear();
                self.reset();
            }
            SessionLoad::Absent => self.reset(),
        }
    }

    /// Authenticate and persist the resulting session.
    ///
    /// # Errors
    ///
    /// Returns an error on bad credentials, a token-less response, or a
    /// failed session write. Auth state is untouched on failure.
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionUser, AuthError> {
        let response = self.api.login(&LoginRequest::new(username, password)).await?;
        self.establish_session(response.token, response.user)
    }

    /// Register a new account and sign in as it.
    ///
    /// # Errors
    ///
    /// Returns an error if registration is rejected, the response lacks a
    /// token, or the session write fails.
    pub async fn register(&self, request: &RegisterRequest) -> Result<SessionUser, AuthError> {
        let response = self.api.register(request).await?;
        self.establish_session(response.token, response.user)
    }

    fn establish_session(
        &self,
        token: Option<String>,
        user: SessionUser,
    ) -> Result<SessionUser, AuthError> {
        let token = token.ok_or(AuthError::MissingToken)?;
        // Token and user record are persisted as a pair.
        self.store.persist(&token, &user)?;
        self.api.set_token(&token);
        self.apply_user(user.clone());
        info!(username = %user.username, "signed in");
        Ok(user)
    }

    /// Sign out and clear every trace of the session.
    pub fn logout(&self) {
        self.store.clear();
        self.reset();
        info!("signed out");
    }

    /// Re-fetch the user record from the backend and refresh the
    /// persisted copy.
    ///
    /// # Errors
    ///
    /// Returns an error when unauthenticated or on transport failure.
    pub async fn refresh_user(&self) -> Result<SessionUser, AuthError> {
        let user = self.api.current_user().await?;
        if let Some(token) = self.api.token() {
            self.store.persist(&token, &user)?;
        }
        self.apply_user(user.clone());
        Ok(user)
    }

    /// Whether the current user carries the given role (accepts `ADMIN`
    /// or `ROLE_ADMIN`).
    #[must_use]
    pub fn has_role(&self, required: &str) -> bool {
        self.lock()
            .user
            .as_ref()
            .is_some_and(|u| u.has_role(required))
    }

    /// A point-in-time copy of the auth state.
    #[must_use]
    pub fn snapshot(&self) -> AuthSnapshot {
        let inner = self.lock();
        AuthSnapshot {
            roles: inner.user.as_ref().map(SessionUser::role_set).unwrap_or_default(),
            is_authenticated: inner.user.is_some(),
            loading: inner.loading,
            user: inner.user.clone(),
        }
    }

    /// Watch the current identity (username). Fires on login, logout,
    /// and user switches, but not on same-user refreshes.
    #[must_use]
    pub fn subscribe_identity(&self) -> watch::Receiver<Option<String>> {
        self.identity.subscribe()
    }

    /// The API client this service authenticates.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}
