//! Shared application state.
//!
//! One [`AppState`] is built at startup and handed to every command.
//! Cloning is cheap; all fields sit behind [`Arc`]s.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::ShopConfig;
use crate::error::Result;
use crate::services::auth::AuthService;
use crate::services::cart::CartService;
use crate::session::{FileStorage, SessionStorage, SessionStore};

/// Everything a command needs: config, API client, auth, and cart.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ShopConfig,
    api: ApiClient,
    auth: Arc<AuthService>,
    cart: CartService<ApiClient>,
}

impl AppState {
    /// Build state with the session persisted under the configured state
    /// directory, then resolve the persisted session.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: ShopConfig) -> Result<Self> {
        let storage = Box::new(FileStorage::new(config.session_file()));
        Self::with_storage(config, storage)
    }

    /// Build state with explicit session storage. Used by tests to swap
    /// in in-memory storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn with_storage(config: ShopConfig, storage: Box<dyn SessionStorage>) -> Result<Self> {
        let api = ApiClient::new(&config)?;
        let auth = Arc::new(AuthService::new(
            api.clone(),
            SessionStore::new(storage),
        ));
        auth.bootstrap();
        let cart = CartService::new(api.clone(), Arc::clone(&auth));
        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                auth,
                cart,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ShopConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    #[must_use]
    pub fn auth(&self) -> &Arc<AuthService> {
        &self.inner.auth
    }

    #[must_use]
    pub fn cart(&self) -> &CartService<ApiClient> {
        &self.inner.cart
    }
}
