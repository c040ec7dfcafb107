//! Integration tests for myshop.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the shop backend, then:
//! MYSHOP_API_BASE_URL=http://localhost:9090/api \
//!     cargo test -p myshop-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - register, shop, and check out end to end
//! - `admin_orders` - shop-wide order management

use std::sync::Arc;

use myshop_storefront::api::ApiClient;
use myshop_storefront::config::ShopConfig;
use myshop_storefront::services::auth::AuthService;
use myshop_storefront::session::{MemoryStorage, SessionStore};

/// Base URL of the backend under test.
#[must_use]
pub fn api_base_url() -> String {
    std::env::var("MYSHOP_API_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:9090/api".to_string())
}

/// Fresh client + auth pair against the backend under test. Session
/// state is in-memory so parallel tests cannot trample each other.
///
/// # Panics
///
/// Panics if the HTTP client cannot be constructed.
#[must_use]
pub fn test_context() -> (ApiClient, Arc<AuthService>) {
    #[allow(clippy::unwrap_used)]
    let config = ShopConfig::new(&api_base_url(), std::env::temp_dir()).unwrap();
    #[allow(clippy::unwrap_used)]
    let api = ApiClient::new(&config).unwrap();
    let auth = Arc::new(AuthService::new(
        api.clone(),
        SessionStore::new(Box::new(MemoryStorage::new())),
    ));
    auth.bootstrap();
    (api, auth)
}

/// A username unlikely to collide across test runs.
#[must_use]
pub fn unique_username(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.subsec_nanos());
    format!("{prefix}-{}-{nanos}", std::process::id())
}
