//! Cart state, scoped to the current identity.
//!
//! The service never trusts its own arithmetic after a mutation: every
//! successful add/update/remove round-trips through a fresh fetch, so
//! the snapshot always reflects what the backend actually did (stock
//! clamping included).
//!
//! Concurrent refreshes are fenced with a sequence counter: only the
//! newest in-flight fetch may write its result, so a slow response for a
//! previous identity can never clobber the current user's cart.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use myshop_core::{CartItemId, ProductId};

use crate::api::{ApiError, CartBackend};
use crate::models::CartItem;
use crate::services::auth::AuthService;

/// A point-in-time copy of the cart state.
#[derive(Debug, Clone, Default)]
pub struct CartSnapshot {
    /// Normalized cart lines.
    pub items: Vec<CartItem>,
    /// True while a fetch is in flight.
    pub loading: bool,
    /// The last fetch or mutation failure, if any. Stale items are kept
    /// alongside the error.
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct CartInner {
    items: Vec<CartItem>,
    loading: bool,
    error: Option<String>,
}

/// Mirrors the server-side cart for whoever is signed in.
pub struct CartService<B: CartBackend> {
    backend: B,
    auth: Arc<AuthService>,
    state: Mutex<CartInner>,
    // Monotonic fence: a fetch may only publish if it is still the
    // newest one when it completes.
    fence: AtomicU64,
}

impl<B: CartBackend> CartService<B> {
    #[must_use]
    pub fn new(backend: B, auth: Arc<AuthService>) -> Self {
        Self {
            backend,
            auth,
            state: Mutex::new(CartInner::default()),
            fence: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CartInner> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Re-fetch the cart from the backend.
    ///
    /// Unauthenticated callers settle to an empty cart without touching
    /// the network. Fetch failures keep the previous items and record
    /// the error instead of wiping the cart.
    pub async fn refresh(&self) {
        let seq = self.fence.fetch_add(1, Ordering::SeqCst) + 1;

        if !self.auth.snapshot().is_authenticated {
            let mut inner = self.lock();
            inner.items.clear();
            inner.loading = false;
            inner.error = None;
            return;
        }

        self.lock().loading = true;
        let result = self.backend.fetch_cart().await;

        // A newer refresh started while we were in flight; its result
        // wins and ours is dropped.
        if self.fence.load(Ordering::SeqCst) != seq {
            debug!(seq, "discarding stale cart fetch");
            return;
        }

        let mut inner = self.lock();
        inner.loading = false;
        match result {
            Ok(items) => {
                inner.items = items;
                inner.error = None;
            }
            Err(e) => {
                warn!(error = %e, "cart fetch failed, keeping previous items");
                inner.error = Some(e.to_string());
            }
        }
    }

    /// Add a product to the cart, then re-fetch.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the snapshot keeps its previous items
    /// and records the message.
    pub async fn add(&self, product_id: ProductId, quantity: u32) -> Result<(), ApiError> {
        self.mutate(self.backend.add_item(product_id, quantity)).await
    }

    /// Change the quantity of a cart line, then re-fetch.
    ///
    /// # Errors
    ///
    /// Returns the backend error; see [`CartService::add`].
    pub async fn update_quantity(
        &self,
        item_id: CartItemId,
        quantity: u32,
    ) -> Result<(), ApiError> {
        self.mutate(self.backend.update_item(item_id, quantity)).await
    }

    /// Remove a cart line, then re-fetch.
    ///
    /// # Errors
    ///
    /// Returns the backend error; see [`CartService::add`].
    pub async fn remove(&self, item_id: CartItemId) -> Result<(), ApiError> {
        self.mutate(self.backend.remove_item(item_id)).await
    }

    /// Empty the cart, then re-fetch.
    ///
    /// # Errors
    ///
    /// Returns the backend error; see [`CartService::add`].
    pub async fn clear(&self) -> Result<(), ApiError> {
        self.mutate(self.backend.clear()).await
    }

    async fn mutate(
        &self,
        op: impl Future<Output = Result<(), ApiError>> + Send,
    ) -> Result<(), ApiError> {
        match op.await {
            Ok(()) => {
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "cart mutation failed");
                self.lock().error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// A point-in-time copy of the cart state.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        let inner = self.lock();
        CartSnapshot {
            items: inner.items.clone(),
            loading: inner.loading,
            error: inner.error.clone(),
        }
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_items(&self) -> f64 {
        self.lock().items.iter().map(|i| i.quantity).sum()
    }

    /// Total price across all lines.
    #[must_use]
    pub fn total_price(&self) -> f64 {
        self.lock().items.iter().map(CartItem::line_total).sum()
    }

    /// Follow identity changes: every login, logout, or user switch
    /// triggers exactly one refresh. Runs until the auth service is
    /// dropped.
    pub async fn watch_identity(self: Arc<Self>) {
        let mut rx = self.auth.subscribe_identity();
        while rx.changed().await.is_ok() {
            self.refresh().await;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU64, Ordering};

    use tokio::sync::oneshot;

    use crate::api::ApiClient;
    use crate::config::ShopConfig;
    use crate::models::CartProduct;
    use crate::session::{MemoryStorage, SessionStorage, SessionStore, keys};

    use super::*;

    /// Backend that replays scripted fetch results, optionally holding
    /// each fetch until a gate fires.
    #[derive(Default)]
    struct ScriptedBackend {
        fetches: Mutex<VecDeque<Result<Vec<CartItem>, ApiError>>>,
        gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
        fetch_calls: AtomicU64,
        mutation_result: Mutex<Option<ApiError>>,
    }

    impl ScriptedBackend {
        fn push_fetch(&self, result: Result<Vec<CartItem>, ApiError>) {
            self.fetches.lock().unwrap().push_back(result);
        }

        fn push_gate(&self) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().push_back(rx);
            tx
        }

        fn fail_next_mutation(&self, error: ApiError) {
            *self.mutation_result.lock().unwrap() = Some(error);
        }

        async fn mutation(&self) -> Result<(), ApiError> {
            match self.mutation_result.lock().unwrap().take() {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }
    }

    impl CartBackend for Arc<ScriptedBackend> {
        async fn fetch_cart(&self) -> Result<Vec<CartItem>, ApiError> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            // Bind the scripted result to this call up front, so a gated
            // fetch keeps its own response while later calls proceed.
            let result = self
                .fetches
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()));
            let gate = self.gates.lock().unwrap().pop_front();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            result
        }

        async fn add_item(&self, _: ProductId, _: u32) -> Result<(), ApiError> {
            self.mutation().await
        }

        async fn update_item(&self, _: CartItemId, _: u32) -> Result<(), ApiError> {
            self.mutation().await
        }

        async fn remove_item(&self, _: CartItemId) -> Result<(), ApiError> {
            self.mutation().await
        }

        async fn clear(&self) -> Result<(), ApiError> {
            self.mutation().await
        }
    }

    fn auth(signed_in: bool) -> Arc<AuthService> {
        let storage = MemoryStorage::new();
        if signed_in {
            storage.set(keys::TOKEN, "tok").unwrap();
            storage
                .set(keys::USER, r#"{"username": "alice", "role": "USER"}"#)
                .unwrap();
        }
        let config = ShopConfig::new("http://localhost:9090/api", "/tmp/myshop-test").unwrap();
        let api = ApiClient::new(&config).unwrap();
        let service = AuthService::new(api, SessionStore::new(Box::new(storage)));
        service.bootstrap();
        Arc::new(service)
    }

    fn item(id: i64, quantity: f64, price: f64) -> CartItem {
        CartItem {
            id: CartItemId::from(id),
            quantity,
            product: CartProduct {
                id: Some(ProductId::from(id)),
                name: format!("Product {id}"),
                price,
                image_url: None,
            },
        }
    }

    fn not_found() -> ApiError {
        ApiError::Status {
            status: 404,
            message: "Cart item not found".to_string(),
        }
    }

    #[tokio::test]
    async fn test_unauthenticated_refresh_skips_backend() {
        let backend = Arc::new(ScriptedBackend::default());
        let cart = CartService::new(Arc::clone(&backend), auth(false));
        cart.refresh().await;

        assert_eq!(backend.fetch_calls.load(Ordering::SeqCst), 0);
        let snapshot = cart.snapshot();
        assert!(snapshot.items.is_empty());
        assert!(!snapshot.loading);
        assert!(snapshot.error.is_none());
    }

    #[tokio::test]
    async fn test_refresh_replaces_items() {
        let backend = Arc::new(ScriptedBackend::default());
        backend.push_fetch(Ok(vec![item(1, 2.0, 9.99)]));
        let cart = CartService::new(Arc::clone(&backend), auth(true));
        cart.refresh().await;

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.items.len(), 1);
        assert!((cart.total_items() - 2.0).abs() < f64::EPSILON);
        assert!((cart.total_price() - 19.98).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_items() {
        let backend = Arc::new(ScriptedBackend::default());
        backend.push_fetch(Ok(vec![item(1, 1.0, 5.0)]));
        backend.push_fetch(Err(not_found()));
        let cart = CartService::new(Arc::clone(&backend), auth(true));
        cart.refresh().await;
        cart.refresh().await;

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.items.len(), 1);
        assert!(snapshot.error.is_some());
    }

    #[tokio::test]
    async fn test_stale_fetch_is_discarded() {
        let backend = Arc::new(ScriptedBackend::default());
        let release_first = backend.push_gate();
        backend.push_fetch(Ok(vec![item(1, 1.0, 1.0)]));
        backend.push_fetch(Ok(vec![item(2, 2.0, 2.0)]));
        let cart = Arc::new(CartService::new(Arc::clone(&backend), auth(true)));

        let first = {
            let cart = Arc::clone(&cart);
            tokio::spawn(async move { cart.refresh().await })
        };
        // Let the first fetch reach its gate before starting the second.
        tokio::task::yield_now().await;
        cart.refresh().await;

        release_first.send(()).unwrap();
        first.await.unwrap();

        // Both fetches ran, but only the newest one published its items;
        // the slow first response was dropped by the fence.
        assert_eq!(backend.fetch_calls.load(Ordering::SeqCst), 2);
        let snapshot = cart.snapshot();
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(i64::from(snapshot.items[0].id), 2);
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn test_mutation_refetches_instead_of_trusting_local_math() {
        let backend = Arc::new(ScriptedBackend::default());
        // Backend clamps the requested quantity to stock; the refetch is
        // what surfaces that.
        backend.push_fetch(Ok(vec![item(1, 3.0, 4.0)]));
        let cart = CartService::new(Arc::clone(&backend), auth(true));
        cart.add(ProductId::from(1), 99).await.unwrap();

        assert_eq!(backend.fetch_calls.load(Ordering::SeqCst), 1);
        assert!((cart.total_items() - 3.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_identity_change_triggers_refresh() {
        let backend = Arc::new(ScriptedBackend::default());
        backend.push_fetch(Ok(vec![item(1, 1.0, 1.0)]));

        let storage = MemoryStorage::new();
        storage.set(keys::TOKEN, "tok").unwrap();
        storage
            .set(keys::USER, r#"{"username": "alice"}"#)
            .unwrap();
        let config = ShopConfig::new("http://localhost:9090/api", "/tmp/myshop-test").unwrap();
        let api = ApiClient::new(&config).unwrap();
        let auth = Arc::new(AuthService::new(api, SessionStore::new(Box::new(storage))));
        let cart = Arc::new(CartService::new(Arc::clone(&backend), Arc::clone(&auth)));

        let watcher = tokio::spawn(Arc::clone(&cart).watch_identity());
        tokio::task::yield_now().await;
        auth.bootstrap();

        tokio::time::timeout(std::time::Duration::from_secs(1), async {
            while backend.fetch_calls.load(Ordering::SeqCst) == 0 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();

        assert_eq!(backend.fetch_calls.load(Ordering::SeqCst), 1);
        assert_eq!(cart.snapshot().items.len(), 1);
        watcher.abort();
    }

    #[tokio::test]
    async fn test_failed_mutation_records_error_and_skips_refetch() {
        let backend = Arc::new(ScriptedBackend::default());
        backend.fail_next_mutation(not_found());
        let cart = CartService::new(Arc::clone(&backend), auth(true));
        let result = cart.remove(CartItemId::from(7)).await;

        assert!(result.is_err());
        assert_eq!(backend.fetch_calls.load(Ordering::SeqCst), 0);
        assert!(cart.snapshot().error.is_some());
    }
}
