//! Route guarding.
//!
//! Guards are evaluated against the auth service's snapshot, and the very
//! first rule is to wait: while the auth service is still resolving the
//! persisted session, the decision is [`RouteDecision::Pending`] rather
//! than a premature redirect.

use std::sync::Arc;

use tracing::debug;

use crate::services::auth::AuthService;

/// Where unauthenticated visitors are sent.
pub const LOGIN_ROUTE: &str = "/login";

/// Where authenticated-but-unauthorized visitors are sent.
pub const DEFAULT_LANDING_ROUTE: &str = "/products";

/// Outcome of evaluating a guarded route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Auth state is still loading; render nothing and re-evaluate.
    Pending,
    /// Not signed in. Redirect to [`LOGIN_ROUTE`], remembering where the
    /// visitor was headed so login can send them back.
    Denied { from: Option<String> },
    /// Signed in but missing the required role. Redirect without
    /// preserving the attempted destination.
    Forbidden { to: &'static str },
    /// Signed in and authorized.
    Allowed,
}

/// Guards a route behind authentication and, optionally, a role.
pub struct RouteGuard {
    auth: Arc<AuthService>,
    required_role: Option<String>,
}

impl RouteGuard {
    /// Guard that only requires being signed in.
    #[must_use]
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self {
            auth,
            required_role: None,
        }
    }

    /// Additionally require a role (accepts `ADMIN` or `ROLE_ADMIN`).
    #[must_use]
    pub fn require_role(mut self, role: impl Into<String>) -> Self {
        self.required_role = Some(role.into());
        self
    }

    /// Evaluate the guard for an attempted destination.
    #[must_use]
    pub fn evaluate(&self, attempted: Option<&str>) -> RouteDecision {
        let snapshot = self.auth.snapshot();
        if snapshot.loading {
            return RouteDecision::Pending;
        }
        if !snapshot.is_authenticated {
            debug!(?attempted, "unauthenticated, redirecting to login");
            return RouteDecision::Denied {
                from: attempted.map(str::to_string),
            };
        }
        if let Some(role) = &self.required_role
            && !self.auth.has_role(role)
        {
            debug!(role, "missing required role");
            return RouteDecision::Forbidden {
                to: DEFAULT_LANDING_ROUTE,
            };
        }
        RouteDecision::Allowed
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::config::ShopConfig;
    use crate::services::auth::AuthService;
    use crate::session::{MemoryStorage, SessionStorage, SessionStore, keys};

    fn auth_service(session: Option<(&str, &str)>) -> Arc<AuthService> {
        let storage = MemoryStorage::new();
        if let Some((token, user)) = session {
            storage.set(keys::TOKEN, token).unwrap();
            storage.set(keys::USER, user).unwrap();
        }
        let config = ShopConfig::new("http://localhost:9090/api", "/tmp/myshop-test").unwrap();
        let api = ApiClient::new(&config).unwrap();
        Arc::new(AuthService::new(api, SessionStore::new(Box::new(storage))))
    }

    #[test]
    fn test_pending_while_loading() {
        let auth = auth_service(None);
        // No bootstrap: auth is still resolving.
        let guard = RouteGuard::new(auth);
        assert_eq!(guard.evaluate(Some("/orders")), RouteDecision::Pending);
    }

    #[test]
    fn test_denied_remembers_destination() {
        let auth = auth_service(None);
        auth.bootstrap();
        let guard = RouteGuard::new(auth);
        assert_eq!(
            guard.evaluate(Some("/orders")),
            RouteDecision::Denied {
                from: Some("/orders".to_string()),
            }
        );
    }

    #[test]
    fn test_allowed_when_signed_in() {
        let auth = auth_service(Some(("tok", r#"{"username": "alice", "role": "USER"}"#)));
        auth.bootstrap();
        let guard = RouteGuard::new(auth);
        assert_eq!(guard.evaluate(Some("/orders")), RouteDecision::Allowed);
    }

    #[test]
    fn test_admin_role_passes_role_guard() {
        let auth = auth_service(Some(("tok", r#"{"username": "root", "roles": ["ROLE_ADMIN"]}"#)));
        auth.bootstrap();
        let guard = RouteGuard::new(auth).require_role("ADMIN");
        assert_eq!(guard.evaluate(Some("/admin")), RouteDecision::Allowed);
    }

    #[test]
    fn test_plain_user_forbidden_from_admin_routes() {
        let auth = auth_service(Some(("tok", r#"{"username": "alice", "role": "USER"}"#)));
        auth.bootstrap();
        let guard = RouteGuard::new(auth).require_role("ADMIN");
        assert_eq!(
            guard.evaluate(Some("/admin")),
            RouteDecision::Forbidden {
                to: DEFAULT_LANDING_ROUTE,
            }
        );
    }
}
