//! CLI command implementations.
//!
//! Each module maps to a top-level subcommand and prints human-readable
//! output; all state lives in [`myshop_storefront::state::AppState`].

pub mod auth;
pub mod cart;
pub mod orders;
pub mod products;

use myshop_storefront::guard::{RouteDecision, RouteGuard};
use myshop_storefront::state::AppState;

/// Command-level errors: either a storefront failure or a guard refusal.
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Refuse early when the session does not satisfy the guard, mirroring
/// the redirects a browser client would perform.
pub(crate) fn check_access(state: &AppState, required_role: Option<&str>) -> CommandResult {
    let mut guard = RouteGuard::new(state.auth().clone());
    if let Some(role) = required_role {
        guard = guard.require_role(role);
    }
    match guard.evaluate(None) {
        RouteDecision::Allowed => Ok(()),
        RouteDecision::Denied { .. } => Err("not signed in; run `myshop login` first".into()),
        RouteDecision::Forbidden { .. } => Err("this command requires the admin role".into()),
        // AppState bootstraps during construction, so loading never
        // reaches command dispatch.
        RouteDecision::Pending => Err("session is still loading; try again".into()),
    }
}
