//! Session management commands.
//!
//! # Usage
//!
//! ```bash
//! myshop login -u alice -p secret
//! myshop register -u alice -e alice@example.com -p secret
//! myshop me
//! myshop logout
//! ```

#![allow(clippy::print_stdout)]

use myshop_storefront::api::types::RegisterRequest;
use myshop_storefront::state::AppState;

use super::CommandResult;

/// Sign in and persist the session.
pub async fn login(state: &AppState, username: &str, password: &str) -> CommandResult {
    let user = state.auth().login(username, password).await?;
    println!("Signed in as {}", user.username);
    for role in user.role_set() {
        println!("  role: {role}");
    }
    Ok(())
}

/// Create an account and sign in as it.
pub async fn register(
    state: &AppState,
    username: &str,
    email: &str,
    password: &str,
) -> CommandResult {
    let request = RegisterRequest::new(username, email, password);
    let user = state.auth().register(&request).await?;
    println!("Registered and signed in as {}", user.username);
    Ok(())
}

/// Sign out and clear the persisted session.
pub fn logout(state: &AppState) {
    state.auth().logout();
    println!("Signed out");
}

/// Show the signed-in user, as the backend sees it.
pub async fn me(state: &AppState) -> CommandResult {
    super::check_access(state, None)?;
    let user = state.auth().refresh_user().await?;
    println!("{}", user.username);
    for role in user.role_set() {
        println!("  role: {role}");
    }
    Ok(())
}
