//! Stateful services layered over the API client.
//!
//! [`auth::AuthService`] owns the session lifecycle and is the single
//! writer of auth state; [`cart::CartService`] mirrors the server-side
//! cart for the current identity.

pub mod auth;
pub mod cart;

pub use auth::{AuthError, AuthService, AuthSnapshot};
pub use cart::{CartService, CartSnapshot};
