//! myshop Storefront client library.
//!
//! Everything the storefront UI needs that is not rendering: the REST API
//! client, payload normalization, session persistence, authentication and
//! cart state, and route guarding.
//!
//! # Architecture
//!
//! - [`api`] - REST client for the shop backend (`/api`), including the
//!   conversion layer that turns heterogeneous order/cart payloads into the
//!   canonical [`models`]
//! - [`session`] - persisted token + user record (the browser-storage seam)
//! - [`services`] - auth and cart state controllers
//! - [`guard`] - route access decisions derived from auth state
//! - [`state`] - [`state::AppState`] bundling the above for consumers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod filters;
pub mod guard;
pub mod models;
pub mod services;
pub mod session;
pub mod state;

pub use error::{AppError, Result};
