//! myshop Core - Shared types library.
//!
//! This crate provides common types used across all myshop components:
//! - `storefront` - Client library for the shop REST API
//! - `cli` - Command-line storefront client
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, order statuses, roles, and the session user record

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
