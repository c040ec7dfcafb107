//! Core types for myshop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod role;
pub mod status;
pub mod user;

pub use id::*;
pub use role::{normalize_roles, role_tag};
pub use status::OrderStatus;
pub use user::SessionUser;
