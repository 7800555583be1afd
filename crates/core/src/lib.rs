//! Shopdeck Core - Shared types library.
//!
//! This crate provides common types used across all Shopdeck components:
//! - `dashboard` - Admin dashboard service (backend-for-frontend)
//!
//! # Architecture
//!
//! The core crate contains only types and pure validation logic - no I/O,
//! no HTTP clients, no caching. This keeps it lightweight and allows it to
//! be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Pages, entity records, status enums, ID newtypes, and
//!   form validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
