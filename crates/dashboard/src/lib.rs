//! Shopdeck Dashboard library.
//!
//! This crate provides the admin dashboard functionality as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod backend;
pub mod cache;
pub mod config;
pub mod controller;
pub mod error;
pub mod routes;
pub mod session;
pub mod state;
