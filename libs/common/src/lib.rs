//! Common library for the storefront backend
//!
//! This crate provides shared infrastructure used by the shop service:
//! database connectivity and shared error types.

pub mod database;
pub mod error;
