//! Dealerdesk Core - Shared types library.
//!
//! This crate provides the vocabulary shared by the Dealerdesk shell and its
//! tooling:
//! - `shell` - Role-gated dashboard shell (web binary + library)
//! - `cli` - Command-line tools for migrations and operator directories
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP.
//!
//! # Modules
//!
//! - [`types`] - Operator roles, type-safe ids, emails, display mode and
//!   notification/toast tags

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
