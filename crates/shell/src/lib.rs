//! Dealerdesk shell library.
//!
//! Role-gated dashboard shell for the dealership suite: sign-in, a per-role
//! dashboard with navigation, display preference, notification feed, toasts
//! and a crash boundary around the dashboard render.
//!
//! The binary in `main.rs` wires configuration, logging and the server on top
//! of [`app::app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod boundary;
pub mod components;
pub mod composer;
pub mod config;
pub mod db;
pub mod diagnostics;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod shell;
pub mod state;
