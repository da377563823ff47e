//! Core types for Dealerdesk.
//!
//! This module provides type-safe wrappers for the shell's domain concepts.

pub mod display_mode;
pub mod email;
pub mod id;
pub mod role;
pub mod tags;

pub use display_mode::DisplayMode;
pub use email::{Email, EmailError};
pub use id::*;
pub use role::{Role, RoleParseError};
pub use tags::{NotificationKind, ToastSeverity};
