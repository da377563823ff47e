//! Domain models for the shell.
//!
//! - [`identity`] - The authenticated operator record
//! - [`session`] - Session-stored authentication state and its keys

pub mod identity;
pub mod session;

pub use identity::Identity;
pub use session::{AuthSession, keys as session_keys};
