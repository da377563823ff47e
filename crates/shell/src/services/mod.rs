//! Services behind the shell's routes.
//!
//! # Services
//!
//! - `identity` - Identity collaborator (operator directory)
//! - `session` - Login/logout lifecycle over the session record

pub mod identity;
pub mod session;

pub use identity::{IdentityError, IdentityProvider, LoginRequest, OperatorDirectory};
pub use session::{SessionError, SessionStore};
