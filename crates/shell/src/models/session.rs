//! Session-related types for operator authentication.

use serde::Serialize;

use super::identity::Identity;

/// Authentication state of one browser session.
///
/// Always derived from the session record on read; never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthSession {
    /// The logged-in operator, if any.
    pub identity: Option<Identity>,
}

impl AuthSession {
    /// A session with no operator.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { identity: None }
    }

    /// A session for `identity`.
    #[must_use]
    pub const fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

/// Session keys for shell data.
pub mod keys {
    /// Key for the logged-in operator.
    pub const IDENTITY: &str = "identity";
    /// Key for the id of the shell mounted for this session.
    pub const SHELL_ID: &str = "shell_id";
}
