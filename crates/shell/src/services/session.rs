//! Session store: the login/logout lifecycle of one browser session.
//!
//! Owns the [`AuthSession`] record inside the tower-sessions session. Every
//! other component reads it through [`SessionStore::current`].

use tower_sessions::Session;

use crate::models::{AuthSession, Identity, session_keys};

/// Session operation error.
pub type SessionError = tower_sessions::session::Error;

/// Login/logout lifecycle over a tower-sessions [`Session`].
pub struct SessionStore<'a> {
    session: &'a Session,
}

impl<'a> SessionStore<'a> {
    #[must_use]
    pub const fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Record a successful external login.
    ///
    /// An existing login is cleared first so two identities never share a
    /// session, and the session id is cycled to prevent fixation.
    ///
    /// # Errors
    ///
    /// Returns an error if the session backend fails.
    pub async fn login(&self, identity: &Identity) -> Result<(), SessionError> {
        if self.current().await?.is_authenticated() {
            self.logout().await?;
        }
        self.session.cycle_id().await?;
        self.session.insert(session_keys::IDENTITY, identity).await?;
        tracing::info!(operator_id = %identity.id, role = %identity.role, "Operator logged in");
        Ok(())
    }

    /// Clear the session back to unauthenticated.
    ///
    /// Safe to call on an anonymous session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session backend fails.
    pub async fn logout(&self) -> Result<(), SessionError> {
        self.session.flush().await
    }

    /// Read the current authentication state.
    ///
    /// # Errors
    ///
    /// Returns an error if the session backend fails.
    pub async fn current(&self) -> Result<AuthSession, SessionError> {
        let identity = self.session.get::<Identity>(session_keys::IDENTITY).await?;
        Ok(AuthSession { identity })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use dealerdesk_core::{Email, OperatorId, Role};

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn identity(id: i32, role: Role) -> Identity {
        Identity {
            id: OperatorId::new(id),
            name: format!("Operator {id}"),
            email: Email::parse(&format!("op{id}@dealer.example")).unwrap(),
            role,
        }
    }

    #[tokio::test]
    async fn test_new_session_is_anonymous() {
        let session = session();
        let store = SessionStore::new(&session);
        assert_eq!(store.current().await.unwrap(), AuthSession::anonymous());
    }

    #[tokio::test]
    async fn test_login_then_current() {
        let session = session();
        let store = SessionStore::new(&session);
        let sales = identity(2, Role::Sales);

        store.login(&sales).await.unwrap();

        let current = store.current().await.unwrap();
        assert!(current.is_authenticated());
        assert_eq!(current.identity, Some(sales));
    }

    #[tokio::test]
    async fn test_logout_clears_identity() {
        let session = session();
        let store = SessionStore::new(&session);
        store.login(&identity(1, Role::Admin)).await.unwrap();

        store.logout().await.unwrap();

        assert!(!store.current().await.unwrap().is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_when_anonymous_is_harmless() {
        let session = session();
        let store = SessionStore::new(&session);
        store.logout().await.unwrap();
        assert!(!store.current().await.unwrap().is_authenticated());
    }

    #[tokio::test]
    async fn test_second_login_replaces_first() {
        let session = session();
        let store = SessionStore::new(&session);
        store.login(&identity(1, Role::Admin)).await.unwrap();
        store.login(&identity(4, Role::Delivery)).await.unwrap();

        let current = store.current().await.unwrap();
        assert_eq!(current.identity.map(|i| i.role), Some(Role::Delivery));
    }
}
