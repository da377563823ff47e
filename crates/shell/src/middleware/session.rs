//! Session middleware configuration.
//!
//! Sessions live in `PostgreSQL` (`dealerdesk.session`) when a database is
//! configured and in process memory otherwise.

use sqlx::PgPool;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::{SESSION_IDLE_TIMEOUT, ShellConfig};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "dealerdesk_session";

/// Create the session layer with the `PostgreSQL` store.
///
/// # Panics
///
/// Panics if the schema name or table name is invalid (should never happen
/// with hardcoded "dealerdesk" and "session" values).
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &ShellConfig,
) -> SessionManagerLayer<PostgresStore> {
    // The session table is created by the shell migrations.
    let store = PostgresStore::new(pool.clone())
        .with_schema_name("dealerdesk")
        .expect("valid schema name")
        .with_table_name("session")
        .expect("valid table name");

    configure(store, config)
}

/// Create the session layer with an in-process store.
#[must_use]
pub fn create_memory_session_layer(config: &ShellConfig) -> SessionManagerLayer<MemoryStore> {
    configure(MemoryStore::default(), config)
}

fn configure<S: SessionStore>(store: S, config: &ShellConfig) -> SessionManagerLayer<S> {
    let idle_seconds = i64::try_from(SESSION_IDLE_TIMEOUT.as_secs()).unwrap_or(i64::MAX);

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(idle_seconds),
        ))
        .with_secure(config.secure_cookies())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
