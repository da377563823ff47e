//! Database operations for the shell's `PostgreSQL` schema.
//!
//! # Schema: `dealerdesk`
//!
//! - `preferences` - Per-operator key/value preferences (display mode)
//! - `session` - tower-sessions session records
//!
//! # Migrations
//!
//! Migrations are stored in `crates/shell/migrations/` and run via:
//! ```bash
//! cargo run -p dealerdesk-cli -- migrate
//! ```

pub mod preferences;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Create a `PostgreSQL` connection pool.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
