//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! dealerdesk-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DEALERDESK_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string
//!
//! Migrations live in `crates/shell/migrations/` and create the `dealerdesk`
//! schema with the `preferences` and `session` tables.

use sqlx::PgPool;
use thiserror::Error;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Neither database URL variable is set.
    #[error("Missing environment variable: DEALERDESK_DATABASE_URL or DATABASE_URL")]
    MissingDatabaseUrl,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Resolve the database URL the same way the shell server does.
pub fn database_url(lookup: impl Fn(&str) -> Option<String>) -> Result<String, MigrationError> {
    lookup("DEALERDESK_DATABASE_URL")
        .or_else(|| lookup("DATABASE_URL"))
        .filter(|url| !url.trim().is_empty())
        .ok_or(MigrationError::MissingDatabaseUrl)
}

/// Run the shell database migrations.
///
/// # Errors
///
/// Returns an error if the URL is missing, the database is unreachable, or a
/// migration fails.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let url = database_url(|key| std::env::var(key).ok())?;

    tracing::info!("Connecting to shell database...");
    let pool = PgPool::connect(&url).await?;

    tracing::info!("Running shell migrations...");
    sqlx::migrate!("../shell/migrations").run(&pool).await?;

    tracing::info!("Shell migrations complete!");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_dealerdesk_url() {
        let url = database_url(|key| match key {
            "DEALERDESK_DATABASE_URL" => Some("postgres://primary".to_string()),
            "DATABASE_URL" => Some("postgres://fallback".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(url, "postgres://primary");
    }

    #[test]
    fn test_falls_back_to_database_url() {
        let url = database_url(|key| (key == "DATABASE_URL").then(|| "postgres://db".to_string()))
            .unwrap();
        assert_eq!(url, "postgres://db");
    }

    #[test]
    fn test_missing_url() {
        assert!(matches!(
            database_url(|_| None),
            Err(MigrationError::MissingDatabaseUrl)
        ));
    }
}
