//! Operator preference storage.

use sqlx::PgPool;

use dealerdesk_core::OperatorId;

/// Get an operator's stored value for `key`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn get_preference(
    pool: &PgPool,
    operator_id: OperatorId,
    key: &str,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        r"
        SELECT value FROM dealerdesk.preferences
        WHERE operator_id = $1 AND key = $2
        ",
    )
    .bind(operator_id)
    .bind(key)
    .fetch_optional(pool)
    .await
}

/// Insert or replace an operator's value for `key`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn set_preference(
    pool: &PgPool,
    operator_id: OperatorId,
    key: &str,
    value: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO dealerdesk.preferences (operator_id, key, value)
        VALUES ($1, $2, $3)
        ON CONFLICT (operator_id, key) DO UPDATE SET value = $3, updated_at = NOW()
        ",
    )
    .bind(operator_id)
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}
