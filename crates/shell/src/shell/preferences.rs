//! Preference store and the display-mode preference.
//!
//! The store holds one value per `(operator, key)`. The only key the shell
//! writes is [`DisplayMode::STORAGE_KEY`].

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use sqlx::PgPool;
use thiserror::Error;

use dealerdesk_core::{DisplayMode, OperatorId};

use crate::db;

/// Errors from the preference store.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Backing store for operator preferences.
///
/// Cheap to clone; clones share the same storage.
#[derive(Clone)]
pub enum PreferenceStore {
    /// Process-local storage, used when no database is configured.
    Memory(Arc<RwLock<HashMap<(OperatorId, String), String>>>),
    /// `dealerdesk.preferences` table.
    Postgres(PgPool),
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory(_) => f.write_str("PreferenceStore::Memory"),
            Self::Postgres(_) => f.write_str("PreferenceStore::Postgres"),
        }
    }
}

impl PreferenceStore {
    /// An empty in-process store.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(Arc::default())
    }

    /// Read the value stored for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing database fails.
    pub async fn get(
        &self,
        operator_id: OperatorId,
        key: &str,
    ) -> Result<Option<String>, PreferenceError> {
        match self {
            Self::Memory(values) => Ok(values
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .get(&(operator_id, key.to_string()))
                .cloned()),
            Self::Postgres(pool) => Ok(db::preferences::get_preference(pool, operator_id, key).await?),
        }
    }

    /// Store `value` for `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing database fails.
    pub async fn set(
        &self,
        operator_id: OperatorId,
        key: &str,
        value: &str,
    ) -> Result<(), PreferenceError> {
        match self {
            Self::Memory(values) => {
                values
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert((operator_id, key.to_string()), value.to_string());
                Ok(())
            }
            Self::Postgres(pool) => {
                db::preferences::set_preference(pool, operator_id, key, value).await?;
                Ok(())
            }
        }
    }
}

/// The operator's display mode, restored at mount and persisted on toggle.
#[derive(Debug)]
pub struct DisplayPreference {
    operator_id: OperatorId,
    mode: DisplayMode,
    store: PreferenceStore,
}

impl DisplayPreference {
    /// Restore the persisted display mode.
    ///
    /// A missing value means light and nothing is written back. An
    /// unrecognised value is also read as light.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn restore(
        store: PreferenceStore,
        operator_id: OperatorId,
    ) -> Result<Self, PreferenceError> {
        let stored = store.get(operator_id, DisplayMode::STORAGE_KEY).await?;
        let mode = match stored.as_deref() {
            None => DisplayMode::default(),
            Some(value) => DisplayMode::from_stored(value).unwrap_or_else(|| {
                tracing::warn!(%operator_id, value, "Ignoring unrecognised display mode value");
                DisplayMode::default()
            }),
        };
        Ok(Self {
            operator_id,
            mode,
            store,
        })
    }

    /// Light mode without consulting the store. Used when restore fails.
    #[must_use]
    pub fn fallback(store: PreferenceStore, operator_id: OperatorId) -> Self {
        Self {
            operator_id,
            mode: DisplayMode::default(),
            store,
        }
    }

    /// Flip the display mode.
    ///
    /// The new value is persisted before it is applied, so a failed write
    /// leaves the current mode untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub async fn toggle(&mut self) -> Result<DisplayMode, PreferenceError> {
        let next = self.mode.toggled();
        self.store
            .set(self.operator_id, DisplayMode::STORAGE_KEY, next.stored_value())
            .await?;
        self.mode = next;
        Ok(next)
    }

    #[must_use]
    pub const fn mode(&self) -> DisplayMode {
        self.mode
    }
}
