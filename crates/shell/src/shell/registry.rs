//! Registry of mounted shells.
//!
//! A login mints a [`ShellId`], stores it in the session and mounts a shell
//! under it. Shells that go unused for the session lifetime are evicted.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use moka::future::Cache;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::preferences::PreferenceStore;
use super::{ShellHandle, ShellTimings};
use crate::models::Identity;

/// Upper bound on concurrently mounted shells.
const MAX_SHELLS: u64 = 10_000;

/// Random key of a mounted shell, minted at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShellId(Uuid);

impl ShellId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShellId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ShellId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Mounted shells keyed by shell id.
#[derive(Clone)]
pub struct ShellRegistry {
    shells: Cache<ShellId, ShellHandle>,
    preferences: PreferenceStore,
    timings: ShellTimings,
}

impl fmt::Debug for ShellRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShellRegistry")
            .field("mounted", &self.shells.entry_count())
            .field("preferences", &self.preferences)
            .field("timings", &self.timings)
            .finish()
    }
}

impl ShellRegistry {
    /// Create a registry that evicts shells idle for `idle_timeout`.
    #[must_use]
    pub fn new(preferences: PreferenceStore, timings: ShellTimings, idle_timeout: Duration) -> Self {
        let shells = Cache::builder()
            .max_capacity(MAX_SHELLS)
            .time_to_idle(idle_timeout)
            .build();

        Self {
            shells,
            preferences,
            timings,
        }
    }

    #[must_use]
    pub const fn preferences(&self) -> &PreferenceStore {
        &self.preferences
    }

    #[must_use]
    pub const fn timings(&self) -> ShellTimings {
        self.timings
    }

    /// Mount a fresh shell for `identity` under a new id.
    pub async fn mount(&self, identity: Identity) -> (ShellId, ShellHandle) {
        let id = ShellId::new();
        let shell = self.mount_at(id, identity).await;
        (id, shell)
    }

    /// Look up a mounted shell.
    pub async fn get(&self, id: ShellId) -> Option<ShellHandle> {
        self.shells.get(&id).await
    }

    /// Return the shell under `id`, mounting one for `identity` if none is.
    ///
    /// Concurrent callers for the same id share a single mount.
    pub async fn attach(&self, id: ShellId, identity: Identity) -> ShellHandle {
        self.shells
            .get_with(
                id,
                ShellHandle::mount(identity, self.preferences.clone(), self.timings),
            )
            .await
    }

    /// Unmount the shell under `id`, cancelling its timers.
    pub async fn unmount(&self, id: ShellId) {
        if let Some(shell) = self.shells.remove(&id).await {
            shell.lock().await.unmount();
            tracing::info!(shell_id = %id, "Shell unmounted");
        }
    }

    /// Discard the shell under `id` and mount a fresh one in its place.
    pub async fn remount(&self, id: ShellId, identity: Identity) -> ShellHandle {
        self.unmount(id).await;
        self.mount_at(id, identity).await
    }

    async fn mount_at(&self, id: ShellId, identity: Identity) -> ShellHandle {
        let shell = ShellHandle::mount(identity, self.preferences.clone(), self.timings).await;
        self.shells.insert(id, shell.clone()).await;
        tracing::info!(shell_id = %id, "Shell mounted");
        shell
    }
}
