//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::composer::DashboardComposer;
use crate::config::{SESSION_IDLE_TIMEOUT, ShellConfig};
use crate::diagnostics::{DiagnosticSink, SentrySink, TracingSink};
use crate::services::IdentityProvider;
use crate::shell::ShellRegistry;
use crate::shell::preferences::PreferenceStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ShellConfig,
    pool: Option<PgPool>,
    identities: Arc<dyn IdentityProvider>,
    shells: ShellRegistry,
    composer: DashboardComposer,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl AppState {
    /// Create application state.
    ///
    /// Preferences are stored in `pool` when one is given and in process
    /// memory otherwise. Render faults go to Sentry when a DSN is configured.
    #[must_use]
    pub fn new(
        config: ShellConfig,
        pool: Option<PgPool>,
        identities: Arc<dyn IdentityProvider>,
    ) -> Self {
        let preferences = pool
            .clone()
            .map_or_else(PreferenceStore::memory, PreferenceStore::Postgres);
        let diagnostics: Arc<dyn DiagnosticSink> = if config.sentry_dsn.is_some() {
            Arc::new(SentrySink)
        } else {
            Arc::new(TracingSink)
        };
        Self::with_parts(config, pool, identities, preferences, diagnostics)
    }

    /// Create application state from explicit parts.
    #[must_use]
    pub fn with_parts(
        config: ShellConfig,
        pool: Option<PgPool>,
        identities: Arc<dyn IdentityProvider>,
        preferences: PreferenceStore,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        let shells = ShellRegistry::new(preferences, config.shell_timings(), SESSION_IDLE_TIMEOUT);
        let composer = DashboardComposer::new(config.avatar_template());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                identities,
                shells,
                composer,
                diagnostics,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ShellConfig {
        &self.inner.config
    }

    /// Database pool, if persistence is enabled.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }

    #[must_use]
    pub fn identities(&self) -> &dyn IdentityProvider {
        self.inner.identities.as_ref()
    }

    #[must_use]
    pub fn shells(&self) -> &ShellRegistry {
        &self.inner.shells
    }

    #[must_use]
    pub fn composer(&self) -> &DashboardComposer {
        &self.inner.composer
    }

    #[must_use]
    pub fn diagnostics(&self) -> &dyn DiagnosticSink {
        self.inner.diagnostics.as_ref()
    }
}
