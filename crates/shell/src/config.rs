//! Shell configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DEALERDESK_BASE_URL` - Public URL of the shell
//!
//! ## Optional
//! - `DEALERDESK_HOST` - Bind address (default: 127.0.0.1)
//! - `DEALERDESK_PORT` - Listen port (default: 3000)
//! - `DEALERDESK_DATABASE_URL` - `PostgreSQL` connection string, falling back
//!   to `DATABASE_URL`. Without one, sessions and preferences are kept in
//!   process memory.
//! - `DEALERDESK_ENV` - `development` or `production` (default: production)
//! - `DEALERDESK_OPERATORS_FILE` - Operator directory (default: operators.yaml)
//! - `DEALERDESK_AVATAR_URL` - Avatar URL template containing `{name}`
//! - `DEALERDESK_TOAST_TTL_MS` - Toast lifetime (default: 3000)
//! - `DEALERDESK_MARK_READ_DELAY_MS` - Notification sweep delay (default: 2000)
//! - `DEALERDESK_LOG_JSON` - Emit JSON logs when set to `1` or `true`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT`, `SENTRY_SAMPLE_RATE`, `SENTRY_TRACES_SAMPLE_RATE`
//!
//! ## Optional (TLS)
//! - `DEALERDESK_TLS_CERT` - PEM-encoded certificate chain
//! - `DEALERDESK_TLS_KEY` - PEM-encoded private key

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::composer::AvatarTemplate;
use crate::shell::ShellTimings;

/// How long an idle session (and its mounted shell) is kept.
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(8 * 60 * 60);

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Deployment environment. Development shows raw render errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("expected development or production, got {other}")),
        }
    }
}

/// TLS configuration for HTTPS.
#[derive(Clone)]
pub struct TlsConfig {
    /// PEM-encoded certificate chain
    pub cert_pem: String,
    /// PEM-encoded private key
    pub key_pem: SecretString,
}

impl fmt::Debug for TlsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TlsConfig")
            .field("cert_pem", &"[CERTIFICATE]")
            .field("key_pem", &"[REDACTED]")
            .finish()
    }
}

/// Shell application configuration.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL
    pub base_url: Url,
    /// `PostgreSQL` connection URL, if persistence is enabled
    pub database_url: Option<SecretString>,
    pub environment: Environment,
    /// YAML operator directory used to resolve logins
    pub operators_file: PathBuf,
    /// Avatar URL template with a `{name}` placeholder
    pub avatar_url: String,
    pub toast_ttl: Duration,
    pub mark_read_delay: Duration,
    /// Emit JSON-formatted logs
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (defaults to [`Environment::as_str`])
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
    /// TLS configuration for HTTPS (optional)
    pub tls: Option<TlsConfig>,
}

impl ShellConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars(lookup);

        let host = vars.parsed::<IpAddr>("DEALERDESK_HOST", "127.0.0.1")?;
        let port = vars.parsed::<u16>("DEALERDESK_PORT", "3000")?;
        let base_url = vars.required("DEALERDESK_BASE_URL")?;
        let base_url = Url::parse(&base_url)
            .map_err(|e| invalid("DEALERDESK_BASE_URL", e.to_string()))?;
        let database_url = vars
            .optional("DEALERDESK_DATABASE_URL")
            .or_else(|| vars.optional("DATABASE_URL"))
            .map(SecretString::from);
        let environment = vars.parsed::<Environment>("DEALERDESK_ENV", "production")?;
        let operators_file = PathBuf::from(vars.or_default("DEALERDESK_OPERATORS_FILE", "operators.yaml"));

        let avatar_url = vars.or_default("DEALERDESK_AVATAR_URL", AvatarTemplate::DEFAULT);
        if !avatar_url.contains(AvatarTemplate::PLACEHOLDER) {
            return Err(invalid(
                "DEALERDESK_AVATAR_URL",
                format!("must contain {}", AvatarTemplate::PLACEHOLDER),
            ));
        }

        let toast_ttl = vars.millis("DEALERDESK_TOAST_TTL_MS", "3000")?;
        let mark_read_delay = vars.millis("DEALERDESK_MARK_READ_DELAY_MS", "2000")?;
        let log_json = vars
            .optional("DEALERDESK_LOG_JSON")
            .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"));

        let sentry_dsn = vars.optional("SENTRY_DSN");
        let sentry_environment = vars.optional("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = vars
            .optional("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = vars
            .optional("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.1);

        let tls = match (
            vars.optional("DEALERDESK_TLS_CERT"),
            vars.optional("DEALERDESK_TLS_KEY"),
        ) {
            (Some(cert), Some(key)) => Some(TlsConfig {
                cert_pem: cert,
                key_pem: SecretString::from(key),
            }),
            (None, None) => None,
            _ => {
                return Err(invalid(
                    "DEALERDESK_TLS_*",
                    "Both DEALERDESK_TLS_CERT and DEALERDESK_TLS_KEY must be set together",
                ));
            }
        };

        Ok(Self {
            host,
            port,
            base_url,
            database_url,
            environment,
            operators_file,
            avatar_url,
            toast_ttl,
            mark_read_delay,
            log_json,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
            tls,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    #[must_use]
    pub fn avatar_template(&self) -> AvatarTemplate {
        AvatarTemplate::new(self.avatar_url.clone())
    }

    #[must_use]
    pub const fn shell_timings(&self) -> ShellTimings {
        ShellTimings {
            toast_ttl: self.toast_ttl,
            mark_read_delay: self.mark_read_delay,
        }
    }

    /// Whether session cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.scheme() == "https"
    }

    /// A development configuration with defaults, for tests and local runs.
    #[must_use]
    pub fn development(base_url: Url) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url,
            database_url: None,
            environment: Environment::Development,
            operators_file: PathBuf::from("operators.yaml"),
            avatar_url: AvatarTemplate::DEFAULT.to_string(),
            toast_ttl: Duration::from_millis(3000),
            mark_read_delay: Duration::from_millis(2000),
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.1,
            tls: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Vars<F>(F);

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    /// Get an optional variable. Blank values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    fn parsed<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.or_default(key, default)
            .trim()
            .parse::<T>()
            .map_err(|e| invalid(key, e.to_string()))
    }

    fn millis(&self, key: &str, default: &str) -> Result<Duration, ConfigError> {
        match self.parsed::<u64>(key, default)? {
            0 => Err(invalid(key, "must be greater than zero")),
            ms => Ok(Duration::from_millis(ms)),
        }
    }
}

fn invalid(key: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), reason.into())
}
