//! Identity collaborator error types.

use thiserror::Error;

use dealerdesk_core::{EmailError, OperatorId};

/// Errors that can occur while resolving or loading operator identities.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Login form carried an unusable email.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// No operator with that email.
    #[error("no operator is registered for {0}")]
    UnknownOperator(String),

    /// Directory file could not be read.
    #[error("failed to read operator directory {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Directory file is not valid YAML for the expected shape.
    #[error("invalid operator directory: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Two entries share an id.
    #[error("duplicate operator id {0}")]
    DuplicateId(OperatorId),

    /// Two entries share an email.
    #[error("duplicate operator email {0}")]
    DuplicateEmail(String),

    /// Directory has no operators at all.
    #[error("operator directory is empty")]
    Empty,
}
