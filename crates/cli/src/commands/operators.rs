//! Operator directory commands.
//!
//! # Usage
//!
//! ```bash
//! # Validate a directory file and list its operators
//! dealerdesk-cli operators check operators.yaml
//! ```

use std::path::Path;

use dealerdesk_core::Role;
use dealerdesk_shell::services::{IdentityError, OperatorDirectory};

/// Validate an operator directory and log a summary.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the directory is invalid.
pub fn check(path: &Path) -> Result<OperatorDirectory, IdentityError> {
    let directory = OperatorDirectory::load(path)?;

    for role in Role::ALL {
        let count = directory
            .operators()
            .iter()
            .filter(|identity| identity.role == role)
            .count();
        if count == 0 {
            tracing::warn!(%role, "No operators can reach this dashboard");
        } else {
            tracing::info!(%role, count, "Operators");
        }
    }

    tracing::info!(
        total = directory.len(),
        file = %path.display(),
        "Operator directory is valid"
    );
    Ok(directory)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_check_bundled_directory() {
        let path = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../../operators.yaml"));
        let directory = check(path).unwrap();
        assert_eq!(directory.len(), 4);
    }

    #[test]
    fn test_check_missing_file() {
        let err = check(Path::new("/nonexistent/operators.yaml")).unwrap_err();
        assert!(matches!(err, IdentityError::Io { .. }));
    }
}
