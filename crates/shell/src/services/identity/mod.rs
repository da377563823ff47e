//! Identity collaborator.
//!
//! The shell never verifies credentials. It asks an [`IdentityProvider`] to
//! turn a login request into an [`Identity`] and records the outcome in the
//! session. The shipped provider is a static operator directory loaded from
//! YAML, which stands in for an external identity service.

mod error;

pub use error::IdentityError;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use dealerdesk_core::{Email, OperatorId, Role};

use crate::models::Identity;

/// Login form submitted to `POST /login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

/// Resolves login requests into operator identities.
pub trait IdentityProvider: Send + Sync {
    /// Resolve `request` into an identity.
    ///
    /// # Errors
    ///
    /// Returns an error when the request does not name a known operator.
    fn resolve(&self, request: &LoginRequest) -> Result<Identity, IdentityError>;
}

#[derive(Debug, Deserialize)]
struct DirectoryFile {
    operators: Vec<OperatorEntry>,
}

#[derive(Debug, Deserialize)]
struct OperatorEntry {
    id: OperatorId,
    name: String,
    email: Email,
    role: Role,
}

/// In-memory operator directory keyed by email.
#[derive(Debug, Clone, Default)]
pub struct OperatorDirectory {
    by_email: HashMap<Email, Identity>,
}

impl OperatorDirectory {
    /// Build a directory from identities.
    ///
    /// # Errors
    ///
    /// Returns an error if ids or emails repeat, or if `operators` is empty.
    pub fn from_identities(
        operators: impl IntoIterator<Item = Identity>,
    ) -> Result<Self, IdentityError> {
        let mut seen_ids = HashSet::new();
        let mut by_email = HashMap::new();

        for identity in operators {
            if !seen_ids.insert(identity.id) {
                return Err(IdentityError::DuplicateId(identity.id));
            }
            if by_email.contains_key(&identity.email) {
                return Err(IdentityError::DuplicateEmail(identity.email.to_string()));
            }
            by_email.insert(identity.email.clone(), identity);
        }

        if by_email.is_empty() {
            return Err(IdentityError::Empty);
        }

        Ok(Self { by_email })
    }

    /// Parse a YAML directory document.
    ///
    /// ```yaml
    /// operators:
    ///   - { id: 1, name: Avery Stone, email: admin@dealer.example, role: admin }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or the directory is invalid.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, IdentityError> {
        let file: DirectoryFile = serde_yaml::from_str(yaml)?;
        Self::from_identities(file.operators.into_iter().map(|entry| Identity {
            id: entry.id,
            name: entry.name,
            email: entry.email,
            role: entry.role,
        }))
    }

    /// Load a YAML directory from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn load(path: &Path) -> Result<Self, IdentityError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| IdentityError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Number of operators in the directory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_email.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_email.is_empty()
    }

    /// Operators sorted by id.
    #[must_use]
    pub fn operators(&self) -> Vec<&Identity> {
        let mut operators: Vec<_> = self.by_email.values().collect();
        operators.sort_by_key(|identity| identity.id);
        operators
    }
}

impl IdentityProvider for OperatorDirectory {
    fn resolve(&self, request: &LoginRequest) -> Result<Identity, IdentityError> {
        let email = Email::parse(&request.email)?;
        self.by_email
            .get(&email)
            .cloned()
            .ok_or_else(|| IdentityError::UnknownOperator(email.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const DIRECTORY: &str = r"
operators:
  - { id: 1, name: Avery Stone, email: admin@dealer.example, role: admin }
  - { id: 2, name: Sam Ortiz, email: Sales@Dealer.example, role: sales }
";

    fn login(email: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
        }
    }

    #[test]
    fn test_resolve_known_operator() {
        let directory = OperatorDirectory::from_yaml_str(DIRECTORY).unwrap();
        let identity = directory.resolve(&login("sales@dealer.example")).unwrap();
        assert_eq!(identity.role, Role::Sales);
        assert_eq!(identity.name, "Sam Ortiz");
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let directory = OperatorDirectory::from_yaml_str(DIRECTORY).unwrap();
        assert!(directory.resolve(&login(" ADMIN@dealer.example ")).is_ok());
    }

    #[test]
    fn test_resolve_unknown_operator() {
        let directory = OperatorDirectory::from_yaml_str(DIRECTORY).unwrap();
        let err = directory.resolve(&login("ghost@dealer.example")).unwrap_err();
        assert!(matches!(err, IdentityError::UnknownOperator(_)));
    }

    #[test]
    fn test_resolve_rejects_bad_email() {
        let directory = OperatorDirectory::from_yaml_str(DIRECTORY).unwrap();
        let err = directory.resolve(&login("not-an-email")).unwrap_err();
        assert!(matches!(err, IdentityError::InvalidEmail(_)));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let yaml = r"
operators:
  - { id: 1, name: A, email: a@dealer.example, role: admin }
  - { id: 1, name: B, email: b@dealer.example, role: sales }
";
        let err = OperatorDirectory::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, IdentityError::DuplicateId(_)));
    }

    #[test]
    fn test_duplicate_emails_rejected() {
        let yaml = r"
operators:
  - { id: 1, name: A, email: a@dealer.example, role: admin }
  - { id: 2, name: B, email: A@dealer.example, role: sales }
";
        let err = OperatorDirectory::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, IdentityError::DuplicateEmail(_)));
    }

    #[test]
    fn test_empty_directory_rejected() {
        let err = OperatorDirectory::from_yaml_str("operators: []").unwrap_err();
        assert!(matches!(err, IdentityError::Empty));
    }

    #[test]
    fn test_unknown_role_is_a_parse_error() {
        let yaml = "operators:\n  - { id: 1, name: A, email: a@b.c, role: owner }\n";
        assert!(matches!(
            OperatorDirectory::from_yaml_str(yaml),
            Err(IdentityError::Parse(_))
        ));
    }

    #[test]
    fn test_operators_sorted_by_id() {
        let directory = OperatorDirectory::from_yaml_str(DIRECTORY).unwrap();
        let ids: Vec<i32> = directory.operators().iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
