//! Authenticated operator identity.

use serde::{Deserialize, Serialize};

use dealerdesk_core::{Email, OperatorId, Role};

/// The operator record produced by the identity collaborator.
///
/// Opaque to the shell apart from `role`, which picks the route partition,
/// and `name`, which is shown in the top bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Operator's directory ID.
    pub id: OperatorId,
    /// Display name.
    pub name: String,
    /// Operator's email address.
    pub email: Email,
    /// Operator role.
    pub role: Role,
}
