//! Operator roles.
//!
//! The role decides which route partition an operator may enter and which
//! dashboard menu they see.

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid operator role: {0}")]
pub struct RoleParseError(pub String);

/// One of the four fixed operator personas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Back-office administrator. Sees every section and the sales customer book.
    Admin,
    /// Acquires vehicles and their paperwork.
    Purchase,
    /// Sells vehicles and owns the customer book.
    Sales,
    /// Hands vehicles over to customers.
    Delivery,
}

impl Role {
    /// Every role, in menu order.
    pub const ALL: [Self; 4] = [Self::Admin, Self::Purchase, Self::Sales, Self::Delivery];

    /// Wire and route-prefix form (`"admin"`, `"purchase"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Purchase => "purchase",
            Self::Sales => "sales",
            Self::Delivery => "delivery",
        }
    }

    /// Human-readable label shown in the navigation rail.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Purchase => "Purchase Team",
            Self::Sales => "Sales Team",
            Self::Delivery => "Delivery Team",
        }
    }

    /// Path of the role's dashboard home (`/admin`, ...).
    #[must_use]
    pub fn home_path(self) -> String {
        format!("/{}", self.as_str())
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "purchase" => Ok(Self::Purchase),
            "sales" => Ok(Self::Sales),
            "delivery" => Ok(Self::Delivery),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse_agree() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Admin".parse::<Role>().is_err());
        assert_eq!(
            "owner".parse::<Role>().unwrap_err(),
            RoleParseError("owner".to_string())
        );
    }

    #[test]
    fn test_home_path() {
        assert_eq!(Role::Delivery.home_path(), "/delivery");
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Purchase).unwrap(), "\"purchase\"");
    }
}
