//! Route partitions.
//!
//! Every dashboard route belongs to exactly one role's partition, named by
//! its path prefix. The access gate only checks that a session exists; this
//! module decides which partitions an authenticated role may enter.

use dealerdesk_core::Role;

use super::sections::{SalesSection, SectionSet};

/// Whether an operator with `session_role` may open `section` in the
/// partition of `route_role`.
///
/// Operators are admitted to their own partition. Admin is additionally
/// admitted to the sales customer book.
#[must_use]
pub fn admits(session_role: Role, route_role: Role, section: Option<&str>) -> bool {
    if session_role == route_role {
        return true;
    }
    session_role == Role::Admin
        && route_role == Role::Sales
        && section == Some(SalesSection::Customers.id())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_own_partition_admitted() {
        for role in Role::ALL {
            assert!(admits(role, role, None));
            assert!(admits(role, role, Some("anything")));
        }
    }

    #[test]
    fn test_admin_reaches_sales_customers_only() {
        assert!(admits(Role::Admin, Role::Sales, Some("customers")));
        assert!(!admits(Role::Admin, Role::Sales, Some("records")));
        assert!(!admits(Role::Admin, Role::Sales, None));
        assert!(!admits(Role::Admin, Role::Delivery, Some("customers")));
    }

    #[test]
    fn test_other_roles_stay_home() {
        assert!(!admits(Role::Sales, Role::Admin, None));
        assert!(!admits(Role::Sales, Role::Admin, Some("customers")));
        assert!(!admits(Role::Delivery, Role::Purchase, Some("notes")));
    }
}
