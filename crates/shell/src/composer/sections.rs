//! Per-role menu definitions.
//!
//! Each role's sections form a closed enum. The string form only appears at
//! the edges (route segments, stored navigation state) and is resolved with
//! [`SectionSet::resolve`], which falls back to the role's default section.

use std::fmt;

use dealerdesk_core::Role;

use super::bindings::{self, SectionBinding};

/// A role's closed set of dashboard sections.
pub trait SectionSet: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Role whose dashboard this menu belongs to.
    const ROLE: Role;
    /// Component name used in render scope paths.
    const DASHBOARD: &'static str;
    /// Section shown for unknown ids.
    const DEFAULT: Self;
    /// Every section, in menu order.
    const ALL: &'static [Self];

    fn id(self) -> &'static str;
    fn label(self) -> &'static str;
    fn icon(self) -> &'static str;
    fn title(self) -> &'static str;
    fn binding(self) -> &'static SectionBinding;
    fn shows_top_bar(self) -> bool;

    fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|section| section.id() == id)
    }

    fn resolve(id: &str) -> Self {
        Self::from_id(id).unwrap_or(Self::DEFAULT)
    }
}

macro_rules! section_set {
    (@top_bar) => { true };
    (@top_bar $shown:literal) => { $shown };
    (@binding $slot:expr) => {{
        static BINDING: SectionBinding = SectionBinding::placeholder($slot);
        &BINDING
    }};
    (@binding $slot:expr, $binding:path) => { &$binding };
    (
        $(#[$meta:meta])*
        $name:ident: $role:ident, $dashboard:literal {
            $(
                $variant:ident = $id:literal, $label:literal, $icon:literal, $title:literal
                $(, binding = $binding:path)?
                $(, top_bar = $top_bar:literal)?
                ;
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl SectionSet for $name {
            const ROLE: Role = Role::$role;
            const DASHBOARD: &'static str = $dashboard;
            const DEFAULT: Self = Self::Overview;
            const ALL: &'static [Self] = &[$(Self::$variant,)+];

            fn id(self) -> &'static str {
                match self {
                    $(Self::$variant => $id,)+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            fn icon(self) -> &'static str {
                match self {
                    $(Self::$variant => $icon,)+
                }
            }

            fn title(self) -> &'static str {
                match self {
                    $(Self::$variant => $title,)+
                }
            }

            fn binding(self) -> &'static SectionBinding {
                match self {
                    $(Self::$variant => section_set!(@binding $id $(, $binding)?),)+
                }
            }

            fn shows_top_bar(self) -> bool {
                match self {
                    $(Self::$variant => section_set!(@top_bar $($top_bar)?),)+
                }
            }
        }
    };
}

section_set! {
    /// Administrator menu.
    AdminSection: Admin, "AdminDashboard" {
        Overview = "overview", "Overview", "layout-dashboard", "Dashboard Overview", binding = bindings::OVERVIEW;
        Inventory = "inventory", "Inventory", "car", "Vehicle Inventory";
        Users = "users", "Users", "users", "User Management", top_bar = false;
        Expenses = "expenses", "Expenses", "receipt", "Expenses";
        Profit = "profit", "Profit", "trending-up", "Profit Analysis";
        Dealers = "dealers", "Dealers", "building", "Dealer Network";
        Customers = "customers", "Customers", "contact", "Customers", binding = bindings::CUSTOMER_BOOK;
        History = "history", "History", "history", "Transaction History";
        Reports = "reports", "Reports", "file-chart", "Reports";
    }
}

section_set! {
    /// Purchase team menu.
    PurchaseSection: Purchase, "PurchaseDashboard" {
        Overview = "overview", "Overview", "layout-dashboard", "Purchase Overview", binding = bindings::OVERVIEW;
        Add = "add", "Add Vehicle", "plus-circle", "Add Vehicle";
        Inventory = "inventory", "Inventory", "car", "Vehicle Inventory";
        UploadDocuments = "uploadDocuments", "Documents", "upload", "Upload Documents";
        Notes = "notes", "Notes", "notebook", "Purchase Notes";
    }
}

section_set! {
    /// Sales team menu.
    SalesSection: Sales, "SalesDashboard" {
        Overview = "overview", "Overview", "layout-dashboard", "Sales Overview", binding = bindings::OVERVIEW;
        Inventory = "inventory", "Inventory", "car", "Available Vehicles";
        Records = "records", "Sales Records", "clipboard-list", "Sales Records";
        Customers = "customers", "Customers", "contact", "Customers", binding = bindings::CUSTOMER_BOOK;
    }
}

section_set! {
    /// Delivery team menu.
    DeliverySection: Delivery, "DeliveryDashboard" {
        Overview = "overview", "Overview", "layout-dashboard", "Delivery Overview", binding = bindings::OVERVIEW;
        Pending = "pending", "Pending", "clock", "Pending Deliveries";
        Completed = "completed", "Completed", "check-circle", "Completed Deliveries";
        Notes = "notes", "Notes", "notebook", "Delivery Notes";
    }
}
