//! Page templates.
//!
//! Each page is an askama template over view data produced elsewhere: the
//! dashboard over a composed [`crate::composer::ViewTree`], the fallback over
//! the fault latched by the crash boundary.

pub mod pages;

pub use pages::{DashboardPage, FallbackPage, LoginPage};
