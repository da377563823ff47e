//! Section content bindings.
//!
//! A binding renders the content pane of one section. Business forms and
//! tables live outside the shell, so most bindings render a placeholder that
//! names the slot the business module mounts into. Bindings are `'static` and
//! compared by address: two sections share content exactly when they point at
//! the same binding.

use std::fmt;
use std::ptr;

use dealerdesk_core::Role;

use crate::boundary::RenderFault;

/// Data a section may read while rendering.
#[derive(Debug, Clone, Copy)]
pub struct SectionContext<'a> {
    pub role: Role,
    pub section_title: &'a str,
    pub operator_name: &'a str,
    pub unread_count: usize,
}

/// Rendered content pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionPane {
    pub slot: &'static str,
    pub heading: String,
    pub lines: Vec<String>,
}

type RenderFn = fn(&'static str, &SectionContext<'_>) -> Result<SectionPane, RenderFault>;

/// Content renderer bound to one or more sections.
pub struct SectionBinding {
    slot: &'static str,
    render: RenderFn,
}

impl SectionBinding {
    /// A binding that reserves `slot` for an external business module.
    #[must_use]
    pub const fn placeholder(slot: &'static str) -> Self {
        Self {
            slot,
            render: render_placeholder,
        }
    }

    #[must_use]
    pub const fn slot(&self) -> &'static str {
        self.slot
    }

    /// Render the content pane.
    ///
    /// # Errors
    ///
    /// Returns the fault raised by the bound renderer.
    pub fn render(&self, context: &SectionContext<'_>) -> Result<SectionPane, RenderFault> {
        (self.render)(self.slot, context)
    }
}

impl PartialEq for SectionBinding {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other)
    }
}

impl Eq for SectionBinding {}

impl fmt::Debug for SectionBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionBinding")
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

/// Landing pane shared by every role.
pub static OVERVIEW: SectionBinding = SectionBinding {
    slot: "overview",
    render: render_overview,
};

/// The customer book. Owned by sales and shared with admin.
pub static CUSTOMER_BOOK: SectionBinding = SectionBinding::placeholder("customers");

fn render_placeholder(
    slot: &'static str,
    context: &SectionContext<'_>,
) -> Result<SectionPane, RenderFault> {
    Ok(SectionPane {
        slot,
        heading: context.section_title.to_string(),
        lines: vec![format!(
            "Content for this section is provided by the {slot} module."
        )],
    })
}

fn render_overview(
    slot: &'static str,
    context: &SectionContext<'_>,
) -> Result<SectionPane, RenderFault> {
    let unread = match context.unread_count {
        0 => "You're all caught up.".to_string(),
        1 => "You have 1 unread notification.".to_string(),
        n => format!("You have {n} unread notifications."),
    };
    Ok(SectionPane {
        slot,
        heading: format!("Welcome back, {}", context.operator_name),
        lines: vec![format!("Signed in to the {} workspace.", context.role.label()), unread],
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn context(unread_count: usize) -> SectionContext<'static> {
        SectionContext {
            role: Role::Sales,
            section_title: "Customers",
            operator_name: "Dana",
            unread_count,
        }
    }

    #[test]
    fn test_bindings_compare_by_address() {
        static OTHER: SectionBinding = SectionBinding::placeholder("customers");
        assert_eq!(&CUSTOMER_BOOK, &CUSTOMER_BOOK);
        assert_ne!(&CUSTOMER_BOOK, &OTHER);
    }

    #[test]
    fn test_placeholder_names_slot() {
        let pane = CUSTOMER_BOOK.render(&context(0)).unwrap();
        assert_eq!(pane.slot, "customers");
        assert_eq!(pane.heading, "Customers");
        assert!(pane.lines[0].contains("customers module"));
    }

    #[test]
    fn test_overview_reports_unread() {
        let pane = OVERVIEW.render(&context(3)).unwrap();
        assert_eq!(pane.heading, "Welcome back, Dana");
        assert_eq!(pane.lines[1], "You have 3 unread notifications.");
        let pane = OVERVIEW.render(&context(0)).unwrap();
        assert_eq!(pane.lines[1], "You're all caught up.");
    }
}
