//! Dashboard composer.
//!
//! Binds a role's menu, title table and section bindings into a [`ViewTree`]:
//! navigation rail, optional top bar and the active content pane. The
//! composer is stateless apart from configuration; everything it reads comes
//! from the mounted shell through [`Chrome`].

pub mod bindings;
pub mod partition;
pub mod sections;

use dealerdesk_core::{DisplayMode, Role};

pub use bindings::{SectionBinding, SectionContext, SectionPane};
pub use sections::{AdminSection, DeliverySection, PurchaseSection, SalesSection, SectionSet};

use crate::boundary::{RenderFault, RenderScope};
use crate::models::Identity;
use crate::shell::notifications::{Notification, NotificationFeed};
use crate::shell::navigation::NavigationState;

/// Product name shown at the top of the navigation rail.
pub const BRAND: &str = "Dealerdesk";

/// Avatar image URL with a `{name}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarTemplate(String);

impl AvatarTemplate {
    pub const PLACEHOLDER: &'static str = "{name}";
    pub const DEFAULT: &'static str = "https://ui-avatars.com/api/?name={name}&background=random";

    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Avatar URL for an operator display name.
    #[must_use]
    pub fn url_for(&self, name: &str) -> String {
        self.0.replace(Self::PLACEHOLDER, &urlencoding::encode(name))
    }
}

impl Default for AvatarTemplate {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

/// Shell state read by the composer.
#[derive(Debug, Clone, Copy)]
pub struct Chrome<'a> {
    pub operator: &'a Identity,
    pub display_mode: DisplayMode,
    pub feed: &'a NotificationFeed,
    pub panel_open: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavRail {
    pub brand: &'static str,
    pub role_label: &'static str,
    pub items: Vec<NavItem>,
    pub logout_action: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorBadge {
    pub name: String,
    pub role_label: &'static str,
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopBar {
    pub title: &'static str,
    pub operator: OperatorBadge,
    pub dark_mode: bool,
    pub unread_count: usize,
    pub panel_open: bool,
    pub notifications: Vec<Notification>,
}

/// A composed dashboard page, ready for the page template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewTree {
    pub role: Role,
    pub dashboard: &'static str,
    pub active_section: &'static str,
    pub title: &'static str,
    pub nav: NavRail,
    pub top_bar: Option<TopBar>,
    pub binding: &'static SectionBinding,
    pub content: SectionPane,
}

/// Composes role dashboards.
#[derive(Debug, Clone, Default)]
pub struct DashboardComposer {
    avatar: AvatarTemplate,
}

impl DashboardComposer {
    #[must_use]
    pub const fn new(avatar: AvatarTemplate) -> Self {
        Self { avatar }
    }

    #[must_use]
    pub const fn avatar(&self) -> &AvatarTemplate {
        &self.avatar
    }

    /// Compose `role`'s dashboard with `active_section_id` selected.
    ///
    /// Ids outside the role's menu render the role's default section.
    ///
    /// # Errors
    ///
    /// Returns the fault raised by the active section's binding.
    pub fn render(
        &self,
        role: Role,
        active_section_id: &str,
        chrome: &Chrome<'_>,
        scope: &mut RenderScope,
    ) -> Result<ViewTree, RenderFault> {
        match role {
            Role::Admin => self.compose::<AdminSection>(active_section_id, chrome, scope),
            Role::Purchase => self.compose::<PurchaseSection>(active_section_id, chrome, scope),
            Role::Sales => self.compose::<SalesSection>(active_section_id, chrome, scope),
            Role::Delivery => self.compose::<DeliverySection>(active_section_id, chrome, scope),
        }
    }

    /// Select a section. The only writer of the active section id.
    ///
    /// Stores and returns the resolved id, so an unknown id selects the
    /// role's default section.
    pub fn on_section_change(
        &self,
        role: Role,
        navigation: &mut NavigationState,
        id: &str,
    ) -> &'static str {
        let resolved = resolve_section_id(role, id);
        navigation.set_active_section_id(resolved);
        resolved
    }

    fn compose<S: SectionSet>(
        &self,
        active_section_id: &str,
        chrome: &Chrome<'_>,
        scope: &mut RenderScope,
    ) -> Result<ViewTree, RenderFault> {
        scope.enter(S::DASHBOARD);
        let active = S::resolve(active_section_id);
        let unread_count = chrome.feed.unread_count();

        let nav = NavRail {
            brand: BRAND,
            role_label: S::ROLE.label(),
            items: S::ALL
                .iter()
                .map(|&section| NavItem {
                    id: section.id(),
                    label: section.label(),
                    icon: section.icon(),
                    href: format!("/{}/{}", S::ROLE, section.id()),
                    active: section == active,
                })
                .collect(),
            logout_action: "/logout",
        };

        let top_bar = active.shows_top_bar().then(|| TopBar {
            title: active.title(),
            operator: OperatorBadge {
                name: chrome.operator.name.clone(),
                role_label: chrome.operator.role.label(),
                avatar_url: self.avatar.url_for(&chrome.operator.name),
            },
            dark_mode: chrome.display_mode.is_dark(),
            unread_count,
            panel_open: chrome.panel_open,
            notifications: chrome.feed.iter().cloned().collect(),
        });

        scope.enter(format!("Section({})", active.id()));
        let binding = active.binding();
        let content = binding.render(&SectionContext {
            role: S::ROLE,
            section_title: active.title(),
            operator_name: &chrome.operator.name,
            unread_count,
        })?;

        Ok(ViewTree {
            role: S::ROLE,
            dashboard: S::DASHBOARD,
            active_section: active.id(),
            title: active.title(),
            nav,
            top_bar,
            binding,
            content,
        })
    }
}

/// Resolve a section id against `role`'s menu, falling back to its default.
#[must_use]
pub fn resolve_section_id(role: Role, id: &str) -> &'static str {
    match role {
        Role::Admin => AdminSection::resolve(id).id(),
        Role::Purchase => PurchaseSection::resolve(id).id(),
        Role::Sales => SalesSection::resolve(id).id(),
        Role::Delivery => DeliverySection::resolve(id).id(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::ptr;

    use dealerdesk_core::{Email, OperatorId};

    use super::*;
    use crate::shell::notifications::NewNotification;

    fn operator(role: Role) -> Identity {
        Identity {
            id: OperatorId::new(7),
            name: "Dana Whitlock".to_string(),
            email: Email::parse("dana@dealer.example").unwrap(),
            role,
        }
    }

    fn render(role: Role, id: &str, feed: &NotificationFeed) -> ViewTree {
        let operator = operator(role);
        let chrome = Chrome {
            operator: &operator,
            display_mode: DisplayMode::Dark,
            feed,
            panel_open: false,
        };
        DashboardComposer::default()
            .render(role, id, &chrome, &mut RenderScope::new("Shell"))
            .unwrap()
    }

    #[test]
    fn test_unknown_section_renders_default() {
        let feed = NotificationFeed::new();
        for role in Role::ALL {
            assert_eq!(
                render(role, "no-such-section", &feed),
                render(role, "overview", &feed),
                "{role}"
            );
        }
    }

    #[test]
    fn test_customers_share_binding() {
        let feed = NotificationFeed::new();
        let admin = render(Role::Admin, "customers", &feed);
        let sales = render(Role::Sales, "customers", &feed);
        assert!(ptr::eq(admin.binding, sales.binding));
        assert_eq!(admin.content, sales.content);
    }

    #[test]
    fn test_admin_users_has_no_top_bar() {
        let feed = NotificationFeed::new();
        assert!(render(Role::Admin, "users", &feed).top_bar.is_none());
        assert!(render(Role::Admin, "profit", &feed).top_bar.is_some());
        assert!(render(Role::Sales, "records", &feed).top_bar.is_some());
    }

    #[test]
    fn test_nav_rail_marks_active_item() {
        let feed = NotificationFeed::new();
        let view = render(Role::Delivery, "completed", &feed);
        let active: Vec<_> = view.nav.items.iter().filter(|item| item.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].href, "/delivery/completed");
        assert_eq!(view.nav.role_label, "Delivery Team");
    }

    #[test]
    fn test_top_bar_reflects_shell_state() {
        let mut feed = NotificationFeed::new();
        feed.append(NewNotification::system("Stock", "3 vehicles arrived"));
        let id = feed.append(NewNotification::system("Sale", "Closed a deal"));
        feed.mark_read(id);

        let bar = render(Role::Sales, "overview", &feed).top_bar.unwrap();
        assert!(bar.dark_mode);
        assert_eq!(bar.unread_count, 1);
        assert_eq!(bar.notifications.len(), 2);
        assert_eq!(bar.title, "Sales Overview");
        assert_eq!(
            bar.operator.avatar_url,
            "https://ui-avatars.com/api/?name=Dana%20Whitlock&background=random"
        );
    }

    #[test]
    fn test_render_scope_reaches_section() {
        let operator = operator(Role::Admin);
        let feed = NotificationFeed::new();
        let chrome = Chrome {
            operator: &operator,
            display_mode: DisplayMode::Light,
            feed: &feed,
            panel_open: false,
        };
        let mut scope = RenderScope::new("Shell");
        DashboardComposer::default()
            .render(Role::Admin, "users", &chrome, &mut scope)
            .unwrap();
        assert_eq!(scope.to_string(), "Shell > AdminDashboard > Section(users)");
    }

    #[test]
    fn test_section_change_stores_resolved_id() {
        let composer = DashboardComposer::default();
        let mut navigation = NavigationState::default();

        assert_eq!(
            composer.on_section_change(Role::Purchase, &mut navigation, "uploadDocuments"),
            "uploadDocuments"
        );
        assert_eq!(navigation.active_section_id(), "uploadDocuments");

        composer.on_section_change(Role::Purchase, &mut navigation, "users");
        assert_eq!(navigation.active_section_id(), "overview");
    }
}
