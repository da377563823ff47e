//! Active-section state shared across one session's dashboard views.

/// Section id shown when nothing else has been selected.
pub const DEFAULT_SECTION: &str = "overview";

/// Which section the dashboard shows. Reset on every mount; never persisted.
///
/// Only the dashboard composer writes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    active_section_id: String,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            active_section_id: DEFAULT_SECTION.to_string(),
        }
    }
}

impl NavigationState {
    #[must_use]
    pub fn active_section_id(&self) -> &str {
        &self.active_section_id
    }

    pub(crate) fn set_active_section_id(&mut self, id: &str) {
        id.clone_into(&mut self.active_section_id);
    }
}
