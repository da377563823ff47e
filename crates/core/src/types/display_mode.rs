//! Light/dark display mode and its persisted representation.

use serde::{Deserialize, Serialize};

/// Shell display mode.
///
/// Persisted as `"enabled"` (dark) or `"disabled"` (light) under
/// [`DisplayMode::STORAGE_KEY`]. A missing value means light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Light,
    Dark,
}

impl DisplayMode {
    /// Fixed key the preference is stored under.
    pub const STORAGE_KEY: &'static str = "darkMode";

    /// Stored value for dark mode.
    pub const ENABLED: &'static str = "enabled";

    /// Stored value for light mode.
    pub const DISABLED: &'static str = "disabled";

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Value written to the preference store.
    #[must_use]
    pub const fn stored_value(self) -> &'static str {
        match self {
            Self::Light => Self::DISABLED,
            Self::Dark => Self::ENABLED,
        }
    }

    /// Decode a stored value. Returns `None` for anything unrecognised.
    #[must_use]
    pub fn from_stored(value: &str) -> Option<Self> {
        match value {
            Self::ENABLED => Some(Self::Dark),
            Self::DISABLED => Some(Self::Light),
            _ => None,
        }
    }
}

impl From<bool> for DisplayMode {
    fn from(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }
}
