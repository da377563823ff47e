//! Category and severity tags for shell messages.

use serde::{Deserialize, Serialize};

/// Category of a notification feed entry.
///
/// Producers pick the category; the shell only uses it for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Sale,
    Purchase,
    Delivery,
    Inventory,
    #[default]
    System,
}

impl NotificationKind {
    /// Icon tag used when a producer does not supply one.
    #[must_use]
    pub const fn default_icon(self) -> &'static str {
        match self {
            Self::Sale => "badge-dollar",
            Self::Purchase => "cart",
            Self::Delivery => "truck",
            Self::Inventory => "car",
            Self::System => "bell",
        }
    }
}

/// Severity of a transient toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToastSeverity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl ToastSeverity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for ToastSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_format() {
        let kind: NotificationKind = serde_json::from_str("\"inventory\"").unwrap();
        assert_eq!(kind, NotificationKind::Inventory);
        assert_eq!(kind.default_icon(), "car");
    }

    #[test]
    fn test_severity_display_matches_serde() {
        for severity in [
            ToastSeverity::Info,
            ToastSeverity::Success,
            ToastSeverity::Warning,
            ToastSeverity::Error,
        ] {
            let json = serde_json::to_string(&severity).unwrap();
            assert_eq!(json, format!("\"{severity}\""));
        }
    }
}
