//! Notification kind domain type.
//!
//! The data layer stores the kind as a free string; this enum covers the
//! values the dispatcher emits. Unknown strings read back as-is.

use serde::{Deserialize, Serialize};

/// Severity tag on a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    /// Stored string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_expose_lowercase_str_values() {
        assert_eq!(NotificationKind::Info.as_str(), "info");
        assert_eq!(NotificationKind::Success.as_str(), "success");
        assert_eq!(NotificationKind::Warning.as_str(), "warning");
        assert_eq!(NotificationKind::Error.as_str(), "error");
    }

    #[test]
    fn should_serialize_kind_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&NotificationKind::Warning).unwrap(),
            "\"warning\""
        );
    }
}
