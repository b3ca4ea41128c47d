//! Error types for navigation tree operations.

use std::fmt;

/// What a failed lookup was looking for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotFoundKind {
    /// A child item addressed by name.
    Item,
    /// A navigation tree addressed by its configuration name.
    Navigation,
}

impl fmt::Display for NotFoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item => f.write_str("Item"),
            Self::Navigation => f.write_str("Navigation"),
        }
    }
}

/// Error returned by item tree and factory operations.
///
/// All variants describe configuration or programming mistakes. None of them
/// are retried internally.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    /// Item name is empty or contains characters outside `[A-Za-z0-9_]`.
    #[error("Name must be non-empty alphanumeric string, '{0}' given")]
    InvalidName(String),
    /// Unknown child name or unknown tree name.
    #[error("{kind} '{name}' does not exist")]
    NotFound {
        /// Whether an item or a whole tree was missing.
        kind: NotFoundKind,
        /// The name that was looked up.
        name: String,
    },
    /// An option value has the wrong shape for the field it fills.
    #[error("Value of '{field}' must be {expected}, {found} given")]
    TypeMismatch {
        /// Name of the offending field (e.g. `root`).
        field: String,
        /// Expected value type.
        expected: &'static str,
        /// Actual value type.
        found: &'static str,
    },
}

impl NavigationError {
    pub(crate) fn item_not_found(name: &str) -> Self {
        Self::NotFound {
            kind: NotFoundKind::Item,
            name: name.to_owned(),
        }
    }

    pub(crate) fn navigation_not_found(name: &str) -> Self {
        Self::NotFound {
            kind: NotFoundKind::Navigation,
            name: name.to_owned(),
        }
    }

    /// Returns `true` for [`NavigationError::NotFound`] of either kind.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_name_message() {
        let err = NavigationError::InvalidName("bad name".to_owned());
        assert_eq!(
            err.to_string(),
            "Name must be non-empty alphanumeric string, 'bad name' given"
        );
    }

    #[test]
    fn test_not_found_messages() {
        assert_eq!(
            NavigationError::item_not_found("team").to_string(),
            "Item 'team' does not exist"
        );
        assert_eq!(
            NavigationError::navigation_not_found("admin").to_string(),
            "Navigation 'admin' does not exist"
        );
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = NavigationError::TypeMismatch {
            field: "root".to_owned(),
            expected: "a string",
            found: "number",
        };
        assert_eq!(err.to_string(), "Value of 'root' must be a string, number given");
        assert!(!err.is_not_found());
    }
}
