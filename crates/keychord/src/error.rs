//! Error types for keychord.

/// Result type alias for keychord operations.
pub type Result<T> = std::result::Result<T, KeyBindError>;

/// Errors that can occur while registering, editing, or querying key-binds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyBindError {
    /// No bind is registered under the given label.
    #[error("the label \"{label}\" doesn't exist as a keybind")]
    NotFound { label: String },

    /// A bind with the same label is already registered.
    #[error("the label \"{label}\" is already registered as a keybind")]
    DuplicateLabel { label: String },

    /// An argument violated a documented precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl KeyBindError {
    /// Create a not-found error.
    pub fn not_found(label: impl Into<String>) -> Self {
        Self::NotFound {
            label: label.into(),
        }
    }

    /// Create a duplicate-label error.
    pub fn duplicate_label(label: impl Into<String>) -> Self {
        Self::DuplicateLabel {
            label: label.into(),
        }
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Returns `true` if this error reports an unknown label.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
