//! Error types for option declaration and assignment.

use thiserror::Error;

/// Errors raised while building or mutating a component's options.
///
/// All of these indicate a usage mistake at the call site; none are
/// transient and none are retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionError {
    /// A required option without a default was not supplied.
    #[error("missing required option '{0}'")]
    MissingRequiredOption(String),

    /// A value outside the declared enumeration was assigned.
    #[error("invalid value '{value}' for option '{name}', expected one of: {}", .allowed.join(", "))]
    InvalidEnumValue {
        /// The option being assigned.
        name: String,
        /// Display form of the rejected value.
        value: String,
        /// The allowed values, in declaration order.
        allowed: Vec<String>,
    },

    /// The setter was called for a name that was never declared.
    #[error("unknown option '{0}'")]
    UnknownOption(String),
}

impl OptionError {
    /// Create an invalid enum value error.
    pub fn invalid_enum(
        name: impl Into<String>,
        value: impl Into<String>,
        allowed: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::InvalidEnumValue {
            name: name.into(),
            value: value.into(),
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the name of the option this error is about.
    pub fn option_name(&self) -> &str {
        match self {
            Self::MissingRequiredOption(name) | Self::UnknownOption(name) => name,
            Self::InvalidEnumValue { name, .. } => name,
        }
    }
}

/// Result type for option operations.
pub type Result<T> = std::result::Result<T, OptionError>;
