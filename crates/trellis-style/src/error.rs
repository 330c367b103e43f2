//! Style-related error types.
//!
//! This module contains errors for style map loading and for the attribute
//! helpers that build Stimulus identifiers.

use thiserror::Error;

/// Error type for style map parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    /// YAML parse error.
    #[error("failed to parse style map: {message}")]
    Parse {
        /// Error message from the YAML parser.
        message: String,
    },

    /// A style rule had a shape that cannot be turned into classes.
    #[error("invalid style rule '{key}': {message}")]
    InvalidRule {
        /// Style key (or `group.key` path) where the error occurred.
        key: String,
        /// Description of what was wrong.
        message: String,
    },
}

impl From<serde_yaml::Error> for StyleError {
    fn from(err: serde_yaml::Error) -> Self {
        StyleError::Parse {
            message: err.to_string(),
        }
    }
}

/// Errors raised by attribute-generation helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    /// An identifier was empty or whitespace-only.
    #[error("{what} must not be blank")]
    BlankIdentifier {
        /// What the identifier was for (e.g. "controller name").
        what: &'static str,
    },
}
