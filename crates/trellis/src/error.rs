//! Error types for component definition, construction and lookup.

use thiserror::Error;
use trellis_options::OptionError;
use trellis_style::{AttributeError, StyleError};

/// Error returned when a component helper name cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No registered component type matches the requested name.
    #[error("undefined component type '{name}'")]
    UndefinedComponentType {
        /// The name as requested (before prefix stripping).
        name: String,
    },
}

/// Top-level error for the trellis facade.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Option validation failed.
    #[error(transparent)]
    Option(#[from] OptionError),

    /// A style map could not be loaded.
    #[error(transparent)]
    Style(#[from] StyleError),

    /// An attribute helper was given invalid input.
    #[error(transparent)]
    Attribute(#[from] AttributeError),

    /// Component lookup failed.
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Result type for trellis operations.
pub type Result<T> = std::result::Result<T, Error>;
