//! Typed, validated, defaulted options for UI components.
//!
//! `trellis-options` is the option half of the trellis component layer. A
//! component type declares its options once in an [`OptionRegistry`]; each
//! instance validates caller inputs into an [`OptionState`].
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use trellis_options::{OptionRegistry, OptionSpec, OptionState, Value};
//!
//! let mut registry = OptionRegistry::new();
//! registry
//!     .declare("label", OptionSpec::new().required())
//!     .declare("size", OptionSpec::new().values(["sm", "md", "lg"]).default("md"))
//!     .declare("disabled", OptionSpec::new().default(false));
//!
//! let state = OptionState::new(
//!     Arc::new(registry),
//!     [("label", Value::from("Save")), ("size", Value::from("lg"))],
//! )
//! .unwrap();
//!
//! assert_eq!(state.get("size"), Value::sym("lg"));
//! assert_eq!(state.get("disabled"), Value::Bool(false));
//! ```
//!
//! # Option Semantics
//!
//! | Declaration | Missing at construction | Read when unset |
//! |-------------|-------------------------|-----------------|
//! | plain | allowed | `Null` |
//! | `.default(v)` | default assigned | `v` |
//! | `.default_with(f)` | `f()` assigned | `f()` (evaluated per read) |
//! | `.required()` | [`OptionError::MissingRequiredOption`] | - |
//! | `.required().default(v)` | default assigned | `v` |
//!
//! Enumerated options (`.values([...])`) store symbols and reject anything
//! else with [`OptionError::InvalidEnumValue`].
//!
//! # Inheritance
//!
//! [`OptionRegistry::inherit`] copies a parent's declarations. Later
//! declarations on either registry are invisible to the other.

mod error;
mod registry;
mod spec;
mod state;
mod value;

// Re-export public API
pub use error::{OptionError, Result};
pub use registry::OptionRegistry;
pub use spec::{DefaultFn, DefaultValue, OptionSpec};
pub use state::{OptionState, OptionValues};
pub use value::{inputs_from_json, Value, ValueMap};
