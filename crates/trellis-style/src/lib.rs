//! Conditional utility-class composition for UI components.
//!
//! `trellis-style` is the style half of the trellis component layer. A
//! component type registers style maps per group; at render time the
//! [`StyleResolver`] turns a group plus the current option values into one
//! class string, and [`merge_attributes`] combines attribute maps for the
//! rendered element.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use trellis_options::{OptionValues, Value};
//! use trellis_style::{styles, StyleRegistry, StyleResolver, UtilityClassResolver};
//!
//! let mut registry = StyleRegistry::new();
//! registry.define(styles! {
//!     base: "p-4 bg-blue-500",
//!     variant: { danger: "p-6 bg-red-500" },
//! });
//!
//! let mut values = OptionValues::new();
//! values.insert("variant".into(), Value::sym("danger"));
//!
//! let resolver = StyleResolver::with_resolver(&registry, Arc::new(UtilityClassResolver::new()));
//! assert_eq!(resolver.resolve("default", &values), "p-6 bg-red-500");
//! ```
//!
//! ## Style Rules
//!
//! | Rule | Under `base` | Under an option key |
//! |------|--------------|---------------------|
//! | `"classes"` | applied | applied when the key is passed |
//! | `{ a: .., b: .. }` | every section applied | the variant matching the value |
//! | `{ true: .., false: .. }` | - | boolean dispatch |
//! | dynamic fn | called with the values | called with the values |
//!
//! ## Conflict Resolution
//!
//! Resolved classes go through a [`ClassConflictResolver`]. The default
//! [`UtilityClassResolver`] keeps the last utility per CSS property group.
//! Swap it process-wide with [`set_conflict_resolver`].
//!
//! ## Definition Sources
//!
//! Style maps can be built in code ([`StyleMap::with`]), with the
//! [`styles!`] macro, or from YAML ([`StyleMap::from_yaml`],
//! [`StyleRegistry::define_from_yaml`]).

mod attributes;
mod conflict;
mod error;
mod macros;
mod registry;
mod resolver;
mod rule;
mod stimulus;
mod yaml;

// Re-export public API
pub use attributes::{merge_attributes, AttributeMerger, Attributes, CLASS_KEY, DATA_KEY};
pub use conflict::{
    conflict_resolver, reset_conflict_resolver, set_conflict_resolver, ClassConflictResolver,
    DedupResolver, UtilityClassResolver,
};
pub use error::{AttributeError, StyleError};
pub use registry::{StyleRegistry, DEFAULT_GROUP};
pub use resolver::StyleResolver;
pub use rule::{StyleFn, StyleMap, StyleRule, VariantKey, BASE_KEY};
pub use stimulus::{
    stimulus_action, stimulus_class, stimulus_controller, stimulus_identifier, stimulus_outlet,
    stimulus_target, stimulus_value,
};
