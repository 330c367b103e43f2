//! # Trellis - Typed Options and Conditional Styling for UI Components
//!
//! `trellis` is the component layer for server-rendered HTML: each component
//! type declares typed, validated options and utility-class style rules, and
//! each instance resolves them into the class string and attribute map a
//! renderer needs.
//!
//! This crate is a facade over [`trellis_options`] (option declaration and
//! validation) and [`trellis_style`] (style resolution, conflict resolution
//! and attribute merging), adding component types, instances and lookup.
//!
//! ## Core Concepts
//!
//! - [`ComponentType`]: frozen definition built with [`ComponentType::builder`]
//!   or [`ComponentType::extend`]
//! - [`Component`]: one instance with validated option state and extra options
//! - [`OptionSpec`]: enumerated values, defaults and required flags
//! - [`StyleMap`] / [`styles!`]: style rules per group
//! - [`ComponentRegistry`]: helper-name lookup (`ui_button` -> `button`)
//!
//! ## Quick Start
//!
//! ```rust
//! use trellis::{styles, Attributes, Component, ComponentType, OptionSpec, Value};
//!
//! let button = ComponentType::builder("button")
//!     .option("variant", OptionSpec::new().values(["primary", "danger"]).default("primary"))
//!     .option("disabled", OptionSpec::new().default(false))
//!     .default_styles(styles! {
//!         base: "inline-flex px-4 py-2 bg-blue-600",
//!         variant: { primary: "text-white", danger: "bg-red-600 text-white" },
//!         disabled: { true: "opacity-50", false: "cursor-pointer" },
//!     })
//!     .build();
//!
//! let delete = Component::new(
//!     &button,
//!     [("variant", Value::from("danger")), ("id", Value::from("delete"))],
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     delete.classes("default"),
//!     "inline-flex px-4 py-2 bg-red-600 text-white cursor-pointer"
//! );
//!
//! let attrs = delete.html_attributes("default", &Attributes::new().with("class", "ml-2"));
//! assert_eq!(attrs.get("id"), Some(&Value::from("delete")));
//! ```
//!
//! ## Inheritance
//!
//! [`ComponentType::extend`] copies the parent's options and effective
//! styles. Redeclaring an option or style key on the child overrides it for
//! the child only; nested style rules merge per variant.
//!
//! ## Logging
//!
//! Type definition and lookup emit `tracing` events at `debug`, resolution
//! details at `trace`. No subscriber is installed.

mod component;
mod error;
mod lookup;

pub use component::{Component, ComponentBuilder, ComponentType};
pub use error::{Error, LookupError, Result};
pub use lookup::{
    configure_lookup, lookup_config, reset_lookup_config, ComponentRegistry, LookupConfig,
    DEFAULT_PREFIX,
};

// Re-export the option and style engines
pub use trellis_options::{
    inputs_from_json, DefaultValue, OptionError, OptionRegistry, OptionSpec, OptionState,
    OptionValues, Value, ValueMap,
};
pub use trellis_style::{
    conflict_resolver, merge_attributes, reset_conflict_resolver, set_conflict_resolver,
    stimulus_action, stimulus_class, stimulus_controller, stimulus_identifier, stimulus_outlet,
    stimulus_target, stimulus_value, styles, AttributeError, AttributeMerger, Attributes,
    ClassConflictResolver, DedupResolver, StyleError, StyleMap, StyleRegistry, StyleResolver,
    StyleRule, UtilityClassResolver, VariantKey, DEFAULT_GROUP,
};
