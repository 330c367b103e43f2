//! Per-component-type option registry.
//!
//! An [`OptionRegistry`] is the declarative schema of a component type's
//! options. Subtypes start from a copy of their parent's registry via
//! [`OptionRegistry::inherit`]; after that the two are independent, so
//! redeclaring an option in a subtype never touches the parent or any
//! sibling.

use indexmap::IndexMap;

use crate::spec::OptionSpec;
use crate::value::Value;

/// Mapping from option name to its [`OptionSpec`], in declaration order.
///
/// # Example
///
/// ```
/// use trellis_options::{OptionRegistry, OptionSpec, Value};
///
/// let mut parent = OptionRegistry::new();
/// parent.declare("size", OptionSpec::new().values(["sm", "md", "lg"]).default("md"));
///
/// let mut child = OptionRegistry::inherit(&parent);
/// child.declare("size", OptionSpec::new().values(["sm", "md", "lg"]).default("lg"));
///
/// assert_eq!(parent.resolve_default("size"), Some(Value::sym("md")));
/// assert_eq!(child.resolve_default("size"), Some(Value::sym("lg")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptionRegistry {
    specs: IndexMap<String, OptionSpec>,
}

impl OptionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an independent copy of a parent registry.
    ///
    /// Specs are immutable values, so a copy of the mapping is enough to
    /// isolate later declarations on either side.
    pub fn inherit(parent: &OptionRegistry) -> Self {
        parent.clone()
    }

    /// Registers or overwrites the spec for `name`.
    ///
    /// Redeclaring keeps the option's original position in declaration order.
    pub fn declare(&mut self, name: impl Into<String>, spec: OptionSpec) -> &mut Self {
        let name = name.into();
        tracing::trace!(option = %name, required = spec.is_required(), "declare option");
        self.specs.insert(name, spec);
        self
    }

    /// Declares several options sharing one spec.
    pub fn declare_many<I, S>(&mut self, names: I, spec: OptionSpec) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.declare(name, spec.clone());
        }
        self
    }

    /// Returns the spec for `name`.
    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.specs.get(name)
    }

    /// Returns `true` if `name` is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.specs.contains_key(name)
    }

    /// Iterates over declared option names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    /// Iterates over `(name, spec)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionSpec)> {
        self.specs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of declared options.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns `true` if no options are declared.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Resolves the default for `name`, recomputing computed defaults.
    ///
    /// Returns `None` for undeclared options and options without a default.
    pub fn resolve_default(&self, name: &str) -> Option<Value> {
        self.specs.get(name).and_then(OptionSpec::resolve_default)
    }

    /// Alias of [`resolve_default`](Self::resolve_default).
    pub fn default_for(&self, name: &str) -> Option<Value> {
        self.resolve_default(name)
    }

    /// Returns the allowed values for an enumerated option.
    pub fn enumerated_values(&self, name: &str) -> Option<&[String]> {
        self.specs.get(name).and_then(OptionSpec::enumerated_values)
    }

    /// Names of options that must be supplied at construction.
    ///
    /// Required options that have a default are not included.
    pub fn required_names(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, spec)| spec.is_enforced_required())
            .map(|(name, _)| name)
            .collect()
    }

    /// Names of options that may be omitted at construction.
    pub fn optional_names(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, spec)| !spec.is_enforced_required())
            .map(|(name, _)| name)
            .collect()
    }
}
