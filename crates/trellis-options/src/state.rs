//! Per-instance option values.
//!
//! [`OptionState`] is built from an [`OptionRegistry`] and the caller's
//! inputs. Construction validates the inputs in one pass:
//!
//! 1. every option that is required and has no default must be present
//! 2. inputs naming a declared option go through the validating setter
//! 3. declared options absent from the inputs get their default, also
//!    through the setter
//! 4. everything else is kept, in input order, as extra options
//!
//! ```text
//! inputs { size: "lg", id: "save" }
//!   │
//!   ├── size → declared  → set("size", :lg)
//!   ├── tone → missing   → set("tone", default)
//!   └── id   → undeclared → extra_options["id"]
//! ```

use std::sync::Arc;

use crate::error::{OptionError, Result};
use crate::registry::OptionRegistry;
use crate::spec::DefaultValue;
use crate::value::{Value, ValueMap};

/// Snapshot of every declared option's current value, in declaration order.
pub type OptionValues = ValueMap;

/// Runtime option store owned by one component instance.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use trellis_options::{OptionRegistry, OptionSpec, OptionState, Value, ValueMap};
///
/// let mut registry = OptionRegistry::new();
/// registry.declare("variant", OptionSpec::new().values(["solid", "outline"]).default("solid"));
///
/// let mut inputs = ValueMap::new();
/// inputs.insert("variant".into(), "outline".into());
/// inputs.insert("id".into(), "save".into());
///
/// let state = OptionState::new(Arc::new(registry), inputs).unwrap();
/// assert_eq!(state.get("variant"), Value::sym("outline"));
/// assert_eq!(state.extra_options()["id"], Value::from("save"));
/// ```
#[derive(Debug, Clone)]
pub struct OptionState {
    registry: Arc<OptionRegistry>,
    values: ValueMap,
    extra: ValueMap,
}

impl OptionState {
    /// Validates `inputs` against `registry` and builds the instance state.
    ///
    /// # Errors
    ///
    /// - [`OptionError::MissingRequiredOption`] if a required option without
    ///   a default is absent from `inputs`
    /// - [`OptionError::InvalidEnumValue`] if an input, a static default or
    ///   an applied computed default falls outside an option's enumeration
    pub fn new<I, K>(registry: Arc<OptionRegistry>, inputs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let inputs: ValueMap = inputs.into_iter().map(|(k, v)| (k.into(), v)).collect();

        if let Some(missing) = registry
            .required_names()
            .into_iter()
            .find(|name| !inputs.contains_key(*name))
        {
            return Err(OptionError::MissingRequiredOption(missing.to_string()));
        }

        for (name, spec) in registry.iter() {
            spec.check_default(name)?;
        }

        let mut state = Self {
            registry: registry.clone(),
            values: ValueMap::new(),
            extra: ValueMap::new(),
        };

        for (name, value) in &inputs {
            if registry.contains(name) {
                state.set(name, value.clone())?;
            }
        }

        for (name, spec) in registry.iter() {
            if inputs.contains_key(name) {
                continue;
            }
            if let Some(default) = spec.default_value().map(DefaultValue::resolve) {
                state.set(name, default)?;
            }
        }

        for (name, value) in inputs {
            if !registry.contains(&name) {
                state.extra.insert(name, value);
            }
        }

        Ok(state)
    }

    /// Returns the registry this state validates against.
    pub fn registry(&self) -> &Arc<OptionRegistry> {
        &self.registry
    }

    /// Returns the current value of `name`.
    ///
    /// An explicit non-null value wins; otherwise the registry default is
    /// recomputed; otherwise [`Value::Null`]. An explicit null therefore
    /// reads the same as an unset option. A computed default that falls
    /// outside the enumeration reads as [`Value::Null`].
    pub fn get(&self, name: &str) -> Value {
        match self.values.get(name) {
            Some(value) if !value.is_null() => value.clone(),
            _ => self.registry.resolve_default(name).unwrap_or_default(),
        }
    }

    /// Validates and stores a value for a declared option.
    ///
    /// Enumerated options accept either the symbol or its string spelling
    /// and store the symbol.
    ///
    /// # Errors
    ///
    /// - [`OptionError::UnknownOption`] if `name` is not declared
    /// - [`OptionError::InvalidEnumValue`] if the value is not allowed
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let spec = self
            .registry
            .get(name)
            .ok_or_else(|| OptionError::UnknownOption(name.to_string()))?;

        let value = spec
            .normalize(value.into())
            .map_err(|rejected| spec.rejection(name, &rejected))?;

        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Returns `true` if a non-null value is stored for `name`.
    ///
    /// Defaults applied during construction count as stored.
    pub fn is_set(&self, name: &str) -> bool {
        self.values.get(name).is_some_and(|v| !v.is_null())
    }

    /// Drops the stored value so [`get`](Self::get) falls back to the default.
    ///
    /// Undeclared names are ignored.
    pub fn reset_to_default(&mut self, name: &str) {
        if self.registry.contains(name) {
            self.values.shift_remove(name);
        }
    }

    /// Returns `true` unless the current value is null or an empty string.
    pub fn present(&self, name: &str) -> bool {
        self.get(name).is_present()
    }

    /// Inputs that matched no declared option, in input order.
    pub fn extra_options(&self) -> &ValueMap {
        &self.extra
    }

    /// Snapshot of every declared option, read through [`get`](Self::get).
    pub fn option_values(&self) -> OptionValues {
        self.registry
            .names()
            .map(|name| (name.to_string(), self.get(name)))
            .collect()
    }
}
