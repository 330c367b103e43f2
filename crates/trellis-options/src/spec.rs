//! Option specifications.
//!
//! An [`OptionSpec`] describes one declared option: the values it may take,
//! how its default is produced, and whether callers must supply it.

use std::fmt;
use std::sync::Arc;

use crate::error::{self, OptionError};
use crate::value::Value;

/// Zero-argument default provider, evaluated on every read.
pub type DefaultFn = Arc<dyn Fn() -> Value + Send + Sync>;

/// How an option's default value is produced.
#[derive(Clone)]
pub enum DefaultValue {
    /// A fixed value.
    Static(Value),
    /// A function called each time the default is read.
    Computed(DefaultFn),
}

impl DefaultValue {
    /// Produces the default value, invoking the provider if computed.
    pub fn resolve(&self) -> Value {
        match self {
            DefaultValue::Static(value) => value.clone(),
            DefaultValue::Computed(f) => f(),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Static(value) => f.debug_tuple("Static").field(value).finish(),
            DefaultValue::Computed(_) => f.write_str("Computed(<fn>)"),
        }
    }
}

/// Declaration of a single option.
///
/// Specs are immutable once declared; registries copy them freely.
///
/// # Example
///
/// ```
/// use trellis_options::{OptionSpec, Value};
///
/// let size = OptionSpec::new().values(["sm", "md", "lg"]).default(Value::sym("md"));
/// assert_eq!(size.enumerated_values(), Some(&["sm".to_string(), "md".into(), "lg".into()][..]));
/// assert!(!size.is_enforced_required());
/// ```
#[derive(Debug, Clone)]
pub struct OptionSpec {
    enumerated: Option<Vec<String>>,
    default: Option<DefaultValue>,
    required: bool,
}

impl OptionSpec {
    /// Creates a spec with no constraints, no default, not required.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            enumerated: None,
            default: None,
            required: false,
        }
    }

    /// Restricts the option to the given values.
    ///
    /// Values are normalized to their canonical symbol names here, so later
    /// validation compares names only. Duplicates are dropped.
    pub fn values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = Vec::new();
        for value in values {
            let name = value.as_ref().to_string();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        self.enumerated = Some(names);
        self
    }

    /// Sets a static default.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::Static(value.into()));
        self
    }

    /// Sets a default computed at read time.
    pub fn default_with<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = Some(DefaultValue::Computed(Arc::new(f)));
        self
    }

    /// Marks the option as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Returns the allowed values, if the option is enumerated.
    pub fn enumerated_values(&self) -> Option<&[String]> {
        self.enumerated.as_deref()
    }

    /// Returns the default provider, if any.
    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    /// Returns `true` if a default is declared.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Returns the declared required flag.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns `true` if construction must fail when the option is missing.
    ///
    /// A required option with a default is always satisfiable.
    pub fn is_enforced_required(&self) -> bool {
        self.required && self.default.is_none()
    }

    /// Resolves the default, evaluating computed defaults now.
    ///
    /// Defaults of enumerated options come back in canonical symbol form. A
    /// default outside the enumeration resolves to `None`.
    pub fn resolve_default(&self) -> Option<Value> {
        let value = self.default.as_ref()?.resolve();
        self.normalize(value).ok()
    }

    /// Checks a static default against the enumeration.
    ///
    /// Computed defaults are checked each time they are applied.
    ///
    /// # Errors
    ///
    /// Returns [`OptionError::InvalidEnumValue`] naming `name` when the
    /// default is not one of the allowed values.
    pub fn check_default(&self, name: &str) -> error::Result<()> {
        match &self.default {
            Some(DefaultValue::Static(value)) => self
                .normalize(value.clone())
                .map(drop)
                .map_err(|rejected| self.rejection(name, &rejected)),
            _ => Ok(()),
        }
    }

    /// Builds the error reported when `rejected` is assigned to `name`.
    pub(crate) fn rejection(&self, name: &str, rejected: &Value) -> OptionError {
        OptionError::invalid_enum(
            name,
            rejected.to_string(),
            self.enumerated_values().unwrap_or_default().iter().cloned(),
        )
    }

    /// Checks `value` against the enumeration and returns its canonical form.
    ///
    /// Strings matching an allowed name are coerced to symbols. Null passes
    /// through untouched. Anything outside the set is handed back as `Err`
    /// so the caller can report it with the option name.
    pub(crate) fn normalize(&self, value: Value) -> Result<Value, Value> {
        let Some(allowed) = &self.enumerated else {
            return Ok(value);
        };
        if value.is_null() {
            return Ok(value);
        }
        match value.as_name() {
            Some(name) if allowed.iter().any(|a| a == name) => {
                Ok(Value::Symbol(name.to_string()))
            }
            _ => Err(value),
        }
    }
}
