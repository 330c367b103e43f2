//! Component types and instances.
//!
//! A [`ComponentType`] is defined once, through a [`ComponentBuilder`], and is
//! immutable afterwards. Extending a type snapshots the parent's registries
//! into the builder, so later definitions on the child never reach the
//! parent:
//!
//! ```text
//! ComponentType::builder("button")          ComponentType::extend(&button, "icon_button")
//!   .option(..) .styles(..)                   .option(..)   .styles(..)
//!   .build() ──► Arc<ComponentType> ──copy──►  .build() ──► Arc<ComponentType>
//!                 options  (frozen)                           options  = parent + own
//!                 styles   (effective)                        styles   = effective(parent) + own
//! ```
//!
//! A [`Component`] is one instance: validated option state plus the extra
//! options the caller passed that the type does not declare.
//!
//! # Example
//!
//! ```rust
//! use trellis::{Component, ComponentType, OptionSpec, Value, styles};
//!
//! let button = ComponentType::builder("button")
//!     .option("variant", OptionSpec::new().values(["solid", "outline"]).default("solid"))
//!     .option("disabled", OptionSpec::new().default(false))
//!     .default_styles(styles! {
//!         base: "btn",
//!         variant: { solid: "bg-blue-500", outline: "border" },
//!         disabled: { true: "opacity-50", false: "cursor-pointer" },
//!     })
//!     .build();
//!
//! let instance = Component::new(&button, [("id", Value::from("save"))]).unwrap();
//! assert_eq!(instance.get("variant"), Value::sym("solid"));
//! assert_eq!(instance.extra_options().get("id"), Some(&Value::from("save")));
//! ```

use std::sync::Arc;

use trellis_options::{
    inputs_from_json, OptionRegistry, OptionSpec, OptionState, OptionValues, Value, ValueMap,
};
use trellis_style::{
    merge_attributes, Attributes, StyleMap, StyleRegistry, StyleResolver, CLASS_KEY,
    DEFAULT_GROUP,
};

use crate::error::Result;

/// A frozen component type: its option declarations and effective styles.
#[derive(Debug)]
pub struct ComponentType {
    name: String,
    parent: Option<Arc<ComponentType>>,
    options: Arc<OptionRegistry>,
    styles: StyleRegistry,
}

impl ComponentType {
    /// Starts defining a root component type.
    pub fn builder(name: impl Into<String>) -> ComponentBuilder {
        ComponentBuilder {
            name: name.into(),
            parent: None,
            options: OptionRegistry::new(),
            styles: StyleRegistry::new(),
        }
    }

    /// Starts defining a type that inherits from `parent`.
    pub fn extend(parent: &Arc<ComponentType>, name: impl Into<String>) -> ComponentBuilder {
        ComponentBuilder {
            name: name.into(),
            parent: Some(Arc::clone(parent)),
            options: OptionRegistry::inherit(&parent.options),
            styles: StyleRegistry::new(),
        }
    }

    /// Returns the type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parent type, if any.
    pub fn parent(&self) -> Option<&Arc<ComponentType>> {
        self.parent.as_ref()
    }

    /// Iterates from this type up through its ancestors.
    pub fn ancestry(&self) -> impl Iterator<Item = &ComponentType> {
        std::iter::successors(Some(self), |ty| ty.parent.as_deref())
    }

    /// Returns true if this type is `name` or inherits from it.
    pub fn is_a(&self, name: &str) -> bool {
        self.ancestry().any(|ty| ty.name == name)
    }

    /// Returns the option declarations, inherited ones included.
    pub fn option_registry(&self) -> &Arc<OptionRegistry> {
        &self.options
    }

    /// Returns the effective style registry, inherited groups included.
    pub fn style_registry(&self) -> &StyleRegistry {
        &self.styles
    }

    /// Returns the allowed values of an enumerated option.
    pub fn enumerated_values(&self, option: &str) -> Option<&[String]> {
        self.options.enumerated_values(option)
    }

    /// Returns the default of an option, evaluating computed defaults.
    pub fn default_for(&self, option: &str) -> Option<Value> {
        self.options.default_for(option)
    }

    /// Returns the names of options that must be supplied at construction.
    pub fn required_options(&self) -> Vec<&str> {
        self.options.required_names()
    }

    /// Returns the names of options that may be omitted.
    pub fn optional_options(&self) -> Vec<&str> {
        self.options.optional_names()
    }
}

/// Mutable definition of a component type, finalized by [`build`](Self::build).
#[derive(Debug)]
pub struct ComponentBuilder {
    name: String,
    parent: Option<Arc<ComponentType>>,
    options: OptionRegistry,
    styles: StyleRegistry,
}

impl ComponentBuilder {
    /// Declares (or redeclares) an option.
    pub fn option(mut self, name: impl Into<String>, spec: OptionSpec) -> Self {
        self.options.declare(name, spec);
        self
    }

    /// Declares several options sharing one spec.
    pub fn options<I, S>(mut self, names: I, spec: OptionSpec) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.declare_many(names, spec);
        self
    }

    /// Adds style rules to `group`. Repeated calls accumulate.
    pub fn styles(mut self, group: impl Into<String>, map: StyleMap) -> Self {
        self.styles.define_group(group, map);
        self
    }

    /// Adds style rules to the default group.
    pub fn default_styles(self, map: StyleMap) -> Self {
        self.styles(DEFAULT_GROUP, map)
    }

    /// Adds style groups from a YAML document of group name to style map.
    pub fn styles_yaml(mut self, yaml: &str) -> Result<Self> {
        self.styles.define_from_yaml(yaml)?;
        Ok(self)
    }

    /// Freezes the definition.
    ///
    /// The effective style registry is computed here, parent first, so
    /// resolution never walks the ancestry.
    pub fn build(self) -> Arc<ComponentType> {
        let styles = match &self.parent {
            Some(parent) => StyleRegistry::effective([&parent.styles, &self.styles]),
            None => self.styles,
        };
        tracing::debug!(
            component = %self.name,
            parent = ?self.parent.as_ref().map(|p| p.name.as_str()),
            options = self.options.len(),
            style_groups = styles.len(),
            "defined component type"
        );
        Arc::new(ComponentType {
            name: self.name,
            parent: self.parent,
            options: Arc::new(self.options),
            styles,
        })
    }
}

/// A component instance.
#[derive(Debug, Clone)]
pub struct Component {
    ty: Arc<ComponentType>,
    state: OptionState,
}

impl Component {
    /// Validates `inputs` against the type's options.
    ///
    /// Inputs that name no declared option end up in
    /// [`extra_options`](Self::extra_options).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Option`](crate::Error::Option) when a required option
    /// is missing or an enumerated option gets a value outside its set.
    pub fn new<I, K>(ty: &Arc<ComponentType>, inputs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let state = OptionState::new(Arc::clone(&ty.options), inputs)?;
        Ok(Self {
            ty: Arc::clone(ty),
            state,
        })
    }

    /// Builds an instance from a JSON object of inputs.
    pub fn from_json(ty: &Arc<ComponentType>, inputs: serde_json::Value) -> Result<Self> {
        Self::new(ty, inputs_from_json(inputs))
    }

    /// Returns the component type.
    pub fn component_type(&self) -> &Arc<ComponentType> {
        &self.ty
    }

    /// Returns an option's value, falling back to its default.
    pub fn get(&self, name: &str) -> Value {
        self.state.get(name)
    }

    /// Sets an option with validation.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.state.set(name, value)?;
        Ok(())
    }

    /// Returns true if an option holds an explicit non-null value.
    pub fn is_set(&self, name: &str) -> bool {
        self.state.is_set(name)
    }

    /// Clears an option so reads fall back to its default.
    pub fn reset_to_default(&mut self, name: &str) {
        self.state.reset_to_default(name);
    }

    /// Returns true if an option's value is neither null nor empty.
    pub fn present(&self, name: &str) -> bool {
        self.state.present(name)
    }

    /// Inputs that matched no declared option.
    pub fn extra_options(&self) -> &ValueMap {
        self.state.extra_options()
    }

    /// Snapshot of every declared option's current value.
    pub fn option_values(&self) -> OptionValues {
        self.state.option_values()
    }

    /// Resolves a style group against the given values.
    ///
    /// Only the style keys present in `values` are applied, besides `base`.
    pub fn styles_for(&self, group: &str, values: &OptionValues) -> String {
        StyleResolver::new(&self.ty.styles).resolve(group, values)
    }

    /// Resolves a style group against all current option values.
    pub fn classes(&self, group: &str) -> String {
        self.styles_for(group, &self.option_values())
    }

    /// Builds the attributes for the element styled by `group`.
    ///
    /// Resolved classes come first, then extra options, then `attributes`;
    /// later sources win except for merged `class` and `data` values.
    pub fn html_attributes(&self, group: &str, attributes: &Attributes) -> Attributes {
        let classes = self.classes(group);
        let computed = if classes.is_empty() {
            Attributes::new()
        } else {
            Attributes::new().with(CLASS_KEY, classes)
        };
        let extra = Attributes::from(self.extra_options().clone());
        merge_attributes(&[&computed, &extra, attributes])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_options::OptionError;
    use trellis_style::{StyleRule, VariantKey};

    use crate::error::Error;

    fn button() -> Arc<ComponentType> {
        ComponentType::builder("button")
            .option("label", OptionSpec::new().required())
            .option(
                "size",
                OptionSpec::new().values(["sm", "md", "lg"]).default("md"),
            )
            .options(["icon", "href"], OptionSpec::new())
            .default_styles(
                StyleMap::new()
                    .with("base", "btn")
                    .with(
                        "size",
                        StyleRule::nested([
                            ("sm", "text-sm"),
                            ("md", "text-base"),
                            ("lg", "text-lg"),
                        ]),
                    ),
            )
            .build()
    }

    #[test]
    fn test_introspection() {
        let ty = button();
        assert_eq!(ty.name(), "button");
        assert!(ty.parent().is_none());
        assert_eq!(ty.required_options(), vec!["label"]);
        assert_eq!(ty.optional_options(), vec!["size", "icon", "href"]);
        assert_eq!(
            ty.enumerated_values("size").unwrap(),
            &["sm".to_string(), "md".to_string(), "lg".to_string()]
        );
        assert_eq!(ty.default_for("size"), Some(Value::sym("md")));
        assert_eq!(ty.default_for("icon"), None);
    }

    #[test]
    fn test_missing_required() {
        let err = Component::new(&button(), Vec::<(&str, Value)>::new()).unwrap_err();
        assert_eq!(
            err,
            Error::Option(OptionError::MissingRequiredOption("label".to_string()))
        );
    }

    #[test]
    fn test_required_accepts_empty_string() {
        let c = Component::new(&button(), [("label", Value::from(""))]).unwrap();
        assert!(!c.present("label"));
    }

    #[test]
    fn test_unset_option_and_extra_options() {
        let c = Component::new(
            &button(),
            [("label", Value::from("Go")), ("foo", Value::from("bar"))],
        )
        .unwrap();

        assert_eq!(c.get("icon"), Value::Null);
        assert!(!c.present("icon"));
        assert_eq!(c.extra_options().get("foo"), Some(&Value::from("bar")));
        assert!(!c.option_values().contains_key("foo"));
    }

    #[test]
    fn test_set_and_reset() {
        let mut c = Component::new(&button(), [("label", Value::from("Go"))]).unwrap();
        c.set("size", "lg").unwrap();
        assert_eq!(c.get("size"), Value::sym("lg"));

        c.reset_to_default("size");
        assert!(!c.is_set("size"));
        assert_eq!(c.get("size"), Value::sym("md"));

        assert!(matches!(
            c.set("size", "xl"),
            Err(Error::Option(OptionError::InvalidEnumValue { .. }))
        ));
    }

    #[test]
    fn test_classes_use_current_values() {
        let c = Component::new(
            &button(),
            [("label", Value::from("Go")), ("size", Value::from("sm"))],
        )
        .unwrap();
        assert_eq!(c.classes(DEFAULT_GROUP), "btn text-sm");
        assert_eq!(c.styles_for(DEFAULT_GROUP, &OptionValues::new()), "btn");
    }

    #[test]
    fn test_extend_copies_parent() {
        let parent = button();
        let child = ComponentType::extend(&parent, "icon_button")
            .option("size", OptionSpec::new().values(["sm", "md", "lg"]).default("lg"))
            .default_styles(StyleMap::new().with("size", StyleRule::nested([("lg", "text-xl")])))
            .styles("icon", StyleMap::new().with("base", "h-4 w-4"))
            .build();

        assert_eq!(parent.default_for("size"), Some(Value::sym("md")));
        assert_eq!(child.default_for("size"), Some(Value::sym("lg")));
        assert!(child.is_a("button"));
        assert!(!parent.is_a("icon_button"));

        let size = child
            .style_registry()
            .group(DEFAULT_GROUP)
            .and_then(|g| g.get("size"))
            .and_then(StyleRule::as_nested)
            .unwrap();
        assert_eq!(size.len(), 3);
        assert!(size.contains_key(&VariantKey::from("sm")));
        assert!(parent.style_registry().group("icon").is_none());
    }

    #[test]
    fn test_styles_yaml() {
        let ty = ComponentType::builder("badge")
            .styles_yaml("default:\n  base: badge\n")
            .unwrap()
            .build();
        assert!(ty.style_registry().group(DEFAULT_GROUP).is_some());

        let err = ComponentType::builder("badge").styles_yaml("default: [").unwrap_err();
        assert!(matches!(err, Error::Style(_)));
    }
}
