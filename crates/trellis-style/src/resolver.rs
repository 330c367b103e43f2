//! Style resolution.
//!
//! [`StyleResolver`] turns a group of a [`StyleRegistry`] plus a snapshot of
//! option values into one conflict-resolved class string.
//!
//! # Opt-in Keys
//!
//! `base` is always applied. Every other style key contributes only when the
//! snapshot contains that key with a non-null value. Leaving a key out of the
//! snapshot means "do not apply this style dimension", even if the component
//! has a value for it.
//!
//! ```text
//! group: { base: "btn", variant: {solid: "bg-blue-500", outline: "border"} }
//!
//! resolve({})                  -> "btn"
//! resolve({variant: solid})    -> "btn bg-blue-500"
//! resolve({variant: null})     -> "btn"
//! resolve({variant: unknown})  -> "btn"
//! ```

use std::sync::Arc;

use indexmap::IndexMap;
use trellis_options::{OptionValues, Value};

use crate::conflict::{conflict_resolver, ClassConflictResolver};
use crate::registry::{StyleRegistry, DEFAULT_GROUP};
use crate::rule::{StyleRule, VariantKey, BASE_KEY};

/// Resolves style groups against option values.
///
/// # Example
///
/// ```rust
/// use trellis_options::{OptionValues, Value};
/// use trellis_style::{StyleMap, StyleRegistry, StyleResolver, StyleRule};
///
/// let mut registry = StyleRegistry::new();
/// registry.define(
///     StyleMap::new()
///         .with("base", "btn")
///         .with("disabled", StyleRule::nested([(true, "opacity-50"), (false, "cursor-pointer")])),
/// );
///
/// let mut values = OptionValues::new();
/// values.insert("disabled".into(), Value::Bool(true));
///
/// let resolver = StyleResolver::new(&registry);
/// assert_eq!(resolver.resolve("default", &values), "btn opacity-50");
/// ```
pub struct StyleResolver<'a> {
    registry: &'a StyleRegistry,
    conflicts: Arc<dyn ClassConflictResolver>,
}

impl<'a> StyleResolver<'a> {
    /// Creates a resolver using the process-wide conflict resolver.
    pub fn new(registry: &'a StyleRegistry) -> Self {
        Self::with_resolver(registry, conflict_resolver())
    }

    /// Creates a resolver with an explicit conflict resolver.
    pub fn with_resolver(
        registry: &'a StyleRegistry,
        conflicts: Arc<dyn ClassConflictResolver>,
    ) -> Self {
        Self {
            registry,
            conflicts,
        }
    }

    /// Resolves `group` against `values`.
    ///
    /// Undefined groups resolve to an empty string.
    pub fn resolve(&self, group: &str, values: &OptionValues) -> String {
        let Some(map) = self.registry.group(group) else {
            tracing::trace!(group, "style group not defined");
            return String::new();
        };

        let mut fragments = Vec::new();
        if let Some(base) = map.base() {
            fragments.push(section_classes(base, values));
        }

        for (key, rule) in map.iter() {
            if key == BASE_KEY {
                continue;
            }
            let Some(value) = values.get(key) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            if let Some(classes) = rule_classes(rule, value, values) {
                fragments.push(classes);
            }
        }

        let joined = join_fragments(fragments);
        if joined.is_empty() {
            return joined;
        }
        let merged = self.conflicts.merge(&joined);
        tracing::trace!(group, classes = %merged, "resolved style group");
        merged
    }

    /// Resolves the default group.
    pub fn resolve_default(&self, values: &OptionValues) -> String {
        self.resolve(DEFAULT_GROUP, values)
    }

    /// Resolves every group with the same values, in definition order.
    pub fn resolve_all(&self, values: &OptionValues) -> IndexMap<String, String> {
        self.registry
            .group_names()
            .map(|group| (group.to_string(), self.resolve(group, values)))
            .collect()
    }
}

/// Resolves an option key's rule for the option's current value.
fn rule_classes(rule: &StyleRule, current: &Value, values: &OptionValues) -> Option<String> {
    match rule {
        StyleRule::Classes(classes) => Some(classes.clone()),
        StyleRule::Dynamic(f) => Some(f(values).to_class_fragment()),
        StyleRule::Nested(variants) => {
            variant_for(variants, current).map(|selected| section_classes(selected, values))
        }
    }
}

/// Picks the variant matching `current`.
///
/// Booleans only ever match [`VariantKey::Bool`]; everything else is looked
/// up by name, symbol text first and rendered form second.
fn variant_for<'r>(
    variants: &'r IndexMap<VariantKey, StyleRule>,
    current: &Value,
) -> Option<&'r StyleRule> {
    if let Some(b) = current.as_bool() {
        return variants.get(&VariantKey::Bool(b));
    }
    if let Some(name) = current.as_name() {
        if let Some(rule) = variants.get(&VariantKey::Name(name.to_string())) {
            return Some(rule);
        }
    }
    variants.get(&VariantKey::Name(current.to_string()))
}

/// Resolves a rule as a section: nested rules apply every sub-rule.
fn section_classes(rule: &StyleRule, values: &OptionValues) -> String {
    match rule {
        StyleRule::Classes(classes) => classes.clone(),
        StyleRule::Dynamic(f) => f(values).to_class_fragment(),
        StyleRule::Nested(sections) => join_fragments(
            sections
                .values()
                .map(|section| section_classes(section, values)),
        ),
    }
}

fn join_fragments<I>(fragments: I) -> String
where
    I: IntoIterator<Item = String>,
{
    fragments
        .into_iter()
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::DedupResolver;
    use crate::rule::StyleMap;

    fn values(entries: &[(&str, Value)]) -> OptionValues {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn button_registry() -> StyleRegistry {
        let mut registry = StyleRegistry::new();
        registry.define(
            StyleMap::new()
                .with("base", "btn")
                .with(
                    "variant",
                    StyleRule::nested([
                        ("solid", "bg-blue-500 text-white"),
                        ("outline", "border border-blue-500 text-blue-500"),
                    ]),
                )
                .with(
                    "disabled",
                    StyleRule::nested([
                        (true, "opacity-50 cursor-not-allowed"),
                        (false, "cursor-pointer"),
                    ]),
                ),
        );
        registry
    }

    fn resolve(registry: &StyleRegistry, values: &OptionValues) -> String {
        StyleResolver::with_resolver(registry, Arc::new(DedupResolver)).resolve("default", values)
    }

    #[test]
    fn test_base_always_applied() {
        let registry = button_registry();
        assert_eq!(resolve(&registry, &OptionValues::new()), "btn");
    }

    #[test]
    fn test_variant_selected_by_symbol_or_string() {
        let registry = button_registry();
        let expected = "btn bg-blue-500 text-white";
        assert_eq!(resolve(&registry, &values(&[("variant", Value::sym("solid"))])), expected);
        assert_eq!(resolve(&registry, &values(&[("variant", Value::from("solid"))])), expected);
    }

    #[test]
    fn test_null_and_unknown_values_contribute_nothing() {
        let registry = button_registry();
        assert_eq!(resolve(&registry, &values(&[("variant", Value::Null)])), "btn");
        assert_eq!(resolve(&registry, &values(&[("variant", Value::sym("ghost"))])), "btn");
    }

    #[test]
    fn test_boolean_dispatch() {
        let registry = button_registry();
        assert_eq!(
            resolve(&registry, &values(&[("disabled", Value::Bool(true))])),
            "btn opacity-50 cursor-not-allowed"
        );
        assert_eq!(
            resolve(&registry, &values(&[("disabled", Value::Bool(false))])),
            "btn cursor-pointer"
        );
    }

    #[test]
    fn test_boolean_does_not_match_string_true() {
        let mut registry = StyleRegistry::new();
        registry.define(StyleMap::new().with(
            "answer",
            StyleRule::nested([(VariantKey::from("true"), "named-true")]),
        ));

        assert_eq!(resolve(&registry, &values(&[("answer", Value::Bool(true))])), "");
        assert_eq!(
            resolve(&registry, &values(&[("answer", Value::from("true"))])),
            "named-true"
        );
    }

    #[test]
    fn test_undefined_group_is_empty() {
        let registry = button_registry();
        let resolver = StyleResolver::new(&registry);
        assert_eq!(resolver.resolve("missing", &OptionValues::new()), "");
    }

    #[test]
    fn test_base_sections_all_applied() {
        let mut registry = StyleRegistry::new();
        registry.define(StyleMap::new().with(
            "base",
            StyleRule::nested([("layout", "flex items-center"), ("color", "text-gray-900")]),
        ));
        assert_eq!(
            resolve(&registry, &OptionValues::new()),
            "flex items-center text-gray-900"
        );
    }

    #[test]
    fn test_selected_nested_variant_resolves_as_section() {
        let mut registry = StyleRegistry::new();
        registry.define(StyleMap::new().with(
            "size",
            StyleRule::nested([(
                "lg",
                StyleRule::nested([("text", "text-lg"), ("pad", "px-6")]),
            )]),
        ));
        assert_eq!(
            resolve(&registry, &values(&[("size", Value::sym("lg"))])),
            "text-lg px-6"
        );
    }

    #[test]
    fn test_dynamic_rule_reads_snapshot() {
        let mut registry = StyleRegistry::new();
        registry.define(StyleMap::new().with(
            "columns",
            StyleRule::dynamic(|v: &OptionValues| {
                let n = v.get("columns").and_then(Value::as_int).unwrap_or(1);
                format!("grid-cols-{}", n)
            }),
        ));
        assert_eq!(
            resolve(&registry, &values(&[("columns", Value::Int(3))])),
            "grid-cols-3"
        );
    }

    #[test]
    fn test_dynamic_non_string_result() {
        let mut registry = StyleRegistry::new();
        registry.define(StyleMap::new().with(
            "tags",
            StyleRule::dynamic(|_: &OptionValues| {
                Value::List(vec!["a".into(), Value::Null, "b".into()])
            }),
        ));
        assert_eq!(resolve(&registry, &values(&[("tags", Value::Bool(true))])), "a b");
    }

    #[test]
    fn test_conflicts_resolved_after_join() {
        let mut registry = StyleRegistry::new();
        registry.define(
            StyleMap::new()
                .with("base", "p-4 bg-blue-500")
                .with("variant", StyleRule::nested([("danger", "p-6 bg-red-500")])),
        );
        let resolver = StyleResolver::with_resolver(
            &registry,
            Arc::new(crate::conflict::UtilityClassResolver::new()),
        );
        assert_eq!(
            resolver.resolve("default", &values(&[("variant", Value::sym("danger"))])),
            "p-6 bg-red-500"
        );
    }

    #[test]
    fn test_resolve_all_groups() {
        let mut registry = button_registry();
        registry.define_group("icon", StyleMap::new().with("base", "h-4 w-4"));
        let resolver = StyleResolver::with_resolver(&registry, Arc::new(DedupResolver));

        let all = resolver.resolve_all(&OptionValues::new());
        assert_eq!(all.len(), 2);
        assert_eq!(all["default"], "btn");
        assert_eq!(all["icon"], "h-4 w-4");
    }
}
