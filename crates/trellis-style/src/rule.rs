//! Style rule types.
//!
//! A [`StyleMap`] maps style keys to [`StyleRule`]s. The key `base` is always
//! applied; every other key names an option and only contributes when that
//! option is passed to the resolver.
//!
//! A rule is one of:
//!
//! - [`StyleRule::Classes`]: a literal class string
//! - [`StyleRule::Nested`]: sub-keys to rules. Under `base` the sub-keys are
//!   named sections that are all applied; under an option key they are the
//!   option's values and only the matching one is applied
//! - [`StyleRule::Dynamic`]: a function of the full option-value snapshot
//!
//! Boolean options dispatch through [`VariantKey::Bool`]. A variant spelled
//! `"true"` is a [`VariantKey::Name`] and never matches a boolean.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use trellis_options::{OptionValues, Value};

/// The style key that is applied unconditionally.
pub const BASE_KEY: &str = "base";

/// Style function evaluated against the current option values.
pub type StyleFn = Arc<dyn Fn(&OptionValues) -> Value + Send + Sync>;

/// Sub-key of a nested rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VariantKey {
    /// One of the two boolean variants.
    Bool(bool),
    /// A named variant (option value) or base section name.
    Name(String),
}

impl VariantKey {
    /// Converts a macro token into a key.
    ///
    /// Bare `true`/`false` become boolean keys; quoted strings become names
    /// with the quotes removed; anything else is a name as written.
    #[doc(hidden)]
    pub fn from_token(token: &str) -> Self {
        match token {
            "true" => VariantKey::Bool(true),
            "false" => VariantKey::Bool(false),
            other => VariantKey::Name(unquote(other).to_string()),
        }
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantKey::Bool(b) => write!(f, "{}", b),
            VariantKey::Name(name) => f.write_str(name),
        }
    }
}

impl From<bool> for VariantKey {
    fn from(b: bool) -> Self {
        VariantKey::Bool(b)
    }
}

impl From<&str> for VariantKey {
    fn from(name: &str) -> Self {
        VariantKey::Name(name.to_string())
    }
}

impl From<String> for VariantKey {
    fn from(name: String) -> Self {
        VariantKey::Name(name)
    }
}

/// Strips one pair of surrounding double quotes.
fn unquote(token: &str) -> &str {
    token
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(token)
}

/// How a style key contributes classes.
#[derive(Clone)]
pub enum StyleRule {
    /// Literal class string.
    Classes(String),
    /// Sections (under `base`) or option-value variants (under option keys).
    Nested(IndexMap<VariantKey, StyleRule>),
    /// Computed from the option-value snapshot.
    Dynamic(StyleFn),
}

impl StyleRule {
    /// Creates a literal rule.
    pub fn classes(classes: impl Into<String>) -> Self {
        StyleRule::Classes(classes.into())
    }

    /// Creates a nested rule from `(sub-key, rule)` pairs.
    pub fn nested<K, R, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, R)>,
        K: Into<VariantKey>,
        R: Into<StyleRule>,
    {
        StyleRule::Nested(
            entries
                .into_iter()
                .map(|(k, r)| (k.into(), r.into()))
                .collect(),
        )
    }

    /// Creates a rule computed from the option values.
    ///
    /// The function reads only the options it needs and supplies its own
    /// fallbacks for missing ones. Non-string results are rendered with
    /// [`Value::to_class_fragment`].
    pub fn dynamic<F, R>(f: F) -> Self
    where
        F: Fn(&OptionValues) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        StyleRule::Dynamic(Arc::new(move |values| f(values).into()))
    }

    /// Returns the nested entries, if this is a nested rule.
    pub fn as_nested(&self) -> Option<&IndexMap<VariantKey, StyleRule>> {
        match self {
            StyleRule::Nested(entries) => Some(entries),
            _ => None,
        }
    }

    /// Combines a parent rule with a child rule for the same key.
    ///
    /// Two nested rules merge sub-key by sub-key with the child winning;
    /// any other combination keeps only the child.
    pub fn merge(parent: StyleRule, child: StyleRule) -> StyleRule {
        match (parent, child) {
            (StyleRule::Nested(mut merged), StyleRule::Nested(overrides)) => {
                for (key, rule) in overrides {
                    merged.insert(key, rule);
                }
                StyleRule::Nested(merged)
            }
            (_, child) => child,
        }
    }
}

impl fmt::Debug for StyleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleRule::Classes(classes) => f.debug_tuple("Classes").field(classes).finish(),
            StyleRule::Nested(entries) => f.debug_tuple("Nested").field(entries).finish(),
            StyleRule::Dynamic(_) => f.write_str("Dynamic(<fn>)"),
        }
    }
}

impl From<&str> for StyleRule {
    fn from(classes: &str) -> Self {
        StyleRule::Classes(classes.to_string())
    }
}

impl From<String> for StyleRule {
    fn from(classes: String) -> Self {
        StyleRule::Classes(classes)
    }
}

/// Style keys to rules for one group, in definition order.
///
/// # Example
///
/// ```rust
/// use trellis_style::{StyleMap, StyleRule};
///
/// let map = StyleMap::new()
///     .with("base", "btn")
///     .with("variant", StyleRule::nested([("solid", "bg-blue-500"), ("outline", "border")]))
///     .with("disabled", StyleRule::nested([(true, "opacity-50"), (false, "cursor-pointer")]));
///
/// assert_eq!(map.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StyleMap {
    rules: IndexMap<String, StyleRule>,
}

impl StyleMap {
    /// Creates an empty style map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule, replacing any existing rule for `key`, returning `self`
    /// for chaining.
    pub fn with(mut self, key: impl Into<String>, rule: impl Into<StyleRule>) -> Self {
        self.rules.insert(key.into(), rule.into());
        self
    }

    /// Inserts a rule, replacing any existing rule for `key`.
    pub fn insert(&mut self, key: impl Into<String>, rule: impl Into<StyleRule>) {
        self.rules.insert(key.into(), rule.into());
    }

    /// Returns the rule for `key`.
    pub fn get(&self, key: &str) -> Option<&StyleRule> {
        self.rules.get(key)
    }

    /// Returns the unconditional `base` rule.
    pub fn base(&self) -> Option<&StyleRule> {
        self.rules.get(BASE_KEY)
    }

    /// Iterates over `(key, rule)` pairs in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleRule)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of style keys.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no style keys are defined.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Merges `other` into this map key by key using [`StyleRule::merge`].
    pub fn merge(&mut self, other: StyleMap) {
        for (key, rule) in other.rules {
            match self.rules.get_mut(&key) {
                Some(existing) => {
                    let parent = std::mem::replace(existing, StyleRule::Classes(String::new()));
                    *existing = StyleRule::merge(parent, rule);
                }
                None => {
                    self.rules.insert(key, rule);
                }
            }
        }
    }
}

impl<K: Into<String>, R: Into<StyleRule>> FromIterator<(K, R)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (K, R)>>(iter: I) -> Self {
        Self {
            rules: iter
                .into_iter()
                .map(|(k, r)| (k.into(), r.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(rule: &StyleRule) -> &str {
        match rule {
            StyleRule::Classes(s) => s,
            other => panic!("Expected Classes, got {:?}", other),
        }
    }

    #[test]
    fn test_variant_key_from_token() {
        assert_eq!(VariantKey::from_token("true"), VariantKey::Bool(true));
        assert_eq!(VariantKey::from_token("false"), VariantKey::Bool(false));
        assert_eq!(
            VariantKey::from_token("\"true\""),
            VariantKey::Name("true".to_string())
        );
        assert_eq!(
            VariantKey::from_token("solid"),
            VariantKey::Name("solid".to_string())
        );
    }

    #[test]
    fn test_merge_nested_keeps_parent_sub_keys() {
        let parent = StyleRule::nested([("solid", "bg-blue-500"), ("outline", "border")]);
        let child = StyleRule::nested([("solid", "bg-green-500"), ("ghost", "bg-transparent")]);

        let merged = StyleRule::merge(parent, child);
        let entries = merged.as_nested().unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(classes(&entries[&VariantKey::from("solid")]), "bg-green-500");
        assert_eq!(classes(&entries[&VariantKey::from("outline")]), "border");
        assert_eq!(classes(&entries[&VariantKey::from("ghost")]), "bg-transparent");
    }

    #[test]
    fn test_merge_mixed_types_child_replaces() {
        let parent = StyleRule::nested([("solid", "bg-blue-500")]);
        let merged = StyleRule::merge(parent, StyleRule::classes("plain"));
        assert_eq!(classes(&merged), "plain");

        let merged = StyleRule::merge(
            StyleRule::classes("plain"),
            StyleRule::nested([("a", "b")]),
        );
        assert!(merged.as_nested().is_some());

        let merged = StyleRule::merge(
            StyleRule::nested([("a", "b")]),
            StyleRule::dynamic(|_| "computed"),
        );
        assert!(matches!(merged, StyleRule::Dynamic(_)));
    }

    #[test]
    fn test_style_map_merge_preserves_position() {
        let mut map = StyleMap::new()
            .with("base", "btn")
            .with("size", StyleRule::nested([("sm", "text-sm")]));
        map.merge(
            StyleMap::new()
                .with("base", "btn-lg")
                .with("tone", "text-gray-700"),
        );

        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["base", "size", "tone"]);
        assert_eq!(classes(map.base().unwrap()), "btn-lg");
    }

    #[test]
    fn test_dynamic_coerces_to_value() {
        let rule =
            StyleRule::dynamic(|values| values.get("cols").cloned().unwrap_or(Value::Int(1)));
        let StyleRule::Dynamic(f) = rule else {
            panic!("Expected Dynamic");
        };
        assert_eq!(f(&OptionValues::new()), Value::Int(1));
    }
}
