//! HTML attribute maps and merging.
//!
//! [`merge_attributes`] folds attribute maps left to right. Later maps win
//! per key, with two exceptions:
//!
//! | Key | Merge |
//! |-----|-------|
//! | `class` | both sides normalized, concatenated, then conflict-resolved |
//! | `data` | merged per sub-key; `controller` and `action` accumulate |
//!
//! Class values may be strings (trimmed) or lists (flattened, empties
//! dropped). Accumulated `data` values are deduplicated and space-joined,
//! skipping nulls.
//!
//! ```rust
//! use trellis_options::Value;
//! use trellis_style::{merge_attributes, Attributes};
//!
//! let defaults = Attributes::new()
//!     .with("id", "menu")
//!     .with("data", Value::map([("controller", "dropdown")]));
//! let caller = Attributes::new()
//!     .with("id", "main-menu")
//!     .with("data", Value::map([("controller", "tracking")]));
//!
//! let merged = merge_attributes(&[&defaults, &caller]);
//! assert_eq!(merged.get("id"), Some(&Value::from("main-menu")));
//! assert_eq!(merged.data("controller"), Some(&Value::from("dropdown tracking")));
//! ```

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use trellis_options::{Value, ValueMap};

use crate::conflict::{conflict_resolver, ClassConflictResolver};

/// Attribute key holding CSS classes.
pub const CLASS_KEY: &str = "class";
/// Attribute key holding the nested `data-*` map.
pub const DATA_KEY: &str = "data";

/// `data` sub-keys whose values accumulate instead of being replaced.
const ACCUMULATING_DATA_KEYS: &[&str] = &["controller", "action"];

/// Ordered attribute map handed to a renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Attributes(IndexMap<String, Value>);

impl Attributes {
    /// Creates an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a `data` sub-map as `{ data: .. }`.
    pub fn with_data(data: Attributes) -> Self {
        Self::new().with(DATA_KEY, Value::Map(data.0))
    }

    /// Sets an attribute, returning `self` for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Sets an attribute, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns an attribute value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Removes an attribute, keeping the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Returns a `data` sub-key.
    pub fn data(&self, key: &str) -> Option<&Value> {
        self.0.get(DATA_KEY)?.as_map()?.get(key)
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Builds attributes from a JSON object. Other JSON values give an
    /// empty map.
    pub fn from_json(json: serde_json::Value) -> Self {
        match Value::from(json) {
            Value::Map(map) => Self(map),
            _ => Self::new(),
        }
    }

    /// Returns the underlying map.
    pub fn into_inner(self) -> ValueMap {
        self.0
    }
}

impl From<ValueMap> for Attributes {
    fn from(map: ValueMap) -> Self {
        Self(map)
    }
}

impl From<Attributes> for Value {
    fn from(attributes: Attributes) -> Self {
        Value::Map(attributes.0)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Merges attribute maps using the process-wide conflict resolver.
pub fn merge_attributes(maps: &[&Attributes]) -> Attributes {
    AttributeMerger::new().merge(maps)
}

/// Attribute merger bound to a conflict resolver.
pub struct AttributeMerger {
    conflicts: Arc<dyn ClassConflictResolver>,
}

impl Default for AttributeMerger {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeMerger {
    /// Creates a merger using the process-wide conflict resolver.
    pub fn new() -> Self {
        Self::with_resolver(conflict_resolver())
    }

    /// Creates a merger with an explicit conflict resolver.
    pub fn with_resolver(conflicts: Arc<dyn ClassConflictResolver>) -> Self {
        Self { conflicts }
    }

    /// Folds `maps` left to right. Empty maps are skipped.
    pub fn merge(&self, maps: &[&Attributes]) -> Attributes {
        let mut merged = Attributes::new();
        for map in maps.iter().filter(|m| !m.is_empty()) {
            self.merge_into(&mut merged, map);
        }
        merged
    }

    /// Merges `source` into `target`.
    pub fn merge_into(&self, target: &mut Attributes, source: &Attributes) {
        for (key, value) in source.iter() {
            let merged = match key {
                CLASS_KEY => self.merge_class(target.get(key), value),
                DATA_KEY => merge_data(target.get(key), value),
                _ => value.clone(),
            };
            target.insert(key, merged);
        }
    }

    fn merge_class(&self, old: Option<&Value>, new: &Value) -> Value {
        let old = old.map(Value::to_class_fragment).unwrap_or_default();
        let new = new.to_class_fragment();
        let joined = match (old.is_empty(), new.is_empty()) {
            (true, _) => new,
            (_, true) => old,
            _ => format!("{} {}", old, new),
        };
        Value::Str(self.conflicts.merge(&joined))
    }
}

fn merge_data(old: Option<&Value>, new: &Value) -> Value {
    let (Some(Value::Map(old)), Value::Map(new)) = (old, new) else {
        return new.clone();
    };
    let mut merged = old.clone();
    for (key, value) in new {
        let value = if ACCUMULATING_DATA_KEYS.contains(&key.as_str()) {
            accumulate(merged.get(key), value)
        } else {
            value.clone()
        };
        merged.insert(key.clone(), value);
    }
    Value::Map(merged)
}

/// Space-joins the tokens of both values, dropping nulls and duplicates.
fn accumulate(old: Option<&Value>, new: &Value) -> Value {
    let old = old.map(Value::to_class_fragment).unwrap_or_default();
    let new = new.to_class_fragment();
    let mut tokens: Vec<&str> = Vec::new();
    for token in old.split_whitespace().chain(new.split_whitespace()) {
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    if tokens.is_empty() {
        Value::Null
    } else {
        Value::Str(tokens.join(" "))
    }
}
