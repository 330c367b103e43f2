//! Per-component-type style registry.
//!
//! A [`StyleRegistry`] holds one [`StyleMap`] per named group. Groups let a
//! component style several elements separately (a root wrapper and its inner
//! content, say). Definitions accumulate: defining the same group twice
//! merges the second map into the first with the per-key rule described in
//! [`StyleRule::merge`](crate::StyleRule::merge).
//!
//! # Inheritance
//!
//! The registry a descendant type resolves against is the fold of every
//! registry in its ancestry, most distant ancestor first:
//!
//! ```text
//! Base      { default: { base: "btn", size: {sm, md} } }
//!   └─ Icon { default: { size: {md: ..} }, icon: { base: "h-4 w-4" } }
//!
//! effective(Icon) = { default: { base: "btn", size: {sm, md'} },
//!                     icon:    { base: "h-4 w-4" } }
//! ```

use indexmap::IndexMap;

use crate::rule::StyleMap;

/// Name of the group used when none is given.
pub const DEFAULT_GROUP: &str = "default";

/// Mapping from group name to the group's style map.
///
/// # Example
///
/// ```rust
/// use trellis_style::{StyleMap, StyleRegistry, StyleRule};
///
/// let mut parent = StyleRegistry::new();
/// parent.define(StyleMap::new().with("base", "btn").with(
///     "variant",
///     StyleRule::nested([("solid", "bg-blue-500"), ("outline", "border")]),
/// ));
///
/// let mut child = StyleRegistry::new();
/// child.define(StyleMap::new().with("variant", StyleRule::nested([("solid", "bg-green-500")])));
///
/// let effective = StyleRegistry::effective([&parent, &child]);
/// let variant = effective.group("default").unwrap().get("variant").unwrap();
/// assert_eq!(variant.as_nested().unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    groups: IndexMap<String, StyleMap>,
}

impl StyleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `map` into the default group.
    pub fn define(&mut self, map: StyleMap) -> &mut Self {
        self.define_group(DEFAULT_GROUP, map)
    }

    /// Merges `map` into `group`, creating the group if needed.
    pub fn define_group(&mut self, group: impl Into<String>, map: StyleMap) -> &mut Self {
        let group = group.into();
        tracing::trace!(group = %group, keys = map.len(), "define style group");
        self.groups.entry(group).or_default().merge(map);
        self
    }

    /// Merges every group of `other` into this registry.
    pub fn extend_from(&mut self, other: &StyleRegistry) -> &mut Self {
        for (group, map) in &other.groups {
            self.define_group(group.clone(), map.clone());
        }
        self
    }

    /// Folds registries into one, in the order given.
    ///
    /// Pass the ancestry most distant ancestor first so that descendants
    /// override.
    pub fn effective<'a, I>(chain: I) -> StyleRegistry
    where
        I: IntoIterator<Item = &'a StyleRegistry>,
    {
        let mut merged = StyleRegistry::new();
        for registry in chain {
            merged.extend_from(registry);
        }
        merged
    }

    /// Returns the style map for `group`.
    pub fn group(&self, group: &str) -> Option<&StyleMap> {
        self.groups.get(group)
    }

    /// Iterates over group names in definition order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Returns true if no groups are defined.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns the number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }
}
