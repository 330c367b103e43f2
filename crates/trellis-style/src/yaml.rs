//! YAML style maps.
//!
//! A style map document is a mapping of style keys to rules:
//!
//! ```yaml
//! base: "btn inline-flex"
//! variant:
//!   solid: "bg-blue-500 text-white"
//!   outline: "border border-blue-500"
//! disabled:
//!   true: "opacity-50 cursor-not-allowed"
//!   false: "cursor-pointer"
//! ```
//!
//! Strings are literal rules and mappings are nested rules. A list of strings
//! is joined into one literal. Bare `true`/`false` sub-keys become boolean
//! variants; quoted `"true"` stays a named variant. Entries with a null rule
//! are ignored with a warning.
//!
//! A registry document nests style maps under group names:
//!
//! ```yaml
//! default:
//!   base: card
//! body:
//!   base: p-4
//! ```

use indexmap::IndexMap;
use serde_yaml::{Mapping, Value as Yaml};

use crate::error::StyleError;
use crate::registry::StyleRegistry;
use crate::rule::{StyleMap, StyleRule, VariantKey};

impl StyleMap {
    /// Parses a style map from YAML.
    ///
    /// An empty document gives an empty map.
    pub fn from_yaml(yaml: &str) -> Result<StyleMap, StyleError> {
        if yaml.trim().is_empty() {
            return Ok(StyleMap::new());
        }
        let doc: Yaml = serde_yaml::from_str(yaml)?;
        match doc {
            Yaml::Null => Ok(StyleMap::new()),
            Yaml::Mapping(mapping) => parse_style_map(&mapping, ""),
            other => Err(StyleError::Parse {
                message: format!("expected a mapping of style keys, got {}", yaml_type(&other)),
            }),
        }
    }
}

impl StyleRegistry {
    /// Defines groups from a YAML document mapping group names to style maps.
    ///
    /// The whole document is parsed before any group is defined, so on error
    /// the registry is left untouched.
    pub fn define_from_yaml(&mut self, yaml: &str) -> Result<&mut Self, StyleError> {
        if yaml.trim().is_empty() {
            return Ok(self);
        }
        let doc: Yaml = serde_yaml::from_str(yaml)?;
        let groups = match doc {
            Yaml::Null => return Ok(self),
            Yaml::Mapping(mapping) => mapping,
            other => {
                return Err(StyleError::Parse {
                    message: format!(
                        "expected a mapping of style groups, got {}",
                        yaml_type(&other)
                    ),
                })
            }
        };

        let parsed = groups
            .iter()
            .map(|(group, map)| parse_group(group, map))
            .collect::<Result<Vec<_>, _>>()?;

        for (group, map) in parsed {
            self.define_group(group, map);
        }
        Ok(self)
    }
}

fn parse_group(group: &Yaml, map: &Yaml) -> Result<(String, StyleMap), StyleError> {
    let group = scalar_key(group).ok_or_else(|| StyleError::InvalidRule {
        key: format!("{:?}", group),
        message: "group names must be strings".to_string(),
    })?;
    let map = match map {
        Yaml::Mapping(mapping) => parse_style_map(mapping, &group)?,
        Yaml::Null => StyleMap::new(),
        other => {
            return Err(StyleError::InvalidRule {
                key: group,
                message: format!("expected a style map, got {}", yaml_type(other)),
            })
        }
    };
    Ok((group, map))
}

fn parse_style_map(mapping: &Mapping, group: &str) -> Result<StyleMap, StyleError> {
    let mut map = StyleMap::new();
    for (key, rule) in mapping {
        let key = scalar_key(key).ok_or_else(|| StyleError::InvalidRule {
            key: path(group, &format!("{:?}", key)),
            message: "style keys must be strings".to_string(),
        })?;
        let key_path = path(group, &key);
        match parse_rule(rule, &key_path)? {
            Some(rule) => map.insert(key, rule),
            None => tracing::warn!(key = %key_path, "ignoring style key with null rule"),
        }
    }
    Ok(map)
}

fn parse_rule(rule: &Yaml, path: &str) -> Result<Option<StyleRule>, StyleError> {
    let rule = match rule {
        Yaml::Null => return Ok(None),
        Yaml::String(classes) => StyleRule::classes(classes.trim()),
        Yaml::Sequence(items) => {
            let mut classes = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Yaml::String(s) => classes.push(s.trim()),
                    other => {
                        return Err(StyleError::InvalidRule {
                            key: path.to_string(),
                            message: format!(
                                "class lists may only contain strings, got {}",
                                yaml_type(other)
                            ),
                        })
                    }
                }
            }
            StyleRule::classes(classes.join(" "))
        }
        Yaml::Mapping(entries) => {
            let mut variants = IndexMap::with_capacity(entries.len());
            for (sub_key, sub_rule) in entries {
                let variant = variant_key(sub_key).ok_or_else(|| StyleError::InvalidRule {
                    key: path.to_string(),
                    message: format!("unsupported variant key {:?}", sub_key),
                })?;
                let sub_path = format!("{}.{}", path, variant);
                match parse_rule(sub_rule, &sub_path)? {
                    Some(rule) => {
                        variants.insert(variant, rule);
                    }
                    None => tracing::warn!(key = %sub_path, "ignoring variant with null rule"),
                }
            }
            StyleRule::Nested(variants)
        }
        other => {
            return Err(StyleError::InvalidRule {
                key: path.to_string(),
                message: format!("expected classes or a mapping, got {}", yaml_type(other)),
            })
        }
    };
    Ok(Some(rule))
}

fn variant_key(key: &Yaml) -> Option<VariantKey> {
    match key {
        Yaml::Bool(b) => Some(VariantKey::Bool(*b)),
        other => scalar_key(other).map(VariantKey::Name),
    }
}

fn scalar_key(key: &Yaml) -> Option<String> {
    match key {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn path(group: &str, key: &str) -> String {
    if group.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", group, key)
    }
}

fn yaml_type(value: &Yaml) -> &'static str {
    match value {
        Yaml::Null => "null",
        Yaml::Bool(_) => "a boolean",
        Yaml::Number(_) => "a number",
        Yaml::String(_) => "a string",
        Yaml::Sequence(_) => "a list",
        Yaml::Mapping(_) => "a mapping",
        Yaml::Tagged(_) => "a tagged value",
    }
}
