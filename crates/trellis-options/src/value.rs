//! Runtime value types for component options.
//!
//! The [`Value`] enum is the tagged representation of everything that can be
//! passed to a component: declared option values, extra options, and HTML
//! attribute values. It distinguishes symbols (the canonical form of
//! enumerated values) from free-form strings, while treating a string with
//! the same text as an equivalent spelling of the symbol.

use std::fmt;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Ordered mapping from names to values.
///
/// Insertion order is preserved so that extra options and attribute maps
/// come out in the order the caller wrote them.
pub type ValueMap = IndexMap<String, Value>;

/// A tagged option or attribute value.
///
/// # Example
///
/// ```
/// use trellis_options::Value;
///
/// let size = Value::sym("md");
/// assert_eq!(size.as_name(), Some("md"));
///
/// // Strings and symbols with the same text name the same thing.
/// assert_eq!(Value::from("md").as_name(), size.as_name());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value. Also what an unset option reads as.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Free-form string.
    Str(String),
    /// Canonical symbol-like name (enumerated option values).
    Symbol(String),
    /// Ordered list of values.
    List(Vec<Value>),
    /// Nested ordered map (e.g. the `data` attribute).
    Map(ValueMap),
}

impl Value {
    /// Creates a symbol value.
    pub fn sym(name: impl Into<String>) -> Self {
        Value::Symbol(name.into())
    }

    /// Creates a map value from `(key, value)` pairs.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns `true` if this is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if this is a boolean.
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Extracts the boolean, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the integer, if present.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the text of a string or symbol.
    ///
    /// This is the comparison form used for enumerated values: `Str("md")`
    /// and `Symbol("md")` both return `Some("md")`.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Value::Str(s) | Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the nested map, if present.
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Extracts the list, if present.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns `true` unless the value is null or an empty string.
    ///
    /// Backs the per-option presence query.
    pub fn is_present(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Str(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Renders the value as a space-separated class fragment.
    ///
    /// Null renders as the empty string, lists are flattened with empty
    /// entries dropped, and scalars use their display form.
    pub fn to_class_fragment(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Str(s) | Value::Symbol(s) => s.trim().to_string(),
            Value::List(items) => items
                .iter()
                .map(Value::to_class_fragment)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
            other => other.to_string(),
        }
    }

    /// Returns a short name for the value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Str(s) | Value::Symbol(s) => f.write_str(s),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                f.write_str(&parts.join(" "))
            }
            Value::Map(map) => {
                let parts: Vec<String> = map.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                f.write_str(&parts.join(" "))
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::Str(s) | Value::Symbol(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

// Conversions from primitive types
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Int)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<ValueMap> for Value {
    fn from(map: ValueMap) -> Self {
        Value::Map(map)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => {
                Value::Map(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

/// Converts a JSON object into an ordered input map.
///
/// Non-object JSON yields an empty map.
pub fn inputs_from_json(json: serde_json::Value) -> ValueMap {
    match Value::from(json) {
        Value::Map(map) => map,
        _ => ValueMap::new(),
    }
}
