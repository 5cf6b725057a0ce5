//! Schema-less custom attributes attached to NinjaOne entities.
//!
//! Organizations, devices, locations, policies and users all carry
//! vendor-defined key/value attributes (`fields`, `userData`, and the
//! `.../custom-fields` sub-resources). The values are loosely typed: a
//! number can arrive as `42`, `42.0` or `"42"`, a flag as `true`, `1` or
//! `"true"`. [`CustomFields`] stores the raw JSON values and offers total
//! accessors that coerce to the type the caller wants, falling back to the
//! type's zero value on absence or mismatch.

use std::collections::HashMap;
use std::collections::hash_map;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// Unordered string-keyed map of arbitrary JSON values.
///
/// Decodes from a JSON object or from `null` (which yields an empty map),
/// and encodes as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CustomFields(HashMap<String, Value>);

impl CustomFields {
    /// Creates an empty container.
    pub fn new() -> Self {
        CustomFields(HashMap::new())
    }

    /// Inserts or replaces a field.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Raw value of a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Removes a field, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Returns `true` if the field is present (even when `null`).
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over fields in arbitrary order.
    pub fn iter(&self) -> hash_map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// The field as a string.
    ///
    /// Strings are returned as-is, absent and `null` fields as `""`.
    /// Numbers and booleans use their general formatting (`3.0` prints as
    /// `"3"`); arrays and objects print as compact JSON.
    pub fn string_field(&self, key: &str) -> String {
        match self.0.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => format_number(n),
            Some(Value::Bool(b)) => b.to_string(),
            Some(other) => other.to_string(),
        }
    }

    /// The field as an integer.
    ///
    /// Floats truncate toward zero, strings are parsed as base-10 integers.
    /// Anything else, including a string that fails to parse, yields `0`.
    pub fn int_field(&self, key: &str) -> i64 {
        match self.0.get(key) {
            Some(Value::Number(n)) => number_to_i64(n),
            Some(Value::String(s)) => s.parse().unwrap_or(0),
            _ => 0,
        }
    }

    /// The field as a float. Strings are parsed; anything else yields `0.0`.
    pub fn float_field(&self, key: &str) -> f64 {
        match self.0.get(key) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// The field as a boolean.
    ///
    /// Numbers are `true` when greater than zero. Strings accept the usual
    /// literals (`1 t T TRUE true True` and their false counterparts).
    /// Anything else yields `false`.
    pub fn bool_field(&self, key: &str) -> bool {
        match self.0.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => parse_bool_literal(s).unwrap_or(false),
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f > 0.0),
            _ => false,
        }
    }

    /// Consumes the container, returning the underlying map.
    pub fn into_inner(self) -> HashMap<String, Value> {
        self.0
    }
}

impl<'de> Deserialize<'de> for CustomFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Option::<HashMap<String, Value>>::deserialize(deserializer)?;
        Ok(CustomFields(map.unwrap_or_default()))
    }
}

impl From<HashMap<String, Value>> for CustomFields {
    fn from(map: HashMap<String, Value>) -> Self {
        CustomFields(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for CustomFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        CustomFields(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<'a> IntoIterator for &'a CustomFields {
    type Item = (&'a String, &'a Value);
    type IntoIter = hash_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    // f64's Display drops a trailing ".0".
    n.as_f64().map(|f| f.to_string()).unwrap_or_default()
}

fn number_to_i64(n: &Number) -> i64 {
    if let Some(i) = n.as_i64() {
        return i;
    }
    if let Some(u) = n.as_u64() {
        return i64::try_from(u).unwrap_or(i64::MAX);
    }
    // `as` saturates and truncates toward zero; NaN cannot occur in JSON.
    n.as_f64().map(|f| f as i64).unwrap_or(0)
}

fn parse_bool_literal(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
