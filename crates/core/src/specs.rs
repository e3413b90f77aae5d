//! Product specification rows and their object encoding.
//!
//! Admins edit specifications as an ordered list of key/value rows
//! ("RAM" / "16GB", "Storage" / "512GB SSD"). The backend stores them as a
//! JSON object. [`Specifications`] is the normalized form of those rows:
//!
//! - keys and values are trimmed
//! - rows with a blank key or a blank value are dropped
//! - a repeated key keeps the position of its first occurrence and the value
//!   of its last occurrence

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single editable specification row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecRow {
    pub key: String,
    pub value: String,
}

impl SpecRow {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Errors from parsing a `KEY=VALUE` row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpecRowError {
    #[error("specification must look like KEY=VALUE, got: {0}")]
    MissingSeparator(String),
    #[error("specification key cannot be empty")]
    EmptyKey,
}

impl std::str::FromStr for SpecRow {
    type Err = SpecRowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| SpecRowError::MissingSeparator(s.to_owned()))?;
        if key.trim().is_empty() {
            return Err(SpecRowError::EmptyKey);
        }
        Ok(Self::new(key.trim(), value.trim()))
    }
}

/// Normalized, ordered product specifications.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Specifications {
    entries: Vec<(String, String)>,
}

impl Specifications {
    /// Build from editable rows, applying the normalization rules above.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = SpecRow>,
    {
        let mut specs = Self::default();
        for row in rows {
            specs.insert(&row.key, &row.value);
        }
        specs
    }

    /// Insert one row. Blank keys or values are ignored.
    pub fn insert(&mut self, key: &str, value: &str) {
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            return;
        }

        if let Some(existing) = self.entries.iter_mut().find(|(k, _)| k == key) {
            value.clone_into(&mut existing.1);
        } else {
            self.entries.push((key.to_owned(), value.to_owned()));
        }
    }

    /// Remove a key, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let key = key.trim();
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Look up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key.trim();
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Rows in display order, ready for editing.
    #[must_use]
    pub fn to_rows(&self) -> Vec<SpecRow> {
        self.entries
            .iter()
            .map(|(k, v)| SpecRow::new(k.clone(), v.clone()))
            .collect()
    }

    /// Iterate over `(key, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The JSON object form sent in the `specifications` form field.
    #[must_use]
    pub fn to_object(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect()
    }

    /// The object form as JSON text.
    #[must_use]
    pub fn to_json_string(&self) -> String {
        Value::Object(self.to_object()).to_string()
    }

    /// Merge another set of specifications on top of this one.
    ///
    /// Keys present in `other` overwrite values here; new keys are appended.
    pub fn merge(&mut self, other: &Self) {
        for (k, v) in other.iter() {
            self.insert(k, v);
        }
    }
}

fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl Serialize for Specifications {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Specifications {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SpecsVisitor;

        impl<'de> Visitor<'de> for SpecsVisitor {
            type Value = Specifications;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a specifications object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut specs = Specifications::default();
                while let Some((key, value)) = access.next_entry::<String, Value>()? {
                    if let Some(text) = value_to_text(&value) {
                        specs.insert(&key, &text);
                    }
                }
                Ok(specs)
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(Specifications::default())
            }

            fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(Specifications::default())
            }
        }

        deserializer.deserialize_any(SpecsVisitor)
    }
}
