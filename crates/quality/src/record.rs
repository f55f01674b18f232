//! Read-only accessors over a raw JSON item record.

use serde_json::{Map, Value};

/// A borrowed view over one JSON-shaped item record.
///
/// The audit engine deliberately consumes raw JSON rather than the typed
/// model: its whole job is diagnosing records that do not fit the model.
/// This wrapper centralizes the field probing so checkers stay readable.
#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> RecordView<'a> {
    /// Wrap an object map.
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }

    /// Wrap a value, if it is an object.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(Self::new)
    }

    /// The underlying map.
    pub fn map(&self) -> &'a Map<String, Value> {
        self.map
    }

    /// A raw field.
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.map.get(name).filter(|v| !v.is_null())
    }

    /// The first present field among the given names, with the name that hit.
    pub fn get_aliased(&self, names: &[&'static str]) -> Option<(&'static str, &'a Value)> {
        names
            .iter()
            .find_map(|name| self.get(name).map(|v| (*name, v)))
    }

    /// A string field.
    pub fn str_field(&self, name: &str) -> Option<&'a str> {
        self.get(name).and_then(Value::as_str)
    }

    /// An array field.
    pub fn array(&self, name: &str) -> Option<&'a [Value]> {
        self.get(name).and_then(Value::as_array).map(Vec::as_slice)
    }

    /// An object field.
    pub fn object(&self, name: &str) -> Option<&'a Map<String, Value>> {
        self.get(name).and_then(Value::as_object)
    }

    /// An integer field.
    pub fn int_field(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    /// The raw `type` tag.
    pub fn type_tag(&self) -> Option<&'a str> {
        self.str_field("type")
    }

    /// The record id, tolerating numeric ids from sloppy authoring tools.
    pub fn id(&self) -> Option<String> {
        match self.get("id") {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Identifiers from a collection field: entries may be plain strings or
    /// objects carrying an `id`.
    pub fn ids_of(&self, name: &str) -> Vec<&'a str> {
        self.array(name)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| match entry {
                        Value::String(s) => Some(s.as_str()),
                        Value::Object(o) => o.get("id").and_then(Value::as_str),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Display texts from an option-like collection field.
    pub fn texts_of(&self, name: &str) -> Vec<&'a str> {
        self.array(name)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| match entry {
                        Value::String(s) => Some(s.as_str()),
                        Value::Object(o) => o.get("text").and_then(Value::as_str),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Plain strings from an array field, skipping non-strings.
    pub fn strings_of(&self, name: &str) -> Vec<&'a str> {
        self.array(name)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_str)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The record serialized back to JSON text, for full-text defect scans.
    pub fn serialized(&self) -> String {
        serde_json::to_string(self.map).unwrap_or_default()
    }
}
