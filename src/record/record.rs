//! Record type: field name to scalar value

use std::collections::BTreeMap;

use super::value::Value;
use crate::errors::{EngineError, EngineResult};

/// A single tabular record.
///
/// Fields are kept in name order so rendering is deterministic.
/// A field that is absent reads exactly like an explicit null.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Creates an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field assignment
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Assigns a field
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Returns the non-null value of a field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    /// Returns the value of a field, treating absence as null
    pub fn value(&self, field: &str) -> &Value {
        static NULL: Value = Value::Null;
        self.get(field).unwrap_or(&NULL)
    }

    /// Returns true when the field is absent or null
    pub fn is_null(&self, field: &str) -> bool {
        self.get(field).is_none()
    }

    /// Number of stored fields (including explicit nulls)
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are stored
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Builds a record from a JSON object
    pub fn from_json(json: &serde_json::Value) -> EngineResult<Self> {
        let object = json
            .as_object()
            .ok_or_else(|| EngineError::contract("record must be a JSON object"))?;

        let mut record = Record::new();
        for (field, value) in object {
            record.set(field.clone(), Value::from_json(field, value)?);
        }
        Ok(record)
    }

    /// Builds a collection from a JSON array of objects
    pub fn collection_from_json(json: &serde_json::Value) -> EngineResult<Vec<Record>> {
        let items = json
            .as_array()
            .ok_or_else(|| EngineError::contract("collection must be a JSON array"))?;

        items.iter().map(Record::from_json).collect()
    }

    /// Renders the record as a JSON object
    pub fn to_json(&self) -> serde_json::Value {
        let object = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(object)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.set(k, v);
        }
        record
    }
}
