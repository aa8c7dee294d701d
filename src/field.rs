//! Field extraction.
//!
//! A record declares its hashed fields explicitly through [`Record::fields`].
//! The builder collects `(identifier, value)` pairs; [`FieldSet::finish`]
//! validates them and sorts them into canonical order.
//!
//! ```
//! use infohash::{FieldSet, Record};
//!
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! impl Record for User {
//!     fn fields(&self) -> FieldSet {
//!         FieldSet::new()
//!             .field("name", &self.name)
//!             .field("age", &self.age)
//!     }
//! }
//! ```

use crate::error::{Error, Result};
use crate::value::{FieldValue, ToFieldValue};
use std::collections::HashSet;

/// A value whose fields can be fingerprinted.
pub trait Record {
    /// The ordered list of hashed fields. Must be deterministic.
    fn fields(&self) -> FieldSet;
}

impl<R: Record + ?Sized> Record for &R {
    fn fields(&self) -> FieldSet {
        (**self).fields()
    }
}

/// A single extracted field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub id: String,
    pub value: FieldValue,
}

/// Unvalidated field list, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    fields: Vec<Field>,
}

impl FieldSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field from any value with a canonical representation.
    #[must_use]
    pub fn field<T: ToFieldValue + ?Sized>(self, id: impl Into<String>, value: &T) -> Self {
        self.value(id, value.to_field_value())
    }

    /// Add a field from an already converted value.
    #[must_use]
    pub fn value(mut self, id: impl Into<String>, value: FieldValue) -> Self {
        self.fields.push(Field {
            id: id.into(),
            value,
        });
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate identifiers and sort into canonical order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecordShape`] if an identifier is empty or
    /// used more than once.
    pub fn finish(self) -> Result<Fields> {
        let mut seen = HashSet::with_capacity(self.fields.len());
        for (index, field) in self.fields.iter().enumerate() {
            if field.id.is_empty() {
                return Err(Error::InvalidRecordShape(format!(
                    "the field at position {index} has an empty identifier"
                )));
            }
            if !seen.insert(field.id.as_str()) {
                return Err(Error::InvalidRecordShape(format!(
                    "the identifier {:?} is used more than once",
                    field.id
                )));
            }
        }

        let mut fields = self.fields;
        fields.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(Fields { fields })
    }
}

/// Validated fields in canonical (sorted by identifier) order.
#[derive(Debug, Clone, PartialEq)]
pub struct Fields {
    fields: Vec<Field>,
}

impl Fields {
    /// Extract and validate the fields of a record.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::InvalidRecordShape`] from [`FieldSet::finish`].
    pub fn of<R: Record + ?Sized>(record: &R) -> Result<Self> {
        record.fields().finish()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    /// Identifiers in canonical order.
    #[must_use]
    pub fn identifiers(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.id.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

// ── JSON records ─────────────────────────────────────────────

/// A record backed by a JSON object: each top-level key is one field.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRecord {
    object: serde_json::Map<String, serde_json::Value>,
}

impl JsonRecord {
    /// Wrap a parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecordShape`] if the value is not an object.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Object(object) => Ok(Self { object }),
            other => Err(Error::InvalidRecordShape(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Parse a record from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] on invalid JSON, or [`Error::InvalidRecordShape`]
    /// if the top level is not an object.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }
}

impl Record for JsonRecord {
    fn fields(&self) -> FieldSet {
        self.object
            .iter()
            .fold(FieldSet::new(), |set, (key, value)| set.field(key.as_str(), value))
    }
}

const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
