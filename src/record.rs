//! Normalized Salesforce records.
//!
//! Salesforce answers with two shapes: a query envelope
//! (`{"totalSize", "done", "records": [...]}`) or a bare record map. Both are
//! turned into [`Record`]s whose fields are looked up by name:
//!
//! ```rust
//! use sfquerier::record::{normalize, Normalized};
//!
//! let body = serde_json::json!({
//!     "totalSize": 1,
//!     "done": true,
//!     "records": [{"Id": "500000000000001AAA", "CaseNumber": "00001026"}]
//! });
//!
//! let records = normalize(&body).unwrap().into_records();
//! assert_eq!(records[0].str("CaseNumber"), Some("00001026"));
//! assert_eq!(records[0].str("Subject"), None);
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::error::{Error, Result};

/// A single field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<FieldValue>),
    Record(Record),
}

impl FieldValue {
    fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::Number(n.clone()),
            Value::String(s) => Self::String(s.clone()),
            Value::Array(items) => Self::List(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => Self::Record(Record::from_map(map)),
        }
    }

    /// The field was present and `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The text of a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// A checkbox value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// A number that fits in an `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Any number, as `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// A nested object.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// A JSON array, such as a multi-valued field.
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

/// A record with fields addressable by name.
///
/// Lookups for fields the response did not carry return `None`; Salesforce
/// omits fields that were not selected and sends `null` for empty ones, and
/// the two are kept apart ([`Record::get`] gives `Some(FieldValue::Null)` for
/// the latter).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            fields: map
                .iter()
                .map(|(name, value)| (name.clone(), FieldValue::from_json(value)))
                .collect(),
        }
    }

    /// A single record from a bare JSON object.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(Error::unexpected_shape(format!(
                "expected a record object, got {}",
                json_type(other)
            ))),
        }
    }

    /// The value of a field, `None` when the response did not carry it.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// True when the field was present, even as `null`.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// A string field.
    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    /// A boolean field.
    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(FieldValue::as_bool)
    }

    /// An integer field.
    pub fn i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(FieldValue::as_i64)
    }

    /// A numeric field as `f64`.
    pub fn f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_f64)
    }

    /// A nested record, e.g. a relationship field (`Account` on a Contact).
    pub fn record(&self, name: &str) -> Option<&Record> {
        self.get(name).and_then(FieldValue::as_record)
    }

    /// The `Id` field.
    pub fn id(&self) -> Option<&str> {
        self.str("Id")
    }

    /// The sObject type from the `attributes` block Salesforce attaches.
    pub fn sobject_type(&self) -> Option<&str> {
        self.record("attributes").and_then(|attrs| attrs.str("type"))
    }

    /// Field names in sorted order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Fields and their values in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields carried.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Output of [`normalize`].
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// The body carried a `records` list (or was a bare list).
    Many(Vec<Record>),
    /// The body was a single record.
    One(Record),
}

impl Normalized {
    /// Flatten to a list; a single record becomes a list of one.
    pub fn into_records(self) -> Vec<Record> {
        match self {
            Self::Many(records) => records,
            Self::One(record) => vec![record],
        }
    }

    /// The single record, or the first of many.
    pub fn into_one(self) -> Option<Record> {
        match self {
            Self::Many(records) => records.into_iter().next(),
            Self::One(record) => Some(record),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        match self {
            Self::Many(records) => records.len(),
            Self::One(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Normalize a response body.
///
/// - an object with `records` gives [`Normalized::Many`], one record per element
/// - any other object gives [`Normalized::One`]
/// - a top-level array gives [`Normalized::Many`]
/// - scalars, and non-object elements of a record list, are
///   [`UnexpectedShape`](crate::ErrorKind::UnexpectedShape)
pub fn normalize(value: &Value) -> Result<Normalized> {
    match value {
        Value::Object(map) => match map.get("records") {
            Some(Value::Array(items)) => records_from(items).map(Normalized::Many),
            Some(other) => Err(Error::unexpected_shape(format!(
                "`records` is {}, expected an array",
                json_type(other)
            ))),
            None => Ok(Normalized::One(Record::from_map(map))),
        },
        Value::Array(items) => records_from(items).map(Normalized::Many),
        other => Err(Error::unexpected_shape(format!(
            "expected an object or array, got {}",
            json_type(other)
        ))),
    }
}

fn records_from(items: &[Value]) -> Result<Vec<Record>> {
    items.iter().map(Record::from_value).collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
