use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::QueryError;

/// Borrowed view of one field value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Text(&'a str),
    Number(f64),
    Bool(bool),
}

impl<'a> Value<'a> {
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            Value::Text(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn to_scalar(&self) -> Scalar {
        match self {
            Value::Text(s) => Scalar::Text((*s).to_string()),
            Value::Number(n) => Scalar::Number(*n),
            Value::Bool(b) => Scalar::Bool(*b),
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Owned field value, as carried by filter conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Scalar {
    pub fn as_value(&self) -> Value<'_> {
        match self {
            Scalar::Text(s) => Value::Text(s),
            Scalar::Number(n) => Value::Number(*n),
            Scalar::Bool(b) => Value::Bool(*b),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// One entity of a homogeneous collection.
///
/// Each record kind declares its own field enum, so conditions and stats can
/// only name fields the record actually has. Categorical fields are exposed as
/// `Value::Text` of their code.
pub trait Record {
    type Field: Clone + PartialEq + fmt::Debug + fmt::Display;

    /// Identity, unique within its collection
    fn id(&self) -> &str;

    /// `None` means the field is missing on this record
    fn field(&self, field: &Self::Field) -> Option<Value<'_>>;

    /// Resolves a field from the name used in page state and fixtures
    fn field_by_name(name: &str) -> Option<Self::Field>;

    /// Date fields sort chronologically instead of as text
    fn is_date_field(_field: &Self::Field) -> bool {
        false
    }
}

/// Field name of a [`DynamicRecord`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldKey(pub String);

impl FieldKey {
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Untyped record over a JSON object: field name -> primitive value.
///
/// `null`, arrays and nested objects read as missing. The `id` key is
/// required and may be a string or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "serde_json::Value")]
pub struct DynamicRecord {
    id: String,
    fields: serde_json::Map<String, serde_json::Value>,
}

impl DynamicRecord {
    pub fn from_json(value: serde_json::Value) -> Result<Self, QueryError> {
        Self::try_from(value)
    }

    pub fn fields(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<Value<'_>> {
        match self.fields.get(name)? {
            serde_json::Value::String(s) => Some(Value::Text(s)),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number),
            serde_json::Value::Bool(b) => Some(Value::Bool(*b)),
            _ => None,
        }
    }
}

impl TryFrom<serde_json::Value> for DynamicRecord {
    type Error = QueryError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        let fields = match value {
            serde_json::Value::Object(fields) => fields,
            other => {
                return Err(QueryError::InvalidRecord(format!(
                    "expected a JSON object, got {other}"
                )))
            }
        };
        let id = match fields.get("id") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            Some(other) => {
                return Err(QueryError::InvalidRecord(format!(
                    "`id` must be a string or a number, got {other}"
                )))
            }
            None => return Err(QueryError::InvalidRecord("missing `id`".to_string())),
        };
        Ok(Self { id, fields })
    }
}

impl From<DynamicRecord> for serde_json::Value {
    fn from(record: DynamicRecord) -> Self {
        serde_json::Value::Object(record.fields)
    }
}

impl Record for DynamicRecord {
    type Field = FieldKey;

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, field: &FieldKey) -> Option<Value<'_>> {
        self.get(field.as_str())
    }

    fn field_by_name(name: &str) -> Option<FieldKey> {
        Some(FieldKey::new(name))
    }
}
