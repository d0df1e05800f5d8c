use serde::{Deserialize, Serialize};

use crate::dates::parse_date;
use crate::error::{QueryError, Result};
use crate::lookup::ensure_unique_ids;
use crate::record::{DynamicRecord, Record, Value};

/// Declared type of a field of an untyped collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Text,
    Number,
    Boolean,
    /// ISO-like date string
    Date,
}

impl ValueType {
    pub fn canonical_name(&self) -> &'static str {
        match self {
            ValueType::Text => "text",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
            ValueType::Date => "date",
        }
    }

    fn accepts(&self, value: Value<'_>) -> bool {
        match (self, value) {
            (ValueType::Text, Value::Text(_)) => true,
            (ValueType::Number, Value::Number(_)) => true,
            (ValueType::Boolean, Value::Bool(_)) => true,
            (ValueType::Date, Value::Text(raw)) => parse_date(raw).is_some(),
            _ => false,
        }
    }
}

/// Definition of a single field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub value_type: ValueType,
    #[serde(default)]
    pub required: bool,
    /// Declared enumeration of a categorical field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<String>>,
}

/// Shape shared by every record of an untyped collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub fields: Vec<FieldDef>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(self, name: &str, value_type: ValueType) -> Self {
        self.push(name, value_type, false, None)
    }

    pub fn required(self, name: &str, value_type: ValueType) -> Self {
        self.push(name, value_type, true, None)
    }

    /// Required text field restricted to `allowed`
    pub fn categorical(self, name: &str, allowed: &[&str]) -> Self {
        let allowed = allowed.iter().map(|value| value.to_string()).collect();
        self.push(name, ValueType::Text, true, Some(allowed))
    }

    fn push(
        mut self,
        name: &str,
        value_type: ValueType,
        required: bool,
        allowed: Option<Vec<String>>,
    ) -> Self {
        self.fields.push(FieldDef {
            name: name.to_string(),
            value_type,
            required,
            allowed,
        });
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|def| def.name == name)
    }

    /// Validates the whole collection: unique ids and every record
    pub fn validate(&self, records: &[DynamicRecord]) -> Result<()> {
        ensure_unique_ids(records)?;
        records
            .iter()
            .try_for_each(|record| self.validate_record(record))
    }

    pub fn validate_record(&self, record: &DynamicRecord) -> Result<()> {
        for def in &self.fields {
            let violation = |message: String| QueryError::SchemaViolation {
                record_id: record.id().to_string(),
                message,
            };
            let Some(value) = record.get(&def.name) else {
                if def.required {
                    return Err(violation(format!("required field `{}` is missing", def.name)));
                }
                continue;
            };
            if !def.value_type.accepts(value) {
                return Err(violation(format!(
                    "field `{}` = {} is not a valid {}",
                    def.name,
                    value,
                    def.value_type.canonical_name()
                )));
            }
            if let (Some(allowed), Value::Text(text)) = (&def.allowed, value) {
                if !allowed.iter().any(|candidate| candidate == text) {
                    return Err(violation(format!(
                        "field `{}` = {text:?} is not one of [{}]",
                        def.name,
                        allowed.join(", ")
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Schema {
        Schema::new()
            .categorical("status", &["paid", "pending", "overdue"])
            .required("amount", ValueType::Number)
            .field("due", ValueType::Date)
            .field("note", ValueType::Text)
    }

    fn records(value: serde_json::Value) -> Vec<DynamicRecord> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_collection() {
        let rows = records(json!([
            {"id": 1, "status": "paid", "amount": 100, "due": "2024-01-15"},
            {"id": 2, "status": "pending", "amount": 50}
        ]));
        assert!(schema().validate(&rows).is_ok());
    }

    #[test]
    fn test_violations() {
        let bad_enum = records(json!([{"id": 1, "status": "void", "amount": 1}]));
        let err = schema().validate(&bad_enum).unwrap_err();
        assert!(matches!(err, QueryError::SchemaViolation { ref record_id, .. } if record_id == "1"));

        let missing = records(json!([{"id": 1, "status": "paid"}]));
        assert!(schema().validate(&missing).is_err());

        let bad_date = records(json!([{"id": 1, "status": "paid", "amount": 1, "due": "tomorrow"}]));
        assert!(schema().validate(&bad_date).is_err());

        let wrong_type = records(json!([{"id": 1, "status": "paid", "amount": "100"}]));
        assert!(schema().validate(&wrong_type).is_err());

        let dup = records(json!([
            {"id": 1, "status": "paid", "amount": 1},
            {"id": 1, "status": "paid", "amount": 2}
        ]));
        assert_eq!(
            schema().validate(&dup),
            Err(QueryError::DuplicateId("1".to_string()))
        );
    }

    #[test]
    fn test_schema_json() {
        let schema: Schema = serde_json::from_value(json!({
            "fields": [{"name": "status", "value_type": "text", "allowed": ["a", "b"]}]
        }))
        .unwrap();
        assert_eq!(schema.get("status").unwrap().allowed.as_ref().unwrap().len(), 2);
        assert!(!schema.get("status").unwrap().required);
    }
}
