use chrono::NaiveDate;
use contracts::shared::list_state::{DateBucket, FILTER_ALL};
use serde::{Deserialize, Serialize};

use crate::dates::{bucket_day, parse_day};
use crate::record::{Record, Scalar, Value};

/// Exact-match selection for one categorical filter.
///
/// On the wire `NoConstraint` is the `"all"` sentinel the filter dropdowns
/// send; in code it is a variant of its own, so a real value can never be
/// mistaken for it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Scalar", into = "Scalar")]
pub enum Constraint {
    #[default]
    NoConstraint,
    EqualTo(Scalar),
}

impl Constraint {
    /// Maps a dropdown selection, honouring the `"all"` sentinel
    pub fn from_selection(selection: &str) -> Self {
        if selection == FILTER_ALL {
            Constraint::NoConstraint
        } else {
            Constraint::EqualTo(Scalar::from(selection))
        }
    }

    pub fn equal_to(value: impl Into<Scalar>) -> Self {
        Constraint::EqualTo(value.into())
    }

    pub fn is_constrained(&self) -> bool {
        matches!(self, Constraint::EqualTo(_))
    }

    /// Exact and type-strict: text never equals a number
    pub fn matches(&self, value: Option<Value<'_>>) -> bool {
        match self {
            Constraint::NoConstraint => true,
            Constraint::EqualTo(expected) => value == Some(expected.as_value()),
        }
    }
}

impl From<Scalar> for Constraint {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Text(text) if text == FILTER_ALL => Constraint::NoConstraint,
            other => Constraint::EqualTo(other),
        }
    }
}

impl From<Constraint> for Scalar {
    fn from(constraint: Constraint) -> Self {
        match constraint {
            Constraint::NoConstraint => Scalar::Text(FILTER_ALL.to_string()),
            Constraint::EqualTo(value) => value,
        }
    }
}

impl From<&str> for Constraint {
    fn from(selection: &str) -> Self {
        Constraint::from_selection(selection)
    }
}

impl From<String> for Constraint {
    fn from(selection: String) -> Self {
        Constraint::from(Scalar::Text(selection))
    }
}

impl From<f64> for Constraint {
    fn from(value: f64) -> Self {
        Constraint::EqualTo(Scalar::Number(value))
    }
}

impl From<bool> for Constraint {
    fn from(value: bool) -> Self {
        Constraint::EqualTo(Scalar::Bool(value))
    }
}

/// One filter dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition<F> {
    /// Case-insensitive substring of `pattern` in any of `fields`.
    ///
    /// The pattern is trimmed first: `"acme "` searches for `"acme"`, and a
    /// blank or whitespace-only pattern matches every record.
    Contains { fields: Vec<F>, pattern: String },

    /// Field equals a categorical value
    Equals { field: F, constraint: Constraint },

    /// Date part of the field is the bucket's day relative to `reference`
    DateBucket {
        field: F,
        bucket: DateBucket,
        reference: NaiveDate,
    },

    /// Inclusive numeric range
    Range {
        field: F,
        from: Option<f64>,
        to: Option<f64>,
    },

    /// Inclusive calendar range on the date part of the field
    DatePeriod {
        field: F,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

impl<F> Condition<F> {
    pub fn matches<R: Record<Field = F>>(&self, record: &R) -> bool {
        match self {
            Condition::Contains { fields, pattern } => {
                let needle = pattern.trim().to_lowercase();
                if needle.is_empty() {
                    return true;
                }
                fields.iter().any(|field| {
                    record
                        .field(field)
                        .is_some_and(|value| text_contains(value, &needle))
                })
            }
            Condition::Equals { field, constraint } => constraint.matches(record.field(field)),
            Condition::DateBucket {
                field,
                bucket,
                reference,
            } => match bucket_day(*bucket, *reference) {
                None => true,
                Some(day) => record_day(record, field) == Some(day),
            },
            Condition::Range { field, from, to } => {
                if from.is_none() && to.is_none() {
                    return true;
                }
                match record.field(field) {
                    Some(Value::Number(n)) => {
                        from.map_or(true, |lo| n >= lo) && to.map_or(true, |hi| n <= hi)
                    }
                    _ => false,
                }
            }
            Condition::DatePeriod { field, from, to } => {
                if from.is_none() && to.is_none() {
                    return true;
                }
                match record_day(record, field) {
                    Some(day) => {
                        from.map_or(true, |lo| day >= lo) && to.map_or(true, |hi| day <= hi)
                    }
                    None => false,
                }
            }
        }
    }
}

fn text_contains(value: Value<'_>, needle: &str) -> bool {
    match value {
        Value::Text(text) => text.to_lowercase().contains(needle),
        Value::Number(n) => n.to_string().contains(needle),
        Value::Bool(_) => false,
    }
}

fn record_day<R: Record>(record: &R, field: &R::Field) -> Option<NaiveDate> {
    record.field(field)?.as_text().and_then(parse_day)
}

/// Active filter constraints of one query, combined with logical AND.
///
/// Conditions are evaluated left to right and the first failing one rejects
/// the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criteria<F> {
    #[serde(default = "Vec::new")]
    pub conditions: Vec<Condition<F>>,
}

impl<F> Default for Criteria<F> {
    fn default() -> Self {
        Self {
            conditions: Vec::new(),
        }
    }
}

impl<F> Criteria<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, condition: Condition<F>) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn contains(self, pattern: impl Into<String>, fields: impl IntoIterator<Item = F>) -> Self {
        self.with(Condition::Contains {
            fields: fields.into_iter().collect(),
            pattern: pattern.into(),
        })
    }

    pub fn equals(self, field: F, constraint: impl Into<Constraint>) -> Self {
        self.with(Condition::Equals {
            field,
            constraint: constraint.into(),
        })
    }

    pub fn on_day(self, field: F, bucket: DateBucket, reference: NaiveDate) -> Self {
        self.with(Condition::DateBucket {
            field,
            bucket,
            reference,
        })
    }

    pub fn range(self, field: F, from: Option<f64>, to: Option<f64>) -> Self {
        self.with(Condition::Range { field, from, to })
    }

    pub fn period(self, field: F, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.with(Condition::DatePeriod { field, from, to })
    }

    /// Conjunction of both criteria
    pub fn and(mut self, other: Criteria<F>) -> Self {
        self.conditions.extend(other.conditions);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches<R: Record<Field = F>>(&self, record: &R) -> bool {
        self.conditions.iter().all(|condition| condition.matches(record))
    }
}
