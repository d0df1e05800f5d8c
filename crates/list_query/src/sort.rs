use chrono::NaiveDateTime;
use std::cmp::Ordering;

use crate::dates::parse_instant;
use crate::error::{QueryError, Result};
use crate::record::{Record, Value};

pub use contracts::shared::list_state::SortDirection;

/// Orders records by a date field, oldest first for [`SortDirection::Asc`].
///
/// The sort is stable in both directions: records with the same date keep
/// their original relative order. Values with an offset compare as UTC
/// instants. Every record must carry a parseable date;
/// otherwise nothing is sorted and [`QueryError::InvalidDate`] is returned.
pub fn sort_by_date<R: Record + Clone>(
    records: &[R],
    field: &R::Field,
    direction: SortDirection,
) -> Result<Vec<R>> {
    let mut keyed = Vec::with_capacity(records.len());
    for record in records {
        keyed.push((date_key(record, field)?, record));
    }
    keyed.sort_by(|(a, _), (b, _)| direction.apply(a.cmp(b)));
    Ok(keyed.into_iter().map(|(_, record)| record.clone()).collect())
}

fn date_key<R: Record>(record: &R, field: &R::Field) -> Result<NaiveDateTime> {
    let value = record.field(field).ok_or_else(|| QueryError::MissingField {
        record_id: record.id().to_string(),
        field: field.to_string(),
    })?;
    value
        .as_text()
        .and_then(parse_instant)
        .ok_or_else(|| QueryError::InvalidDate {
            record_id: record.id().to_string(),
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// Stable sort on any field.
///
/// Numbers compare numerically, text case-insensitively, `false` before
/// `true`. Records missing the field go last in either direction.
pub fn sort_by_field<R: Record + Clone>(
    records: &[R],
    field: &R::Field,
    direction: SortDirection,
) -> Vec<R> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| match (a.field(field), b.field(field)) {
        (Some(a), Some(b)) => direction.apply(compare_values(a, b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted
}

/// Date fields sort chronologically, everything else by value
pub fn sort_records<R: Record + Clone>(
    records: &[R],
    field: &R::Field,
    direction: SortDirection,
) -> Result<Vec<R>> {
    if R::is_date_field(field) {
        sort_by_date(records, field, direction)
    } else {
        Ok(sort_by_field(records, field, direction))
    }
}

/// Ascending comparison of two field values
pub fn compare_values(a: Value<'_>, b: Value<'_>) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.total_cmp(&y),
        (Value::Text(x), Value::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(&y),
        (x, y) => type_rank(x).cmp(&type_rank(y)),
    }
}

fn type_rank(value: Value<'_>) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::Number(_) => 1,
        Value::Text(_) => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{DynamicRecord, FieldKey};
    use serde_json::json;

    fn rows(value: serde_json::Value) -> Vec<DynamicRecord> {
        serde_json::from_value(value).unwrap()
    }

    fn ids(records: &[DynamicRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_descending_keeps_ties_in_original_order() {
        let records = rows(json!([
            {"id": "1", "date": "2024-01-15"},
            {"id": "2", "date": "2024-01-10"},
            {"id": "3", "date": "2024-01-15"}
        ]));
        let sorted = sort_by_date(&records, &FieldKey::new("date"), SortDirection::Desc).unwrap();
        assert_eq!(ids(&sorted), vec!["1", "3", "2"]);
    }

    #[test]
    fn test_date_sort_uses_time_of_day() {
        let records = rows(json!([
            {"id": "late", "at": "2024-01-15T17:00"},
            {"id": "early", "at": "2024-01-15T08:30"},
            {"id": "prev", "at": "2024-01-14"}
        ]));
        let sorted = sort_by_date(&records, &FieldKey::new("at"), SortDirection::Asc).unwrap();
        assert_eq!(ids(&sorted), vec!["prev", "early", "late"]);
    }

    #[test]
    fn test_date_sort_compares_offsets_as_instants() {
        let records = rows(json!([
            {"id": "a", "at": "2024-01-15T06:00:00Z"},
            {"id": "b", "at": "2024-01-15T10:00:00+05:00"}
        ]));
        let sorted = sort_by_date(&records, &FieldKey::new("at"), SortDirection::Asc).unwrap();
        assert_eq!(ids(&sorted), vec!["b", "a"]);
    }

    #[test]
    fn test_unparseable_date_is_an_error() {
        let records = rows(json!([
            {"id": "1", "date": "2024-01-15"},
            {"id": "2", "date": "next week"}
        ]));
        let err = sort_by_date(&records, &FieldKey::new("date"), SortDirection::Asc).unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidDate {
                record_id: "2".to_string(),
                field: "date".to_string(),
                value: "next week".to_string()
            }
        );

        let records = rows(json!([{"id": "1"}]));
        assert!(matches!(
            sort_by_date(&records, &FieldKey::new("date"), SortDirection::Asc),
            Err(QueryError::MissingField { .. })
        ));
    }

    #[test]
    fn test_sort_by_field_mixed_values() {
        let records = rows(json!([
            {"id": "a", "name": "delta", "qty": 10},
            {"id": "b", "name": "Alpha", "qty": 2},
            {"id": "c", "name": "charlie"},
            {"id": "d", "name": "bravo", "qty": 2}
        ]));
        let by_name = sort_by_field(&records, &FieldKey::new("name"), SortDirection::Asc);
        assert_eq!(ids(&by_name), vec!["b", "d", "c", "a"]);

        let by_qty = sort_by_field(&records, &FieldKey::new("qty"), SortDirection::Desc);
        assert_eq!(ids(&by_qty), vec!["a", "b", "d", "c"]);

        let by_qty = sort_by_field(&records, &FieldKey::new("qty"), SortDirection::Asc);
        assert_eq!(ids(&by_qty), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_compare_values_across_types() {
        assert_eq!(
            compare_values(Value::Number(1.0), Value::Text("a")),
            Ordering::Less
        );
        assert_eq!(
            compare_values(Value::Bool(true), Value::Bool(false)),
            Ordering::Greater
        );
    }
}
