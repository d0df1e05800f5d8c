use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::condition::Criteria;
use crate::error::{QueryError, Result};
use crate::record::{Record, Value};

/// Total a ratio is taken against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Denominator<F> {
    /// Length of the collection handed to `aggregate`
    Records,
    /// Size of a sub-collection, e.g. one tax type
    Matching { filter: Criteria<F> },
    Fixed { value: f64 },
}

/// What a stat computes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AggregateKind<F> {
    Count {
        #[serde(default = "Criteria::new")]
        filter: Criteria<F>,
    },
    Sum {
        field: F,
        #[serde(default = "Criteria::new")]
        filter: Criteria<F>,
    },
    /// Mean over matching records, 0 when none match
    Average {
        field: F,
        #[serde(default = "Criteria::new")]
        filter: Criteria<F>,
    },
    /// `count(filter) / denominator * 100`, 0 when the denominator is 0
    Ratio {
        filter: Criteria<F>,
        denominator: Denominator<F>,
    },
}

/// A named stat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSpec<F> {
    pub name: String,
    pub kind: AggregateKind<F>,
}

impl<F> AggregateSpec<F> {
    pub fn new(name: impl Into<String>, kind: AggregateKind<F>) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn count(name: impl Into<String>, filter: Criteria<F>) -> Self {
        Self::new(name, AggregateKind::Count { filter })
    }

    pub fn sum(name: impl Into<String>, field: F) -> Self {
        Self::sum_where(name, field, Criteria::new())
    }

    pub fn sum_where(name: impl Into<String>, field: F, filter: Criteria<F>) -> Self {
        Self::new(name, AggregateKind::Sum { field, filter })
    }

    pub fn average(name: impl Into<String>, field: F) -> Self {
        Self::average_where(name, field, Criteria::new())
    }

    pub fn average_where(name: impl Into<String>, field: F, filter: Criteria<F>) -> Self {
        Self::new(name, AggregateKind::Average { field, filter })
    }

    pub fn ratio(name: impl Into<String>, filter: Criteria<F>, denominator: Denominator<F>) -> Self {
        Self::new(name, AggregateKind::Ratio { filter, denominator })
    }
}

/// Computed stats by name. Values are raw: rounding belongs to display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stats(BTreeMap<String, f64>);

impl Stats {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, f64> {
        self.0
    }
}

/// `part / total * 100`, defined as 0 for an empty total
pub fn percentage(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        part / total * 100.0
    }
}

/// Evaluates every spec over `records`.
///
/// Fails when a summed or averaged field is missing or not numeric on a
/// record that its filter selects, and on duplicate stat names.
pub fn aggregate<R: Record>(records: &[R], specs: &[AggregateSpec<R::Field>]) -> Result<Stats> {
    let mut stats = BTreeMap::new();
    for spec in specs {
        let value = evaluate(records, &spec.kind)?;
        if stats.insert(spec.name.clone(), value).is_some() {
            return Err(QueryError::DuplicateStat(spec.name.clone()));
        }
    }
    tracing::debug!(records = records.len(), stats = stats.len(), "aggregated list");
    Ok(Stats(stats))
}

/// Evaluates a single stat
pub fn evaluate<R: Record>(records: &[R], kind: &AggregateKind<R::Field>) -> Result<f64> {
    match kind {
        AggregateKind::Count { filter } => Ok(count_matching(records, filter) as f64),
        AggregateKind::Sum { field, filter } => {
            let (sum, _) = sum_matching(records, field, filter)?;
            Ok(sum)
        }
        AggregateKind::Average { field, filter } => {
            let (sum, count) = sum_matching(records, field, filter)?;
            Ok(if count == 0 { 0.0 } else { sum / count as f64 })
        }
        AggregateKind::Ratio {
            filter,
            denominator,
        } => {
            let part = count_matching(records, filter) as f64;
            let total = match denominator {
                Denominator::Records => records.len() as f64,
                Denominator::Matching { filter } => count_matching(records, filter) as f64,
                Denominator::Fixed { value } => *value,
            };
            Ok(percentage(part, total))
        }
    }
}

fn count_matching<R: Record>(records: &[R], filter: &Criteria<R::Field>) -> usize {
    records.iter().filter(|record| filter.matches(*record)).count()
}

fn sum_matching<R: Record>(
    records: &[R],
    field: &R::Field,
    filter: &Criteria<R::Field>,
) -> Result<(f64, usize)> {
    let mut sum = 0.0;
    let mut count = 0;
    for record in records.iter().filter(|record| filter.matches(*record)) {
        sum += numeric(record, field)?;
        count += 1;
    }
    Ok((sum, count))
}

fn numeric<R: Record>(record: &R, field: &R::Field) -> Result<f64> {
    match record.field(field) {
        Some(Value::Number(n)) => Ok(n),
        Some(_) => Err(QueryError::NotNumeric {
            record_id: record.id().to_string(),
            field: field.to_string(),
        }),
        None => Err(QueryError::MissingField {
            record_id: record.id().to_string(),
            field: field.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{DynamicRecord, FieldKey};
    use serde_json::json;

    fn key(name: &str) -> FieldKey {
        FieldKey::new(name)
    }

    fn taxes() -> Vec<DynamicRecord> {
        serde_json::from_value(json!([
            {"id": "t1", "type": "income", "status": "paid", "amount": 1200},
            {"id": "t2", "type": "income", "status": "pending", "amount": 800},
            {"id": "t3", "type": "sales", "status": "paid", "amount": 300},
            {"id": "t4", "type": "income", "status": "paid", "amount": 500}
        ]))
        .unwrap()
    }

    #[test]
    fn test_sub_collection_denominator() {
        let income = Criteria::new().equals(key("type"), "income");
        let specs = vec![
            AggregateSpec::ratio(
                "income_paid",
                income.clone().equals(key("status"), "paid"),
                Denominator::Matching { filter: income },
            ),
            AggregateSpec::ratio(
                "payroll_paid",
                Criteria::new()
                    .equals(key("type"), "payroll")
                    .equals(key("status"), "paid"),
                Denominator::Matching {
                    filter: Criteria::new().equals(key("type"), "payroll"),
                },
            ),
        ];
        let stats = aggregate(&taxes(), &specs).unwrap();
        assert!((stats.get("income_paid").unwrap() - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.get("payroll_paid"), Some(0.0));
    }

    #[test]
    fn test_average_and_fixed_denominator() {
        let specs = vec![
            AggregateSpec::average("avg", key("amount")),
            AggregateSpec::average_where(
                "avg_none",
                key("amount"),
                Criteria::new().equals(key("status"), "overdue"),
            ),
            AggregateSpec::ratio(
                "of_target",
                Criteria::new().equals(key("status"), "paid"),
                Denominator::Fixed { value: 6.0 },
            ),
        ];
        let stats = aggregate(&taxes(), &specs).unwrap();
        assert_eq!(stats.get("avg"), Some(700.0));
        assert_eq!(stats.get("avg_none"), Some(0.0));
        assert_eq!(stats.get("of_target"), Some(50.0));
    }

    #[test]
    fn test_sum_over_text_field_fails_loud() {
        let err = aggregate(&taxes(), &[AggregateSpec::sum("bad", key("status"))]).unwrap_err();
        assert_eq!(
            err,
            QueryError::NotNumeric {
                record_id: "t1".to_string(),
                field: "status".to_string()
            }
        );
    }

    #[test]
    fn test_sum_only_checks_selected_records() {
        let mut records = taxes();
        records.push(DynamicRecord::from_json(json!({"id": "t5", "type": "draft"})).unwrap());
        let spec = AggregateSpec::sum_where(
            "income",
            key("amount"),
            Criteria::new().equals(key("type"), "income"),
        );
        assert_eq!(aggregate(&records, &[spec]).unwrap().get("income"), Some(2500.0));

        let err = aggregate(&records, &[AggregateSpec::sum("all", key("amount"))]).unwrap_err();
        assert!(matches!(err, QueryError::MissingField { .. }));
    }

    #[test]
    fn test_duplicate_stat_name() {
        let specs = vec![
            AggregateSpec::count("n", Criteria::new()),
            AggregateSpec::count("n", Criteria::new()),
        ];
        assert_eq!(
            aggregate(&taxes(), &specs),
            Err(QueryError::DuplicateStat("n".to_string()))
        );
    }

    #[test]
    fn test_spec_json_contract() {
        let spec: AggregateSpec<FieldKey> = serde_json::from_value(json!({
            "name": "paid_rate",
            "kind": {
                "kind": "ratio",
                "filter": {"conditions": [{"kind": "equals", "field": "status", "constraint": "paid"}]},
                "denominator": {"kind": "records"}
            }
        }))
        .unwrap();
        let stats = aggregate(&taxes(), &[spec]).unwrap();
        assert_eq!(stats.get("paid_rate"), Some(75.0));
        assert_eq!(
            serde_json::to_value(&stats).unwrap(),
            json!({"paid_rate": 75.0})
        );
    }

    #[test]
    fn test_filter_may_be_omitted_in_json() {
        let specs: Vec<AggregateSpec<FieldKey>> = serde_json::from_value(json!([
            {"name": "all", "kind": {"kind": "count"}},
            {"name": "total", "kind": {"kind": "sum", "field": "amount"}}
        ]))
        .unwrap();
        assert_eq!(specs[0], AggregateSpec::count("all", Criteria::new()));
        let stats = aggregate(&taxes(), &specs).unwrap();
        assert_eq!(stats.get("all"), Some(4.0));
        assert_eq!(stats.get("total"), Some(2800.0));
    }
}
