use crate::condition::Criteria;
use crate::record::Record;

/// Records satisfying every condition of `criteria`, in their original order.
///
/// Never fails: a record missing a constrained field is simply left out.
pub fn filter<R: Record + Clone>(records: &[R], criteria: &Criteria<R::Field>) -> Vec<R> {
    let matched: Vec<R> = records
        .iter()
        .filter(|record| criteria.matches(*record))
        .cloned()
        .collect();
    tracing::debug!(
        total = records.len(),
        matched = matched.len(),
        conditions = criteria.conditions.len(),
        "filtered list"
    );
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{DynamicRecord, FieldKey, Record};
    use serde_json::json;

    fn records() -> Vec<DynamicRecord> {
        serde_json::from_value(json!([
            {"id": "a", "status": "open", "owner": "Kim"},
            {"id": "b", "status": "closed", "owner": "Lee"},
            {"id": "c", "status": "open"},
            {"id": "d", "status": "open", "owner": "Lee"}
        ]))
        .unwrap()
    }

    fn ids(records: &[DynamicRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_preserves_order() {
        let criteria = Criteria::new().equals(FieldKey::new("status"), "open");
        assert_eq!(ids(&filter(&records(), &criteria)), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_empty_criteria_keeps_everything() {
        let all = filter(&records(), &Criteria::new());
        assert_eq!(all, records());
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let criteria = Criteria::new().equals(FieldKey::new("status"), "archived");
        assert!(filter(&records(), &criteria).is_empty());
        assert!(filter::<DynamicRecord>(&[], &criteria).is_empty());
    }

    #[test]
    fn test_missing_text_field_skips_record() {
        let criteria = Criteria::new().contains("lee", [FieldKey::new("owner")]);
        assert_eq!(ids(&filter(&records(), &criteria)), vec!["b", "d"]);
    }
}
