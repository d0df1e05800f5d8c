use std::collections::HashSet;

use crate::error::{QueryError, Result};
use crate::record::Record;

/// Resolves a string foreign key. No referential integrity: a dangling id is `None`.
pub fn find_by_id<'a, R: Record>(records: &'a [R], id: &str) -> Option<&'a R> {
    records.iter().find(|record| record.id() == id)
}

/// Checks that ids are unique within the collection
pub fn ensure_unique_ids<R: Record>(records: &[R]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id()) {
            return Err(QueryError::DuplicateId(record.id().to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DynamicRecord;
    use serde_json::json;

    #[test]
    fn test_lookup_and_uniqueness() {
        let doctors: Vec<DynamicRecord> = serde_json::from_value(json!([
            {"id": "d1", "name": "Dr. Ames"},
            {"id": "d2", "name": "Dr. Brook"}
        ]))
        .unwrap();
        assert_eq!(
            find_by_id(&doctors, "d2").and_then(|d| d.get("name")),
            Some(crate::record::Value::Text("Dr. Brook"))
        );
        assert!(find_by_id(&doctors, "d9").is_none());
        assert!(ensure_unique_ids(&doctors).is_ok());

        let mut dup = doctors.clone();
        dup.push(doctors[0].clone());
        assert_eq!(
            ensure_unique_ids(&dup),
            Err(QueryError::DuplicateId("d1".to_string()))
        );
    }
}
