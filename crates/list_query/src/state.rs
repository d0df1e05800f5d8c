//! Bridge from the serializable page state to typed criteria.
//!
//! `ListState` names fields by string; this is the only place those names are
//! resolved, so everything past it works on the record's field enum.

use chrono::NaiveDate;
use contracts::shared::list_state::{DateBucket, ListState};

use crate::condition::{Constraint, Criteria};
use crate::error::{QueryError, Result};
use crate::record::Record;
use crate::sort::SortDirection;

/// How a page maps its state onto record fields
#[derive(Debug, Clone)]
pub struct StateBinding<F> {
    /// Fields the search box looks into
    pub text_fields: Vec<F>,
    /// Field the today/tomorrow bucket applies to
    pub date_field: Option<F>,
    /// "Today" for the date bucket
    pub reference: NaiveDate,
    /// Shorter (trimmed) queries do not narrow the list; usually 0
    pub min_query_len: usize,
}

pub fn criteria_from_state<R: Record>(
    state: &ListState,
    binding: &StateBinding<R::Field>,
) -> Result<Criteria<R::Field>> {
    let mut criteria = Criteria::new();

    let query = state.search.trim();
    if !query.is_empty() && query.chars().count() >= binding.min_query_len {
        criteria = criteria.contains(query, binding.text_fields.iter().cloned());
    }

    for (name, selection) in &state.filters {
        let field = resolve::<R>(name)?;
        criteria = criteria.equals(field, Constraint::from_selection(selection));
    }

    if state.date_bucket != DateBucket::All {
        match &binding.date_field {
            Some(field) => {
                criteria = criteria.on_day(field.clone(), state.date_bucket, binding.reference);
            }
            None => tracing::warn!(
                bucket = state.date_bucket.code(),
                "date bucket ignored: page has no date field"
            ),
        }
    }

    Ok(criteria)
}

/// Sort column and direction, `None` when the page is unsorted
pub fn sort_from_state<R: Record>(state: &ListState) -> Result<Option<(R::Field, SortDirection)>> {
    let Some(name) = state.sort_field.as_deref() else {
        return Ok(None);
    };
    let field = resolve::<R>(name)?;
    Ok(Some((field, state.sort_direction())))
}

fn resolve<R: Record>(name: &str) -> Result<R::Field> {
    R::field_by_name(name).ok_or_else(|| QueryError::UnknownField(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::tests::{Row, RowField};

    fn binding() -> StateBinding<RowField> {
        StateBinding {
            text_fields: vec![RowField::Name, RowField::Owner],
            date_field: Some(RowField::Date),
            reference: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            min_query_len: 0,
        }
    }

    #[test]
    fn test_empty_state_has_no_conditions() {
        let criteria = criteria_from_state::<Row>(&ListState::default(), &binding()).unwrap();
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_short_query_narrows_by_default() {
        let state = ListState::default().with_search(" ab ");
        let criteria = criteria_from_state::<Row>(&state, &binding()).unwrap();
        assert_eq!(
            criteria.conditions,
            vec![Condition::Contains {
                fields: vec![RowField::Name, RowField::Owner],
                pattern: "ab".to_string()
            }]
        );
    }

    #[test]
    fn test_min_query_len_threshold() {
        let mut binding = binding();
        binding.min_query_len = 3;
        let state = ListState::default().with_search(" ab ");
        let criteria = criteria_from_state::<Row>(&state, &binding).unwrap();
        assert!(criteria.is_empty());

        let state = ListState::default().with_search(" abc ");
        let criteria = criteria_from_state::<Row>(&state, &binding).unwrap();
        assert_eq!(
            criteria.conditions,
            vec![Condition::Contains {
                fields: vec![RowField::Name, RowField::Owner],
                pattern: "abc".to_string()
            }]
        );
    }

    #[test]
    fn test_filters_and_bucket() {
        let state = ListState::default()
            .with_filter("status", "all")
            .with_filter("owner", "Kim")
            .with_date_bucket(DateBucket::Tomorrow);
        let criteria = criteria_from_state::<Row>(&state, &binding()).unwrap();
        // filters come out in name order
        assert_eq!(
            criteria.conditions,
            vec![
                Condition::Equals {
                    field: RowField::Owner,
                    constraint: Constraint::equal_to("Kim")
                },
                Condition::Equals {
                    field: RowField::Status,
                    constraint: Constraint::NoConstraint
                },
                Condition::DateBucket {
                    field: RowField::Date,
                    bucket: DateBucket::Tomorrow,
                    reference: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
                },
            ]
        );
    }

    #[test]
    fn test_bucket_without_date_field_is_ignored() {
        let mut binding = binding();
        binding.date_field = None;
        let state = ListState::default().with_date_bucket(DateBucket::Today);
        assert!(criteria_from_state::<Row>(&state, &binding)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_unknown_names() {
        let state = ListState::default().with_filter("colour", "red");
        assert_eq!(
            criteria_from_state::<Row>(&state, &binding()).unwrap_err(),
            QueryError::UnknownField("colour".to_string())
        );

        let state = ListState::default().with_sort("colour", SortDirection::Asc);
        assert!(sort_from_state::<Row>(&state).is_err());
    }

    #[test]
    fn test_sort_from_state() {
        assert_eq!(sort_from_state::<Row>(&ListState::default()).unwrap(), None);
        let state = ListState::default().with_sort("amount", SortDirection::Desc);
        assert_eq!(
            sort_from_state::<Row>(&state).unwrap(),
            Some((RowField::Amount, SortDirection::Desc))
        );
    }
}
