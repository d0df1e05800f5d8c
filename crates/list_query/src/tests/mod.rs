
use std::fmt;

use crate::record::{Record, Value};

/// Typed record used across the engine tests
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Row {
    pub id: String,
    pub name: String,
    pub owner: Option<String>,
    pub status: &'static str,
    pub amount: Option<f64>,
    pub date: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RowField {
    Name,
    Owner,
    Status,
    Amount,
    Date,
}

impl fmt::Display for RowField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RowField::Name => "name",
            RowField::Owner => "owner",
            RowField::Status => "status",
            RowField::Amount => "amount",
            RowField::Date => "date",
        };
        f.write_str(name)
    }
}

impl Record for Row {
    type Field = RowField;

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, field: &RowField) -> Option<Value<'_>> {
        match field {
            RowField::Name => Some(Value::Text(&self.name)),
            RowField::Owner => self.owner.as_deref().map(Value::Text),
            RowField::Status => Some(Value::Text(self.status)),
            RowField::Amount => self.amount.map(Value::Number),
            RowField::Date => Some(Value::Text(&self.date)),
        }
    }

    fn field_by_name(name: &str) -> Option<RowField> {
        match name {
            "name" => Some(RowField::Name),
            "owner" => Some(RowField::Owner),
            "status" => Some(RowField::Status),
            "amount" => Some(RowField::Amount),
            "date" => Some(RowField::Date),
            _ => None,
        }
    }

    fn is_date_field(field: &RowField) -> bool {
        matches!(field, RowField::Date)
    }
}

#[test]
fn sort_records_dispatches_on_date_fields() {
    use crate::sort::{sort_records, SortDirection};

    let row = |id: &str, name: &str, date: &str| Row {
        id: id.to_string(),
        name: name.to_string(),
        owner: None,
        status: "open",
        amount: None,
        date: date.to_string(),
    };
    let rows = vec![
        row("a", "beta", "2024-10-01"),
        row("b", "Alpha", "2024-09-30T12:00"),
    ];
    let by_date = sort_records(&rows, &RowField::Date, SortDirection::Asc).unwrap();
    assert_eq!(by_date[0].id, "b");
    let by_name = sort_records(&rows, &RowField::Name, SortDirection::Desc).unwrap();
    assert_eq!(by_name[0].id, "a");

    // only the date path parses dates
    let rows = vec![row("a", "beta", "soon"), row("b", "Alpha", "later")];
    assert!(sort_records(&rows, &RowField::Date, SortDirection::Asc).is_err());
    assert!(sort_records(&rows, &RowField::Name, SortDirection::Asc).is_ok());
}
