use thiserror::Error;

/// Errors of the list engine.
///
/// Filtering never fails: missing fields and unparseable values simply do not
/// match. These are raised only where a caller asserts a field is numeric or
/// dated (aggregation, date sorting) or hands over malformed input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("record `{record_id}`: field `{field}` holds an unparseable date {value:?}")]
    InvalidDate {
        record_id: String,
        field: String,
        value: String,
    },

    #[error("record `{record_id}`: field `{field}` is not numeric")]
    NotNumeric { record_id: String, field: String },

    #[error("record `{record_id}`: field `{field}` is missing")]
    MissingField { record_id: String, field: String },

    #[error("stat `{0}` is declared more than once")]
    DuplicateStat(String),

    #[error("duplicate record id `{0}`")]
    DuplicateId(String),

    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("record `{record_id}`: {message}")]
    SchemaViolation { record_id: String, message: String },
}

pub type Result<T> = std::result::Result<T, QueryError>;
