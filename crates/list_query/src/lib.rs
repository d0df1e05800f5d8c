//! Client-side list querying for the dashboard pages.
//!
//! Every listing page narrows a static collection with [`filter`], computes
//! stat cards with [`aggregate`], orders rows with [`sort_by_date`] or
//! [`sort_by_field`] and slices one display page with [`paginate`]. All of it
//! is pure and synchronous: inputs are borrowed, outputs are new values, and
//! the query state itself stays with the caller.

pub mod aggregate;
pub mod condition;
pub mod dates;
pub mod error;
pub mod filter;
pub mod format;
pub mod lookup;
pub mod paging;
pub mod record;
pub mod schema;
pub mod sort;
pub mod state;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate, percentage, AggregateKind, AggregateSpec, Denominator, Stats};
pub use condition::{Condition, Constraint, Criteria};
pub use error::{QueryError, Result};
pub use filter::filter;
pub use lookup::{ensure_unique_ids, find_by_id};
pub use paging::{paginate, Page};
pub use record::{DynamicRecord, FieldKey, Record, Scalar, Value};
pub use schema::{FieldDef, Schema, ValueType};
pub use sort::{sort_by_date, sort_by_field, sort_records, SortDirection};
pub use state::{criteria_from_state, sort_from_state, StateBinding};
