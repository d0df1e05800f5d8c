//! Sector listing pages.
//!
//! Every page is the same pipeline over a different record type: page state
//! to criteria, filter, sort, stat cards, one display page. A sector module
//! only declares its fields and its [`PageDef`].

/// Declares the field enum of a page record with the names used in page
/// state and on the command line.
macro_rules! record_fields {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$variant_meta:meta])* $variant:ident => $field_name:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$variant_meta])* $variant, )+
        }

        impl $name {
            pub fn name(&self) -> &'static str {
                match self {
                    $( $name::$variant => $field_name, )+
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $field_name => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

pub mod billing;
pub mod fleet;
pub mod healthcare;
pub mod inventory;
pub mod law;
pub mod staffing;
pub mod tax;

use anyhow::Context;
use chrono::NaiveDate;
use contracts::enums::Sector;
use contracts::shared::indicators::{PageSummary, StatScope, StatValue, ValueFormat};
use contracts::shared::list_state::ListState;
use list_query::format::format_value;
use list_query::{
    aggregate, criteria_from_state, ensure_unique_ids, filter, paginate, sort_from_state,
    sort_records, AggregateSpec, QueryError, Record, StateBinding,
};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::ops::Deref;

use crate::shared::config::Config;

/// A contracts record as listed by a page
#[derive(Debug, Clone, PartialEq)]
pub struct Row<T>(pub T);

impl<T> Row<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Row<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

/// Wraps fixture records and checks their ids
pub fn rows<T>(records: Vec<T>) -> list_query::Result<Vec<Row<T>>>
where
    Row<T>: Record,
{
    let rows: Vec<Row<T>> = records.into_iter().map(Row).collect();
    ensure_unique_ids(&rows)?;
    Ok(rows)
}

/// Settings every page is built with
#[derive(Debug, Clone)]
pub struct PageContext {
    pub config: Config,
    /// "Today" for date buckets and day counters
    pub reference: NaiveDate,
}

impl PageContext {
    pub fn new(config: Config, reference: NaiveDate) -> Self {
        Self { config, reference }
    }

    pub fn money(&self) -> ValueFormat {
        ValueFormat::Money {
            currency: self.config.display.currency.clone(),
        }
    }

    pub fn compact_money(&self) -> ValueFormat {
        ValueFormat::CompactMoney {
            currency: self.config.display.currency.clone(),
        }
    }

    pub fn percent(&self) -> ValueFormat {
        ValueFormat::Percent {
            decimals: self.config.display.percent_decimals,
        }
    }
}

/// One stat card
#[derive(Debug, Clone)]
pub struct PageStat<F> {
    pub spec: AggregateSpec<F>,
    pub label: String,
    pub format: ValueFormat,
    pub scope: StatScope,
}

impl<F> PageStat<F> {
    /// A card over the whole collection
    pub fn new(spec: AggregateSpec<F>, label: impl Into<String>, format: ValueFormat) -> Self {
        Self {
            spec,
            label: label.into(),
            format,
            scope: StatScope::All,
        }
    }

    /// Follows the active filters instead
    pub fn filtered(mut self) -> Self {
        self.scope = StatScope::Filtered;
        self
    }
}

/// What a listing page searches, buckets and counts
pub struct PageDef<R: Record> {
    pub sector: Sector,
    pub text_fields: Vec<R::Field>,
    pub date_field: Option<R::Field>,
    pub stats: Vec<PageStat<R::Field>>,
}

/// Runs the page pipeline. Never fails: an engine error is logged and the
/// page renders as empty.
pub fn build_summary<R: Record + Clone>(
    def: &PageDef<R>,
    records: &[R],
    state: &ListState,
    ctx: &PageContext,
) -> PageSummary<R> {
    let page_size = state.page_size.unwrap_or(ctx.config.display.page_size);
    match try_build_summary(def, records, state, ctx, page_size) {
        Ok(summary) => summary,
        Err(err) => {
            tracing::warn!(
                sector = def.sector.code(),
                error = %err,
                "page degraded to empty summary"
            );
            PageSummary::empty(def.sector, records.len(), page_size)
        }
    }
}

fn try_build_summary<R: Record + Clone>(
    def: &PageDef<R>,
    records: &[R],
    state: &ListState,
    ctx: &PageContext,
    page_size: usize,
) -> list_query::Result<PageSummary<R>> {
    let binding = StateBinding {
        text_fields: def.text_fields.clone(),
        date_field: def.date_field.clone(),
        reference: ctx.reference,
        min_query_len: ctx.config.search.min_query_len,
    };
    let criteria = criteria_from_state::<R>(state, &binding)?;
    let filtered = filter(records, &criteria);
    let sorted = match sort_from_state::<R>(state)? {
        Some((field, direction)) => sort_records(&filtered, &field, direction)?,
        None => filtered,
    };

    let stats = compute_stats(def, records, &sorted)?;
    let filtered_count = sorted.len();
    let page = paginate(sorted, state.page, page_size);

    tracing::info!(
        sector = def.sector.code(),
        total = records.len(),
        filtered = filtered_count,
        page = page.page,
        "page built"
    );

    Ok(PageSummary {
        sector: def.sector,
        total_count: records.len(),
        filtered_count,
        page: page.page,
        page_size: page.page_size,
        total_pages: page.total_pages,
        stats,
        rows: page.items,
    })
}

/// Evaluates every card over its scope, in declaration order
fn compute_stats<R: Record>(
    def: &PageDef<R>,
    all: &[R],
    filtered: &[R],
) -> list_query::Result<Vec<StatValue>> {
    let mut seen = HashSet::new();
    for stat in &def.stats {
        if !seen.insert(stat.spec.name.as_str()) {
            return Err(QueryError::DuplicateStat(stat.spec.name.clone()));
        }
    }

    let specs_for = |scope: StatScope| -> Vec<AggregateSpec<R::Field>> {
        def.stats
            .iter()
            .filter(|stat| stat.scope == scope)
            .map(|stat| stat.spec.clone())
            .collect()
    };
    let over_all = aggregate(all, &specs_for(StatScope::All))?;
    let over_filtered = aggregate(filtered, &specs_for(StatScope::Filtered))?;

    Ok(def
        .stats
        .iter()
        .map(|stat| {
            let source = match stat.scope {
                StatScope::All => &over_all,
                StatScope::Filtered => &over_filtered,
            };
            let value = source.get(&stat.spec.name).unwrap_or_default();
            StatValue {
                id: stat.spec.name.clone(),
                label: stat.label.clone(),
                value,
                display: format_value(value, &stat.format),
                scope: stat.scope,
            }
        })
        .collect())
}

fn parse_records<T: DeserializeOwned>(sector: Sector, data: &str) -> anyhow::Result<Vec<T>> {
    serde_json::from_str(data)
        .with_context(|| format!("{} fixture is not a JSON array of records", sector.code()))
}

/// Evaluates the page of `sector` over fixture JSON
pub fn run(
    sector: Sector,
    data: &str,
    state: &ListState,
    ctx: &PageContext,
) -> anyhow::Result<serde_json::Value> {
    let summary = match sector {
        Sector::Billing => {
            serde_json::to_value(billing::summarize(parse_records(sector, data)?, state, ctx)?)?
        }
        Sector::Healthcare => {
            let data = serde_json::from_str(data)
                .context("healthcare fixture must be {\"doctors\": [...], \"appointments\": [...]}")?;
            serde_json::to_value(healthcare::summarize(data, state, ctx)?)?
        }
        Sector::Fleet => {
            serde_json::to_value(fleet::summarize(parse_records(sector, data)?, state, ctx)?)?
        }
        Sector::Inventory => {
            serde_json::to_value(inventory::summarize(parse_records(sector, data)?, state, ctx)?)?
        }
        Sector::Tax => {
            serde_json::to_value(tax::summarize(parse_records(sector, data)?, state, ctx)?)?
        }
        Sector::Law => {
            serde_json::to_value(law::summarize(parse_records(sector, data)?, state, ctx)?)?
        }
        Sector::Staffing => {
            serde_json::to_value(staffing::summarize(parse_records(sector, data)?, state, ctx)?)?
        }
    };
    Ok(summary)
}
