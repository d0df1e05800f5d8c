use serde::{Deserialize, Serialize};

use crate::enums::Sector;

// ---------------------------------------------------------------------------
// Display metadata
// ---------------------------------------------------------------------------

/// How to format a stat value for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ValueFormat {
    Money { currency: String },
    /// Thousands with a "K" suffix, no decimals
    CompactMoney { currency: String },
    Number { decimals: u8 },
    Percent { decimals: u8 },
    Integer,
}

/// Which records a stat is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatScope {
    /// The whole collection, regardless of the active filters
    All,
    /// Only the records that pass the active filters
    Filtered,
}

// ---------------------------------------------------------------------------
// Computed values
// ---------------------------------------------------------------------------

/// A single computed stat card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatValue {
    pub id: String,
    pub label: String,
    /// Raw value, never rounded
    pub value: f64,
    /// `value` rendered with the stat's [`ValueFormat`]
    pub display: String,
    pub scope: StatScope,
}

/// Everything a listing page renders: stat cards and one page of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSummary<T> {
    pub sector: Sector,
    pub total_count: usize,
    pub filtered_count: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub stats: Vec<StatValue>,
    pub rows: Vec<T>,
}

impl<T> PageSummary<T> {
    /// "No data" summary a page falls back to instead of failing
    pub fn empty(sector: Sector, total_count: usize, page_size: usize) -> Self {
        Self {
            sector,
            total_count,
            filtered_count: 0,
            page: 0,
            page_size,
            total_pages: 1,
            stats: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn stat(&self, id: &str) -> Option<&StatValue> {
        self.stats.iter().find(|stat| stat.id == id)
    }

    pub fn map_rows<U>(self, f: impl FnMut(T) -> U) -> PageSummary<U> {
        PageSummary {
            sector: self.sector,
            total_count: self.total_count,
            filtered_count: self.filtered_count,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            stats: self.stats,
            rows: self.rows.into_iter().map(f).collect(),
        }
    }
}
