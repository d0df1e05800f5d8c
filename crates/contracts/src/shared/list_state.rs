use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Filter selection meaning "no constraint on this field".
///
/// Every filter dropdown of the dashboard is wired to this value.
pub const FILTER_ALL: &str = "all";

/// Restricts a listing to records dated on a day relative to a reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateBucket {
    #[default]
    All,
    Today,
    Tomorrow,
}

impl DateBucket {
    pub fn code(&self) -> &'static str {
        match self {
            DateBucket::All => "all",
            DateBucket::Today => "today",
            DateBucket::Tomorrow => "tomorrow",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DateBucket::All => "All dates",
            DateBucket::Today => "Today",
            DateBucket::Tomorrow => "Tomorrow",
        }
    }

    pub fn all() -> &'static [DateBucket] {
        &[DateBucket::All, DateBucket::Today, DateBucket::Tomorrow]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "all" => Some(DateBucket::All),
            "today" => Some(DateBucket::Today),
            "tomorrow" => Some(DateBucket::Tomorrow),
            _ => None,
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[serde(alias = "ascending")]
    Asc,
    #[serde(alias = "descending")]
    Desc,
}

impl SortDirection {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    pub fn is_ascending(&self) -> bool {
        matches!(self, SortDirection::Asc)
    }

    /// Orients an ascending comparison result
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Query state of one listing page.
///
/// Lives in the page, is passed whole to the list engine on every change
/// (keystroke, dropdown selection, header click) and is never shared between
/// pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListState {
    // Поиск
    #[serde(default)]
    pub search: String,

    // Фильтры: field name -> selected value, FILTER_ALL = no constraint
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
    #[serde(default)]
    pub date_bucket: DateBucket,

    // Сортировка
    #[serde(default)]
    pub sort_field: Option<String>,
    #[serde(default = "default_true")]
    pub sort_ascending: bool,

    // Пагинация (zero-based page; None = configured page size)
    #[serde(default)]
    pub page: usize,
    #[serde(default)]
    pub page_size: Option<usize>,
}

fn default_true() -> bool {
    true
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            search: String::new(),
            filters: BTreeMap::new(),
            date_bucket: DateBucket::All,
            sort_field: None,
            sort_ascending: true,
            page: 0,
            page_size: None,
        }
    }
}

impl ListState {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self.page = 0;
        self
    }

    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(field.into(), value.into());
        self.page = 0;
        self
    }

    pub fn with_date_bucket(mut self, bucket: DateBucket) -> Self {
        self.date_bucket = bucket;
        self.page = 0;
        self
    }

    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_field = Some(field.into());
        self.sort_ascending = direction.is_ascending();
        self
    }

    pub fn with_page(mut self, page: usize, page_size: Option<usize>) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    pub fn sort_direction(&self) -> SortDirection {
        SortDirection::from_ascending(self.sort_ascending)
    }
}
