//! Sort specifications.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::path::Column;
use super::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// SQL keyword.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Where `NULL` values sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullOrdering {
    /// Database default: nulls last ascending, first descending.
    #[default]
    Default,
    /// `NULLS FIRST`
    First,
    /// `NULLS LAST`
    Last,
}

/// One `ORDER BY` term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSpecifier {
    /// Column to sort on.
    pub column: Column,
    /// Direction.
    pub direction: SortDirection,
    /// Null placement.
    pub nulls: NullOrdering,
}

impl OrderSpecifier {
    /// Ascending on `column`.
    pub fn asc(column: Column) -> Self {
        Self {
            column,
            direction: SortDirection::Asc,
            nulls: NullOrdering::Default,
        }
    }

    /// Descending on `column`.
    pub fn desc(column: Column) -> Self {
        Self {
            column,
            direction: SortDirection::Desc,
            nulls: NullOrdering::Default,
        }
    }

    /// Put nulls before every value.
    pub fn nulls_first(mut self) -> Self {
        self.nulls = NullOrdering::First;
        self
    }

    /// Put nulls after every value.
    pub fn nulls_last(mut self) -> Self {
        self.nulls = NullOrdering::Last;
        self
    }

    /// Whether nulls end up after non-null values under this term.
    pub fn nulls_sort_last(&self) -> bool {
        match self.nulls {
            NullOrdering::First => false,
            NullOrdering::Last => true,
            NullOrdering::Default => self.direction == SortDirection::Asc,
        }
    }

    /// Order two values of this column the way PostgreSQL would.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        match (a.is_null(), b.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) if self.nulls_sort_last() => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, true) if self.nulls_sort_last() => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => {
                let ordering = a.sql_cmp(b).unwrap_or(Ordering::Equal);
                match self.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            }
        }
    }
}
