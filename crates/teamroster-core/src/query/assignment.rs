//! Column assignments for bulk updates.

use super::path::Column;
use super::value::Value;

/// One `SET` clause of a bulk update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// `SET column = value`
    Set {
        /// Target column.
        column: Column,
        /// New value.
        value: Value,
    },
    /// `SET column = column + delta`
    Add {
        /// Target numeric column.
        column: Column,
        /// Amount added; may be negative.
        delta: i64,
    },
}

impl Assignment {
    /// The column being written.
    pub fn column(&self) -> Column {
        match self {
            Self::Set { column, .. } | Self::Add { column, .. } => *column,
        }
    }

    /// Apply to the current value of the column.
    ///
    /// Adding to `NULL` yields `NULL`, as in SQL.
    pub fn apply(&self, current: &Value) -> Value {
        match self {
            Self::Set { value, .. } => value.clone(),
            Self::Add { delta, .. } => match current {
                Value::Integer(n) => Value::Integer(n.saturating_add(*delta)),
                _ => Value::Null,
            },
        }
    }
}
