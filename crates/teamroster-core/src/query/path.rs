//! Typed column paths.
//!
//! A path names one column of one table alias. The Rust type of the path
//! decides which predicates can be built from it: a [`StringPath`] has no
//! `goe`, a [`NumberPath`] has no `like`.

use std::fmt;
use std::marker::PhantomData;

use super::assignment::Assignment;
use super::order::OrderSpecifier;
use super::predicate::{CompareOp, Predicate};
use super::value::Value;

/// A column reference: table alias plus column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Column {
    table: &'static str,
    name: &'static str,
}

impl Column {
    /// Create a column reference.
    pub const fn new(table: &'static str, name: &'static str) -> Self {
        Self { table, name }
    }

    /// Table alias the column belongs to.
    pub const fn table(&self) -> &'static str {
        self.table
    }

    /// Unqualified column name.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.name)
    }
}

/// A text column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringPath {
    column: Column,
}

impl StringPath {
    /// Create a path for `table.name`.
    pub const fn new(table: &'static str, name: &'static str) -> Self {
        Self {
            column: Column::new(table, name),
        }
    }

    /// The underlying column.
    pub const fn column(&self) -> Column {
        self.column
    }

    /// `column = value`
    pub fn eq(&self, value: impl Into<String>) -> Predicate {
        Predicate::compare(self.column, CompareOp::Eq, Value::Text(value.into()))
    }

    /// `column <> value`
    pub fn ne(&self, value: impl Into<String>) -> Predicate {
        Predicate::compare(self.column, CompareOp::Ne, Value::Text(value.into()))
    }

    /// `column LIKE pattern`, with `%` and `_` wildcards taken as written.
    pub fn like(&self, pattern: impl Into<String>) -> Predicate {
        Predicate::Like {
            column: self.column,
            pattern: pattern.into(),
        }
    }

    /// `column LIKE '%needle%'`, with wildcards in `needle` escaped.
    pub fn contains(&self, needle: &str) -> Predicate {
        self.like(format!("%{}%", escape_like(needle)))
    }

    /// `column LIKE 'prefix%'`, with wildcards in `prefix` escaped.
    pub fn starts_with(&self, prefix: &str) -> Predicate {
        self.like(format!("{}%", escape_like(prefix)))
    }

    /// `column IN (values...)`
    pub fn in_list<I, S>(&self, values: I) -> Predicate
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Predicate::InList {
            column: self.column,
            values: values.into_iter().map(|v| Value::Text(v.into())).collect(),
        }
    }

    /// `column IS NULL`
    pub fn is_null(&self) -> Predicate {
        Predicate::IsNull(self.column)
    }

    /// `column IS NOT NULL`
    pub fn is_not_null(&self) -> Predicate {
        Predicate::IsNotNull(self.column)
    }

    /// Ascending order on this column.
    pub fn asc(&self) -> OrderSpecifier {
        OrderSpecifier::asc(self.column)
    }

    /// Descending order on this column.
    pub fn desc(&self) -> OrderSpecifier {
        OrderSpecifier::desc(self.column)
    }

    /// `SET column = value` for a bulk update.
    pub fn set(&self, value: impl Into<String>) -> Assignment {
        Assignment::Set {
            column: self.column,
            value: Value::Text(value.into()),
        }
    }
}

/// A numeric column holding values of type `T`.
#[derive(Debug, PartialEq, Eq)]
pub struct NumberPath<T> {
    column: Column,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for NumberPath<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NumberPath<T> {}

impl<T> NumberPath<T> {
    /// Create a path for `table.name`.
    pub const fn new(table: &'static str, name: &'static str) -> Self {
        Self {
            column: Column::new(table, name),
            _marker: PhantomData,
        }
    }

    /// The underlying column.
    pub const fn column(&self) -> Column {
        self.column
    }

    /// `column IS NULL`
    pub fn is_null(&self) -> Predicate {
        Predicate::IsNull(self.column)
    }

    /// `column IS NOT NULL`
    pub fn is_not_null(&self) -> Predicate {
        Predicate::IsNotNull(self.column)
    }

    /// Ascending order on this column.
    pub fn asc(&self) -> OrderSpecifier {
        OrderSpecifier::asc(self.column)
    }

    /// Descending order on this column.
    pub fn desc(&self) -> OrderSpecifier {
        OrderSpecifier::desc(self.column)
    }
}

impl<T: Into<Value>> NumberPath<T> {
    fn compare(&self, op: CompareOp, value: T) -> Predicate {
        Predicate::compare(self.column, op, value.into())
    }

    /// `column = value`
    pub fn eq(&self, value: T) -> Predicate {
        self.compare(CompareOp::Eq, value)
    }

    /// `column <> value`
    pub fn ne(&self, value: T) -> Predicate {
        self.compare(CompareOp::Ne, value)
    }

    /// `column > value`
    pub fn gt(&self, value: T) -> Predicate {
        self.compare(CompareOp::Gt, value)
    }

    /// `column >= value`
    pub fn goe(&self, value: T) -> Predicate {
        self.compare(CompareOp::Goe, value)
    }

    /// `column < value`
    pub fn lt(&self, value: T) -> Predicate {
        self.compare(CompareOp::Lt, value)
    }

    /// `column <= value`
    pub fn loe(&self, value: T) -> Predicate {
        self.compare(CompareOp::Loe, value)
    }

    /// `column >= low AND column <= high`
    pub fn between(&self, low: T, high: T) -> Predicate {
        self.goe(low).and(self.loe(high))
    }

    /// `column IN (values...)`
    pub fn in_list<I>(&self, values: I) -> Predicate
    where
        I: IntoIterator<Item = T>,
    {
        Predicate::InList {
            column: self.column,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// `SET column = value` for a bulk update.
    pub fn set(&self, value: T) -> Assignment {
        Assignment::Set {
            column: self.column,
            value: value.into(),
        }
    }
}

impl<T: Into<i64>> NumberPath<T> {
    /// `SET column = column + delta` for a bulk update.
    pub fn add(&self, delta: T) -> Assignment {
        Assignment::Add {
            column: self.column,
            delta: delta.into(),
        }
    }
}

/// Escape `\`, `%` and `_` so the text matches literally inside a LIKE pattern.
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
