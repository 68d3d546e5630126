//! Boolean filter expressions.
//!
//! Optional filters are modelled as `Option<Predicate>`: `None` is the
//! identity of AND composition, so a search built from N optional fields is
//! just `Predicate::all([f1, f2, ..., fn])` with no special-casing for the
//! absent ones. An `And` with no children matches every row.
//!
//! Evaluation follows SQL three-valued logic: a comparison involving `NULL`
//! is unknown (`None`), and only rows that evaluate to `Some(true)` pass a
//! filter.

use std::cmp::Ordering;

use super::path::Column;
use super::value::Value;

/// Comparison operator for [`Predicate::Compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `=`
    Eq,
    /// `<>`
    Ne,
    /// `>`
    Gt,
    /// `>=`
    Goe,
    /// `<`
    Lt,
    /// `<=`
    Loe,
}

impl CompareOp {
    /// The SQL operator token.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Gt => ">",
            Self::Goe => ">=",
            Self::Lt => "<",
            Self::Loe => "<=",
        }
    }

    fn holds(&self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering == Ordering::Equal,
            Self::Ne => ordering != Ordering::Equal,
            Self::Gt => ordering == Ordering::Greater,
            Self::Goe => ordering != Ordering::Less,
            Self::Lt => ordering == Ordering::Less,
            Self::Loe => ordering != Ordering::Greater,
        }
    }
}

/// A boolean-valued filter over one row.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `column <op> value`
    Compare {
        /// Left-hand column.
        column: Column,
        /// Operator.
        op: CompareOp,
        /// Right-hand value.
        value: Value,
    },
    /// `column LIKE pattern` (`%` any run, `_` any char, `\` escapes).
    Like {
        /// Text column.
        column: Column,
        /// LIKE pattern.
        pattern: String,
    },
    /// `column IS NULL`
    IsNull(Column),
    /// `column IS NOT NULL`
    IsNotNull(Column),
    /// `column IN (values...)`; an empty list matches nothing.
    InList {
        /// Column tested for membership.
        column: Column,
        /// Candidate values.
        values: Vec<Value>,
    },
    /// Conjunction; empty matches everything.
    And(Vec<Predicate>),
    /// Disjunction; empty matches nothing.
    Or(Vec<Predicate>),
    /// Negation.
    Not(Box<Predicate>),
}

/// A row the in-memory evaluator can read columns from.
pub trait Record {
    /// Value of `column` in this row; `Value::Null` for unknown columns.
    fn value(&self, column: &Column) -> Value;
}

impl Predicate {
    /// Build a comparison.
    pub fn compare(column: Column, op: CompareOp, value: Value) -> Self {
        Self::Compare { column, op, value }
    }

    /// The predicate that matches every row.
    pub fn match_all() -> Self {
        Self::And(Vec::new())
    }

    /// AND-fold every present predicate, skipping absent ones.
    ///
    /// With no present predicates the result is [`Predicate::match_all`];
    /// with exactly one it is that predicate unchanged.
    pub fn all<I>(predicates: I) -> Self
    where
        I: IntoIterator<Item = Option<Predicate>>,
    {
        let mut present: Vec<Predicate> = predicates.into_iter().flatten().collect();
        match present.len() {
            1 => present.pop().unwrap_or_else(Self::match_all),
            _ => Self::And(present),
        }
    }

    /// `self AND other`, flattening nested conjunctions.
    pub fn and(self, other: Predicate) -> Self {
        let mut terms = match self {
            Self::And(terms) => terms,
            single => vec![single],
        };
        match other {
            Self::And(more) => terms.extend(more),
            single => terms.push(single),
        }
        Self::And(terms)
    }

    /// `self OR other`, flattening nested disjunctions.
    pub fn or(self, other: Predicate) -> Self {
        let mut terms = match self {
            Self::Or(terms) => terms,
            single => vec![single],
        };
        match other {
            Self::Or(more) => terms.extend(more),
            single => terms.push(single),
        }
        Self::Or(terms)
    }

    /// `NOT self`
    pub fn negate(self) -> Self {
        match self {
            Self::Not(inner) => *inner,
            other => Self::Not(Box::new(other)),
        }
    }

    /// Whether this predicate filters nothing out.
    pub fn is_match_all(&self) -> bool {
        match self {
            Self::And(terms) => terms.iter().all(Self::is_match_all),
            _ => false,
        }
    }

    /// Every column referenced anywhere in the tree.
    pub fn columns(&self) -> Vec<Column> {
        let mut columns = Vec::new();
        self.collect_columns(&mut columns);
        columns
    }

    fn collect_columns(&self, out: &mut Vec<Column>) {
        match self {
            Self::Compare { column, .. }
            | Self::Like { column, .. }
            | Self::IsNull(column)
            | Self::IsNotNull(column)
            | Self::InList { column, .. } => {
                if !out.contains(column) {
                    out.push(*column);
                }
            }
            Self::And(terms) | Self::Or(terms) => {
                for term in terms {
                    term.collect_columns(out);
                }
            }
            Self::Not(inner) => inner.collect_columns(out),
        }
    }

    /// Evaluate against a row with three-valued logic.
    pub fn evaluate<R: Record + ?Sized>(&self, row: &R) -> Option<bool> {
        match self {
            Self::Compare { column, op, value } => row
                .value(column)
                .sql_cmp(value)
                .map(|ordering| op.holds(ordering)),
            Self::Like { column, pattern } => match row.value(column) {
                Value::Text(text) => Some(like_matches(&text, pattern)),
                _ => None,
            },
            Self::IsNull(column) => Some(row.value(column).is_null()),
            Self::IsNotNull(column) => Some(!row.value(column).is_null()),
            Self::InList { column, values } => {
                let actual = row.value(column);
                if actual.is_null() {
                    return None;
                }
                let mut unknown = false;
                for candidate in values {
                    match actual.sql_cmp(candidate) {
                        Some(Ordering::Equal) => return Some(true),
                        Some(_) => {}
                        None => unknown = true,
                    }
                }
                if unknown { None } else { Some(false) }
            }
            Self::And(terms) => {
                let mut unknown = false;
                for term in terms {
                    match term.evaluate(row) {
                        Some(false) => return Some(false),
                        None => unknown = true,
                        Some(true) => {}
                    }
                }
                if unknown { None } else { Some(true) }
            }
            Self::Or(terms) => {
                let mut unknown = false;
                for term in terms {
                    match term.evaluate(row) {
                        Some(true) => return Some(true),
                        None => unknown = true,
                        Some(false) => {}
                    }
                }
                if unknown { None } else { Some(false) }
            }
            Self::Not(inner) => inner.evaluate(row).map(|b| !b),
        }
    }

    /// Whether the row passes this filter (evaluates to true, not unknown).
    pub fn matches<R: Record + ?Sized>(&self, row: &R) -> bool {
        self.evaluate(row) == Some(true)
    }
}

impl Default for Predicate {
    fn default() -> Self {
        Self::match_all()
    }
}

/// SQL `LIKE` matching with `\` as the escape character.
fn like_matches(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let pattern = tokenize_like(pattern);
    // reachable[i] = text[..i] is matched by the pattern prefix consumed so far
    let mut reachable = vec![false; text.len() + 1];
    reachable[0] = true;

    for token in &pattern {
        let mut next = vec![false; text.len() + 1];
        match token {
            LikeToken::AnyRun => {
                let mut seen = false;
                for i in 0..=text.len() {
                    seen |= reachable[i];
                    next[i] = seen;
                }
            }
            LikeToken::AnyChar => {
                for i in 0..text.len() {
                    next[i + 1] = reachable[i];
                }
            }
            LikeToken::Literal(c) => {
                for i in 0..text.len() {
                    next[i + 1] = reachable[i] && text[i] == *c;
                }
            }
        }
        reachable = next;
    }

    reachable[text.len()]
}

enum LikeToken {
    AnyRun,
    AnyChar,
    Literal(char),
}

fn tokenize_like(pattern: &str) -> Vec<LikeToken> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        tokens.push(match c {
            '%' => LikeToken::AnyRun,
            '_' => LikeToken::AnyChar,
            '\\' => LikeToken::Literal(chars.next().unwrap_or('\\')),
            other => LikeToken::Literal(other),
        });
    }
    tokens
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::query::path::{NumberPath, StringPath};

    const NAME: StringPath = StringPath::new("m", "username");
    const AGE: NumberPath<i32> = NumberPath::new("m", "age");
    const TEAM: StringPath = StringPath::new("t", "name");

    struct Row(HashMap<Column, Value>);

    impl Row {
        fn new(name: &str, age: i32, team: Option<&str>) -> Self {
            let mut values = HashMap::new();
            values.insert(NAME.column(), Value::from(name));
            values.insert(AGE.column(), Value::from(age));
            values.insert(TEAM.column(), Value::from(team));
            Self(values)
        }
    }

    impl Record for Row {
        fn value(&self, column: &Column) -> Value {
            self.0.get(column).cloned().unwrap_or(Value::Null)
        }
    }

    #[test]
    fn test_all_of_nothing_matches_everything() {
        let predicate = Predicate::all([None, None, None, None]);
        assert!(predicate.is_match_all());
        assert!(predicate.matches(&Row::new("member1", 10, None)));
    }

    #[test]
    fn test_all_of_one_is_that_predicate() {
        let predicate = Predicate::all([None, Some(AGE.goe(20)), None]);
        assert_eq!(predicate, AGE.goe(20));
    }

    #[test]
    fn test_all_of_many_is_conjunction() {
        let predicate = Predicate::all([Some(AGE.goe(20)), None, Some(AGE.loe(30))]);
        assert!(predicate.matches(&Row::new("a", 25, None)));
        assert!(!predicate.matches(&Row::new("a", 35, None)));
    }

    #[test]
    fn test_null_comparison_is_unknown() {
        let row = Row::new("member5", 50, None);
        assert_eq!(TEAM.eq("teamA").evaluate(&row), None);
        assert_eq!(TEAM.eq("teamA").negate().evaluate(&row), None);
        assert!(!TEAM.ne("teamA").matches(&row));
        assert!(TEAM.is_null().matches(&row));
    }

    #[test]
    fn test_and_or_three_valued() {
        let row = Row::new("member5", 50, None);
        assert_eq!(TEAM.eq("teamA").and(AGE.lt(10)).evaluate(&row), Some(false));
        assert_eq!(TEAM.eq("teamA").or(AGE.gt(10)).evaluate(&row), Some(true));
        assert_eq!(TEAM.eq("teamA").or(AGE.lt(10)).evaluate(&row), None);
    }

    #[test]
    fn test_in_list() {
        let row = Row::new("member2", 20, Some("teamA"));
        assert!(AGE.in_list([10, 20]).matches(&row));
        assert!(!AGE.in_list([30, 40]).matches(&row));
        assert!(!AGE.in_list(Vec::new()).matches(&row));
    }

    #[test]
    fn test_like_patterns() {
        assert!(like_matches("member1", "member%"));
        assert!(like_matches("member1", "%ber_"));
        assert!(!like_matches("member10", "member_"));
        assert!(like_matches("50%", "50\\%"));
        assert!(!like_matches("500", "50\\%"));
        assert!(like_matches("", "%"));
    }

    #[test]
    fn test_columns_are_deduplicated() {
        let predicate = AGE.goe(10).and(AGE.loe(20)).and(TEAM.eq("teamB"));
        assert_eq!(predicate.columns(), vec![AGE.column(), TEAM.column()]);
    }

    #[test]
    fn test_double_negation_cancels() {
        assert_eq!(AGE.eq(1).negate().negate(), AGE.eq(1));
    }
}
