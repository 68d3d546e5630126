//! Rendering of query expressions to parameterized PostgreSQL.
//!
//! Every value travels as a bind parameter. Only column identifiers, which
//! come from the compile-time path constants, are written into the SQL text.

use sqlx::{Postgres, QueryBuilder};

use teamroster_core::error::AppError;
use teamroster_core::query::{
    Assignment, Column, NullOrdering, OrderSpecifier, Predicate, Value,
};
use teamroster_core::result::AppResult;
use teamroster_core::types::Bounds;
use teamroster_entity::{QMember, QTeam};
use teamroster_entity::member::path::MEMBER_ALIAS;

/// Projection of a member and its optional team, in `MemberTeamDto` order.
pub const MEMBER_TEAM_SELECT: &str = "SELECT m.id, m.username, m.age, t.id, t.name \
     FROM member m LEFT JOIN team t ON m.team_id = t.id";

/// Count over the same join as [`MEMBER_TEAM_SELECT`].
pub const MEMBER_TEAM_COUNT: &str =
    "SELECT COUNT(m.id) FROM member m LEFT JOIN team t ON m.team_id = t.id";

/// `SELECT ... WHERE ... ORDER BY ... LIMIT ... OFFSET ...` for the member/team projection.
pub fn member_team_query(
    predicate: &Predicate,
    order: &[OrderSpecifier],
    bounds: Option<Bounds>,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(MEMBER_TEAM_SELECT);
    push_where(&mut qb, predicate);
    push_order_by(&mut qb, order);
    if let Some(bounds) = bounds {
        push_bounds(&mut qb, bounds);
    }
    qb
}

/// `SELECT COUNT(m.id) ... WHERE ...` matching [`member_team_query`].
pub fn member_team_count(predicate: &Predicate) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(MEMBER_TEAM_COUNT);
    push_where(&mut qb, predicate);
    qb
}

/// `UPDATE member AS m SET ... WHERE ...`
pub fn member_update(
    assignments: &[Assignment],
    predicate: &Predicate,
) -> AppResult<QueryBuilder<'static, Postgres>> {
    ensure_member_scope(assignments, predicate)?;

    let mut qb = QueryBuilder::new("UPDATE member AS m SET ");
    for (i, assignment) in assignments.iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        // SET targets are never alias-qualified in PostgreSQL.
        qb.push(assignment.column().name()).push(" = ");
        match assignment {
            Assignment::Set { value, .. } => push_value(&mut qb, value),
            Assignment::Add { column, delta } => {
                qb.push(column).push(" + ").push_bind(*delta);
            }
        }
    }
    push_where(&mut qb, predicate);
    Ok(qb)
}

/// `DELETE FROM member AS m WHERE ...`
pub fn member_delete(predicate: &Predicate) -> AppResult<QueryBuilder<'static, Postgres>> {
    ensure_member_scope(&[], predicate)?;

    let mut qb = QueryBuilder::new("DELETE FROM member AS m");
    push_where(&mut qb, predicate);
    Ok(qb)
}

/// Bulk statements run against `member` alone, so they may only reference
/// member columns and must not rewrite the primary key.
pub fn ensure_member_scope(assignments: &[Assignment], predicate: &Predicate) -> AppResult<()> {
    if let Some(column) = predicate
        .columns()
        .into_iter()
        .find(|c| c.table() != MEMBER_ALIAS)
    {
        return Err(AppError::validation(format!(
            "Bulk operations may only filter on member columns, got {column}"
        )));
    }
    for assignment in assignments {
        let column = assignment.column();
        if column.table() != MEMBER_ALIAS || column == QMember::ID.column() {
            return Err(AppError::validation(format!(
                "Column {column} cannot be assigned in a bulk update"
            )));
        }
    }
    Ok(())
}

/// Append ` WHERE <predicate>` unless the predicate matches everything.
pub fn push_where<'args>(qb: &mut QueryBuilder<'args, Postgres>, predicate: &Predicate) {
    if predicate.is_match_all() {
        return;
    }
    qb.push(" WHERE ");
    push_predicate(qb, predicate);
}

/// Append a predicate as a boolean SQL expression.
pub fn push_predicate<'args>(qb: &mut QueryBuilder<'args, Postgres>, predicate: &Predicate) {
    match predicate {
        Predicate::Compare { column, op, value } => {
            qb.push(column).push(" ").push(op.as_sql()).push(" ");
            push_value(qb, value);
        }
        Predicate::Like { column, pattern } => {
            qb.push(column)
                .push(" LIKE ")
                .push_bind(pattern.clone());
        }
        Predicate::IsNull(column) => {
            qb.push(column).push(" IS NULL");
        }
        Predicate::IsNotNull(column) => {
            qb.push(column).push(" IS NOT NULL");
        }
        Predicate::InList { values, .. } if values.is_empty() => {
            qb.push("FALSE");
        }
        Predicate::InList { column, values } => {
            qb.push(column).push(" IN (");
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    qb.push(", ");
                }
                push_value(qb, value);
            }
            qb.push(")");
        }
        Predicate::And(terms) => push_junction(qb, terms, " AND ", "TRUE"),
        Predicate::Or(terms) => push_junction(qb, terms, " OR ", "FALSE"),
        Predicate::Not(inner) => {
            qb.push("NOT (");
            push_predicate(qb, inner);
            qb.push(")");
        }
    }
}

fn push_junction<'args>(
    qb: &mut QueryBuilder<'args, Postgres>,
    terms: &[Predicate],
    separator: &str,
    empty: &str,
) {
    if terms.is_empty() {
        qb.push(empty);
        return;
    }
    qb.push("(");
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            qb.push(separator);
        }
        push_predicate(qb, term);
    }
    qb.push(")");
}

fn push_value<'args>(qb: &mut QueryBuilder<'args, Postgres>, value: &Value) {
    match value {
        Value::Null => {
            qb.push("NULL");
        }
        Value::Integer(n) => {
            qb.push_bind(*n);
        }
        Value::Text(s) => {
            qb.push_bind(s.clone());
        }
    }
}

/// Append ` ORDER BY ...`, always ending with `m.id` so pages are stable.
///
/// Text columns sort with `COLLATE "C"` (byte order), the same order the
/// in-memory store uses, independent of the database's default collation.
pub fn push_order_by<'args>(qb: &mut QueryBuilder<'args, Postgres>, order: &[OrderSpecifier]) {
    let id = QMember::ID.column();
    let mut terms = order.to_vec();
    if !terms.iter().any(|term| term.column == id) {
        terms.push(OrderSpecifier::asc(id));
    }

    qb.push(" ORDER BY ");
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        qb.push(term.column);
        if is_text_column(term.column) {
            qb.push(r#" COLLATE "C""#);
        }
        qb.push(" ").push(term.direction.as_sql());
        match term.nulls {
            NullOrdering::Default => {}
            NullOrdering::First => {
                qb.push(" NULLS FIRST");
            }
            NullOrdering::Last => {
                qb.push(" NULLS LAST");
            }
        }
    }
}

fn is_text_column(column: Column) -> bool {
    column == QMember::USERNAME.column() || column == QTeam::NAME.column()
}

fn push_bounds<'args>(qb: &mut QueryBuilder<'args, Postgres>, bounds: Bounds) {
    qb.push(" LIMIT ")
        .push_bind(i64::try_from(bounds.limit).unwrap_or(i64::MAX))
        .push(" OFFSET ")
        .push_bind(i64::try_from(bounds.offset).unwrap_or(i64::MAX));
}
