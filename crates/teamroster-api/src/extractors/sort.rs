//! `sort` parameter parsing.

use teamroster_core::error::AppError;
use teamroster_core::query::OrderSpecifier;
use teamroster_core::result::AppResult;
use teamroster_entity::{QMember, QTeam};

/// Parse `field[,asc|desc]` terms separated by `;`.
///
/// Fields are the projection's JSON names: `memberId`, `username`, `age`,
/// `teamId`, `teamName`. Unknown fields and directions are rejected.
pub fn parse_sort(sort: &str) -> AppResult<Vec<OrderSpecifier>> {
    sort.split(';')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(parse_term)
        .collect()
}

fn parse_term(term: &str) -> AppResult<OrderSpecifier> {
    let (field, direction) = match term.split_once(',') {
        Some((field, direction)) => (field.trim(), direction.trim()),
        None => (term, "asc"),
    };

    let ascending = match direction.to_ascii_lowercase().as_str() {
        "asc" | "" => true,
        "desc" => false,
        other => {
            return Err(AppError::validation(format!(
                "sort: unknown direction '{other}'"
            )));
        }
    };

    let (asc, desc) = match field {
        "memberId" | "id" => (QMember::ID.asc(), QMember::ID.desc()),
        "username" => (QMember::USERNAME.asc(), QMember::USERNAME.desc()),
        "age" => (QMember::AGE.asc(), QMember::AGE.desc()),
        "teamId" => (QMember::TEAM_ID.asc(), QMember::TEAM_ID.desc()),
        "teamName" => (QTeam::NAME.asc(), QTeam::NAME.desc()),
        other => {
            return Err(AppError::validation(format!(
                "sort: unknown field '{other}'"
            )));
        }
    };

    Ok(if ascending { asc } else { desc })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_terms() {
        let order = parse_sort("age,desc; username").unwrap();
        assert_eq!(order, vec![QMember::AGE.desc(), QMember::USERNAME.asc()]);
    }

    #[test]
    fn test_team_name_sorts_on_team() {
        assert_eq!(parse_sort("teamName,ASC").unwrap(), vec![QTeam::NAME.asc()]);
    }

    #[test]
    fn test_blank_sort_is_empty() {
        assert!(parse_sort(" ").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_field_or_direction_rejected() {
        assert!(parse_sort("password").is_err());
        assert!(parse_sort("age,sideways").is_err());
    }
}
