//! Predicate composition for member searches.
//!
//! Each search field maps to at most one predicate. A missing field, or a
//! text field that is empty or whitespace-only, maps to `None`, and `None`
//! drops out of the final conjunction.

use teamroster_core::query::Predicate;
use teamroster_entity::{MemberSearchCondition, QMember, QTeam};

/// `member.username = username`, unless blank.
pub fn username_eq(username: Option<&str>) -> Option<Predicate> {
    non_blank(username).map(|username| QMember::USERNAME.eq(username))
}

/// `team.name = team_name`, unless blank.
pub fn team_name_eq(team_name: Option<&str>) -> Option<Predicate> {
    non_blank(team_name).map(|team_name| QTeam::NAME.eq(team_name))
}

/// `member.age >= age_goe`
pub fn age_goe(age_goe: Option<i32>) -> Option<Predicate> {
    age_goe.map(|age| QMember::AGE.goe(age))
}

/// `member.age <= age_loe`
pub fn age_loe(age_loe: Option<i32>) -> Option<Predicate> {
    age_loe.map(|age| QMember::AGE.loe(age))
}

/// The single predicate for a search request. Matches everything when no
/// field is set.
pub fn condition_predicate(condition: &MemberSearchCondition) -> Predicate {
    Predicate::all([
        username_eq(condition.username.as_deref()),
        team_name_eq(condition.team_name.as_deref()),
        age_goe(condition.age_goe),
        age_loe(condition.age_loe),
    ])
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use teamroster_entity::MemberTeamDto;

    fn rows() -> Vec<MemberTeamDto> {
        vec![
            MemberTeamDto::new(1, "member1".into(), 10, Some(1), Some("teamA".into())),
            MemberTeamDto::new(2, "member2".into(), 20, Some(1), Some("teamA".into())),
            MemberTeamDto::new(3, "member3".into(), 30, Some(2), Some("teamB".into())),
            MemberTeamDto::new(4, "member4".into(), 40, Some(2), Some("teamB".into())),
            MemberTeamDto::new(5, "loner".into(), 50, None, None),
        ]
    }

    fn matching(condition: &MemberSearchCondition) -> Vec<i64> {
        let predicate = condition_predicate(condition);
        rows()
            .into_iter()
            .filter(|row| predicate.matches(row))
            .map(|row| row.member_id)
            .collect()
    }

    #[test]
    fn test_empty_condition_matches_everything() {
        let predicate = condition_predicate(&MemberSearchCondition::new());
        assert!(predicate.is_match_all());
        assert_eq!(matching(&MemberSearchCondition::new()), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_each_field_alone() {
        assert_eq!(
            matching(&MemberSearchCondition::new().username("member2")),
            [2]
        );
        assert_eq!(
            matching(&MemberSearchCondition::new().team_name("teamB")),
            [3, 4]
        );
        assert_eq!(matching(&MemberSearchCondition::new().age_goe(30)), [3, 4, 5]);
        assert_eq!(matching(&MemberSearchCondition::new().age_loe(20)), [1, 2]);
    }

    #[test]
    fn test_single_field_yields_bare_predicate() {
        let predicate = condition_predicate(&MemberSearchCondition::new().age_goe(30));
        assert_eq!(predicate, QMember::AGE.goe(30));
    }

    #[test]
    fn test_blank_strings_are_absent() {
        for blank in ["", "   ", "\t\n"] {
            assert_eq!(username_eq(Some(blank)), None);
            assert_eq!(team_name_eq(Some(blank)), None);
        }
        let condition = MemberSearchCondition::new().username(" ").team_name("");
        assert!(condition_predicate(&condition).is_match_all());
    }

    #[test]
    fn test_fields_combine_with_and() {
        let condition = MemberSearchCondition::new()
            .team_name("teamB")
            .age_goe(31)
            .age_loe(45);
        assert_eq!(matching(&condition), [4]);
    }

    #[test]
    fn test_inverted_bounds_match_nothing() {
        let condition = MemberSearchCondition::new().age_goe(35).age_loe(31);
        assert!(matching(&condition).is_empty());
    }
}
