//! Member joined with its (optional) team.

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

use teamroster_core::query::{Column, Record, Value};

use crate::member::{Member, QMember};
use crate::team::{QTeam, Team};

/// One row of `member m LEFT JOIN team t ON m.team_id = t.id`.
///
/// `team_id` and `team_name` are `None` for a member without a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberTeamDto {
    /// Member primary key.
    pub member_id: i64,
    /// Member username.
    pub username: String,
    /// Member age.
    pub age: i32,
    /// Team primary key, if the member has a team.
    pub team_id: Option<i64>,
    /// Team name, if the member has a team.
    pub team_name: Option<String>,
}

impl MemberTeamDto {
    /// The one mapping from projected columns to the DTO.
    pub fn new(
        member_id: i64,
        username: String,
        age: i32,
        team_id: Option<i64>,
        team_name: Option<String>,
    ) -> Self {
        Self {
            member_id,
            username,
            age,
            team_id,
            team_name,
        }
    }

    /// Project a member and the team it references.
    ///
    /// `team` is ignored unless its id equals the member's `team_id`.
    pub fn from_join(member: &Member, team: Option<&Team>) -> Self {
        let team = team.filter(|t| member.team_id == Some(t.id));
        Self::new(
            member.id.get(),
            member.username.clone(),
            member.age,
            team.map(|t| t.id.get()),
            team.map(|t| t.name.clone()),
        )
    }
}

/// Columns are read by position in select-list order:
/// `m.id, m.username, m.age, t.id, t.name`.
impl<'r> FromRow<'r, PgRow> for MemberTeamDto {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self::new(
            row.try_get(0)?,
            row.try_get(1)?,
            row.try_get(2)?,
            row.try_get(3)?,
            row.try_get(4)?,
        ))
    }
}

impl Record for MemberTeamDto {
    fn value(&self, column: &Column) -> Value {
        if *column == QMember::ID.column() {
            self.member_id.into()
        } else if *column == QMember::USERNAME.column() {
            self.username.clone().into()
        } else if *column == QMember::AGE.column() {
            self.age.into()
        } else if *column == QMember::TEAM_ID.column() || *column == QTeam::ID.column() {
            self.team_id.into()
        } else if *column == QTeam::NAME.column() {
            self.team_name.clone().into()
        } else {
            Value::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teamroster_core::types::{MemberId, TeamId};

    fn team_b() -> Team {
        Team {
            id: TeamId::new(2),
            name: "teamB".into(),
        }
    }

    #[test]
    fn test_from_join_with_team() {
        let mut member = Member::new("member3", 30).with_team(&team_b());
        member.id = MemberId::new(3);
        let dto = MemberTeamDto::from_join(&member, Some(&team_b()));
        assert_eq!(
            dto,
            MemberTeamDto::new(3, "member3".into(), 30, Some(2), Some("teamB".into()))
        );
    }

    #[test]
    fn test_from_join_without_team() {
        let member = Member::new("loner", 50);
        let dto = MemberTeamDto::from_join(&member, Some(&team_b()));
        assert_eq!(dto.team_id, None);
        assert_eq!(dto.team_name, None);
        assert!(!QTeam::NAME.eq("teamB").matches(&dto));
        assert!(QTeam::NAME.is_null().matches(&dto));
    }

    #[test]
    fn test_serializes_camel_case() {
        let dto = MemberTeamDto::new(1, "member1".into(), 10, None, None);
        let json = serde_json::to_value(&dto).expect("serialize");
        assert_eq!(json["memberId"], 1);
        assert!(json["teamName"].is_null());
    }
}
