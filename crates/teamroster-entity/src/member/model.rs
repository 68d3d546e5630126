//! Member entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use teamroster_core::query::{Column, Record, Value};
use teamroster_core::types::{MemberId, TeamId};

use super::path::QMember;
use crate::team::Team;

/// A member of at most one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Primary key; `UNASSIGNED` until saved.
    pub id: MemberId,
    /// Login name. Not unique.
    pub username: String,
    /// Age in years.
    pub age: i32,
    /// Owning team, if any.
    pub team_id: Option<TeamId>,
}

impl Member {
    /// A new, unsaved member without a team.
    pub fn new(username: impl Into<String>, age: i32) -> Self {
        Self {
            id: MemberId::UNASSIGNED,
            username: username.into(),
            age,
            team_id: None,
        }
    }

    /// Builder-style variant of [`change_team`](Self::change_team).
    pub fn with_team(mut self, team: &Team) -> Self {
        self.change_team(team);
        self
    }

    /// Move this member to `team`.
    pub fn change_team(&mut self, team: &Team) {
        self.team_id = Some(team.id);
    }

    /// Drop the team association.
    pub fn leave_team(&mut self) {
        self.team_id = None;
    }
}

impl Record for Member {
    fn value(&self, column: &Column) -> Value {
        if *column == QMember::ID.column() {
            self.id.into()
        } else if *column == QMember::USERNAME.column() {
            self.username.clone().into()
        } else if *column == QMember::AGE.column() {
            self.age.into()
        } else if *column == QMember::TEAM_ID.column() {
            self.team_id.into()
        } else {
            Value::Null
        }
    }
}
