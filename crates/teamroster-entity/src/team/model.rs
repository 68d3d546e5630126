//! Team entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use teamroster_core::query::{Column, Record, Value};
use teamroster_core::types::TeamId;

use super::path::QTeam;

/// A named team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Team {
    /// Primary key; `UNASSIGNED` until saved.
    pub id: TeamId,
    /// Team name.
    pub name: String,
}

impl Team {
    /// A new, unsaved team.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TeamId::UNASSIGNED,
            name: name.into(),
        }
    }
}

impl Record for Team {
    fn value(&self, column: &Column) -> Value {
        if *column == QTeam::ID.column() {
            self.id.into()
        } else if *column == QTeam::NAME.column() {
            self.name.clone().into()
        } else {
            Value::Null
        }
    }
}
