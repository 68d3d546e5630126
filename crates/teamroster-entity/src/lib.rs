//! # teamroster-entity
//!
//! Domain entity models for TeamRoster. `Member` and `Team` mirror the two
//! database tables and derive `sqlx::FromRow`. Each table also has a typed
//! path holder (`QMember`, `QTeam`) whose constants are the only way the
//! rest of the workspace refers to columns, so a filter on a misspelled or
//! mistyped column does not compile.

pub mod member;
pub mod projection;
pub mod team;

pub use member::{Member, MemberSearchCondition, QMember};
pub use projection::MemberTeamDto;
pub use team::{QTeam, Team};
