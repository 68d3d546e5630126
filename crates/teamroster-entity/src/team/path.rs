use teamroster_core::query::{NumberPath, StringPath};
use teamroster_core::types::TeamId;

/// Table alias used for `team` in every rendered query.
pub const TEAM_ALIAS: &str = "t";

/// Typed column paths of the `team` table.
#[derive(Debug, Clone, Copy)]
pub struct QTeam;

impl QTeam {
    /// `team.id`
    pub const ID: NumberPath<TeamId> = NumberPath::new(TEAM_ALIAS, "id");
    /// `team.name`
    pub const NAME: StringPath = StringPath::new(TEAM_ALIAS, "name");
}
