use teamroster_core::query::{NumberPath, StringPath};
use teamroster_core::types::{MemberId, TeamId};

/// Table alias used for `member` in every rendered query.
pub const MEMBER_ALIAS: &str = "m";

/// Typed column paths of the `member` table.
#[derive(Debug, Clone, Copy)]
pub struct QMember;

impl QMember {
    /// `member.id`
    pub const ID: NumberPath<MemberId> = NumberPath::new(MEMBER_ALIAS, "id");
    /// `member.username`
    pub const USERNAME: StringPath = StringPath::new(MEMBER_ALIAS, "username");
    /// `member.age`
    pub const AGE: NumberPath<i32> = NumberPath::new(MEMBER_ALIAS, "age");
    /// `member.team_id`
    pub const TEAM_ID: NumberPath<TeamId> = NumberPath::new(MEMBER_ALIAS, "team_id");
}
