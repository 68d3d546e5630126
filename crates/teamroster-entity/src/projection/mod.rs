//! Read-only result shapes that combine columns from several tables.

pub mod member_team;

pub use member_team::MemberTeamDto;
