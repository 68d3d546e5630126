//! Member domain entities.

pub mod condition;
pub mod model;
pub mod path;

pub use condition::MemberSearchCondition;
pub use model::Member;
pub use path::QMember;
