//! Team domain entities.

pub mod model;
pub mod path;

pub use model::Team;
pub use path::QTeam;
