//! Sample data: two teams with two members each.

use tracing::info;

use teamroster_core::result::AppResult;
use teamroster_core::traits::Repository;
use teamroster_core::types::{MemberId, TeamId};
use teamroster_entity::{Member, Team};

/// `(username, age, team index)` of the sample members.
pub const SAMPLE_MEMBERS: [(&str, i32, usize); 4] = [
    ("member1", 10, 0),
    ("member2", 20, 0),
    ("member3", 30, 1),
    ("member4", 40, 1),
];

/// Names of the sample teams.
pub const SAMPLE_TEAMS: [&str; 2] = ["teamA", "teamB"];

/// Insert the sample teams and members unless members already exist.
///
/// Returns the number of members inserted (0 when skipped).
pub async fn seed_sample_data(
    teams: &dyn Repository<Team, TeamId>,
    members: &dyn Repository<Member, MemberId>,
) -> AppResult<u64> {
    let existing = members.count().await?;
    if existing > 0 {
        info!(existing, "Members already present, skipping sample data");
        return Ok(0);
    }

    let mut saved_teams = Vec::with_capacity(SAMPLE_TEAMS.len());
    for name in SAMPLE_TEAMS {
        saved_teams.push(teams.save(Team::new(name)).await?);
    }

    let mut inserted = 0;
    for (username, age, team) in SAMPLE_MEMBERS {
        let member = Member::new(username, age).with_team(&saved_teams[team]);
        members.save(member).await?;
        inserted += 1;
    }

    info!(teams = saved_teams.len(), members = inserted, "Sample data inserted");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryStore;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let store = InMemoryStore::new();
        let inserted = seed_sample_data(&store.teams(), &store.members())
            .await
            .unwrap();
        assert_eq!(inserted, 4);

        let again = seed_sample_data(&store.teams(), &store.members())
            .await
            .unwrap();
        assert_eq!(again, 0);
        assert_eq!(store.teams().count().await.unwrap(), 2);
    }
}
