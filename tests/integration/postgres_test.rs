//! Integration tests against a live PostgreSQL database.
//!
//! Set `TEAMROSTER_TEST_DATABASE_URL` to run them; without it each test
//! returns immediately. The tables are truncated before every test.

mod helpers;

use http::StatusCode;
use tokio::sync::{Mutex, MutexGuard};

use teamroster_core::config::{DatabaseConfig, StoreBackend};
use teamroster_core::query::Predicate;
use teamroster_core::traits::{ProjectionSource, Repository};
use teamroster_database::migration::run_migrations;
use teamroster_database::seed::seed_sample_data;
use teamroster_database::{DatabasePool, MemberRepository, TeamRepository};
use teamroster_entity::{QMember, QTeam};

use helpers::TestApp;

/// Tests share one database, so they run one at a time.
static DB_LOCK: Mutex<()> = Mutex::const_new(());

struct TestDb {
    pool: DatabasePool,
    members: MemberRepository,
    teams: TeamRepository,
    _guard: MutexGuard<'static, ()>,
}

/// Connect, migrate, truncate and seed. `None` when no database is configured.
async fn test_db() -> Option<TestDb> {
    let Ok(url) = std::env::var("TEAMROSTER_TEST_DATABASE_URL") else {
        eprintln!("TEAMROSTER_TEST_DATABASE_URL not set, skipping");
        return None;
    };
    let guard = DB_LOCK.lock().await;

    let config = DatabaseConfig {
        backend: StoreBackend::Postgres,
        url,
        max_connections: 2,
        ..DatabaseConfig::default()
    };
    let pool = DatabasePool::connect(&config)
        .await
        .expect("Failed to connect to test database");
    run_migrations(&pool).await.expect("Failed to run migrations");
    sqlx::query("TRUNCATE member, team RESTART IDENTITY")
        .execute(pool.pool())
        .await
        .expect("Failed to clean database");

    let members = MemberRepository::new(pool.pool().clone());
    let teams = TeamRepository::new(pool.pool().clone());
    seed_sample_data(&teams, &members)
        .await
        .expect("Failed to seed sample data");

    Some(TestDb {
        pool,
        members,
        teams,
        _guard: guard,
    })
}

#[tokio::test]
async fn test_health_check_reaches_database() {
    let Some(db) = test_db().await else { return };

    assert!(db.pool.health_check().await.expect("health check"));

    let app = TestApp::with_database(db.pool.clone());
    let resp = app.get("/api/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["data"]["database"], "connected");
}

#[tokio::test]
async fn test_find_by_name_and_username() {
    let Some(db) = test_db().await else { return };

    let teams = db.teams.find_by_name("teamB").await.expect("query");
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0].name, "teamB");
    assert!(db.teams.find_by_name("teamC").await.expect("query").is_empty());

    let members = db.members.find_by_username("member3").await.expect("query");
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].age, 30);
    assert_eq!(members[0].team_id, Some(teams[0].id));
}

#[tokio::test]
async fn test_projection_filters_and_counts() {
    let Some(db) = test_db().await else { return };

    let rows = db
        .members
        .fetch(&QTeam::NAME.eq("teamB"), &[], None)
        .await
        .expect("fetch");
    let names: Vec<_> = rows.iter().map(|r| r.username.as_str()).collect();
    assert_eq!(names, ["member3", "member4"]);
    assert!(rows.iter().all(|r| r.team_name.as_deref() == Some("teamB")));

    let window = QMember::AGE.goe(31).and(QMember::AGE.loe(35));
    assert_eq!(db.members.count_matching(&window).await.expect("count"), 0);
    assert_eq!(
        db.members
            .count_matching(&Predicate::match_all())
            .await
            .expect("count"),
        4
    );
}

#[tokio::test]
async fn test_fetch_first_and_fetch_one() {
    let Some(db) = test_db().await else { return };

    let oldest = db
        .members
        .fetch_first(&QTeam::NAME.eq("teamA"), &[QMember::AGE.desc()])
        .await
        .expect("fetch_first");
    assert_eq!(oldest.map(|r| r.username), Some("member2".to_string()));

    let err = db
        .members
        .fetch_one(&QTeam::NAME.eq("teamA"))
        .await
        .expect_err("two rows match");
    assert_eq!(err.kind, teamroster_core::error::ErrorKind::NonUniqueResult);

    assert_eq!(db.teams.count().await.expect("count"), 2);
}
