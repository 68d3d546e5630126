//! Process-local storage backend.
//!
//! Holds the `team` and `member` tables in ordered maps behind one
//! `tokio::sync::RwLock` and answers the same storage port as the
//! PostgreSQL repositories. Predicates are evaluated with SQL three-valued
//! logic, the projection emulates `member LEFT JOIN team`, and ordering
//! follows PostgreSQL's default null placement. Text sorts by byte order,
//! which the PostgreSQL backend matches with `COLLATE "C"`.
//!
//! Every fetch and count is tallied in [`QueryStats`], which lets tests
//! observe whether a paged read skipped its count query.

use std::cmp::Ordering as CmpOrdering;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use teamroster_core::error::AppError;
use teamroster_core::query::{Assignment, Column, OrderSpecifier, Predicate, Record, Value};
use teamroster_core::result::AppResult;
use teamroster_core::traits::{BulkMutator, ProjectionSource, Repository};
use teamroster_core::types::{Bounds, MemberId, TeamId};
use teamroster_entity::{Member, MemberTeamDto, QMember, QTeam, Team};

use crate::sql::ensure_member_scope;

#[derive(Debug, Default)]
struct Tables {
    teams: BTreeMap<TeamId, Team>,
    members: BTreeMap<MemberId, Member>,
    last_team_id: i64,
    last_member_id: i64,
}

#[derive(Debug, Default)]
struct Counters {
    fetches: AtomicU64,
    counts: AtomicU64,
}

/// Snapshot of the reads the store has served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryStats {
    /// Projection fetches (content queries).
    pub fetches: u64,
    /// Projection counts (count queries).
    pub counts: u64,
}

/// Shared in-memory tables. Cloning shares the same data.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
    counters: Arc<Counters>,
    available: Arc<AtomicBool>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
            counters: Arc::new(Counters::default()),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Member storage port over this store.
    pub fn members(&self) -> MemoryMemberRepository {
        MemoryMemberRepository {
            store: self.clone(),
        }
    }

    /// Team storage port over this store.
    pub fn teams(&self) -> MemoryTeamRepository {
        MemoryTeamRepository {
            store: self.clone(),
        }
    }

    /// Reads served since creation or the last [`reset_stats`](Self::reset_stats).
    pub fn stats(&self) -> QueryStats {
        QueryStats {
            fetches: self.counters.fetches.load(Ordering::SeqCst),
            counts: self.counters.counts.load(Ordering::SeqCst),
        }
    }

    /// Zero the read counters.
    pub fn reset_stats(&self) {
        self.counters.fetches.store(0, Ordering::SeqCst);
        self.counters.counts.store(0, Ordering::SeqCst);
    }

    /// Simulate an outage: while unavailable every operation fails with
    /// `ServiceUnavailable`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> AppResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::service_unavailable("In-memory store is unavailable"))
        }
    }
}

impl Tables {
    fn project(&self, member: &Member) -> MemberTeamDto {
        let team = member.team_id.and_then(|id| self.teams.get(&id));
        MemberTeamDto::from_join(member, team)
    }

    fn require_team(&self, team_id: Option<TeamId>) -> AppResult<()> {
        match team_id {
            Some(id) if !self.teams.contains_key(&id) => Err(AppError::conflict(format!(
                "Team {id} does not exist"
            ))),
            _ => Ok(()),
        }
    }
}

/// Member storage port backed by an [`InMemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryMemberRepository {
    store: InMemoryStore,
}

impl MemoryMemberRepository {
    /// All members with exactly this username, by id.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Vec<Member>> {
        self.store.ensure_available()?;
        let tables = self.store.tables.read().await;
        let predicate = QMember::USERNAME.eq(username);
        Ok(tables
            .members
            .values()
            .filter(|m| predicate.matches(*m))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl Repository<Member, MemberId> for MemoryMemberRepository {
    async fn find_by_id(&self, id: MemberId) -> AppResult<Option<Member>> {
        self.store.ensure_available()?;
        Ok(self.store.tables.read().await.members.get(&id).cloned())
    }

    async fn save(&self, mut member: Member) -> AppResult<Member> {
        self.store.ensure_available()?;
        let mut tables = self.store.tables.write().await;
        tables.require_team(member.team_id)?;

        if member.id.is_assigned() {
            if !tables.members.contains_key(&member.id) {
                return Err(AppError::not_found(format!("Member {} not found", member.id)));
            }
        } else {
            tables.last_member_id += 1;
            member.id = MemberId::new(tables.last_member_id);
        }
        tables.members.insert(member.id, member.clone());
        Ok(member)
    }

    async fn delete(&self, id: MemberId) -> AppResult<bool> {
        self.store.ensure_available()?;
        Ok(self.store.tables.write().await.members.remove(&id).is_some())
    }

    async fn count(&self) -> AppResult<u64> {
        self.store.ensure_available()?;
        Ok(self.store.tables.read().await.members.len() as u64)
    }
}

#[async_trait]
impl ProjectionSource<MemberTeamDto> for MemoryMemberRepository {
    async fn fetch(
        &self,
        predicate: &Predicate,
        order: &[OrderSpecifier],
        bounds: Option<Bounds>,
    ) -> AppResult<Vec<MemberTeamDto>> {
        self.store.ensure_available()?;
        self.store.counters.fetches.fetch_add(1, Ordering::SeqCst);

        let tables = self.store.tables.read().await;
        // BTreeMap iteration is already member id order, so a stable sort
        // leaves id as the final tie-break.
        let mut rows: Vec<MemberTeamDto> = tables
            .members
            .values()
            .map(|m| tables.project(m))
            .filter(|row| predicate.matches(row))
            .collect();
        rows.sort_by(|a, b| compare_rows(order, a, b));

        let rows: Vec<MemberTeamDto> = match bounds {
            Some(bounds) => rows
                .into_iter()
                .skip(usize::try_from(bounds.offset).unwrap_or(usize::MAX))
                .take(usize::try_from(bounds.limit).unwrap_or(usize::MAX))
                .collect(),
            None => rows,
        };
        debug!(rows = rows.len(), "Fetched member/team rows from memory");
        Ok(rows)
    }

    async fn count_matching(&self, predicate: &Predicate) -> AppResult<u64> {
        self.store.ensure_available()?;
        self.store.counters.counts.fetch_add(1, Ordering::SeqCst);

        let tables = self.store.tables.read().await;
        let total = tables
            .members
            .values()
            .filter(|m| predicate.matches(&tables.project(m)))
            .count() as u64;
        debug!(total, "Counted member/team rows in memory");
        Ok(total)
    }
}

fn compare_rows(order: &[OrderSpecifier], a: &MemberTeamDto, b: &MemberTeamDto) -> CmpOrdering {
    order
        .iter()
        .map(|key| key.compare(&a.value(&key.column), &b.value(&key.column)))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(CmpOrdering::Equal)
}

#[async_trait]
impl BulkMutator for MemoryMemberRepository {
    async fn update_where(
        &self,
        assignments: &[Assignment],
        predicate: &Predicate,
    ) -> AppResult<u64> {
        ensure_member_scope(assignments, predicate)?;
        self.store.ensure_available()?;

        let mut tables = self.store.tables.write().await;
        // Build every updated row first so a failing assignment leaves the
        // table untouched.
        let mut updated = Vec::new();
        for member in tables.members.values().filter(|m| predicate.matches(*m)) {
            let mut next = member.clone();
            for assignment in assignments {
                let column = assignment.column();
                let value = assignment.apply(&member.value(&column));
                write_column(&mut next, column, value)?;
            }
            tables.require_team(next.team_id)?;
            updated.push(next);
        }

        let affected = updated.len() as u64;
        for member in updated {
            tables.members.insert(member.id, member);
        }
        Ok(affected)
    }

    async fn delete_where(&self, predicate: &Predicate) -> AppResult<u64> {
        ensure_member_scope(&[], predicate)?;
        self.store.ensure_available()?;

        let mut tables = self.store.tables.write().await;
        let before = tables.members.len();
        tables.members.retain(|_, m| !predicate.matches(&*m));
        Ok((before - tables.members.len()) as u64)
    }
}

fn write_column(member: &mut Member, column: Column, value: Value) -> AppResult<()> {
    if column == QMember::USERNAME.column() {
        member.username = value
            .as_text()
            .ok_or_else(|| AppError::validation("username must be text"))?
            .to_string();
    } else if column == QMember::AGE.column() {
        let age = value
            .as_integer()
            .ok_or_else(|| AppError::validation("age must be an integer"))?;
        member.age = i32::try_from(age)
            .map_err(|_| AppError::validation(format!("age {age} is out of range")))?;
    } else if column == QMember::TEAM_ID.column() {
        member.team_id = match value {
            Value::Null => None,
            Value::Integer(id) => Some(TeamId::new(id)),
            Value::Text(_) => return Err(AppError::validation("team_id must be an integer")),
        };
    } else {
        return Err(AppError::validation(format!(
            "Column {column} cannot be assigned in a bulk update"
        )));
    }
    Ok(())
}

/// Team storage port backed by an [`InMemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryTeamRepository {
    store: InMemoryStore,
}

impl MemoryTeamRepository {
    /// Teams with exactly this name, by id.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Vec<Team>> {
        self.store.ensure_available()?;
        let tables = self.store.tables.read().await;
        let predicate = QTeam::NAME.eq(name);
        Ok(tables
            .teams
            .values()
            .filter(|t| predicate.matches(*t))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl Repository<Team, TeamId> for MemoryTeamRepository {
    async fn find_by_id(&self, id: TeamId) -> AppResult<Option<Team>> {
        self.store.ensure_available()?;
        Ok(self.store.tables.read().await.teams.get(&id).cloned())
    }

    async fn save(&self, mut team: Team) -> AppResult<Team> {
        self.store.ensure_available()?;
        let mut tables = self.store.tables.write().await;

        if team.id.is_assigned() {
            if !tables.teams.contains_key(&team.id) {
                return Err(AppError::not_found(format!("Team {} not found", team.id)));
            }
        } else {
            tables.last_team_id += 1;
            team.id = TeamId::new(tables.last_team_id);
        }
        tables.teams.insert(team.id, team.clone());
        Ok(team)
    }

    /// Members of the deleted team lose their team, as with
    /// `ON DELETE SET NULL`.
    async fn delete(&self, id: TeamId) -> AppResult<bool> {
        self.store.ensure_available()?;
        let mut tables = self.store.tables.write().await;
        if tables.teams.remove(&id).is_none() {
            return Ok(false);
        }
        for member in tables.members.values_mut() {
            if member.team_id == Some(id) {
                member.leave_team();
            }
        }
        Ok(true)
    }

    async fn count(&self) -> AppResult<u64> {
        self.store.ensure_available()?;
        Ok(self.store.tables.read().await.teams.len() as u64)
    }
}
