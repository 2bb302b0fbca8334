//! In-memory `MatchStore` for exercising the result engine and report builder
//! without Postgres. Mirrors the repository's semantics: soft-deleted matches are
//! invisible, the score write is conditional on the match being unscored, and a
//! failed write leaves nothing behind.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use crate::database::manager::DatabaseError;
use crate::database::models::{GoalDetail, MatchDetail, MatchSummary, NewGoal, TeamRef};
use crate::database::store::MatchStore;
use crate::pagination::Pagination;

#[derive(Debug, Clone)]
struct StoredMatch {
    id: i64,
    date: NaiveDate,
    time: NaiveTime,
    home_team_id: i64,
    away_team_id: i64,
    home_score: Option<i32>,
    away_score: Option<i32>,
    deleted: bool,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct StoredGoal {
    id: i64,
    match_id: i64,
    player_id: i64,
    team_id: i64,
    minute: i32,
}

#[derive(Default)]
struct State {
    teams: HashMap<i64, String>,
    players: HashMap<i64, String>,
    matches: BTreeMap<i64, StoredMatch>,
    goals: Vec<StoredGoal>,
    next_match_id: i64,
    next_goal_id: i64,
    fail_next_write: bool,
    interleaved_score: Option<(i64, i32, i32)>,
}

pub struct MemoryStore {
    state: Mutex<State>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { state: Mutex::new(State::default()) }
    }

    pub fn add_team(&self, id: i64, name: &str) {
        self.state.lock().unwrap().teams.insert(id, name.to_string());
    }

    pub fn add_player(&self, id: i64, name: &str) {
        self.state.lock().unwrap().players.insert(id, name.to_string());
    }

    pub fn add_match(&self, home_team_id: i64, away_team_id: i64) -> i64 {
        let date = NaiveDate::from_ymd_opt(2024, 8, 17).unwrap();
        self.add_match_on(date, home_team_id, away_team_id)
    }

    pub fn add_match_on(&self, date: NaiveDate, home_team_id: i64, away_team_id: i64) -> i64 {
        let mut state = self.state.lock().unwrap();
        state.next_match_id += 1;
        let id = state.next_match_id;
        state.matches.insert(
            id,
            StoredMatch {
                id,
                date,
                time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
                home_team_id,
                away_team_id,
                home_score: None,
                away_score: None,
                deleted: false,
                created_at: Utc::now(),
            },
        );
        id
    }

    /// Scored match with no goals, for win-count history
    pub fn add_scored_match(&self, home_team_id: i64, away_team_id: i64, home: i32, away: i32) -> i64 {
        let id = self.add_match(home_team_id, away_team_id);
        let mut state = self.state.lock().unwrap();
        if let Some(m) = state.matches.get_mut(&id) {
            m.home_score = Some(home);
            m.away_score = Some(away);
        }
        id
    }

    pub fn soft_delete_match(&self, id: i64) {
        if let Some(m) = self.state.lock().unwrap().matches.get_mut(&id) {
            m.deleted = true;
        }
    }

    /// Makes the next `record_result` fail as if the goal insert errored mid-transaction
    pub fn fail_next_write(&self) {
        self.state.lock().unwrap().fail_next_write = true;
    }

    /// Simulates a concurrent writer committing a score just before the next `record_result`
    pub fn score_before_next_write(&self, id: i64, home: i32, away: i32) {
        self.state.lock().unwrap().interleaved_score = Some((id, home, away));
    }

    /// Current persisted view of a match; panics if it does not exist
    pub fn snapshot(&self, id: i64) -> MatchDetail {
        let state = self.state.lock().unwrap();
        detail(&state, id).expect("match exists")
    }
}

fn team_ref(state: &State, id: i64) -> TeamRef {
    TeamRef { id, name: state.teams.get(&id).cloned().unwrap_or_default() }
}

fn detail(state: &State, id: i64) -> Option<MatchDetail> {
    let m = state.matches.get(&id).filter(|m| !m.deleted)?;

    let mut goals: Vec<GoalDetail> = state
        .goals
        .iter()
        .filter(|g| g.match_id == id)
        .map(|g| GoalDetail {
            id: g.id,
            player_id: g.player_id,
            player_name: state.players.get(&g.player_id).cloned().unwrap_or_default(),
            team_id: g.team_id,
            team_name: state.teams.get(&g.team_id).cloned().unwrap_or_default(),
            minute: g.minute,
        })
        .collect();
    goals.sort_by_key(|g| (g.minute, g.id));

    Some(MatchDetail {
        summary: MatchSummary {
            id: m.id,
            match_date: m.date,
            match_time: m.time,
            home_team: team_ref(state, m.home_team_id),
            away_team: team_ref(state, m.away_team_id),
            home_score: m.home_score,
            away_score: m.away_score,
            created_at: m.created_at,
            updated_at: m.created_at,
        },
        goals,
    })
}

#[async_trait]
impl MatchStore for MemoryStore {
    async fn find_match(&self, id: i64) -> Result<Option<MatchDetail>, DatabaseError> {
        let state = self.state.lock().unwrap();
        Ok(detail(&state, id))
    }

    async fn record_result(
        &self,
        id: i64,
        home_score: i32,
        away_score: i32,
        goals: &[NewGoal],
    ) -> Result<(), DatabaseError> {
        let mut state = self.state.lock().unwrap();

        if let Some((race_id, home, away)) = state.interleaved_score.take() {
            if let Some(m) = state.matches.get_mut(&race_id) {
                m.home_score = Some(home);
                m.away_score = Some(away);
            }
        }

        let unscored = state
            .matches
            .get(&id)
            .map(|m| !m.deleted && m.home_score.is_none() && m.away_score.is_none())
            .unwrap_or(false);
        if !unscored {
            return Err(DatabaseError::Conflict("match result already reported".to_string()));
        }

        if std::mem::take(&mut state.fail_next_write) {
            return Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut));
        }

        if let Some(missing) = goals.iter().find(|g| !state.players.contains_key(&g.player_id)) {
            return Err(DatabaseError::InvalidReference(format!("player {}", missing.player_id)));
        }

        // Everything validated; apply the whole unit at once
        for goal in goals {
            state.next_goal_id += 1;
            let goal_id = state.next_goal_id;
            state.goals.push(StoredGoal {
                id: goal_id,
                match_id: id,
                player_id: goal.player_id,
                team_id: goal.team_id,
                minute: goal.minute,
            });
        }
        if let Some(m) = state.matches.get_mut(&id) {
            m.home_score = Some(home_score);
            m.away_score = Some(away_score);
        }
        Ok(())
    }

    async fn count_wins(&self, team_id: i64) -> Result<i64, DatabaseError> {
        let state = self.state.lock().unwrap();
        let wins = state
            .matches
            .values()
            .filter(|m| !m.deleted)
            .filter(|m| match (m.home_score, m.away_score) {
                (Some(h), Some(a)) => {
                    (m.home_team_id == team_id && h > a) || (m.away_team_id == team_id && a > h)
                }
                _ => false,
            })
            .count();
        Ok(wins as i64)
    }

    async fn find_reported(&self, page: Pagination) -> Result<(Vec<MatchDetail>, i64), DatabaseError> {
        let state = self.state.lock().unwrap();
        let mut reported: Vec<&StoredMatch> = state
            .matches
            .values()
            .filter(|m| !m.deleted && m.home_score.is_some())
            .collect();
        reported.sort_by(|a, b| (b.date, b.time, b.id).cmp(&(a.date, a.time, a.id)));

        let total = reported.len() as i64;
        let details = reported
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .filter_map(|m| detail(&state, m.id))
            .collect();
        Ok((details, total))
    }
}
