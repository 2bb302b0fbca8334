use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::goal::GoalDetail;
use super::team::TeamRef;

/// Match joined with both team names
#[derive(Debug, Clone, FromRow)]
pub struct MatchRow {
    pub id: i64,
    pub match_date: NaiveDate,
    pub match_time: NaiveTime,
    pub home_team_id: i64,
    pub home_team_name: String,
    pub away_team_id: i64,
    pub away_team_name: String,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub id: i64,
    pub match_date: NaiveDate,
    pub match_time: NaiveTime,
    pub home_team: TeamRef,
    pub away_team: TeamRef,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MatchRow> for MatchSummary {
    fn from(row: MatchRow) -> Self {
        Self {
            id: row.id,
            match_date: row.match_date,
            match_time: row.match_time,
            home_team: TeamRef { id: row.home_team_id, name: row.home_team_name },
            away_team: TeamRef { id: row.away_team_id, name: row.away_team_name },
            home_score: row.home_score,
            away_score: row.away_score,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl MatchSummary {
    /// Both scores, or None while the result is unreported
    pub fn score(&self) -> Option<(i32, i32)> {
        match (self.home_score, self.away_score) {
            (Some(home), Some(away)) => Some((home, away)),
            _ => None,
        }
    }

    pub fn is_reported(&self) -> bool {
        self.home_score.is_some() || self.away_score.is_some()
    }
}

/// Match with its goals ordered by minute
#[derive(Debug, Clone, Serialize)]
pub struct MatchDetail {
    #[serde(flatten)]
    pub summary: MatchSummary,
    pub goals: Vec<GoalDetail>,
}

/// Schedule columns of a match; scores are written only by the result report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchFields {
    pub match_date: NaiveDate,
    pub match_time: NaiveTime,
    pub home_team_id: i64,
    pub away_team_id: i64,
}

impl From<&MatchSummary> for MatchFields {
    fn from(summary: &MatchSummary) -> Self {
        Self {
            match_date: summary.match_date,
            match_time: summary.match_time,
            home_team_id: summary.home_team.id,
            away_team_id: summary.away_team.id,
        }
    }
}
