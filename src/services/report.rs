use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use crate::database::models::{GoalDetail, MatchDetail, TeamRef};
use crate::database::store::MatchStore;
use crate::pagination::Pagination;
use crate::services::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchStatus {
    #[serde(rename = "Draw")]
    Draw,
    #[serde(rename = "Home Win")]
    HomeWin,
    #[serde(rename = "Away Win")]
    AwayWin,
}

impl MatchStatus {
    pub fn from_score(home: i32, away: i32) -> Self {
        if home == away {
            MatchStatus::Draw
        } else if home > away {
            MatchStatus::HomeWin
        } else {
            MatchStatus::AwayWin
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalLine {
    pub player_name: String,
    pub team_name: String,
    pub minute: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopScorer {
    pub player_name: String,
    pub goals: u32,
}

/// Computed view of one reported match
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub match_id: i64,
    pub match_date: chrono::NaiveDate,
    pub match_time: chrono::NaiveTime,
    pub home_team: TeamRef,
    pub away_team: TeamRef,
    pub home_score: i32,
    pub away_score: i32,
    pub status: MatchStatus,
    pub goals: Vec<GoalLine>,
    pub top_scorer: Option<TopScorer>,
    pub cumulative_home_wins: i64,
    pub cumulative_away_wins: i64,
}

/// Builds reports from persisted match state. Read-only; nothing is cached.
#[derive(Clone)]
pub struct ReportBuilder {
    store: Arc<dyn MatchStore>,
}

impl ReportBuilder {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        Self { store }
    }

    pub async fn report_for(&self, match_id: i64) -> ServiceResult<MatchReport> {
        let detail = self
            .store
            .find_match(match_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("match not found"))?;
        self.build(&detail).await
    }

    pub async fn build(&self, detail: &MatchDetail) -> ServiceResult<MatchReport> {
        let summary = &detail.summary;
        let (home_score, away_score) = summary
            .score()
            .ok_or_else(|| ServiceError::invalid_state("match result has not been reported yet"))?;

        let cumulative_home_wins = self.store.count_wins(summary.home_team.id).await?;
        let cumulative_away_wins = self.store.count_wins(summary.away_team.id).await?;

        debug!("Built report for match {}", summary.id);

        Ok(MatchReport {
            match_id: summary.id,
            match_date: summary.match_date,
            match_time: summary.match_time,
            home_team: summary.home_team.clone(),
            away_team: summary.away_team.clone(),
            home_score,
            away_score,
            status: MatchStatus::from_score(home_score, away_score),
            goals: detail
                .goals
                .iter()
                .map(|g| GoalLine {
                    player_name: g.player_name.clone(),
                    team_name: g.team_name.clone(),
                    minute: g.minute,
                })
                .collect(),
            top_scorer: top_scorer(&detail.goals),
            cumulative_home_wins,
            cumulative_away_wins,
        })
    }

    /// Page of reports over scored matches, newest first, plus the scored total
    pub async fn list(&self, page: Pagination) -> ServiceResult<(Vec<MatchReport>, i64)> {
        let (matches, total) = self.store.find_reported(page).await?;

        let mut reports = Vec::with_capacity(matches.len());
        for detail in &matches {
            reports.push(self.build(detail).await?);
        }
        Ok((reports, total))
    }
}

/// Player with strictly the most goals. A shared lead, or no goals, gives None.
pub fn top_scorer(goals: &[GoalDetail]) -> Option<TopScorer> {
    let mut tally: BTreeMap<i64, (u32, &str)> = BTreeMap::new();
    for goal in goals {
        let entry = tally.entry(goal.player_id).or_insert((0, goal.player_name.as_str()));
        entry.0 += 1;
    }

    let mut ranked: Vec<(i64, u32, &str)> =
        tally.into_iter().map(|(id, (count, name))| (id, count, name)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    match ranked.as_slice() {
        [] => None,
        [(_, first, _), (_, second, _), ..] if first == second => None,
        [(_, count, name), ..] => Some(TopScorer { player_name: name.to_string(), goals: *count }),
    }
}
