use std::sync::Arc;
use tracing::{info, warn};

use crate::database::models::{MatchDetail, MatchSummary, NewGoal};
use crate::database::store::MatchStore;
use crate::services::error::{ServiceError, ServiceResult};

/// A submitted final score and the goals that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultReport {
    pub home_score: i32,
    pub away_score: i32,
    pub goals: Vec<NewGoal>,
}

/// Validates and commits match results.
///
/// All checks run against the current match before anything is written. The write
/// itself is a single `MatchStore::record_result` call, which is atomic and
/// conditional on the match still being unscored.
#[derive(Clone)]
pub struct ResultEngine {
    store: Arc<dyn MatchStore>,
}

impl ResultEngine {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        Self { store }
    }

    pub async fn report_result(&self, match_id: i64, report: &ResultReport) -> ServiceResult<MatchDetail> {
        let current = self
            .store
            .find_match(match_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("match not found"))?;

        if current.summary.is_reported() {
            warn!("Rejected result for match {}: already reported", match_id);
            return Err(ServiceError::conflict("match result already reported"));
        }

        if let Err(e) = check_report(&current.summary, report) {
            warn!("Rejected result for match {}: {}", match_id, e);
            return Err(e);
        }

        self.store
            .record_result(match_id, report.home_score, report.away_score, &report.goals)
            .await
            .map_err(|e| {
                warn!("Result commit for match {} rolled back: {}", match_id, e);
                ServiceError::from(e)
            })?;

        info!(
            "Recorded result for match {}: {}-{} with {} goals",
            match_id,
            report.home_score,
            report.away_score,
            report.goals.len()
        );

        self.store
            .find_match(match_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("match not found"))
    }
}

/// Checks a report against the match it targets: every goal belongs to one of the
/// two sides, and the per-side goal counts equal the submitted scores.
pub fn check_report(summary: &MatchSummary, report: &ResultReport) -> ServiceResult<()> {
    if report.home_score < 0 || report.away_score < 0 {
        return Err(ServiceError::invalid_input("scores must not be negative"));
    }

    let home_id = summary.home_team.id;
    let away_id = summary.away_team.id;
    let mut home_goals: i64 = 0;
    let mut away_goals: i64 = 0;

    for goal in &report.goals {
        if goal.minute < 1 {
            return Err(ServiceError::invalid_input(format!(
                "goal minute must be at least 1 (got {})",
                goal.minute
            )));
        }
        if goal.team_id == home_id {
            home_goals += 1;
        } else if goal.team_id == away_id {
            away_goals += 1;
        } else {
            return Err(ServiceError::invalid_input(format!(
                "goal team_id {} does not belong to either team in this match",
                goal.team_id
            )));
        }
    }

    if home_goals != i64::from(report.home_score) {
        return Err(ServiceError::invalid_input(format!(
            "home goal count ({}) does not match home_score ({})",
            home_goals, report.home_score
        )));
    }
    if away_goals != i64::from(report.away_score) {
        return Err(ServiceError::invalid_input(format!(
            "away goal count ({}) does not match away_score ({})",
            away_goals, report.away_score
        )));
    }

    Ok(())
}
