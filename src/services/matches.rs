use tracing::info;

use crate::database::models::{MatchDetail, MatchFields, MatchSummary};
use crate::database::repository::{MatchRepository, TeamRepository};
use crate::database::store::MatchStore;
use crate::dto::MatchPatch;
use crate::pagination::Pagination;
use crate::services::error::{ServiceError, ServiceResult};

/// Schedule management for matches. Scores are only ever written by the result engine.
#[derive(Clone)]
pub struct MatchService {
    teams: TeamRepository,
    matches: MatchRepository,
}

impl MatchService {
    pub fn new(teams: TeamRepository, matches: MatchRepository) -> Self {
        Self { teams, matches }
    }

    pub async fn create(&self, fields: MatchFields) -> ServiceResult<MatchSummary> {
        self.check_teams(&fields).await?;

        let id = self.matches.create(&fields).await?;
        info!(
            "Scheduled match {}: team {} vs team {} on {} {}",
            id, fields.home_team_id, fields.away_team_id, fields.match_date, fields.match_time
        );
        self.summary(id).await
    }

    pub async fn list(&self, page: Pagination) -> ServiceResult<(Vec<MatchSummary>, i64)> {
        Ok(self.matches.list(page).await?)
    }

    pub async fn get(&self, id: i64) -> ServiceResult<MatchDetail> {
        self.matches
            .find_match(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("match not found"))
    }

    pub async fn update(&self, id: i64, patch: MatchPatch) -> ServiceResult<MatchSummary> {
        let current = self.summary(id).await?;

        let mut fields = MatchFields::from(&current);
        patch.apply(&mut fields);
        let teams_changed = check_team_change(&current, &fields)?;
        if teams_changed {
            self.check_teams(&fields).await?;
        }

        self.matches.update_schedule(id, &fields, teams_changed).await?;
        if teams_changed {
            info!(
                "Match {} now team {} vs team {}",
                id, fields.home_team_id, fields.away_team_id
            );
        }
        self.summary(id).await
    }

    /// Soft-deletes the match and its goals
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        self.matches.delete_with_goals(id).await?;
        info!("Deleted match {}", id);
        Ok(())
    }

    async fn summary(&self, id: i64) -> ServiceResult<MatchSummary> {
        self.matches
            .find_summary(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("match not found"))
    }

    async fn check_teams(&self, fields: &MatchFields) -> ServiceResult<()> {
        check_distinct_teams(fields)?;
        if !self.teams.exists(fields.home_team_id).await? {
            return Err(ServiceError::not_found("home team not found"));
        }
        if !self.teams.exists(fields.away_team_id).await? {
            return Err(ServiceError::not_found("away team not found"));
        }
        Ok(())
    }
}

pub fn check_distinct_teams(fields: &MatchFields) -> ServiceResult<()> {
    if fields.home_team_id == fields.away_team_id {
        return Err(ServiceError::invalid_input("home team and away team must be different"));
    }
    Ok(())
}

/// Whether `fields` moves the match to other teams. A reported match keeps its
/// teams, since its goals were checked against them.
pub fn check_team_change(current: &MatchSummary, fields: &MatchFields) -> ServiceResult<bool> {
    let changed = fields.home_team_id != current.home_team.id || fields.away_team_id != current.away_team.id;
    if changed && current.is_reported() {
        return Err(ServiceError::conflict("teams cannot change after the result is reported"));
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Utc};

    use crate::database::models::TeamRef;

    fn fields(home: i64, away: i64) -> MatchFields {
        MatchFields {
            match_date: NaiveDate::from_ymd_opt(2024, 8, 17).unwrap(),
            match_time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            home_team_id: home,
            away_team_id: away,
        }
    }

    #[test]
    fn same_team_cannot_play_itself() {
        assert!(matches!(check_distinct_teams(&fields(3, 3)), Err(ServiceError::InvalidInput(_))));
        assert!(check_distinct_teams(&fields(3, 4)).is_ok());
    }

    fn summary(home: i64, away: i64, score: Option<(i32, i32)>) -> MatchSummary {
        let f = fields(home, away);
        MatchSummary {
            id: 1,
            match_date: f.match_date,
            match_time: f.match_time,
            home_team: TeamRef { id: home, name: format!("Team {home}") },
            away_team: TeamRef { id: away, name: format!("Team {away}") },
            home_score: score.map(|(h, _)| h),
            away_score: score.map(|(_, a)| a),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn reported_match_keeps_its_teams() {
        let reported = summary(1, 2, Some((1, 0)));

        let err = check_team_change(&reported, &fields(3, 4)).unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(ref m) if m.contains("after the result is reported")));
        assert!(matches!(check_team_change(&reported, &fields(1, 3)), Err(ServiceError::Conflict(_))));
        assert!(matches!(check_team_change(&reported, &fields(2, 1)), Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn reported_match_can_still_be_rescheduled() {
        let reported = summary(1, 2, Some((0, 0)));
        let mut moved = fields(1, 2);
        moved.match_time = NaiveTime::from_hms_opt(21, 0, 0).unwrap();

        assert!(!check_team_change(&reported, &moved).unwrap());
    }

    #[test]
    fn unreported_match_may_change_teams() {
        let scheduled = summary(1, 2, None);
        assert!(check_team_change(&scheduled, &fields(3, 4)).unwrap());
        assert!(!check_team_change(&scheduled, &fields(1, 2)).unwrap());
    }
}
