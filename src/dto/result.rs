use serde::Deserialize;

use super::{Checker, FieldErrors, Validate};
use crate::database::models::NewGoal;
use crate::services::result_engine::ResultReport;

/// Upper bound on goals in one report; keeps the batch insert well under the
/// Postgres bind parameter limit
pub const MAX_GOALS: usize = 200;

#[derive(Debug, Deserialize)]
pub struct GoalRequest {
    pub player_id: Option<i64>,
    pub team_id: Option<i64>,
    pub minute: Option<i32>,
}

/// Body of `POST /matches/{id}/result`. Shape checks only; whether the goals fit
/// the match is decided by the result engine.
#[derive(Debug, Deserialize)]
pub struct ReportResultRequest {
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    #[serde(default)]
    pub goals: Vec<GoalRequest>,
}

impl Validate for ReportResultRequest {
    type Output = ResultReport;

    fn validate(self) -> Result<ResultReport, FieldErrors> {
        let mut check = Checker::default();
        let home_score = check
            .require("home_score", self.home_score)
            .filter(|s| check.at_least("home_score", *s, 0));
        let away_score = check
            .require("away_score", self.away_score)
            .filter(|s| check.at_least("away_score", *s, 0));

        let submitted = if self.goals.len() > MAX_GOALS {
            check.fail("goals", format!("must contain at most {MAX_GOALS} goals"));
            Vec::new()
        } else {
            self.goals
        };

        let mut goals = Vec::with_capacity(submitted.len());
        for (i, goal) in submitted.into_iter().enumerate() {
            let field = |name: &str| format!("goals[{i}].{name}");
            let player_id = check
                .require(&field("player_id"), goal.player_id)
                .filter(|id| check.at_least(&field("player_id"), *id, 1));
            let team_id = check
                .require(&field("team_id"), goal.team_id)
                .filter(|id| check.at_least(&field("team_id"), *id, 1));
            let minute = check
                .require(&field("minute"), goal.minute)
                .filter(|m| check.at_least(&field("minute"), *m, 1));

            if let (Some(player_id), Some(team_id), Some(minute)) = (player_id, team_id, minute) {
                goals.push(NewGoal { player_id, team_id, minute });
            }
        }

        check.finish(|| {
            Some(ResultReport { home_score: home_score?, away_score: away_score?, goals })
        })
    }
}
