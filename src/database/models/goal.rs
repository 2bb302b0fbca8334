use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted goal with player and team names resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct GoalDetail {
    pub id: i64,
    pub player_id: i64,
    pub player_name: String,
    pub team_id: i64,
    pub team_name: String,
    pub minute: i32,
}

/// Goal row to be inserted as part of a result report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewGoal {
    pub player_id: i64,
    pub team_id: i64,
    pub minute: i32,
}
