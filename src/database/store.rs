use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{MatchDetail, NewGoal};
use crate::pagination::Pagination;

/// Storage operations the result engine and report builder depend on.
///
/// `record_result` owns the transaction: the score update is conditional on the
/// match still being unscored, and the goal insert happens in the same unit of
/// work. A lost race or a repeated report surfaces as [`DatabaseError::Conflict`]
/// with nothing written.
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Live match with teams and goals (minute ascending) resolved
    async fn find_match(&self, id: i64) -> Result<Option<MatchDetail>, DatabaseError>;

    async fn record_result(
        &self,
        id: i64,
        home_score: i32,
        away_score: i32,
        goals: &[NewGoal],
    ) -> Result<(), DatabaseError>;

    /// Reported, non-drawn matches won by `team_id`, home or away
    async fn count_wins(&self, team_id: i64) -> Result<i64, DatabaseError>;

    /// Page of reported matches, newest first, plus the total reported count
    async fn find_reported(&self, page: Pagination) -> Result<(Vec<MatchDetail>, i64), DatabaseError>;
}
