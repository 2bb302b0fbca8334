use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;
use tracing::debug;

use crate::database::manager::DatabaseError;
use crate::database::models::{GoalDetail, MatchDetail, MatchFields, MatchRow, MatchSummary, NewGoal};
use crate::database::store::MatchStore;
use crate::pagination::Pagination;

const MATCH_SELECT: &str = r#"
    SELECT m.id, m.match_date, m.match_time,
           m.home_team_id, ht.name AS home_team_name,
           m.away_team_id, awt.name AS away_team_name,
           m.home_score, m.away_score, m.created_at, m.updated_at
    FROM matches m
    JOIN teams ht ON ht.id = m.home_team_id
    JOIN teams awt ON awt.id = m.away_team_id
"#;

// Player and team names resolve even after soft delete so old goals keep their labels
const GOAL_SELECT: &str = r#"
    SELECT g.id, g.player_id, p.name AS player_name, g.team_id, t.name AS team_name, g.minute
    FROM goals g
    JOIN players p ON p.id = g.player_id
    JOIN teams t ON t.id = g.team_id
"#;

#[derive(Clone)]
pub struct MatchRepository {
    pool: PgPool,
}

impl MatchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, fields: &MatchFields) -> Result<i64, DatabaseError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO matches (match_date, match_time, home_team_id, away_team_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(fields.match_date)
        .bind(fields.match_time)
        .bind(fields.home_team_id)
        .bind(fields.away_team_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_constraint(e, "match already exists"))?;
        Ok(id)
    }

    pub async fn list(&self, page: Pagination) -> Result<(Vec<MatchSummary>, i64), DatabaseError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM matches WHERE deleted_at IS NULL")
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            "{MATCH_SELECT} WHERE m.deleted_at IS NULL
             ORDER BY m.match_date DESC, m.match_time DESC, m.id DESC
             LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, MatchRow>(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((rows.into_iter().map(MatchSummary::from).collect(), total))
    }

    pub async fn find_summary(&self, id: i64) -> Result<Option<MatchSummary>, DatabaseError> {
        let sql = format!("{MATCH_SELECT} WHERE m.id = $1 AND m.deleted_at IS NULL");
        let row = sqlx::query_as::<_, MatchRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(MatchSummary::from))
    }

    /// Rewrites the schedule columns only; scores are untouched. With
    /// `teams_changed` the update also requires the match to be unscored, so a
    /// result recorded concurrently cannot end up attached to other teams.
    pub async fn update_schedule(&self, id: i64, fields: &MatchFields, teams_changed: bool) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE matches
             SET match_date = $2, match_time = $3, home_team_id = $4, away_team_id = $5, updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
               AND (NOT $6 OR (home_score IS NULL AND away_score IS NULL))",
        )
        .bind(id)
        .bind(fields.match_date)
        .bind(fields.match_time)
        .bind(fields.home_team_id)
        .bind(fields.away_team_id)
        .bind(teams_changed)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            if teams_changed && self.find_summary(id).await?.is_some() {
                return Err(DatabaseError::Conflict(
                    "teams cannot change after the result is reported".to_string(),
                ));
            }
            return Err(DatabaseError::NotFound(format!("match {id}")));
        }
        Ok(())
    }

    /// Soft-deletes the goals, then the match, in one transaction
    pub async fn delete_with_goals(&self, id: i64) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let goals = sqlx::query(
            "UPDATE goals SET deleted_at = NOW() WHERE match_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let deleted = sqlx::query(
            "UPDATE matches SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if deleted.rows_affected() == 0 {
            // Dropping the transaction rolls back the goal update
            return Err(DatabaseError::NotFound(format!("match {id}")));
        }

        tx.commit().await?;
        debug!("Deleted match {} and {} goals", id, goals.rows_affected());
        Ok(())
    }

    async fn goals_for(&self, match_id: i64) -> Result<Vec<GoalDetail>, DatabaseError> {
        let sql = format!(
            "{GOAL_SELECT} WHERE g.match_id = $1 AND g.deleted_at IS NULL ORDER BY g.minute ASC, g.id ASC"
        );
        let goals = sqlx::query_as::<_, GoalDetail>(&sql)
            .bind(match_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(goals)
    }

    async fn goals_for_many(&self, match_ids: &[i64]) -> Result<HashMap<i64, Vec<GoalDetail>>, DatabaseError> {
        let mut grouped: HashMap<i64, Vec<GoalDetail>> = HashMap::new();
        if match_ids.is_empty() {
            return Ok(grouped);
        }

        let rows = sqlx::query_as::<_, (i64, i64, i64, String, i64, String, i32)>(
            "SELECT g.match_id, g.id, g.player_id, p.name, g.team_id, t.name, g.minute
             FROM goals g
             JOIN players p ON p.id = g.player_id
             JOIN teams t ON t.id = g.team_id
             WHERE g.match_id = ANY($1) AND g.deleted_at IS NULL
             ORDER BY g.match_id, g.minute ASC, g.id ASC",
        )
        .bind(match_ids)
        .fetch_all(&self.pool)
        .await?;

        for (match_id, id, player_id, player_name, team_id, team_name, minute) in rows {
            grouped.entry(match_id).or_default().push(GoalDetail {
                id,
                player_id,
                player_name,
                team_id,
                team_name,
                minute,
            });
        }
        Ok(grouped)
    }
}

#[async_trait]
impl MatchStore for MatchRepository {
    async fn find_match(&self, id: i64) -> Result<Option<MatchDetail>, DatabaseError> {
        let Some(summary) = self.find_summary(id).await? else {
            return Ok(None);
        };
        let goals = self.goals_for(id).await?;
        Ok(Some(MatchDetail { summary, goals }))
    }

    async fn record_result(
        &self,
        id: i64,
        home_score: i32,
        away_score: i32,
        goals: &[NewGoal],
    ) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        // Compare-and-swap on the unscored state closes the check-then-act race
        let updated = sqlx::query(
            "UPDATE matches
             SET home_score = $2, away_score = $3, updated_at = NOW()
             WHERE id = $1 AND home_score IS NULL AND away_score IS NULL AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(home_score)
        .bind(away_score)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(DatabaseError::Conflict("match result already reported".to_string()));
        }

        if !goals.is_empty() {
            let mut insert: QueryBuilder<Postgres> =
                QueryBuilder::new("INSERT INTO goals (match_id, player_id, team_id, minute) ");
            insert.push_values(goals, |mut row, goal| {
                row.push_bind(id)
                    .push_bind(goal.player_id)
                    .push_bind(goal.team_id)
                    .push_bind(goal.minute);
            });
            insert
                .build()
                .execute(&mut *tx)
                .await
                .map_err(|e| DatabaseError::from_constraint(e, "duplicate goal"))?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn count_wins(&self, team_id: i64) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM matches
             WHERE deleted_at IS NULL
               AND home_score IS NOT NULL AND away_score IS NOT NULL
               AND ((home_team_id = $1 AND home_score > away_score)
                 OR (away_team_id = $1 AND away_score > home_score))",
        )
        .bind(team_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn find_reported(&self, page: Pagination) -> Result<(Vec<MatchDetail>, i64), DatabaseError> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM matches WHERE deleted_at IS NULL AND home_score IS NOT NULL",
        )
        .fetch_one(&self.pool)
        .await?;

        let sql = format!(
            "{MATCH_SELECT} WHERE m.deleted_at IS NULL AND m.home_score IS NOT NULL
             ORDER BY m.match_date DESC, m.match_time DESC, m.id DESC
             LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, MatchRow>(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut goals = self.goals_for_many(&ids).await?;

        let details = rows
            .into_iter()
            .map(|row| {
                let goals = goals.remove(&row.id).unwrap_or_default();
                MatchDetail { summary: MatchSummary::from(row), goals }
            })
            .collect();

        Ok((details, total))
    }
}
