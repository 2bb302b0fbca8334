use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{Player, PlayerFields};
use crate::pagination::Pagination;

const PLAYER_COLUMNS: &str =
    "id, team_id, name, height_cm, weight_kg, position, jersey_number, created_at, updated_at, deleted_at";

const JERSEY_TAKEN: &str = "jersey number already taken in this team";

#[derive(Clone)]
pub struct PlayerRepository {
    pool: PgPool,
}

impl PlayerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, team_id: i64, fields: &PlayerFields) -> Result<Player, DatabaseError> {
        let sql = format!(
            "INSERT INTO players (team_id, name, height_cm, weight_kg, position, jersey_number)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {PLAYER_COLUMNS}"
        );
        let player = sqlx::query_as::<_, Player>(&sql)
            .bind(team_id)
            .bind(&fields.name)
            .bind(fields.height_cm)
            .bind(fields.weight_kg)
            .bind(&fields.position)
            .bind(fields.jersey_number)
            .fetch_one(&self.pool)
            .await
            // The partial unique index backs up the service-level jersey check
            .map_err(|e| DatabaseError::from_constraint(e, JERSEY_TAKEN))?;
        Ok(player)
    }

    pub async fn list_by_team(&self, team_id: i64, page: Pagination) -> Result<(Vec<Player>, i64), DatabaseError> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM players WHERE team_id = $1 AND deleted_at IS NULL",
        )
        .bind(team_id)
        .fetch_one(&self.pool)
        .await?;

        let sql = format!(
            "SELECT {PLAYER_COLUMNS} FROM players
             WHERE team_id = $1 AND deleted_at IS NULL
             ORDER BY jersey_number ASC, id ASC
             LIMIT $2 OFFSET $3"
        );
        let players = sqlx::query_as::<_, Player>(&sql)
            .bind(team_id)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((players, total))
    }

    /// Full live roster, used when a single team is fetched
    pub async fn all_by_team(&self, team_id: i64) -> Result<Vec<Player>, DatabaseError> {
        let sql = format!(
            "SELECT {PLAYER_COLUMNS} FROM players
             WHERE team_id = $1 AND deleted_at IS NULL
             ORDER BY jersey_number ASC, id ASC"
        );
        let players = sqlx::query_as::<_, Player>(&sql)
            .bind(team_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(players)
    }

    pub async fn find(&self, id: i64) -> Result<Option<Player>, DatabaseError> {
        let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = $1 AND deleted_at IS NULL");
        let player = sqlx::query_as::<_, Player>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(player)
    }

    /// `exclude_id` skips the player being updated
    pub async fn is_jersey_taken(
        &self,
        team_id: i64,
        jersey_number: i32,
        exclude_id: Option<i64>,
    ) -> Result<bool, DatabaseError> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM players
                WHERE team_id = $1 AND jersey_number = $2 AND deleted_at IS NULL
                  AND ($3::BIGINT IS NULL OR id <> $3)
             )",
        )
        .bind(team_id)
        .bind(jersey_number)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    pub async fn update(&self, id: i64, fields: &PlayerFields) -> Result<Player, DatabaseError> {
        let sql = format!(
            "UPDATE players
             SET name = $2, height_cm = $3, weight_kg = $4, position = $5, jersey_number = $6, updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {PLAYER_COLUMNS}"
        );
        sqlx::query_as::<_, Player>(&sql)
            .bind(id)
            .bind(&fields.name)
            .bind(fields.height_cm)
            .bind(fields.weight_kg)
            .bind(&fields.position)
            .bind(fields.jersey_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_constraint(e, JERSEY_TAKEN))?
            .ok_or_else(|| DatabaseError::NotFound(format!("player {id}")))
    }

    pub async fn delete(&self, id: i64) -> Result<(), DatabaseError> {
        let deleted = sqlx::query("UPDATE players SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("player {id}")));
        }
        Ok(())
    }
}
