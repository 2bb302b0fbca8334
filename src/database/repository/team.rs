use sqlx::PgPool;
use tracing::debug;

use crate::database::manager::DatabaseError;
use crate::database::models::{Team, TeamFields};
use crate::pagination::Pagination;

const TEAM_COLUMNS: &str =
    "id, name, logo_url, founded_year, hq_address, hq_city, created_at, updated_at, deleted_at";

#[derive(Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, fields: &TeamFields) -> Result<Team, DatabaseError> {
        let sql = format!(
            "INSERT INTO teams (name, logo_url, founded_year, hq_address, hq_city)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {TEAM_COLUMNS}"
        );
        let team = sqlx::query_as::<_, Team>(&sql)
            .bind(&fields.name)
            .bind(&fields.logo_url)
            .bind(fields.founded_year)
            .bind(&fields.hq_address)
            .bind(&fields.hq_city)
            .fetch_one(&self.pool)
            .await?;
        Ok(team)
    }

    pub async fn list(&self, page: Pagination) -> Result<(Vec<Team>, i64), DatabaseError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teams WHERE deleted_at IS NULL")
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            "SELECT {TEAM_COLUMNS} FROM teams WHERE deleted_at IS NULL ORDER BY id ASC LIMIT $1 OFFSET $2"
        );
        let teams = sqlx::query_as::<_, Team>(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((teams, total))
    }

    pub async fn find(&self, id: i64) -> Result<Option<Team>, DatabaseError> {
        let sql = format!("SELECT {TEAM_COLUMNS} FROM teams WHERE id = $1 AND deleted_at IS NULL");
        let team = sqlx::query_as::<_, Team>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(team)
    }

    pub async fn exists(&self, id: i64) -> Result<bool, DatabaseError> {
        let found: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM teams WHERE id = $1 AND deleted_at IS NULL)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(found)
    }

    pub async fn update(&self, id: i64, fields: &TeamFields) -> Result<Team, DatabaseError> {
        let sql = format!(
            "UPDATE teams
             SET name = $2, logo_url = $3, founded_year = $4, hq_address = $5, hq_city = $6, updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {TEAM_COLUMNS}"
        );
        sqlx::query_as::<_, Team>(&sql)
            .bind(id)
            .bind(&fields.name)
            .bind(&fields.logo_url)
            .bind(fields.founded_year)
            .bind(&fields.hq_address)
            .bind(&fields.hq_city)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("team {id}")))
    }

    /// Soft-deletes the roster, then the team, in one transaction
    pub async fn delete_with_players(&self, id: i64) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let players = sqlx::query(
            "UPDATE players SET deleted_at = NOW() WHERE team_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let deleted = sqlx::query("UPDATE teams SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("team {id}")));
        }

        tx.commit().await?;
        debug!("Deleted team {} and {} players", id, players.rows_affected());
        Ok(())
    }
}
