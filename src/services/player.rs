use tracing::info;

use crate::database::models::{Player, PlayerFields};
use crate::database::repository::{PlayerRepository, TeamRepository};
use crate::dto::PlayerPatch;
use crate::pagination::Pagination;
use crate::services::error::{ServiceError, ServiceResult};

const JERSEY_TAKEN: &str = "jersey number already taken in this team";

#[derive(Clone)]
pub struct PlayerService {
    teams: TeamRepository,
    players: PlayerRepository,
}

impl PlayerService {
    pub fn new(teams: TeamRepository, players: PlayerRepository) -> Self {
        Self { teams, players }
    }

    pub async fn create(&self, team_id: i64, fields: PlayerFields) -> ServiceResult<Player> {
        self.ensure_team(team_id).await?;

        if self.players.is_jersey_taken(team_id, fields.jersey_number, None).await? {
            return Err(ServiceError::conflict(JERSEY_TAKEN));
        }

        let player = self.players.create(team_id, &fields).await?;
        info!("Created player {} in team {}", player.id, team_id);
        Ok(player)
    }

    pub async fn list_by_team(&self, team_id: i64, page: Pagination) -> ServiceResult<(Vec<Player>, i64)> {
        self.ensure_team(team_id).await?;
        Ok(self.players.list_by_team(team_id, page).await?)
    }

    pub async fn get(&self, id: i64) -> ServiceResult<Player> {
        self.players
            .find(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("player not found"))
    }

    pub async fn update(&self, id: i64, patch: PlayerPatch) -> ServiceResult<Player> {
        let current = self.get(id).await?;

        if let Some(jersey) = patch.jersey_number.filter(|n| *n != current.jersey_number) {
            if self.players.is_jersey_taken(current.team_id, jersey, Some(id)).await? {
                return Err(ServiceError::conflict(JERSEY_TAKEN));
            }
        }

        let mut fields = PlayerFields::from(&current);
        patch.apply(&mut fields);
        Ok(self.players.update(id, &fields).await?)
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        self.players.delete(id).await?;
        info!("Deleted player {}", id);
        Ok(())
    }

    async fn ensure_team(&self, team_id: i64) -> ServiceResult<()> {
        if !self.teams.exists(team_id).await? {
            return Err(ServiceError::not_found("team not found"));
        }
        Ok(())
    }
}
