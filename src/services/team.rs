use tracing::info;

use crate::database::models::{Team, TeamFields, TeamWithPlayers};
use crate::database::repository::{PlayerRepository, TeamRepository};
use crate::dto::TeamPatch;
use crate::pagination::Pagination;
use crate::services::error::{ServiceError, ServiceResult};

#[derive(Clone)]
pub struct TeamService {
    teams: TeamRepository,
    players: PlayerRepository,
}

impl TeamService {
    pub fn new(teams: TeamRepository, players: PlayerRepository) -> Self {
        Self { teams, players }
    }

    pub async fn create(&self, fields: TeamFields) -> ServiceResult<Team> {
        let team = self.teams.create(&fields).await?;
        info!("Created team {} ({})", team.id, team.name);
        Ok(team)
    }

    pub async fn list(&self, page: Pagination) -> ServiceResult<(Vec<Team>, i64)> {
        Ok(self.teams.list(page).await?)
    }

    pub async fn get(&self, id: i64) -> ServiceResult<TeamWithPlayers> {
        let team = self.find(id).await?;
        let players = self.players.all_by_team(id).await?;
        Ok(TeamWithPlayers { team, players })
    }

    pub async fn update(&self, id: i64, patch: TeamPatch) -> ServiceResult<Team> {
        let current = self.find(id).await?;
        let mut fields = TeamFields::from(&current);
        patch.apply(&mut fields);
        Ok(self.teams.update(id, &fields).await?)
    }

    /// Soft-deletes the team together with its players
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        self.teams.delete_with_players(id).await?;
        info!("Deleted team {}", id);
        Ok(())
    }

    async fn find(&self, id: i64) -> ServiceResult<Team> {
        self.teams
            .find(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("team not found"))
    }
}
