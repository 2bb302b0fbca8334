use axum::extract::{rejection::PathRejection, Path, Query, State};

use crate::database::models::{Player, Team, TeamWithPlayers};
use crate::dto::{CreatePlayerRequest, CreateTeamRequest, UpdateTeamRequest, ValidatedJson};
use crate::handlers::path_id;
use crate::middleware::{ApiResponse, ApiResult};
use crate::pagination::PageQuery;
use crate::state::AppState;

/// POST /api/v1/teams
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(fields): ValidatedJson<CreateTeamRequest>,
) -> ApiResult<Team> {
    let team = state.teams.create(fields).await?;
    Ok(ApiResponse::created(team).with_message("team created"))
}

/// GET /api/v1/teams
pub async fn list(State(state): State<AppState>, Query(query): Query<PageQuery>) -> ApiResult<Vec<Team>> {
    let page = state.pagination(&query);
    let (teams, total) = state.teams.list(page).await?;
    Ok(ApiResponse::paginated(teams, page.meta(total)))
}

/// GET /api/v1/teams/{id} - team with its live roster
pub async fn get(State(state): State<AppState>, id: Result<Path<i64>, PathRejection>) -> ApiResult<TeamWithPlayers> {
    let team = state.teams.get(path_id(id)?).await?;
    Ok(ApiResponse::success(team))
}

/// PUT /api/v1/teams/{id}
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    ValidatedJson(patch): ValidatedJson<UpdateTeamRequest>,
) -> ApiResult<Team> {
    let team = state.teams.update(path_id(id)?, patch).await?;
    Ok(ApiResponse::success(team).with_message("team updated"))
}

/// DELETE /api/v1/teams/{id} - also removes the roster
pub async fn delete(State(state): State<AppState>, id: Result<Path<i64>, PathRejection>) -> ApiResult<()> {
    state.teams.delete(path_id(id)?).await?;
    Ok(ApiResponse::message_only("team deleted"))
}

/// POST /api/v1/teams/{id}/players
pub async fn create_player(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    ValidatedJson(fields): ValidatedJson<CreatePlayerRequest>,
) -> ApiResult<Player> {
    let player = state.players.create(path_id(id)?, fields).await?;
    Ok(ApiResponse::created(player).with_message("player created"))
}

/// GET /api/v1/teams/{id}/players
pub async fn list_players(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Vec<Player>> {
    let page = state.pagination(&query);
    let (players, total) = state.players.list_by_team(path_id(id)?, page).await?;
    Ok(ApiResponse::paginated(players, page.meta(total)))
}
