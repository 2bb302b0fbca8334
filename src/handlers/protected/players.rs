use axum::extract::{rejection::PathRejection, Path, State};

use crate::database::models::Player;
use crate::dto::{UpdatePlayerRequest, ValidatedJson};
use crate::handlers::path_id;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/v1/players/{id}
pub async fn get(State(state): State<AppState>, id: Result<Path<i64>, PathRejection>) -> ApiResult<Player> {
    let player = state.players.get(path_id(id)?).await?;
    Ok(ApiResponse::success(player))
}

/// PUT /api/v1/players/{id}
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    ValidatedJson(patch): ValidatedJson<UpdatePlayerRequest>,
) -> ApiResult<Player> {
    let player = state.players.update(path_id(id)?, patch).await?;
    Ok(ApiResponse::success(player).with_message("player updated"))
}

/// DELETE /api/v1/players/{id}
pub async fn delete(State(state): State<AppState>, id: Result<Path<i64>, PathRejection>) -> ApiResult<()> {
    state.players.delete(path_id(id)?).await?;
    Ok(ApiResponse::message_only("player deleted"))
}
