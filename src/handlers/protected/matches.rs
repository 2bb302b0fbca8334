use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    Extension,
};

use crate::database::models::{MatchDetail, MatchSummary};
use crate::dto::{CreateMatchRequest, ReportResultRequest, UpdateMatchRequest, ValidatedJson};
use crate::handlers::path_id;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::pagination::PageQuery;
use crate::services::MatchReport;
use crate::state::AppState;

/// POST /api/v1/matches
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(fields): ValidatedJson<CreateMatchRequest>,
) -> ApiResult<MatchSummary> {
    let summary = state.matches.create(fields).await?;
    Ok(ApiResponse::created(summary).with_message("match scheduled"))
}

/// GET /api/v1/matches
pub async fn list(State(state): State<AppState>, Query(query): Query<PageQuery>) -> ApiResult<Vec<MatchSummary>> {
    let page = state.pagination(&query);
    let (matches, total) = state.matches.list(page).await?;
    Ok(ApiResponse::paginated(matches, page.meta(total)))
}

/// GET /api/v1/matches/{id} - match with goals
pub async fn get(State(state): State<AppState>, id: Result<Path<i64>, PathRejection>) -> ApiResult<MatchDetail> {
    let detail = state.matches.get(path_id(id)?).await?;
    Ok(ApiResponse::success(detail))
}

/// PUT /api/v1/matches/{id} - date, time and teams only
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    ValidatedJson(patch): ValidatedJson<UpdateMatchRequest>,
) -> ApiResult<MatchSummary> {
    let summary = state.matches.update(path_id(id)?, patch).await?;
    Ok(ApiResponse::success(summary).with_message("match updated"))
}

/// DELETE /api/v1/matches/{id} - also removes its goals
pub async fn delete(State(state): State<AppState>, id: Result<Path<i64>, PathRejection>) -> ApiResult<()> {
    state.matches.delete(path_id(id)?).await?;
    Ok(ApiResponse::message_only("match deleted"))
}

/// POST /api/v1/matches/{id}/result - final score and goals, accepted once
pub async fn report_result(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    id: Result<Path<i64>, PathRejection>,
    ValidatedJson(report): ValidatedJson<ReportResultRequest>,
) -> ApiResult<MatchDetail> {
    let id = path_id(id)?;
    tracing::debug!("User {} reporting result for match {}", user.user_id, id);

    let detail = state.results.report_result(id, &report).await?;
    Ok(ApiResponse::success(detail).with_message("match result reported"))
}

/// GET /api/v1/matches/{id}/report
pub async fn report(State(state): State<AppState>, id: Result<Path<i64>, PathRejection>) -> ApiResult<MatchReport> {
    let report = state.reports.report_for(path_id(id)?).await?;
    Ok(ApiResponse::success(report))
}
