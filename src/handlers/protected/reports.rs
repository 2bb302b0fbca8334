use axum::extract::{Query, State};

use crate::middleware::{ApiResponse, ApiResult};
use crate::pagination::PageQuery;
use crate::services::MatchReport;
use crate::state::AppState;

/// GET /api/v1/reports/matches - reports for every scored match, newest first
pub async fn list_match_reports(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Vec<MatchReport>> {
    let page = state.pagination(&query);
    let (reports, total) = state.reports.list(page).await?;
    Ok(ApiResponse::paginated(reports, page.meta(total)))
}
