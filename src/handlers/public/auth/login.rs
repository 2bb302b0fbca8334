// handlers/public/auth/login.rs - POST /api/v1/auth/login

use axum::extract::State;

use crate::dto::{LoginRequest, ValidatedJson};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::TokenResponse;
use crate::state::AppState;

/// Exchange email and password for a bearer token
pub async fn login_post(
    State(state): State<AppState>,
    ValidatedJson(credentials): ValidatedJson<LoginRequest>,
) -> ApiResult<TokenResponse> {
    let token = state.auth.login(credentials).await?;
    Ok(ApiResponse::success(token).with_message("login successful"))
}
