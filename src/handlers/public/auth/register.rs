// handlers/public/auth/register.rs - POST /api/v1/auth/register

use axum::extract::State;
use serde::Serialize;

use crate::database::models::User;
use crate::dto::{RegisterRequest, ValidatedJson};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RegisteredUser {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for RegisteredUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Create an account. A duplicate email answers 409.
pub async fn register_post(
    State(state): State<AppState>,
    ValidatedJson(registration): ValidatedJson<RegisterRequest>,
) -> ApiResult<RegisteredUser> {
    let user = state.auth.register(registration).await?;
    Ok(ApiResponse::created(RegisteredUser::from(user)).with_message("user registered"))
}
