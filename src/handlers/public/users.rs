// handlers/public/users.rs - POST /users handler (self-registration)

use axum::extract::State;

use crate::api::{CreateUserRequest, UserResponse};
use crate::extractors::ValidatedJson;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

pub async fn register_post(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> ApiResult<UserResponse> {
    let user = state.users.create_user(&req).await?;
    Ok(ApiResponse::created(user.into()))
}
