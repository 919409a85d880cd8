// handlers/public/auth.rs - POST /auth/login handler

use axum::extract::State;
use serde::Serialize;

use crate::api::LoginRequest;
use crate::extractors::ValidatedJson;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Exchange email + password for a bearer token.
///
/// Unknown email and wrong password both answer 401 `Invalid email or password`.
pub async fn login_post(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let token = state.auth.login(&req.email, &req.password).await?;
    Ok(ApiResponse::success(LoginResponse { token }))
}
