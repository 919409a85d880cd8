// handlers/protected/users.rs - /users and /users/:id handlers

use axum::extract::{rejection::QueryRejection, Query, State};
use serde::Deserialize;

use crate::api::{UpdateUserRequest, UserListResponse, UserResponse};
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::extractors::{UserId, ValidatedJson};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::ListUsersParams;
use crate::state::AppState;

/// Raw `GET /users` query. Kept as strings so bad numbers get our own 400 message.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub min_age: Option<String>,
    pub max_age: Option<String>,
}

fn positive(raw: Option<&str>, default: u32) -> Result<u32, ApiError> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| ApiError::bad_request("page and limit must be positive integers")),
    }
}

/// 0 or absent means no bound
fn age_bound(raw: Option<&str>) -> Result<Option<i32>, ApiError> {
    let Some(raw) = raw else { return Ok(None) };

    match raw.trim().parse::<i32>() {
        Ok(0) => Ok(None),
        Ok(age) if age > 0 => Ok(Some(age)),
        _ => Err(ApiError::bad_request(
            "min_age and max_age must be non-negative integers",
        )),
    }
}

pub fn parse_list_query(query: &ListUsersQuery, api: &ApiConfig) -> Result<ListUsersParams, ApiError> {
    let page = positive(query.page.as_deref(), 1)?;
    let limit = positive(query.limit.as_deref(), api.default_page_limit)?;

    if limit > api.max_page_limit {
        return Err(ApiError::bad_request(format!(
            "limit must not exceed {}",
            api.max_page_limit
        )));
    }

    let min_age = age_bound(query.min_age.as_deref())?;
    let max_age = age_bound(query.max_age.as_deref())?;

    if let (Some(min), Some(max)) = (min_age, max_age) {
        if min > max {
            return Err(ApiError::bad_request("min_age must not exceed max_age"));
        }
    }

    Ok(ListUsersParams {
        page,
        limit,
        min_age,
        max_age,
    })
}

/// GET /users
pub async fn users_get(
    State(state): State<AppState>,
    query: Result<Query<ListUsersQuery>, QueryRejection>,
) -> ApiResult<UserListResponse> {
    let Query(query) =
        query.map_err(|_| ApiError::bad_request("page and limit must be positive integers"))?;
    let params = parse_list_query(&query, &state.config.api)?;

    let page = state.users.list_users(params).await?;

    Ok(ApiResponse::success(UserListResponse {
        page: params.page,
        limit: params.limit,
        total: page.total,
        users: page.users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// GET /users/:id
pub async fn user_get(State(state): State<AppState>, UserId(id): UserId) -> ApiResult<UserResponse> {
    let user = state.users.get_user(id).await?;
    Ok(ApiResponse::success(user.into()))
}

/// PUT /users/:id
pub async fn user_put(
    State(state): State<AppState>,
    UserId(id): UserId,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<UserResponse> {
    let user = state.users.update_user(id, &req).await?;
    Ok(ApiResponse::success(user.into()))
}

/// DELETE /users/:id
pub async fn user_delete(State(state): State<AppState>, UserId(id): UserId) -> ApiResult<()> {
    state.users.delete_user(id).await?;
    Ok(ApiResponse::no_content())
}
