// handlers/protected/orders.rs - /users/:id/orders handlers
//
// OwnerPath runs before the body extractor: a caller touching someone else's
// orders gets 403 without the body being read.

use axum::extract::State;

use crate::api::{CreateOrderRequest, OrderResponse};
use crate::extractors::{OwnerPath, ValidatedJson};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /users/:id/orders
pub async fn orders_post(
    State(state): State<AppState>,
    OwnerPath(user_id): OwnerPath,
    ValidatedJson(req): ValidatedJson<CreateOrderRequest>,
) -> ApiResult<OrderResponse> {
    let order = state.orders.create_order(user_id, &req).await?;
    Ok(ApiResponse::created(order.into()))
}

/// GET /users/:id/orders, newest first
pub async fn orders_get(
    State(state): State<AppState>,
    OwnerPath(user_id): OwnerPath,
) -> ApiResult<Vec<OrderResponse>> {
    let orders = state.orders.list_orders(user_id).await?;
    Ok(ApiResponse::success(
        orders.into_iter().map(OrderResponse::from).collect(),
    ))
}
