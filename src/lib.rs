pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod services;
pub mod state;
pub mod testing;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

pub use state::AppState;

/// Build the full HTTP application for the given state
pub fn app(state: AppState) -> Router {
    let enable_cors = state.config.api.enable_cors;

    let router = Router::new()
        // Public
        .merge(public_routes())
        // Bearer token required
        .merge(protected_routes(state.clone()))
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

fn public_routes() -> Router<AppState> {
    use handlers::public::{auth, system, users};

    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/auth/login", post(auth::login_post))
        .route("/users", post(users::register_post))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::{orders, users};

    Router::new()
        .route("/users", get(users::users_get))
        .route(
            "/users/:id",
            get(users::user_get)
                .put(users::user_put)
                .delete(users::user_delete),
        )
        .route(
            "/users/:id/orders",
            get(orders::orders_get).post(orders::orders_post),
        )
        // route_layer: unmatched paths stay 404 instead of 401
        .route_layer(from_fn_with_state(state, middleware::jwt_auth_middleware))
}
