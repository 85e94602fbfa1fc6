//! Route definitions for the EntityHub HTTP API.
//!
//! Every collection is mounted under `/api` with the same set of routes;
//! the state passes the matching adapter to the generic handlers.

use std::time::Duration;

use axum::http::StatusCode;
use axum::{Router, middleware as axum_middleware, routing::get};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use entityhub_entity::{Team, User};

use crate::dto::{TeamMapper, UserMapper};
use crate::handlers::{self, entity};
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(user_routes())
        .merge(team_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    Router::new()
        .nest("/api", api_routes)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// User collection plus login lookup
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(entity::list::<User, UserMapper>).post(entity::create::<User, UserMapper>),
        )
        .route("/users/search", get(entity::search::<User, UserMapper>))
        .route(
            "/users/by-login/{login}",
            get(handlers::user::get_by_login),
        )
        .route(
            "/users/{id}",
            get(entity::get_one::<User, UserMapper>)
                .put(entity::update::<User, UserMapper>)
                .delete(entity::remove::<User, UserMapper>),
        )
}

/// Team collection
fn team_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/teams",
            get(entity::list::<Team, TeamMapper>).post(entity::create::<Team, TeamMapper>),
        )
        .route("/teams/search", get(entity::search::<Team, TeamMapper>))
        .route(
            "/teams/{id}",
            get(entity::get_one::<Team, TeamMapper>)
                .put(entity::update::<Team, TeamMapper>)
                .delete(entity::remove::<Team, TeamMapper>),
        )
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
