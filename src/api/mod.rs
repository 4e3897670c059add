//! HTTP surface: routes, handlers, auth extraction and error mapping.

pub mod error;
pub mod extract;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::auth::TokenIssuer;
use crate::clients::{RelationshipManager, UserClient};

/// Everything a handler needs, injected through the router state.
pub struct AppState {
    pub users: UserClient,
    pub relationships: RelationshipManager,
    pub tokens: TokenIssuer,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/users", post(handlers::create).get(handlers::list))
        .route("/api/users/login", post(handlers::login))
        .route("/api/users/profile", get(handlers::profile))
        // Writes, so PUT rather than the GET older clients used.
        .route("/api/users/follow", put(handlers::follow))
        .route("/api/users/unfollow", put(handlers::unfollow))
        .route(
            "/api/users/{id}",
            get(handlers::read).put(handlers::update).delete(handlers::remove),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

impl AppState {
    pub fn new(system: &crate::app_system::UserSystem, config: &crate::config::Config) -> Self {
        Self {
            users: system.user_client.clone(),
            relationships: system.relationships.clone(),
            tokens: TokenIssuer::new(&config.jwt_secret, config.token_ttl_days),
        }
    }
}
