//! quiz-api library - HTTP surface of the Web3 personality quiz
//!
//! Exposes the router and state for the binary and for integration tests.

use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use quiz_common::config::ServiceConfig;
use quiz_common::leaderboard::LeaderboardService;
use quiz_common::repository::ResultRepository;
use quiz_common::store::{KeySpace, KeyValueStore};

pub mod api;
pub mod cli;
pub mod error;
pub mod share_card;

pub use crate::error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub repository: ResultRepository,
    pub leaderboard: LeaderboardService,
    /// User id recorded for submissions without one
    pub default_user_id: i64,
    /// Leaderboard size when the request gives no `limit`
    pub leaderboard_limit: usize,
}

impl AppState {
    /// Wire the repository and leaderboard to one store
    pub fn new(store: Arc<dyn KeyValueStore>, config: &ServiceConfig) -> Self {
        let keys = KeySpace::new(config.key_namespace.clone());
        Self {
            repository: ResultRepository::new(store.clone(), keys.clone()),
            leaderboard: LeaderboardService::new(store, keys)
                .with_query_window(config.query_window),
            default_user_id: config.default_user_id,
            leaderboard_limit: config.leaderboard_limit,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::quiz_routes())
        .merge(api::leaderboard_routes())
        .merge(api::share_routes())
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // The quiz runs inside a client frame served from another origin
        .layer(CorsLayer::permissive())
}
