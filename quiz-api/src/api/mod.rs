//! HTTP API handlers for quiz-api

pub mod health;
pub mod leaderboard;
pub mod quiz;
pub mod share;

pub use health::health_routes;
pub use leaderboard::leaderboard_routes;
pub use quiz::quiz_routes;
pub use share::share_routes;
