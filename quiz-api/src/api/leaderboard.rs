//! Leaderboard endpoints
//!
//! Read failures degrade to an empty list instead of an error response, so the
//! client always has something to render.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::error;

use quiz_common::leaderboard::{LeaderboardEntry, LeaderboardFilter};
use quiz_common::QuizResult;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    /// Kept as text so a bad value falls back to the default instead of failing
    pub limit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserTypesQuery {
    #[serde(rename = "type")]
    pub personality_type: Option<String>,
    pub compatible: Option<String>,
    #[serde(rename = "userFid")]
    pub user_fid: Option<String>,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

impl UserTypesQuery {
    /// Requesting user; `userFid` wins when both names are given
    fn requesting_user(&self) -> Option<&str> {
        self.user_fid.as_deref().or(self.user_id.as_deref())
    }
}

/// Parse `limit`, using `default` when absent or not a non-negative integer
fn parse_limit(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|l| l.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

/// GET /api/quiz/leaderboard?limit=N
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Json<Vec<LeaderboardEntry>> {
    let limit = parse_limit(query.limit.as_deref(), state.leaderboard_limit);

    match state.leaderboard.list(limit).await {
        Ok(entries) => Json(entries),
        Err(e) => {
            error!("Error fetching leaderboard: {}", e);
            Json(Vec::new())
        }
    }
}

/// GET /api/quiz/user-types?type=&compatible=&userFid=
pub async fn get_user_types(
    State(state): State<AppState>,
    Query(query): Query<UserTypesQuery>,
) -> Json<Vec<QuizResult>> {
    let filter = LeaderboardFilter::from_params(
        query.personality_type.as_deref(),
        query.compatible.as_deref(),
    );

    match state
        .leaderboard
        .query(&filter, query.requesting_user())
        .await
    {
        Ok(entries) => Json(entries),
        Err(e) => {
            error!("Error fetching user types: {}", e);
            Json(Vec::new())
        }
    }
}

pub fn leaderboard_routes() -> Router<AppState> {
    Router::new()
        .route("/api/quiz/leaderboard", get(get_leaderboard))
        .route("/api/quiz/user-types", get(get_user_types))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_types_query(uri_query: &str) -> UserTypesQuery {
        let uri: axum::http::Uri = format!("/api/quiz/user-types?{}", uri_query).parse().unwrap();
        Query::<UserTypesQuery>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn test_requesting_user_names() {
        assert_eq!(user_types_query("userFid=42").requesting_user(), Some("42"));
        assert_eq!(user_types_query("userId=7").requesting_user(), Some("7"));
        assert_eq!(
            user_types_query("userId=7&userFid=42").requesting_user(),
            Some("42")
        );
        assert_eq!(user_types_query("type=builder").requesting_user(), None);
    }

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit(None, 50), 50);
        assert_eq!(parse_limit(Some("10"), 50), 10);
        assert_eq!(parse_limit(Some(" 7 "), 50), 7);
        assert_eq!(parse_limit(Some("0"), 50), 0);
        assert_eq!(parse_limit(Some("-3"), 50), 50);
        assert_eq!(parse_limit(Some("ten"), 50), 50);
    }
}
