//! Quiz endpoints: questions, scoring, result submission and lookup

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use quiz_common::compatibility::compatible_types;
use quiz_common::questions::{Question, QUESTIONS};
use quiz_common::result::ResultSubmission;
use quiz_common::scoring::score_tags;
use quiz_common::{time, PersonalityType, QuizResult};

use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub answers: Vec<String>,
}

/// Scored result with display text for the result screen
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub personality_type: PersonalityType,
    pub score: u32,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CompatibilityResponse {
    #[serde(rename = "type")]
    pub personality_type: String,
    pub compatible: &'static [PersonalityType],
}

/// GET /api/quiz/questions
pub async fn get_questions() -> Json<&'static [Question]> {
    Json(&QUESTIONS[..])
}

/// POST /api/quiz/score
///
/// Scores answers without storing anything.
pub async fn score_answers(
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> ApiResult<Json<ScoreResponse>> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let scored = score_tags(&request.answers)?;

    Ok(Json(ScoreResponse {
        personality_type: scored.personality_type,
        score: scored.score,
        title: scored.personality_type.title(),
        description: scored.personality_type.description(),
    }))
}

/// POST /api/quiz/submit
///
/// Validates the body, fills defaults, then writes the result record and the
/// leaderboard entry.
pub async fn submit_result(
    State(state): State<AppState>,
    payload: Result<Json<ResultSubmission>, JsonRejection>,
) -> ApiResult<Json<SubmitResponse>> {
    let Json(submission) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let result = submission.into_result(state.default_user_id, time::now_millis())?;

    state.repository.submit(&result).await?;

    Ok(Json(SubmitResponse { success: true }))
}

/// GET /api/quiz/results/:user_id
///
/// Latest stored result record for one user.
pub async fn get_user_result(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<QuizResult>> {
    state
        .repository
        .find_by_user(user_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No result for user {}", user_id)))
}

/// GET /api/quiz/compatibility/:type
///
/// Unknown types get an empty list rather than an error.
pub async fn get_compatibility(Path(personality_type): Path<String>) -> Json<CompatibilityResponse> {
    let compatible = compatible_types(&personality_type);
    Json(CompatibilityResponse {
        personality_type,
        compatible,
    })
}

pub fn quiz_routes() -> Router<AppState> {
    Router::new()
        .route("/api/quiz/questions", get(get_questions))
        .route("/api/quiz/score", post(score_answers))
        .route("/api/quiz/submit", post(submit_result))
        .route("/api/quiz/results/:user_id", get(get_user_result))
        .route("/api/quiz/compatibility/:type", get(get_compatibility))
}
