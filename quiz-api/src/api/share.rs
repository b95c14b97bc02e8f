//! Share image endpoints

use axum::{
    extract::{Path, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::share_card::render_share_card;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ShareQuery {
    pub personality: Option<String>,
}

fn svg_response(body: String) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "public, max-age=300"),
        ],
        body,
    )
        .into_response()
}

/// GET /api/share-image/:fid?personality=
pub async fn share_image(Path(fid): Path<String>, Query(query): Query<ShareQuery>) -> Response {
    svg_response(render_share_card(&fid, query.personality.as_deref()))
}

/// GET /api/share-image/:fid/:personality
pub async fn share_image_for_type(Path((fid, personality)): Path<(String, String)>) -> Response {
    svg_response(render_share_card(&fid, Some(&personality)))
}

pub fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/api/share-image/:fid", get(share_image))
        .route("/api/share-image/:fid/:personality", get(share_image_for_type))
}
