//! # 게시물 API 라우트 핸들러
//!
//! - `GET  /api/v1/posts` → 투표 점수순 게시물 25개 (작성자/서브레딧 중첩 객체 포함)
//! - `POST /api/v1/posts` → 새 게시물 생성. `subreddit_id`가 없으면 400

use crate::{
    db,
    error::AppError,
    models::{CreatePostRequest, CreatedResponse},
    routes::{AppJson, AppState},
};
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

/// `GET /api/v1/posts` → `{ "posts": [...] }`
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let posts = db::list_ranked_posts(&state.pool).await?;
    Ok(Json(json!({ "posts": posts })))
}

/// `POST /api/v1/posts` + `{ "user_id": "...", "subreddit_id": "...", "title": "...", "url": "..." }`
pub async fn create_post(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let id = db::create_post(&state.pool, &req).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}
