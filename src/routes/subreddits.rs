//! # 서브레딧 API 라우트 핸들러
//!
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/v1/subreddits | `list_subreddits` | 최신순 서브레딧 25개 |
//! | POST | /api/v1/subreddits | `create_subreddit` | 새 서브레딧 생성 |

use crate::{
    db,
    error::AppError,
    models::{CreateSubredditRequest, CreatedResponse},
    routes::{AppJson, AppState},
};
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

/// `GET /api/v1/subreddits` → `{ "subreddits": [...] }`
pub async fn list_subreddits(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let subreddits = db::list_subreddits(&state.pool).await?;
    Ok(Json(json!({ "subreddits": subreddits })))
}

/// `POST /api/v1/subreddits` + `{ "name": "...", "description": "..." }`
///
/// 같은 이름이 이미 있으면 409.
pub async fn create_subreddit(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateSubredditRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }

    let id = db::create_subreddit(&state.pool, &req).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}
