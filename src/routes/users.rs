use crate::{
    db,
    error::AppError,
    models::{CreateUserRequest, CreatedResponse, UserResponse},
    routes::{AppJson, AppState},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

/// `POST /api/v1/users` + `{ "username": "...", "password": "..." }`
///
/// 사용자 이름이 이미 있으면 409.
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    if req.username.trim().is_empty() {
        return Err(AppError::Validation("username must not be empty".to_string()));
    }
    if req.password.is_empty() {
        return Err(AppError::Validation("password must not be empty".to_string()));
    }

    let id = db::create_user(&state.pool, &req).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// `GET /api/v1/users/{username}` — 비밀번호 해시는 응답에 포함되지 않습니다.
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user = db::find_user_by_username(&state.pool, &username)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(user.into()))
}
