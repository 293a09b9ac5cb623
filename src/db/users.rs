use crate::error::AppError;
use crate::models::user::{CreateUserRequest, User};
use crate::services::password;
use sqlx::SqlitePool;

/// 사용자를 만들고 생성된 id를 반환합니다.
///
/// 비밀번호는 저장 전에 해싱되며, 평문은 저장되지도 로그에 남지도 않습니다.
/// 사용자 이름이 이미 있으면 `AppError::DuplicateUsername`.
pub async fn create_user(pool: &SqlitePool, req: &CreateUserRequest) -> Result<String, AppError> {
    let password_hash = password::hash_password_blocking(req.password.clone()).await?;
    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query(
        r#"
        INSERT INTO users (id, username, password)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&req.username)
    .bind(&password_hash)
    .execute(pool)
    .await
    .map_err(|e| AppError::from_store(e, || AppError::DuplicateUsername(req.username.clone())))?;

    tracing::debug!(user_id = %id, username = %req.username, "user created");
    Ok(id)
}

pub async fn find_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password, created_at, updated_at
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_user_by_id(pool: &SqlitePool, id: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password, created_at, updated_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
