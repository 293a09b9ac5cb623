//! # 서브레딧 데이터베이스 쿼리 모듈
//!
//! ## 테이블 구조
//! - `subreddits`: (id, name UNIQUE, description, created_at, updated_at)

use super::LISTING_LIMIT;
use crate::error::AppError;
use crate::models::subreddit::{CreateSubredditRequest, Subreddit};
use sqlx::SqlitePool;

/// 새 서브레딧을 만들고 생성된 id를 반환합니다.
///
/// 이름의 유니크 제약 위반은 `AppError::DuplicateSubredditName`으로 번역되고,
/// 그 밖의 저장소 에러는 `AppError::Database`로 그대로 전파됩니다.
pub async fn create_subreddit(
    pool: &SqlitePool,
    req: &CreateSubredditRequest,
) -> Result<String, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query("INSERT INTO subreddits (id, name, description) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(&req.name)
        .bind(&req.description) // None이면 SQL NULL
        .execute(pool)
        .await
        .map_err(|e| AppError::from_store(e, || AppError::DuplicateSubredditName(req.name.clone())))?;

    tracing::debug!(subreddit_id = %id, name = %req.name, "subreddit created");
    Ok(id)
}

/// 이름으로 서브레딧 하나를 조회합니다.
pub async fn find_subreddit_by_name(
    pool: &SqlitePool,
    name: &str,
) -> Result<Option<Subreddit>, AppError> {
    let subreddit = sqlx::query_as::<_, Subreddit>(
        "SELECT id, name, description, created_at, updated_at FROM subreddits WHERE name = ?",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(subreddit)
}

/// 최근에 만들어진 순서로 서브레딧을 최대 25개 조회합니다.
///
/// 같은 밀리초에 만들어진 행은 id(UUIDv7, 시간순) 내림차순으로 정렬됩니다.
pub async fn list_subreddits(pool: &SqlitePool) -> Result<Vec<Subreddit>, AppError> {
    let subreddits = sqlx::query_as::<_, Subreddit>(
        r#"
        SELECT id, name, description, created_at, updated_at
        FROM subreddits
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(LISTING_LIMIT)
    .fetch_all(pool)
    .await?;

    Ok(subreddits)
}
