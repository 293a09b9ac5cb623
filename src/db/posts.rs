//! # 게시물 데이터베이스 쿼리 모듈
//!
//! 게시물 생성과 투표 점수순 목록 조회를 담당합니다.

use super::LISTING_LIMIT;
use crate::error::AppError;
use crate::models::post::{CreatePostRequest, Post, RankedPost, RankedPostRow};
use sqlx::SqlitePool;

/// 새 게시물을 만들고 생성된 id를 반환합니다.
///
/// 필수 필드(`user_id`, `subreddit_id`, `title`, `url`) 중 하나라도 없거나 공백뿐이면
/// 저장소를 호출하지 않고 `AppError::Validation`을 반환합니다.
/// `user_id`/`subreddit_id`가 실제로 존재하는지는 저장소의 외래 키가 검사합니다.
pub async fn create_post(pool: &SqlitePool, req: &CreatePostRequest) -> Result<String, AppError> {
    let subreddit_id = match req.subreddit_id.as_deref() {
        Some(id) if !id.trim().is_empty() => id,
        _ => return Err(AppError::Validation("subreddit_id is required".to_string())),
    };
    require_field("user_id", &req.user_id)?;
    require_field("title", &req.title)?;
    require_field("url", &req.url)?;

    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query(
        r#"
        INSERT INTO posts (id, user_id, subreddit_id, title, url)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&req.user_id)
    .bind(subreddit_id)
    .bind(&req.title)
    .bind(&req.url)
    .execute(pool)
    .await?;

    tracing::debug!(post_id = %id, subreddit_id = %subreddit_id, "post created");
    Ok(id)
}

// 비어 있거나 공백뿐인 문자열은 "없음"으로 봅니다.
fn require_field(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(())
}

pub async fn get_post(pool: &SqlitePool, id: &str) -> Result<Option<Post>, AppError> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, user_id, subreddit_id, title, url, created_at, updated_at
        FROM posts
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// 투표 점수가 높은 순서로 게시물을 최대 25개 조회합니다.
///
/// 점수는 게시물에 달린 모든 투표 방향의 합입니다.
/// 투표가 하나도 없는 게시물도 LEFT JOIN으로 포함되며, SUM이 NULL이므로 0으로 취급합니다.
/// 점수가 같으면 게시물 id 오름차순으로 정렬합니다.
///
/// ```sql
/// posts ──→ users        (작성자, 1:1)
///       ──→ subreddits   (소속, 1:1)
///       ←── votes        (0..N, LEFT JOIN 후 GROUP BY)
/// ```
pub async fn list_ranked_posts(pool: &SqlitePool) -> Result<Vec<RankedPost>, AppError> {
    let rows = sqlx::query_as::<_, RankedPostRow>(
        r#"
        SELECT
            p.id,
            p.title,
            p.url,
            p.created_at,
            p.updated_at,
            u.id AS user_id,
            u.username,
            u.created_at AS user_created_at,
            u.updated_at AS user_updated_at,
            s.id AS subreddit_id,
            s.name AS subreddit_name,
            s.description AS subreddit_description,
            s.created_at AS subreddit_created_at,
            s.updated_at AS subreddit_updated_at,
            COALESCE(SUM(v.vote_direction), 0) AS vote_score
        FROM posts AS p
        JOIN users AS u ON u.id = p.user_id
        JOIN subreddits AS s ON s.id = p.subreddit_id
        LEFT JOIN votes AS v ON v.post_id = p.id
        GROUP BY p.id
        ORDER BY vote_score DESC, p.id ASC
        LIMIT ?
        "#,
    )
    .bind(LISTING_LIMIT)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(RankedPost::from).collect())
}
