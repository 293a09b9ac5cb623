//! 통합 테스트 공용 헬퍼

#![allow(dead_code)]

use reddit_api::db;
use sqlx::SqlitePool;

/// 스키마가 적용된 빈 인메모리 DB
pub async fn test_pool() -> SqlitePool {
    db::connect_in_memory().await.unwrap()
}

/// 해싱을 거치지 않고 사용자를 바로 넣습니다. (비밀번호 해싱 자체를 보지 않는 테스트용)
pub async fn seed_user(pool: &SqlitePool, username: &str) -> String {
    let id = uuid::Uuid::now_v7().to_string();
    sqlx::query("INSERT INTO users (id, username, password) VALUES (?, ?, 'not-a-real-hash')")
        .bind(&id)
        .bind(username)
        .execute(pool)
        .await
        .unwrap();
    id
}

pub async fn seed_subreddit(pool: &SqlitePool, name: &str) -> String {
    db::create_subreddit(
        pool,
        &reddit_api::models::CreateSubredditRequest {
            name: name.to_string(),
            description: None,
        },
    )
    .await
    .unwrap()
}

pub async fn seed_post(pool: &SqlitePool, user_id: &str, subreddit_id: &str, title: &str) -> String {
    db::create_post(
        pool,
        &reddit_api::models::CreatePostRequest {
            user_id: user_id.to_string(),
            title: title.to_string(),
            url: format!("https://example.com/{}", title),
            subreddit_id: Some(subreddit_id.to_string()),
        },
    )
    .await
    .unwrap()
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap();
    count
}
