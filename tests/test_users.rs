//! 사용자 / 서브레딧 생성 통합 테스트

mod common;

use common::{count_rows, test_pool};
use reddit_api::db;
use reddit_api::error::AppError;
use reddit_api::models::{CreateSubredditRequest, CreateUserRequest};
use reddit_api::services::password::verify_password;

fn user(username: &str, password: &str) -> CreateUserRequest {
    CreateUserRequest {
        username: username.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_create_user_stores_only_a_hash() {
    let pool = test_pool().await;

    let id = db::create_user(&pool, &user("charles", "abc123")).await.unwrap();

    let stored = db::find_user_by_id(&pool, &id).await.unwrap().unwrap();
    assert_eq!(stored.username, "charles");
    assert_ne!(stored.password, "abc123");
    assert!(stored.password.starts_with("$argon2id$"));
    assert!(verify_password("abc123", &stored.password).unwrap());
    assert!(!stored.created_at.is_empty());
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    let pool = test_pool().await;

    let first = db::create_user(&pool, &user("charles", "abc123")).await;
    assert!(first.is_ok());

    let second = db::create_user(&pool, &user("charles", "other-password")).await;
    match second {
        Err(AppError::DuplicateUsername(name)) => assert_eq!(name, "charles"),
        other => panic!("expected DuplicateUsername, got {:?}", other),
    }

    assert_eq!(count_rows(&pool, "users").await, 1);
}

#[tokio::test]
async fn test_find_user_by_username_missing() {
    let pool = test_pool().await;
    assert!(db::find_user_by_username(&pool, "nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_subreddit_name_is_rejected() {
    let pool = test_pool().await;
    let req = CreateSubredditRequest {
        name: "colors".to_string(),
        description: Some("bla".to_string()),
    };

    let id = db::create_subreddit(&pool, &req).await.unwrap();
    let err = db::create_subreddit(&pool, &req).await.unwrap_err();

    assert!(matches!(err, AppError::DuplicateSubredditName(ref name) if name == "colors"));
    assert!(err.is_duplicate());
    assert_eq!(count_rows(&pool, "subreddits").await, 1);

    let stored = db::find_subreddit_by_name(&pool, "colors").await.unwrap().unwrap();
    assert_eq!(stored.id, id);
    assert_eq!(stored.description.as_deref(), Some("bla"));
}

#[tokio::test]
async fn test_other_store_failures_are_not_translated() {
    let pool = test_pool().await;
    pool.close().await;

    let err = db::create_subreddit(
        &pool,
        &CreateSubredditRequest {
            name: "closed".to_string(),
            description: None,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::Database(_)));
}

#[tokio::test]
async fn test_list_subreddits_newest_first_limited_to_25() {
    let pool = test_pool().await;

    for i in 0..30 {
        let id = common::seed_subreddit(&pool, &format!("sub{:02}", i)).await;
        // 같은 밀리초에 생성될 수 있으므로 생성 시각을 명시적으로 벌려 둡니다.
        sqlx::query("UPDATE subreddits SET created_at = ? WHERE id = ?")
            .bind(format!("2026-01-01T00:00:{:02}.000Z", i))
            .bind(&id)
            .execute(&pool)
            .await
            .unwrap();
    }

    let subreddits = db::list_subreddits(&pool).await.unwrap();
    assert_eq!(subreddits.len(), 25);
    assert_eq!(subreddits[0].name, "sub29");
    assert_eq!(subreddits[24].name, "sub05");
}
