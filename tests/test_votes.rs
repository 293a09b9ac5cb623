//! 투표 업서트 통합 테스트

mod common;

use common::{count_rows, seed_post, seed_subreddit, seed_user, test_pool};
use reddit_api::db;
use reddit_api::error::AppError;
use reddit_api::models::CreateVoteRequest;

fn vote_req(post_id: &str, user_id: &str, direction: i64) -> CreateVoteRequest {
    CreateVoteRequest {
        post_id: post_id.to_string(),
        user_id: user_id.to_string(),
        vote_direction: direction,
    }
}

async fn seed(pool: &sqlx::SqlitePool) -> (String, String) {
    let user_id = seed_user(pool, "voter").await;
    let subreddit_id = seed_subreddit(pool, "colors").await;
    let post_id = seed_post(pool, &user_id, &subreddit_id, "votable").await;
    (post_id, user_id)
}

#[tokio::test]
async fn test_revote_overwrites_direction() {
    let pool = test_pool().await;
    let (post_id, user_id) = seed(&pool).await;

    db::create_vote(&pool, &vote_req(&post_id, &user_id, 1)).await.unwrap();
    db::create_vote(&pool, &vote_req(&post_id, &user_id, -1)).await.unwrap();

    assert_eq!(count_rows(&pool, "votes").await, 1);
    let vote = db::find_vote(&pool, &post_id, &user_id).await.unwrap().unwrap();
    assert_eq!(vote.vote_direction, -1);
}

#[tokio::test]
async fn test_cancel_vote_keeps_row_with_zero() {
    let pool = test_pool().await;
    let (post_id, user_id) = seed(&pool).await;

    db::create_vote(&pool, &vote_req(&post_id, &user_id, 1)).await.unwrap();
    db::create_vote(&pool, &vote_req(&post_id, &user_id, 0)).await.unwrap();

    let vote = db::find_vote(&pool, &post_id, &user_id).await.unwrap().unwrap();
    assert_eq!(vote.vote_direction, 0);

    let posts = db::list_ranked_posts(&pool).await.unwrap();
    assert_eq!(posts[0].vote_score, 0);
}

#[tokio::test]
async fn test_invalid_direction_is_rejected_before_store() {
    let pool = test_pool().await;
    let (post_id, user_id) = seed(&pool).await;

    let err = db::create_vote(&pool, &vote_req(&post_id, &user_id, 2))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(count_rows(&pool, "votes").await, 0);
}

#[tokio::test]
async fn test_invalid_direction_does_not_touch_existing_vote() {
    let pool = test_pool().await;
    let (post_id, user_id) = seed(&pool).await;

    db::create_vote(&pool, &vote_req(&post_id, &user_id, 1)).await.unwrap();
    assert!(db::create_vote(&pool, &vote_req(&post_id, &user_id, -5)).await.is_err());

    let vote = db::find_vote(&pool, &post_id, &user_id).await.unwrap().unwrap();
    assert_eq!(vote.vote_direction, 1);
}

#[tokio::test]
async fn test_vote_for_missing_post_is_a_store_error() {
    let pool = test_pool().await;
    let user_id = seed_user(&pool, "voter").await;

    let err = db::create_vote(&pool, &vote_req("no-such-post", &user_id, 1))
        .await
        .unwrap_err();

    // 외래 키 위반은 중복으로 번역되지 않고 그대로 전파됩니다.
    assert!(matches!(err, AppError::Database(_)));
}

#[tokio::test]
async fn test_concurrent_votes_from_same_user_leave_one_row() {
    let pool = test_pool().await;
    let (post_id, user_id) = seed(&pool).await;

    let mut handles = Vec::new();
    for direction in [1, -1, 1, 0, -1, 1] {
        let pool = pool.clone();
        let req = vote_req(&post_id, &user_id, direction);
        handles.push(tokio::spawn(async move { db::create_vote(&pool, &req).await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(count_rows(&pool, "votes").await, 1);
}
