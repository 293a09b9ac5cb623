//! # 데모
//!
//! 데이터 접근 계층의 쓰기/읽기 경로를 한 번씩 실행하고 결과를 로그로 남깁니다.
//! 사용자 → 서브레딧 → 게시물 → 투표 순으로 만들고, 마지막에 두 목록을 조회합니다.

use serde::Serialize;
use sqlx::SqlitePool;

use crate::db;
use crate::error::AppError;
use crate::models::{
    CreatePostRequest, CreateSubredditRequest, CreateUserRequest, CreateVoteRequest, RankedPost,
    Subreddit,
};

/// 데모 실행 결과
#[derive(Debug, Serialize)]
pub struct DemoOutput {
    pub user_id: String,
    pub subreddit_id: String,
    pub post_id: String,
    pub posts: Vec<RankedPost>,
    pub subreddits: Vec<Subreddit>,
}

/// 데모를 실행합니다.
///
/// 같은 DB에서 여러 번 실행할 수 있도록 사용자와 서브레딧은 이미 있으면 기존 것을 씁니다.
pub async fn run(pool: &SqlitePool) -> Result<DemoOutput, AppError> {
    let user_req = CreateUserRequest {
        username: "charles".to_string(),
        password: "abc123".to_string(),
    };
    let user_id = match db::create_user(pool, &user_req).await {
        Ok(id) => id,
        Err(AppError::DuplicateUsername(_)) => db::find_user_by_username(pool, &user_req.username)
            .await?
            .ok_or(AppError::NotFound)?
            .id,
        Err(e) => return Err(e),
    };
    tracing::info!("User ready! id={}", user_id);

    let subreddit_req = CreateSubredditRequest {
        name: "colors".to_string(),
        description: Some("Everything about colors".to_string()),
    };
    let subreddit_id = match db::create_subreddit(pool, &subreddit_req).await {
        Ok(id) => id,
        Err(AppError::DuplicateSubredditName(_)) => {
            db::find_subreddit_by_name(pool, &subreddit_req.name)
                .await?
                .ok_or(AppError::NotFound)?
                .id
        }
        Err(e) => return Err(e),
    };
    tracing::info!("Subreddit ready! id={}", subreddit_id);

    let post_id = db::create_post(
        pool,
        &CreatePostRequest {
            user_id: user_id.clone(),
            title: "Hello Reddit! This is my first post".to_string(),
            url: "http://www.digg.com".to_string(),
            subreddit_id: Some(subreddit_id.clone()),
        },
    )
    .await?;
    tracing::info!("New post created! id={}", post_id);

    db::create_vote(
        pool,
        &CreateVoteRequest {
            post_id: post_id.clone(),
            user_id: user_id.clone(),
            vote_direction: 1,
        },
    )
    .await?;
    tracing::info!("Vote recorded");

    let posts = db::list_ranked_posts(pool).await?;
    let subreddits = db::list_subreddits(pool).await?;

    Ok(DemoOutput {
        user_id,
        subreddit_id,
        post_id,
        posts,
        subreddits,
    })
}
