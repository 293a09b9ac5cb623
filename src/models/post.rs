//! # 게시물 모델 정의
//!
//! - `Post`: DB의 `posts` 테이블 한 행(row)
//! - `CreatePostRequest`: 게시물 생성 입력
//! - `RankedPostRow` → `RankedPost`: 점수순 목록 쿼리의 평평한(flat) 행과,
//!   그것을 user / subreddit 중첩 객체로 재구성한 응답 형태

use serde::{Deserialize, Serialize};

use super::{Subreddit, UserResponse};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub subreddit_id: String,
    pub title: String,
    pub url: String,
    pub created_at: String,
    pub updated_at: String,
}

/// 게시물 생성 요청
///
/// `subreddit_id`는 필수지만 Option으로 받습니다.
/// 빠진 경우를 역직렬화 에러가 아닌 `AppError::Validation`으로 보고하기 위해서입니다.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    pub user_id: String,
    pub title: String,
    pub url: String,
    pub subreddit_id: Option<String>,
}

/// 점수순 목록 쿼리의 결과 행
///
/// JOIN 결과는 컬럼 이름이 겹치므로(`created_at` 등) SQL에서 별칭을 붙여 평평하게 받습니다.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RankedPostRow {
    pub id: String,
    pub title: String,
    pub url: String,
    pub created_at: String,
    pub updated_at: String,
    pub user_id: String,
    pub username: String,
    pub user_created_at: String,
    pub user_updated_at: String,
    pub subreddit_id: String,
    pub subreddit_name: String,
    pub subreddit_description: Option<String>,
    pub subreddit_created_at: String,
    pub subreddit_updated_at: String,
    pub vote_score: i64,
}

/// 점수순 게시물 목록의 한 항목
///
/// ```json
/// {
///   "id": "...", "title": "...", "url": "...", "created_at": "...", "updated_at": "...",
///   "user": { "id": "...", "username": "...", "created_at": "...", "updated_at": "..." },
///   "subreddit": { "id": "...", "name": "...", "description": null, ... },
///   "vote_score": 2
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPost {
    pub id: String,
    pub title: String,
    pub url: String,
    pub created_at: String,
    pub updated_at: String,
    pub user: UserResponse,
    pub subreddit: Subreddit,
    pub vote_score: i64,
}

impl From<RankedPostRow> for RankedPost {
    fn from(row: RankedPostRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            url: row.url,
            created_at: row.created_at,
            updated_at: row.updated_at,
            user: UserResponse {
                id: row.user_id,
                username: row.username,
                created_at: row.user_created_at,
                updated_at: row.user_updated_at,
            },
            subreddit: Subreddit {
                id: row.subreddit_id,
                name: row.subreddit_name,
                description: row.subreddit_description,
                created_at: row.subreddit_created_at,
                updated_at: row.subreddit_updated_at,
            },
            vote_score: row.vote_score,
        }
    }
}
