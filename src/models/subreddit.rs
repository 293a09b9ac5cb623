//! # 서브레딧 모델 정의
//!
//! - `Subreddit`: DB의 `subreddits` 테이블 한 행(row)
//! - `CreateSubredditRequest`: 새 서브레딧 생성 시 입력

use serde::{Deserialize, Serialize};

/// 서브레딧 엔티티
///
/// 점수순 게시물 목록(`RankedPost`)에서도 중첩 객체로 그대로 사용됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subreddit {
    pub id: String,
    /// 서브레딧 이름 (유니크)
    pub name: String,
    /// 설명. 크롤러가 만드는 서브레딧은 설명이 없습니다.
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// 서브레딧 생성 요청
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubredditRequest {
    pub name: String,
    pub description: Option<String>,
}
