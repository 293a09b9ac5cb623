//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! 각 하위 모듈은 특정 도메인의 데이터 타입을 담당합니다:
//! - `user`: 사용자(User) 관련 구조체
//! - `subreddit`: 서브레딧(Subreddit) 관련 구조체
//! - `post`: 게시물(Post)과 점수순 목록(RankedPost) 구조체
//! - `vote`: 투표(Vote)와 투표 방향(VoteDirection)

pub mod post;
pub mod subreddit;
pub mod user;
pub mod vote;

pub use post::*;
pub use subreddit::*;
pub use user::*;
pub use vote::*;

use serde::Serialize;

/// 생성 API의 공통 응답 — 새로 만들어진 레코드의 식별자만 돌려줍니다.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}
