//! # 라우트 핸들러 모듈
//!
//! 데이터 접근 계층을 HTTP로 노출하는 핸들러 함수들입니다.
//!
//! 각 하위 모듈:
//! - `extract`: 에러를 `AppError`로 돌려주는 JSON 본문 추출기
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `users`: 사용자 생성/조회
//! - `subreddits`: 서브레딧 생성/최신순 목록
//! - `posts`: 게시물 생성/투표 점수순 목록
//! - `votes`: 투표 업서트

pub mod extract;
pub mod health;
pub mod posts;
pub mod subreddits;
pub mod users;
pub mod votes;

pub use extract::AppJson;
pub use health::*;
pub use posts::*;
pub use subreddits::*;
pub use users::*;
pub use votes::*;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// SqlitePool은 내부적으로 Arc를 사용하므로 clone해도 같은 풀을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

/// `/api/v1` 아래에 중첩될 API 라우터를 만듭니다.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/{username}", get(get_user))
        .route("/subreddits", get(list_subreddits).post(create_subreddit))
        .route("/posts", get(list_posts).post(create_post))
        .route("/votes", post(create_vote))
        .route("/health", get(health_check))
        .with_state(state)
}
