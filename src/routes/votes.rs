//! # 투표 API 라우트 핸들러
//!
//! - `POST /api/v1/votes` → 투표 업서트 (같은 사용자가 같은 게시물에 다시 투표하면 방향을 덮어씀)
//!
//! 투표 방향은 -1(비추천), 0(취소), 1(추천)만 허용됩니다.
//! 그 밖의 정수는 400, 정수가 아닌 값(`1.5`, `"1"`)도 `AppJson`이 400으로 거절합니다.

use crate::{
    db,                          // 데이터 접근 계층 (db::create_vote)
    error::AppError,             // 핸들러의 에러 타입 → IntoResponse로 HTTP 응답 변환
    models::CreateVoteRequest,   // 요청 본문 구조체
    routes::{AppJson, AppState}, // JSON 추출기, 공유 상태 (DB 풀)
};
use axum::{extract::State, http::StatusCode};

/// `POST /api/v1/votes` + `{ "post_id": "...", "user_id": "...", "vote_direction": 1 }`
///
/// 새 투표든 기존 투표의 변경이든 성공하면 본문 없이 204를 돌려줍니다.
/// 존재하지 않는 게시물/사용자는 외래 키 위반으로 500(database_error)이 됩니다.
pub async fn create_vote(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateVoteRequest>,
) -> Result<StatusCode, AppError> {
    // 방향 검증과 업서트는 모두 db 계층에서 처리합니다.
    // (크롤러나 데모처럼 HTTP를 거치지 않는 호출자도 같은 규칙을 따르도록)
    db::create_vote(&state.pool, &req).await?;

    // 204 No Content: 성공했지만 돌려줄 본문이 없음
    Ok(StatusCode::NO_CONTENT)
}
