//! # 요청 추출기
//!
//! `axum::Json`과 같지만, 본문을 읽지 못하면 `AppError`로 거절합니다.
//! 필드 누락이나 `vote_direction: 1.5` 같은 타입 불일치도 다른 입력 오류와 같은
//! `{ "error": { "code": "validation_error", ... } }` 형식으로 응답됩니다.

use axum::extract::FromRequest;

use crate::error::AppError;

/// 사용법: `AppJson(req): AppJson<CreateVoteRequest>`
///
/// `via(axum::Json)`: 실제 파싱은 `axum::Json`에 맡기고,
/// `rejection(AppError)`: 실패하면 `From<JsonRejection> for AppError`로 변환합니다.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
