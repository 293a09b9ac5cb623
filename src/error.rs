//! # 에러 처리 모듈
//!
//! 데이터 접근 계층과 크롤러에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `UniqueViolation` 트레이트: 저장소별 "유니크 제약 위반" 신호를 판별하는 능력 인터페이스
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환

use axum::{
    extract::rejection::JsonRejection,    // JSON 본문 추출 실패 (형식 오류, 타입 불일치 등)
    http::StatusCode,                     // HTTP 상태 코드 (400, 409, 500 등)
    response::{IntoResponse, Response},   // Axum의 응답 변환 트레이트
    Json,                                 // JSON 응답 래퍼
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 분류 기준:
/// - 저장소 호출 **전에** 검출되는 에러: `Validation`
/// - 저장소의 제약 위반을 도메인 의미로 번역한 에러: `DuplicateUsername`, `DuplicateSubredditName`
/// - 그 외 저장소 에러: `Database` (가공하지 않고 그대로 전파)
/// - 기반 환경 에러: `Io`, `Feed`, `Internal`
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// 입력값 검증 실패 (HTTP 400)
    /// 잘못된 투표 방향, 필수 필드 누락 등. 저장소 호출 없이 즉시 반환되며 재시도하지 않습니다.
    #[error("Validation error: {0}")]
    Validation(String),

    /// 이미 존재하는 사용자 이름 (HTTP 409)
    #[error("A user with username '{0}' already exists")]
    DuplicateUsername(String),

    /// 이미 존재하는 서브레딧 이름 (HTTP 409)
    #[error("A subreddit named '{0}' already exists")]
    DuplicateSubredditName(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: sqlx 함수의 에러에 `?`를 쓰면 자동으로 AppError::Database로 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 파일 입출력 오류 (HTTP 500)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 원격 피드 요청 오류 (크롤러 전용)
    #[error("Feed error: {0}")]
    Feed(#[from] reqwest::Error),
}

/// 저장소 에러가 "유니크 제약 위반"인지 판별하는 능력(capability) 트레이트
///
/// 중복 검출 로직이 특정 드라이버의 에러 코드(SQLite의 2067 등)에 묶이지 않도록
/// 판별만 이 트레이트 뒤로 숨깁니다. 다른 저장소를 쓰게 되면 그 에러 타입에 대해
/// 이 트레이트만 구현하면 됩니다.
pub trait UniqueViolation {
    fn is_unique_violation(&self) -> bool;
}

impl UniqueViolation for sqlx::Error {
    fn is_unique_violation(&self) -> bool {
        // sqlx::Error::Database 안의 드라이버 에러가 ErrorKind::UniqueViolation으로
        // 분류되는 경우만 true. 외래 키 위반 등 다른 제약 위반은 해당되지 않습니다.
        match self {
            sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
            _ => false,
        }
    }
}

impl AppError {
    /// 저장소 에러를 번역합니다.
    ///
    /// 유니크 제약 위반이면 `on_duplicate`가 만든 도메인 에러로, 아니면 `Database`로 감쌉니다.
    pub fn from_store<E, F>(err: E, on_duplicate: F) -> Self
    where
        E: UniqueViolation + Into<AppError>,
        F: FnOnce() -> AppError,
    {
        if err.is_unique_violation() {
            on_duplicate()
        } else {
            err.into()
        }
    }

    /// 중복 에러(DuplicateUsername / DuplicateSubredditName)인지 여부
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            AppError::DuplicateUsername(_) | AppError::DuplicateSubredditName(_)
        )
    }
}

/// 요청 본문을 JSON으로 읽지 못한 경우도 입력값 검증 실패로 취급합니다.
/// (axum 기본값인 평문 422 대신 `validation_error` JSON 본문의 400)
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, Feed, Internal)는 실제 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::Validation(ref msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            AppError::DuplicateUsername(_) => {
                (StatusCode::CONFLICT, "duplicate_username", self.to_string())
            }
            AppError::DuplicateSubredditName(_) => {
                (StatusCode::CONFLICT, "duplicate_subreddit_name", self.to_string())
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Io(ref e) => {
                tracing::error!("IO error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "io_error",
                    "An IO error occurred".to_string(),
                )
            }
            AppError::Feed(ref e) => {
                tracing::error!("Feed error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "feed_error",
                    "A feed error occurred".to_string(),
                )
            }
        };

        // 결과: { "error": { "code": "duplicate_username", "message": "..." } }
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_are_not_unique_violations() {
        assert!(!sqlx::Error::RowNotFound.is_unique_violation());
        assert!(!sqlx::Error::PoolTimedOut.is_unique_violation());
    }

    #[test]
    fn from_store_passes_other_failures_through() {
        let err = AppError::from_store(sqlx::Error::RowNotFound, || {
            AppError::DuplicateUsername("alice".to_string())
        });
        assert!(matches!(err, AppError::Database(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn status_codes_follow_error_kind() {
        let cases = [
            (AppError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::DuplicateUsername("a".into()), StatusCode::CONFLICT),
            (AppError::DuplicateSubredditName("r".into()), StatusCode::CONFLICT),
            (AppError::NotFound, StatusCode::NOT_FOUND),
            (AppError::Database(sqlx::Error::PoolTimedOut), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
