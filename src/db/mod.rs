//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)와 크롤러(crawler/)가 이 모듈의 함수를 호출합니다.
//!
//! 각 하위 모듈:
//! - `users`: 사용자 생성/조회 (비밀번호 해싱 포함)
//! - `subreddits`: 서브레딧 생성/조회/최신순 목록
//! - `posts`: 게시물 생성과 투표 점수순 목록
//! - `votes`: 투표 업서트(upsert)

pub mod posts;
pub mod subreddits;
pub mod users;
pub mod votes;

pub use posts::*;
pub use subreddits::*;
pub use users::*;
pub use votes::*;

use crate::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// 목록 조회가 돌려주는 최대 행 수 (페이지네이션 없음)
pub const LISTING_LIMIT: i64 = 25;

/// 연결 풀을 만들고 스키마를 적용합니다.
///
/// 풀 크기(`max_connections`)가 동시에 진행되는 저장소 작업 수의 상한이 되며,
/// 초과한 요청은 연결이 반환될 때까지 풀 안에서 대기합니다.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    // 파일 DB라면 상위 디렉토리를 먼저 만듭니다. (예: sqlite:data/reddit.db → data/)
    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
            tracing::info!("Created database directory: {}", parent.display());
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

/// 테스트용 인메모리 데이터베이스
///
/// `sqlite::memory:`는 연결마다 별도의 DB가 생기므로 연결을 1개로 고정하고,
/// 유휴 연결이 닫혀 데이터가 사라지지 않도록 수명 제한을 끕니다.
pub async fn connect_in_memory() -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

/// ./migrations의 스키마 SQL을 아직 적용되지 않은 것만 순서대로 실행합니다.
pub async fn migrate(pool: &SqlitePool) -> Result<(), AppError> {
    tracing::debug!("Applying database schema");
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(sqlx::Error::from)?;
    Ok(())
}
