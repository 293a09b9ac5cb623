//! # 투표 데이터베이스 쿼리 모듈
//!
//! votes 테이블은 (post_id, user_id) 복합 기본 키를 가집니다.
//! 즉 한 사용자는 한 게시물에 투표 행을 최대 하나만 가질 수 있고,
//! 다시 투표하면 새 행이 생기는 대신 기존 행의 방향이 바뀝니다.
//!
//! ```text
//! votes
//! ├── post_id        → posts.id (외래 키)
//! ├── user_id        → users.id (외래 키)
//! └── vote_direction ∈ {-1, 0, 1} (CHECK 제약)
//! ```

use crate::error::AppError;                                           // 통합 에러 타입
use crate::models::vote::{CreateVoteRequest, Vote, VoteDirection};    // 요청/행/검증된 방향
use sqlx::SqlitePool;                                                 // SQLite 연결 풀

/// 투표를 기록하거나, 이미 있으면 방향을 덮어씁니다.
///
/// (post_id, user_id) 복합 키에 대한 단일 `INSERT ... ON CONFLICT DO UPDATE`이므로
/// 같은 사용자의 동시 투표끼리도 조회-후-쓰기 경쟁이 생기지 않습니다.
/// 방향이 {-1, 0, 1} 밖이면 저장소를 호출하지 않고 `AppError::Validation`.
pub async fn create_vote(pool: &SqlitePool, req: &CreateVoteRequest) -> Result<(), AppError> {
    // 1단계: 방향 검증. {-1, 0, 1} 밖이면 여기서 Validation 에러로 끝나고 DB는 건드리지 않습니다.
    let direction = VoteDirection::try_from(req.vote_direction)?;

    // 2단계: 업서트
    // excluded.vote_direction = INSERT하려던 값. 충돌하면 그 값으로 기존 행을 덮어씁니다.

    sqlx::query(
        r#"
        INSERT INTO votes (post_id, user_id, vote_direction)
        VALUES (?, ?, ?)
        ON CONFLICT (post_id, user_id) DO UPDATE SET
            vote_direction = excluded.vote_direction,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        "#,
    )
    .bind(&req.post_id)
    .bind(&req.user_id)
    .bind(direction.as_i64())
    .execute(pool)
    .await?;

    tracing::debug!(
        post_id = %req.post_id,
        user_id = %req.user_id,
        vote_direction = direction.as_i64(),
        "vote recorded"
    );
    Ok(())
}

/// 한 사용자의 한 게시물에 대한 투표를 조회합니다. 없으면 `None`.
pub async fn find_vote(
    pool: &SqlitePool,
    post_id: &str,
    user_id: &str,
) -> Result<Option<Vote>, AppError> {
    let vote = sqlx::query_as::<_, Vote>(
        r#"
        SELECT post_id, user_id, vote_direction, created_at, updated_at
        FROM votes
        WHERE post_id = ? AND user_id = ?
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(vote)
}
