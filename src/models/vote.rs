//! # 투표 모델 정의
//!
//! 투표는 (post_id, user_id) 복합 키로 식별되며 별도의 id가 없습니다.
//! 같은 사용자가 같은 게시물에 다시 투표하면 새 행이 생기지 않고 방향만 바뀝니다.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Vote {
    pub post_id: String,
    pub user_id: String,
    pub vote_direction: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// 투표 생성(또는 변경) 요청
///
/// `vote_direction`은 원시 정수로 받고, 저장 전에 `VoteDirection`으로 검증합니다.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVoteRequest {
    pub post_id: String,
    pub user_id: String,
    pub vote_direction: i64,
}

/// 투표 방향: 추천(+1), 취소(0), 비추천(-1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Down,
    Cancel,
    Up,
}

impl VoteDirection {
    pub fn as_i64(self) -> i64 {
        match self {
            VoteDirection::Down => -1,
            VoteDirection::Cancel => 0,
            VoteDirection::Up => 1,
        }
    }
}

impl TryFrom<i64> for VoteDirection {
    type Error = AppError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(VoteDirection::Down),
            0 => Ok(VoteDirection::Cancel),
            1 => Ok(VoteDirection::Up),
            other => Err(AppError::Validation(format!(
                "vote_direction must be 1, 0 or -1 (got {})",
                other
            ))),
        }
    }
}
