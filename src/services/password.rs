//! # 비밀번호 해싱 서비스
//!
//! 사용자 비밀번호를 Argon2id로 해싱합니다.
//! 비용(work factor)은 아래 상수로 고정되어 있으며, 모든 해시가 같은 비용으로 만들어집니다.
//!
//! 결과는 PHC 문자열(`$argon2id$v=19$m=...,t=...,p=...$salt$hash`)이므로
//! 솔트와 파라미터가 해시 안에 함께 저장됩니다.

use crate::error::AppError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

/// 메모리 비용 (KiB 단위, 19 MiB)
pub const HASH_MEMORY_KIB: u32 = 19 * 1024;
/// 반복 횟수 — 해싱 비용을 결정하는 작업 계수
pub const HASH_ITERATIONS: u32 = 2;
/// 병렬도
pub const HASH_PARALLELISM: u32 = 1;

fn hasher() -> Result<Argon2<'static>, AppError> {
    let params = Params::new(HASH_MEMORY_KIB, HASH_ITERATIONS, HASH_PARALLELISM, None)
        .map_err(|e| AppError::Internal(format!("Invalid Argon2 parameters: {}", e)))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// 평문 비밀번호를 솔트를 붙여 해싱합니다. (CPU를 많이 쓰는 동기 함수)
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?
        .to_string();
    Ok(hash)
}

/// `hash_password`를 블로킹 스레드 풀에서 실행합니다.
///
/// Argon2는 의도적으로 느리기 때문에 async 워커 스레드에서 직접 돌리면
/// 같은 스레드의 다른 작업(다른 요청, 크롤러의 다른 쓰기)이 멈춥니다.
pub async fn hash_password_blocking(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
}

/// 저장된 해시와 평문 비밀번호가 일치하는지 확인합니다.
///
/// 해시 문자열에 기록된 파라미터로 검증하므로 상수 값이 바뀌어도 기존 해시는 검증됩니다.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AppError::Internal(format!("Password hash parse error: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
