//! # 서비스 모듈
//!
//! 데이터베이스와 직접 관련 없는 비즈니스 로직을 모아둔 모듈입니다.
//! - `password`: Argon2id 비밀번호 해싱

pub mod password;
