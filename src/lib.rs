//! # reddit-api
//!
//! 사용자 / 서브레딧 / 게시물 / 투표 스키마 위의 작은 데이터 접근 계층과,
//! 공개 피드에서 데이터를 읽어 그 계층을 통해 저장하는 크롤러입니다.
//!
//! 모듈 구성:
//! - `config`: 환경변수 기반 설정
//! - `db`: 데이터 접근 계층 (sqlx + SQLite)
//! - `error`: `AppError`와 유니크 제약 위반 판별 트레이트
//! - `models`: 데이터 구조체
//! - `services`: 비밀번호 해싱
//! - `routes`: HTTP 핸들러 (axum)
//! - `crawler`: 원격 피드 수집
//! - `demo`: 데이터 접근 계층을 한 바퀴 실행해 보는 데모

pub mod config;
pub mod crawler;
pub mod db;
pub mod demo;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
