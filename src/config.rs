//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버와 크롤러 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `HOST`, `PORT`: 서버 바인딩 주소/포트
//! - `DB_MAX_CONNECTIONS`: 연결 풀 크기 (동시에 진행되는 저장소 작업 수의 상한)
//! - `FEED_BASE_URL`, `FEED_LISTING_LIMIT`: 원격 피드 주소와 목록 크기
//! - `FEED_TIMEOUT_SECS`, `FEED_MAX_ATTEMPTS`, `FEED_RETRY_DELAY_MS`: 피드 요청 타임아웃/재시도
//! - `CRAWL_MAX_CONCURRENT_WRITES`: 크롤링 중 동시에 진행되는 쓰기 작업 수의 상한
//! - `CRAWL_USER_PASSWORD`: 크롤러가 만드는 사용자에게 부여할 비밀번호

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// 애플리케이션 전체 설정을 담는 구조체
#[derive(Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/reddit.db")
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub feed: FeedConfig,
    pub crawl: CrawlConfig,
}

/// 원격 피드(HTTP) 요청 설정
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// 피드 루트 주소. 끝의 `/`는 제거된 상태로 저장됩니다.
    pub base_url: String,
    /// `?limit=` 파라미터로 보낼 목록 크기
    pub listing_limit: u32,
    /// 요청 하나당 타임아웃
    pub timeout: Duration,
    /// 최초 시도를 포함한 최대 시도 횟수 (최소 1)
    pub max_attempts: u32,
    /// 재시도 사이의 고정 대기 시간
    pub retry_delay: Duration,
}

/// 크롤링 실행 설정
#[derive(Clone)]
pub struct CrawlConfig {
    pub max_concurrent_writes: usize,
    pub user_password: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.reddit.com".to_string(),
            listing_limit: 50,
            timeout: Duration::from_secs(10),
            max_attempts: 3,
            retry_delay: Duration::from_millis(500),
        }
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_concurrent_writes: 8,
            user_password: "abc123".to_string(),
        }
    }
}

// 비밀번호가 로그에 찍히지 않도록 Debug를 직접 구현합니다.
impl fmt::Debug for CrawlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrawlConfig")
            .field("max_concurrent_writes", &self.max_concurrent_writes)
            .field("user_password", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("db_max_connections", &self.db_max_connections)
            .field("feed", &self.feed)
            .field("crawl", &self.crawl)
            .finish()
    }
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`은 필수이며, 없으면 에러가 발생합니다.
    /// 나머지 설정은 기본값이 있어 환경변수가 없거나 파싱에 실패해도 동작합니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        let feed_defaults = FeedConfig::default();
        let crawl_defaults = CrawlConfig::default();

        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("PORT", 3000),
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 10).max(1),
            feed: FeedConfig {
                base_url: env::var("FEED_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or(feed_defaults.base_url),
                listing_limit: parse_or("FEED_LISTING_LIMIT", feed_defaults.listing_limit),
                timeout: Duration::from_secs(parse_or("FEED_TIMEOUT_SECS", 10)),
                max_attempts: parse_or("FEED_MAX_ATTEMPTS", feed_defaults.max_attempts).max(1),
                retry_delay: Duration::from_millis(parse_or("FEED_RETRY_DELAY_MS", 500)),
            },
            crawl: CrawlConfig {
                max_concurrent_writes: parse_or(
                    "CRAWL_MAX_CONCURRENT_WRITES",
                    crawl_defaults.max_concurrent_writes,
                )
                .max(1),
                user_password: env::var("CRAWL_USER_PASSWORD")
                    .unwrap_or(crawl_defaults.user_password),
            },
        })
    }
}

/// 환경변수 `key`를 `T`로 파싱합니다. 변수가 없거나 파싱에 실패하면 `default`.
fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_falls_back_on_missing_or_garbage() {
        assert_eq!(parse_or("REDDIT_API_TEST_SURELY_UNSET", 7u32), 7);

        env::set_var("REDDIT_API_TEST_GARBAGE_PORT", "not-a-number");
        assert_eq!(parse_or("REDDIT_API_TEST_GARBAGE_PORT", 3000u16), 3000);

        env::set_var("REDDIT_API_TEST_PADDED", " 42 ");
        assert_eq!(parse_or("REDDIT_API_TEST_PADDED", 0u32), 42);
    }

    #[test]
    fn debug_output_hides_crawl_password() {
        let crawl = CrawlConfig {
            max_concurrent_writes: 4,
            user_password: "hunter2".to_string(),
        };
        let printed = format!("{:?}", crawl);
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("<redacted>"));
    }
}
