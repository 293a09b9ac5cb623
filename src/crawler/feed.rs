//! # 원격 피드 클라이언트
//!
//! 공개 JSON 피드에서 인기 서브레딧 목록과 서브레딧별 게시물 목록을 가져옵니다.
//!
//! - `GET {base}/.json?limit=N` → 첫 페이지 목록. 각 항목의 `data.subreddit`만 사용
//! - `GET {base}/r/{name}.json?limit=N` → 서브레딧 목록. `title`, `url`, `author`, `is_self` 사용
//!
//! 요청마다 타임아웃이 걸려 있고, 일시적인 실패(타임아웃, 연결 실패, 5xx, 429)는
//! 설정된 횟수까지 고정 간격으로 다시 시도합니다.

use std::collections::HashSet;
use std::future::Future;

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::FeedConfig;
use crate::error::AppError;

/// 피드에서 읽은 게시물 하나
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedPost {
    pub title: String,
    pub url: String,
    pub author: String,
    /// 외부 링크 없이 본문만 있는 글 (수집 대상 아님)
    pub is_self: bool,
}

/// 크롤러가 의존하는 피드 인터페이스
///
/// 실제 HTTP 구현은 `RedditFeed`이고, 테스트는 메모리 안의 구현을 넘깁니다.
pub trait FeedSource {
    /// 인기 목록에 등장하는 서브레딧 이름 (중복 제거, 처음 등장한 순서 유지)
    fn subreddit_names(&self) -> impl Future<Output = Result<Vec<String>, AppError>> + Send;

    /// 서브레딧 하나의 게시물 목록
    fn posts_for_subreddit(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<FeedPost>, AppError>> + Send;
}

// ── 피드 JSON 구조 ──
// { "data": { "children": [ { "data": { ... } }, ... ] } }
// 필요한 필드만 선언하고 나머지는 serde가 무시합니다.

#[derive(Debug, Deserialize)]
pub struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: ChildData,
}

#[derive(Debug, Deserialize)]
struct ChildData {
    subreddit: Option<String>,
    title: Option<String>,
    url: Option<String>,
    author: Option<String>,
    #[serde(default)]
    is_self: bool,
}

impl Listing {
    /// 목록에 등장한 서브레딧 이름을 중복 없이, 처음 등장한 순서대로 반환합니다.
    pub fn subreddit_names(self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.data
            .children
            .into_iter()
            .filter_map(|child| child.data.subreddit)
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }

    /// 목록의 게시물들. 제목/URL/작성자 중 하나라도 없는 항목은 건너뜁니다.
    pub fn posts(self) -> Vec<FeedPost> {
        self.data
            .children
            .into_iter()
            .filter_map(|child| {
                let data = child.data;
                Some(FeedPost {
                    title: data.title?,
                    url: data.url?,
                    author: data.author?,
                    is_self: data.is_self,
                })
            })
            .collect()
    }
}

/// HTTP로 피드를 읽는 `FeedSource` 구현
pub struct RedditFeed {
    client: Client,
    config: FeedConfig,
}

impl RedditFeed {
    pub fn new(config: FeedConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("reddit-api/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    fn front_page_url(&self) -> String {
        format!("{}/.json?limit={}", self.config.base_url, self.config.listing_limit)
    }

    fn subreddit_url(&self, name: &str) -> String {
        format!(
            "{}/r/{}.json?limit={}",
            self.config.base_url, name, self.config.listing_limit
        )
    }

    /// 목록 하나를 가져옵니다. 일시적인 실패는 `max_attempts`번까지 시도합니다.
    async fn fetch_listing(&self, url: &str) -> Result<Listing, AppError> {
        let mut attempt = 1;
        loop {
            match self.try_fetch_listing(url).await {
                Ok(listing) => return Ok(listing),
                Err(e) if attempt < self.config.max_attempts && is_transient(&e) => {
                    tracing::warn!(
                        url = %url,
                        attempt,
                        max_attempts = self.config.max_attempts,
                        error = %e,
                        "feed request failed, retrying"
                    );
                    tokio::time::sleep(self.config.retry_delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn try_fetch_listing(&self, url: &str) -> Result<Listing, reqwest::Error> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<Listing>()
            .await
    }
}

/// 다시 시도할 가치가 있는 실패인지 판별합니다. 응답 본문 파싱 실패나 4xx는 제외.
fn is_transient(err: &reqwest::Error) -> bool {
    if let Some(status) = err.status() {
        return status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS;
    }
    err.is_timeout() || err.is_connect()
}

impl FeedSource for RedditFeed {
    async fn subreddit_names(&self) -> Result<Vec<String>, AppError> {
        let listing = self.fetch_listing(&self.front_page_url()).await?;
        Ok(listing.subreddit_names())
    }

    async fn posts_for_subreddit(&self, name: &str) -> Result<Vec<FeedPost>, AppError> {
        let listing = self.fetch_listing(&self.subreddit_url(name)).await?;
        Ok(listing.posts())
    }
}
