//! # 크롤러 (Ingestion)
//!
//! 원격 피드에서 서브레딧과 게시물을 읽어 데이터 접근 계층(`db`)을 통해 저장합니다.
//!
//! ## 실행 흐름
//! 1. 인기 서브레딧 이름 목록을 가져옵니다.
//! 2. 서브레딧마다:
//!    a. 서브레딧을 만듭니다. (이미 있으면 기존 id 사용)
//!    b. 게시물 목록을 가져오고 본문 전용 글(self-post)을 걸러냅니다.
//!    c. 아직 id를 모르는 작성자들을 만듭니다. (이미 있으면 기존 id 사용)
//!    d. 게시물을 만듭니다.
//!
//! ## 동시성
//! 크롤링 한 번은 하나의 조정(coordinating) 태스크에서 진행되며,
//! 사용자 이름 → id 맵은 이 태스크만 소유하고 수정합니다.
//! c, d 단계의 쓰기 작업은 `buffer_unordered`로 동시에 보내되
//! 진행 중인 작업 수는 `max_concurrent_writes`를 넘지 않습니다.
//! 쓰기 결과는 조정 태스크로 돌아와서 맵에 반영됩니다.
//!
//! 항목 하나의 실패(서브레딧 하나, 사용자 하나, 게시물 하나)는 로그와
//! `CrawlReport::failures`에 남고, 나머지 항목 처리는 계속됩니다.

pub mod feed;

use std::collections::{HashMap, HashSet};
use std::future::Future;

use futures::{stream, StreamExt};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::config::CrawlConfig;
use crate::db;
use crate::error::AppError;
use crate::models::{CreatePostRequest, CreateSubredditRequest, CreateUserRequest};

pub use feed::{FeedPost, FeedSource, RedditFeed};

/// 크롤링 한 번의 결과 요약
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlReport {
    /// 처리한(새로 만들었거나 이미 있던) 서브레딧 수
    pub subreddits: usize,
    pub users_created: usize,
    /// 이전 크롤링에서 이미 만들어져 있어 기존 id를 재사용한 사용자 수
    pub users_reused: usize,
    pub posts_created: usize,
    /// 건너뛴 본문 전용 글 수
    pub self_posts_skipped: usize,
    pub failures: usize,
}

/// `items` 각각에 대해 `task`를 실행하되, 동시에 진행 중인 작업은 `limit`개를 넘지 않습니다.
///
/// 결과는 끝난 순서대로 모입니다. 입력 순서와 다를 수 있습니다.
async fn dispatch_bounded<I, F, Fut>(items: I, limit: usize, task: F) -> Vec<Fut::Output>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future,
{
    stream::iter(items)
        .map(task)
        .buffer_unordered(limit.max(1))
        .collect()
        .await
}

/// 레코드를 새로 만들었는지, 이미 있던 것을 찾았는지
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Created,
    Existing,
}

pub struct Crawler<F> {
    pool: SqlitePool,
    feed: F,
    config: CrawlConfig,
}

impl<F: FeedSource> Crawler<F> {
    pub fn new(pool: SqlitePool, feed: F, config: CrawlConfig) -> Self {
        Self { pool, feed, config }
    }

    /// 크롤링을 한 번 실행합니다.
    ///
    /// 인기 목록 자체를 가져오지 못하면 할 일이 없으므로 에러를 반환하고,
    /// 그 뒤의 실패는 항목 단위로 기록만 하고 계속 진행합니다.
    pub async fn run(&self) -> Result<CrawlReport, AppError> {
        let names = self.feed.subreddit_names().await?;
        tracing::info!(count = names.len(), "crawling subreddits");

        let mut users: HashMap<String, String> = HashMap::new();
        let mut report = CrawlReport::default();

        for name in &names {
            if let Err(e) = self.crawl_subreddit(name, &mut users, &mut report).await {
                tracing::warn!(subreddit = %name, error = %e, "skipping subreddit");
                report.failures += 1;
            }
        }

        tracing::info!(
            subreddits = report.subreddits,
            users_created = report.users_created,
            users_reused = report.users_reused,
            posts_created = report.posts_created,
            self_posts_skipped = report.self_posts_skipped,
            failures = report.failures,
            "crawl finished"
        );
        Ok(report)
    }

    async fn crawl_subreddit(
        &self,
        name: &str,
        users: &mut HashMap<String, String>,
        report: &mut CrawlReport,
    ) -> Result<(), AppError> {
        let (subreddit_id, _) = self.ensure_subreddit(name).await?;
        report.subreddits += 1;

        let fetched = self.feed.posts_for_subreddit(name).await?;
        let (self_posts, posts): (Vec<FeedPost>, Vec<FeedPost>) =
            fetched.into_iter().partition(|post| post.is_self);
        report.self_posts_skipped += self_posts.len();

        self.resolve_authors(&posts, users, report).await;

        // 작성자 id를 얻지 못한 게시물은 이미 사용자 실패로 집계되었으므로 여기서는 빠집니다.
        let requests: Vec<CreatePostRequest> = posts
            .into_iter()
            .filter_map(|post| {
                let user_id = users.get(&post.author)?.clone();
                Some(CreatePostRequest {
                    user_id,
                    title: post.title,
                    url: post.url,
                    subreddit_id: Some(subreddit_id.clone()),
                })
            })
            .collect();

        let limit = self.config.max_concurrent_writes;
        let results = dispatch_bounded(requests, limit, |req| async move {
            db::create_post(&self.pool, &req).await
        })
        .await;

        for result in results {
            match result {
                Ok(_) => report.posts_created += 1,
                Err(e) => {
                    tracing::warn!(subreddit = %name, error = %e, "failed to create post");
                    report.failures += 1;
                }
            }
        }

        Ok(())
    }

    /// 맵에 없는 작성자들을 동시에(상한 내에서) 만들고, 결과를 맵에 반영합니다.
    async fn resolve_authors(
        &self,
        posts: &[FeedPost],
        users: &mut HashMap<String, String>,
        report: &mut CrawlReport,
    ) {
        let mut seen = HashSet::new();
        let unknown: Vec<String> = posts
            .iter()
            .map(|post| post.author.clone())
            .filter(|author| !users.contains_key(author) && seen.insert(author.clone()))
            .collect();

        let limit = self.config.max_concurrent_writes;
        let resolved = dispatch_bounded(unknown, limit, |username| async move {
            let result = self.ensure_user(&username).await;
            (username, result)
        })
        .await;

        for (username, result) in resolved {
            match result {
                Ok((user_id, origin)) => {
                    match origin {
                        Origin::Created => report.users_created += 1,
                        Origin::Existing => report.users_reused += 1,
                    }
                    users.insert(username, user_id);
                }
                Err(e) => {
                    tracing::warn!(username = %username, error = %e, "failed to resolve user");
                    report.failures += 1;
                }
            }
        }
    }

    /// 사용자를 만들고, 이미 있으면(이전 크롤링) 그 사용자의 id를 찾아 돌려줍니다.
    async fn ensure_user(&self, username: &str) -> Result<(String, Origin), AppError> {
        let req = CreateUserRequest {
            username: username.to_string(),
            password: self.config.user_password.clone(),
        };

        match db::create_user(&self.pool, &req).await {
            Ok(id) => Ok((id, Origin::Created)),
            Err(e) if e.is_duplicate() => {
                let user = db::find_user_by_username(&self.pool, username)
                    .await?
                    .ok_or(AppError::NotFound)?;
                tracing::debug!(username = %username, user_id = %user.id, "reusing existing user");
                Ok((user.id, Origin::Existing))
            }
            Err(e) => Err(e),
        }
    }

    /// 서브레딧을 만들고, 이미 있으면 그 서브레딧의 id를 찾아 돌려줍니다.
    async fn ensure_subreddit(&self, name: &str) -> Result<(String, Origin), AppError> {
        let req = CreateSubredditRequest {
            name: name.to_string(),
            description: None,
        };

        match db::create_subreddit(&self.pool, &req).await {
            Ok(id) => Ok((id, Origin::Created)),
            Err(e) if e.is_duplicate() => {
                let subreddit = db::find_subreddit_by_name(&self.pool, name)
                    .await?
                    .ok_or(AppError::NotFound)?;
                Ok((subreddit.id, Origin::Existing))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn dispatch_never_exceeds_limit() {
        let in_flight = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);

        let results = dispatch_bounded(0..20, 3, |i| {
            let (in_flight, peak) = (&in_flight, &peak);
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                i * 2
            }
        })
        .await;

        assert_eq!(results.len(), 20);
        assert_eq!(results.iter().sum::<i32>(), (0..20).map(|i| i * 2).sum::<i32>());
        assert_eq!(peak.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn zero_limit_still_makes_progress() {
        let results = dispatch_bounded(vec!["a", "b"], 0, |s| async move { s.len() }).await;
        assert_eq!(results, vec![1, 1]);
    }
}
