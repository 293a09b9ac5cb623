//! 크롤러 통합 테스트 (메모리 안의 피드 사용)

mod common;

use std::collections::HashMap;

use common::{count_rows, test_pool};
use reddit_api::config::CrawlConfig;
use reddit_api::crawler::{CrawlReport, Crawler, FeedPost, FeedSource};
use reddit_api::db;
use reddit_api::error::AppError;
use reddit_api::models::CreateUserRequest;

// ──────────────────────── Helper ────────────────────────

#[derive(Default)]
struct StubFeed {
    names: Vec<String>,
    posts: HashMap<String, Vec<FeedPost>>,
}

impl StubFeed {
    fn with_subreddit(mut self, name: &str, posts: Vec<FeedPost>) -> Self {
        self.names.push(name.to_string());
        self.posts.insert(name.to_string(), posts);
        self
    }

    /// 목록에는 나오지만 게시물 요청이 실패하는 서브레딧
    fn with_broken_subreddit(mut self, name: &str) -> Self {
        self.names.push(name.to_string());
        self
    }
}

impl FeedSource for StubFeed {
    async fn subreddit_names(&self) -> Result<Vec<String>, AppError> {
        Ok(self.names.clone())
    }

    async fn posts_for_subreddit(&self, name: &str) -> Result<Vec<FeedPost>, AppError> {
        self.posts
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::Internal(format!("feed unavailable for {}", name)))
    }
}

fn link(title: &str, author: &str) -> FeedPost {
    FeedPost {
        title: title.to_string(),
        url: format!("https://example.com/{}", title),
        author: author.to_string(),
        is_self: false,
    }
}

fn self_post(title: &str, author: &str) -> FeedPost {
    FeedPost {
        title: title.to_string(),
        url: format!("https://www.reddit.com/r/x/{}", title),
        author: author.to_string(),
        is_self: true,
    }
}

fn config() -> CrawlConfig {
    CrawlConfig {
        max_concurrent_writes: 2,
        user_password: "abc123".to_string(),
    }
}

async fn post_titles(pool: &sqlx::SqlitePool) -> Vec<String> {
    let rows: Vec<(String,)> = sqlx::query_as("SELECT title FROM posts ORDER BY title")
        .fetch_all(pool)
        .await
        .unwrap();
    rows.into_iter().map(|(t,)| t).collect()
}

// ──────────────────────── Tests ────────────────────────

#[tokio::test]
async fn test_crawl_inserts_link_posts_and_skips_self_posts() {
    let pool = test_pool().await;
    let feed = StubFeed::default()
        .with_subreddit(
            "pics",
            vec![link("sunset", "ann"), self_post("question", "bob"), link("dog", "ann")],
        )
        .with_subreddit("news", vec![link("election", "ann"), link("storm", "cid")]);

    let report = Crawler::new(pool.clone(), feed, config()).run().await.unwrap();

    assert_eq!(
        report,
        CrawlReport {
            subreddits: 2,
            users_created: 2,
            users_reused: 0,
            posts_created: 4,
            self_posts_skipped: 1,
            failures: 0,
        }
    );
    assert_eq!(post_titles(&pool).await, vec!["dog", "election", "storm", "sunset"]);
    // 본문 전용 글의 작성자는 만들어지지 않습니다.
    assert!(db::find_user_by_username(&pool, "bob").await.unwrap().is_none());
    assert_eq!(count_rows(&pool, "users").await, 2);
}

#[tokio::test]
async fn test_crawl_reuses_users_and_subreddits_from_previous_pass() {
    let pool = test_pool().await;
    let existing_id = db::create_user(
        &pool,
        &CreateUserRequest {
            username: "ann".to_string(),
            password: "her-own-password".to_string(),
        },
    )
    .await
    .unwrap();
    common::seed_subreddit(&pool, "pics").await;

    let feed = StubFeed::default().with_subreddit("pics", vec![link("sunset", "ann")]);
    let report = Crawler::new(pool.clone(), feed, config()).run().await.unwrap();

    assert_eq!(report.subreddits, 1);
    assert_eq!(report.users_created, 0);
    assert_eq!(report.users_reused, 1);
    assert_eq!(report.posts_created, 1);
    assert_eq!(report.failures, 0);
    assert_eq!(count_rows(&pool, "users").await, 1);
    assert_eq!(count_rows(&pool, "subreddits").await, 1);

    let posts = db::list_ranked_posts(&pool).await.unwrap();
    assert_eq!(posts[0].user.id, existing_id);
}

#[tokio::test]
async fn test_failed_subreddit_does_not_stop_siblings() {
    let pool = test_pool().await;
    let feed = StubFeed::default()
        .with_subreddit("pics", vec![link("sunset", "ann")])
        .with_broken_subreddit("broken")
        .with_subreddit("news", vec![link("storm", "cid")]);

    let report = Crawler::new(pool.clone(), feed, config()).run().await.unwrap();

    assert_eq!(report.failures, 1);
    assert_eq!(report.posts_created, 2);
    assert_eq!(post_titles(&pool).await, vec!["storm", "sunset"]);
}

#[tokio::test]
async fn test_second_crawl_pass_keeps_one_row_per_user() {
    let pool = test_pool().await;
    let make_feed = || {
        StubFeed::default().with_subreddit("pics", vec![link("sunset", "ann"), link("dog", "bob")])
    };

    let first = Crawler::new(pool.clone(), make_feed(), config()).run().await.unwrap();
    let second = Crawler::new(pool.clone(), make_feed(), config()).run().await.unwrap();

    assert_eq!(first.users_created, 2);
    assert_eq!(second.users_created, 0);
    assert_eq!(second.users_reused, 2);
    assert_eq!(count_rows(&pool, "users").await, 2);
    assert_eq!(count_rows(&pool, "subreddits").await, 1);
    // 게시물에는 중복 검출이 없으므로 두 번 들어갑니다.
    assert_eq!(count_rows(&pool, "posts").await, 4);
}
