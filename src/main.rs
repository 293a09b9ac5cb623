//! # reddit-api 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. 설정 로딩과 SQLite 연결 풀 생성 (스키마 적용 포함)
//! 4. 서브커맨드 실행
//!    - `serve`: HTTP API 서버
//!    - `crawl`: 원격 피드 수집 한 번 실행
//!    - `demo`: 데이터 접근 계층 데모

use anyhow::Result;
use axum::Router;
use clap::{Parser, Subcommand};
use reddit_api::{
    config::Config,
    crawler::{Crawler, RedditFeed},
    db, demo,
    routes::{self, AppState},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 명령줄 인자
#[derive(Parser, Debug)]
#[command(name = "reddit-api", version, about = "Reddit-style data-access layer and feed crawler")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// HTTP API 서버 실행
    Serve,
    /// 원격 피드에서 서브레딧/사용자/게시물을 한 번 수집
    Crawl,
    /// 사용자 → 서브레딧 → 게시물 → 투표를 만들고 목록을 출력
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // RUST_LOG가 없으면 이 크레이트, tower_http, axum을 debug 레벨로 설정
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reddit_api=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    tracing::debug!(?config, "configuration loaded");

    // 풀 크기가 동시에 진행되는 저장소 작업 수의 상한입니다. (초과분은 풀 안에서 대기)
    let pool = db::connect(&config.database_url, config.db_max_connections).await?;

    match cli.command {
        Command::Serve => serve(config, pool.clone()).await?,
        Command::Crawl => {
            let feed = RedditFeed::new(config.feed.clone())?;
            let report = Crawler::new(pool.clone(), feed, config.crawl.clone()).run().await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Demo => {
            let output = demo::run(&pool).await?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    pool.close().await;
    Ok(())
}

async fn serve(config: Config, pool: sqlx::SqlitePool) -> Result<()> {
    let state = AppState { pool };

    // 개발 환경 기준으로 모든 출처를 허용합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api/v1", routes::api_router(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
