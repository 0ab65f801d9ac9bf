use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use notes_backend::{
    AppState,
    cache::{MemoryPostCache, PostCache, RedisPostCache},
    config::Config,
    database::{MemoryRepository, PgRepository, Repository},
    router::create_router,
};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");

    // 设置存储，未配置数据库时使用内存存储
    let repo: Arc<dyn Repository> = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(database_url)
                .await
                .expect("Failed to connect to Postgres");
            let repo = PgRepository::new(pool);
            repo.migrate().await.expect("Failed to run migrations");
            Arc::new(repo)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage");
            Arc::new(MemoryRepository::new())
        }
    };

    // 设置帖子缓存
    let posts_cache: Arc<dyn PostCache> = match &config.redis_url {
        Some(redis_url) => {
            let redis_client =
                redis::Client::open(redis_url.as_str()).expect("Failed to create Redis client");
            tracing::info!("Caching posts in Redis");
            Arc::new(RedisPostCache::new(
                Arc::new(redis_client),
                config.posts_cache_capacity,
                config.posts_cache_ttl(),
            ))
        }
        None => Arc::new(MemoryPostCache::new(
            config.posts_cache_capacity,
            config.posts_cache_ttl(),
        )),
    };

    // 设置应用状态
    let state = AppState::new(config, repo, posts_cache);
    let router = create_router(state.clone());

    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(tower_http::cors::CorsLayer::permissive())
    };

    // 启动服务器
    let addr = SocketAddr::new(
        state.config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        state.config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        router,
    )
    .await
    .expect("Failed to start server");
}
