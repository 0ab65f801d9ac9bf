use std::sync::Arc;

use auth::{CredentialStore, TokenService};
use cache::PostCache;
use config::Config;
use database::Repository;

pub mod auth;
pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod operations;
pub mod router;
pub mod routes;
pub mod utils;

/// 进程级共享状态，启动时构造一次，按引用在各工作线程间共享
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub repo: Arc<dyn Repository>,
    pub posts_cache: Arc<dyn PostCache>,
    pub tokens: Arc<TokenService>,
    pub credentials: CredentialStore,
}

impl AppState {
    pub fn new(
        config: Config,
        repo: Arc<dyn Repository>,
        posts_cache: Arc<dyn PostCache>,
    ) -> Self {
        let tokens = Arc::new(TokenService::from_config(&config));
        let credentials = CredentialStore::new(config.bcrypt_cost);

        Self {
            config: Arc::new(config),
            repo,
            posts_cache,
            tokens,
            credentials,
        }
    }
}
