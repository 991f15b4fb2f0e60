use std::sync::Arc;

use crate::application::ports::bookmark_repository::BookmarkRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;
use crate::infrastructure::db::PgPool;
use crate::infrastructure::memory::{MemoryBookmarkRepository, MemoryUserRepository};

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    bookmark_repo: Arc<dyn BookmarkRepository>,
    user_repo: Arc<dyn UserRepository>,
    pool: Option<PgPool>,
}

impl AppServices {
    pub fn new(
        bookmark_repo: Arc<dyn BookmarkRepository>,
        user_repo: Arc<dyn UserRepository>,
        pool: Option<PgPool>,
    ) -> Self {
        Self {
            bookmark_repo,
            user_repo,
            pool,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryBookmarkRepository::new()),
            Arc::new(MemoryUserRepository::new()),
            None,
        )
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn bookmark_repo(&self) -> Arc<dyn BookmarkRepository> {
        self.services.bookmark_repo.clone()
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    /// Present only when the Postgres backend is in use.
    pub fn pool(&self) -> Option<PgPool> {
        self.services.pool.clone()
    }
}
