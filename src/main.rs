use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use tracing::info;

use bookmark_api::bootstrap::app_context::{AppContext, AppServices};
use bookmark_api::bootstrap::config::{Config, StoreBackend};
use bookmark_api::bootstrap::router::build_router;
use bookmark_api::infrastructure::db;
use bookmark_api::infrastructure::db::repositories::bookmark_repository_sqlx::SqlxBookmarkRepository;
use bookmark_api::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "bookmark_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(
        api_port = cfg.api_port,
        store_backend = ?cfg.store_backend,
        production = cfg.is_production,
        "Starting bookmark API"
    );

    let services = match cfg.store_backend {
        StoreBackend::Postgres => {
            let pool = db::connect_pool(&cfg.database_url, cfg.database_max_connections).await?;
            db::migrate(&pool).await?;
            AppServices::new(
                Arc::new(SqlxBookmarkRepository::new(pool.clone())),
                Arc::new(SqlxUserRepository::new(pool.clone())),
                Some(pool),
            )
        }
        StoreBackend::Memory => {
            tracing::warn!("memory_store_in_use_data_is_not_persisted");
            AppServices::in_memory()
        }
    };

    let ctx = AppContext::new(cfg.clone(), services);
    let app = build_router(ctx);

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "shutdown_signal_failed");
    }
}
