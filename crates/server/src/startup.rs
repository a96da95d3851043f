use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use configs::{AppConfig, DatabaseConfig, ServerConfig};
use service::likes::{
    repo::SeaOrmLikedSongsRepository, repository::memory::InMemoryLikedSongsRepository,
    LikedSongsRepository, LikesService,
};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load `config.toml` when present; otherwise configure from environment variables.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let path = configs::config_path();
    if Path::new(&path).exists() {
        let cfg = AppConfig::load_and_validate()?;
        info!(%path, "loaded configuration file");
        return Ok(cfg);
    }
    let mut cfg = AppConfig::from_env();
    cfg.normalize_and_validate()?;
    info!(%path, "no configuration file; using environment");
    Ok(cfg)
}

fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

/// Pick the repository from configuration: SeaORM when a database URL is set,
/// in-memory otherwise.
pub async fn build_likes_service(db_cfg: &DatabaseConfig) -> anyhow::Result<Arc<LikesService>> {
    let repo: Arc<dyn LikedSongsRepository> = if db_cfg.is_configured() {
        let db = models::db::connect_with_config(db_cfg).await?;
        if db_cfg.auto_migrate {
            models::db::migrate(&db).await?;
        }
        Arc::new(SeaOrmLikedSongsRepository::new(db))
    } else {
        warn!("no database url configured; liked songs are kept in memory only");
        Arc::new(InMemoryLikedSongsRepository::new())
    };
    Ok(Arc::new(LikesService::new(repo)))
}

/// Build the router around an already constructed service.
pub fn build_app(likes: Arc<LikesService>) -> Router {
    routes::build_router(ServerState { likes }, build_cors())
}

/// Serve the app described by `cfg`. Logging and `.env` are the caller's job.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let likes = build_likes_service(&cfg.database).await?;
    let app = build_app(likes);

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting liked songs server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
