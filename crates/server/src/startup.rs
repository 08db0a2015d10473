use std::{future::Future, net::SocketAddr};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::observability;
use crate::routes;
use crate::state::AppState;
use service::{runtime, user::repo::JsonFileUserRepository};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Prepare the users file and build the application router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    runtime::ensure_env(&cfg.storage.users_file, cfg.storage.create_if_missing).await?;
    let repo = JsonFileUserRepository::new(&cfg.storage.users_file);
    info!(path = %repo.path().display(), "users file ready");
    Ok(routes::build_router(AppState::new(repo), build_cors()))
}

/// Public entry: build the app and run the HTTP server until `shutdown` resolves
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg).await?;

    if let Some(admin_addr) = cfg.server.admin_addr.as_deref() {
        common::admin_http::spawn_admin_server(admin_addr, observability::encode_metrics);
    }

    // Bind and serve
    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    info!(%addr, "starting server crate");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}
