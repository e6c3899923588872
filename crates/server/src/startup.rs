use std::future::Future;

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, AppState};
use service::{file::hospital_store::HospitalStore, runtime};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the data file and wire the router around it.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let data_file = &cfg.storage.data_file;
    runtime::ensure_storage(data_file).await?;

    let store = HospitalStore::new(data_file.clone()).await?;
    info!(path = %store.path().await.display(), count = store.count().await, "hospital store ready");

    let state = AppState::new(store);
    Ok(routes::build_router(state, build_cors()))
}

/// Build the app and serve it until `shutdown` resolves.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg).await?;

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr()).await?;
    info!(addr = %listener.local_addr()?, "Server is initiated");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("server drained");
    Ok(())
}
