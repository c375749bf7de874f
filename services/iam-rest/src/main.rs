//! Warden IAM REST 服务

use std::net::SocketAddr;
use std::sync::Arc;

use iam_rest::{
    AppState, api,
    infrastructure::{RemoteEngine, SerializedPrincipalRealm},
    runtime::{init_runtime, shutdown_signal},
};
use tracing::{info, warn};
use warden_config::AppConfig;
use warden_telemetry::init_metrics;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // 加载配置
    let config = AppConfig::load("config")?;
    init_runtime(&config);

    let engine = RemoteEngine::new(&config.engine)?;
    info!(endpoint = %config.engine.endpoint, "Access engine client ready");

    let mut state = AppState::new(
        &config.authorization,
        config.identity.clone(),
        Arc::new(engine),
        Arc::new(SerializedPrincipalRealm),
    );
    match init_metrics() {
        Ok(handle) => state = state.with_metrics(handle),
        Err(e) => warn!(error = %e, "Metrics recorder not installed"),
    }

    let app = api::router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!(%addr, "Starting iam-rest");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
