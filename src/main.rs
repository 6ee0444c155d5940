use fasting_timer::{router, spawn_stage_watcher, AppState, Config};
use std::net::SocketAddr;
use tokio::sync::oneshot;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::new(config);

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let watcher = spawn_stage_watcher(state.clone(), async move {
        let _ = stop_rx.await;
    });

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                error!("failed to listen for shutdown signal: {err}");
            }
            info!("shutting down");
            let _ = stop_tx.send(());
        })
        .await?;

    watcher.await?;
    Ok(())
}
