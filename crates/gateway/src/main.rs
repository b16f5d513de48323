use alert::{AlertConfig, AlertDispatcher};
use anyhow::Context;
use classifier::{Detector, DetectorConfig};
use gateway::{
    ModelBackend,
    config::get_configuration,
    logging::setup_logging,
    routes,
    state::AppState,
};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_configuration().context("failed to load configuration")?;
    setup_logging(&config);

    let detector_config = DetectorConfig::from_env()?;
    tracing::info!(config = ?detector_config, "Loading detection model");
    let detector =
        Detector::<ModelBackend>::from_config(detector_config).context("failed to load model")?;
    tracing::info!("Model loaded successfully");

    let alert_config = AlertConfig::from_env()?;
    let dispatcher =
        AlertDispatcher::from_config(&alert_config).context("failed to build alert dispatcher")?;

    let (tx, _) = broadcast::channel(10);

    let state = AppState {
        detector: Arc::new(Mutex::new(detector)),
        dispatcher: Arc::new(Mutex::new(dispatcher)),
        tx: Arc::new(tx),
        webcam_started: Arc::new(AtomicBool::new(false)),
    };

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Gateway listening on {}", addr);

    axum::serve(listener, routes::router(state)).await?;

    Ok(())
}
