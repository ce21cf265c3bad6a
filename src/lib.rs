pub mod api;
pub mod config;
pub mod pipeline;
pub mod reference;
pub mod scripture;
pub mod study;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::config::ServiceConfig;
use crate::study::StudyService;

/// Process entry point: configure, wire the study service, serve until Ctrl-C.
pub fn run() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to build async runtime: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(serve()) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

async fn serve() -> Result<(), String> {
    let config = Arc::new(ServiceConfig::from_env());
    let service = StudyService::from_config(&config).map_err(|e| e.to_string())?;

    tracing::info!(
        addr = %config.bind_addr,
        tier_order = %config.tier_order,
        generative = config.generative_enabled(),
        "Study service configured"
    );

    let mut server =
        api::server::start_study_api_server(Arc::new(service), config.clone(), config.bind_addr).await?;

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {e}");
    }
    server.shutdown();
    server.wait().await;
    Ok(())
}
