use gateway_service::models::catalog::HttpCatalog;
use gateway_service::routes::{create_router, AppState, Backend};
use gateway_service::services::proxy::DownloadProxy;
use gateway_service::utils::config::Config;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const CONNECT_TIMEOUT_SECS: u64 = 10;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gateway_service=info,tower_http=info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .build()?;

    info!("Using catalog at {}", config.catalog_url);
    let backend: Backend = Arc::new(HttpCatalog::new(client.clone(), config.catalog_url.clone()));

    let proxy = DownloadProxy::from_config(client, &config)?;
    if config.enforce_url_allowlist {
        info!("Download allow-list enforced: {}", config.download_url_pattern);
    } else {
        info!("Download allow-list disabled, proxy will fetch any URL");
    }
    info!("Content type policy: {:?}", config.content_type_policy);

    let app = create_router(AppState::new(backend, proxy));

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Gateway service starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
