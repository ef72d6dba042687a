//! eUsage Review Server
//!
//! REST API for reviewing and correcting COUNTER title matches.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use eusage_review::{
    api,
    config::AppConfig,
    repository::{EusageApi, OkapiClient},
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("eusage_review={},tower_http=debug", config.logging.level).into());

    let (json_layer, pretty_layer) = if config.logging.format == "json" {
        (Some(fmt::layer().json()), None)
    } else {
        (None, Some(fmt::layer()))
    };

    // The guard flushes the file writer on shutdown
    let (file_layer, _log_guard) = match &config.logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "eusage-review.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(pretty_layer)
        .with(file_layer)
        .init();

    tracing::info!("Starting eUsage Review Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Using Okapi at {} (tenant {})",
        config.okapi.url,
        config.okapi.tenant
    );

    let okapi: Arc<dyn EusageApi> = Arc::new(OkapiClient::new(&config.okapi)?);
    let services = Services::new(okapi, &config.review);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
