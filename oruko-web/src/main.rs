mod api;
mod config;

use api::{AppState, SharedClient, router};
use config::ServerConfig;
use oruko_export::CardExporter;
use oruko_lookup::{ClientConfig, HttpTranslationClient, MockTranslationClient};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_matches(&config::command().get_matches());

    let client = translation_client(&config)
        .map_err(|e| format!("Failed to initialize translation client: {}", e))?;

    let mut exporter = CardExporter::new();
    if let Some(font) = &config.font {
        exporter = exporter.with_font_file(font)?;
        info!(font = %font.display(), "loaded card font");
    }

    let mut state = AppState::new(client, exporter)
        .with_session_limits(config.session_ttl, config.max_sessions);
    if let Some(ratio) = config.pixel_ratio {
        state = state.with_pixel_ratio(ratio);
    }

    state.spawn_sweeper();
    info!(
        ttl_secs = config.session_ttl.as_secs(),
        max_sessions = config.max_sessions,
        "Starting Oruko web server"
    );

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("Server running at http://{}", config.bind);

    axum::serve(listener, app).await?;

    Ok(())
}

fn translation_client(config: &ServerConfig) -> Result<SharedClient, oruko_lookup::ConfigError> {
    if config.mock {
        info!("Using mock translation client");
        return Ok(Arc::new(MockTranslationClient::demo()));
    }

    let mut client_config = match &config.api_base_url {
        Some(url) => ClientConfig::new(url.clone()),
        None => ClientConfig::from_env()?,
    };
    if let Some(timeout) = config.timeout {
        client_config = client_config.with_timeout(timeout);
    }

    let client = HttpTranslationClient::new(client_config)?;
    info!(base_url = client.base_url(), "Using translation service");
    Ok(Arc::new(client))
}
