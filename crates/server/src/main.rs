use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tubedesk_core::{
    create_token_source, load_config, load_config_or_default, validate_config, AccessTokenSource,
    HttpThumbnailSource, ThumbnailSource, VideoPlatform, YouTubeClient,
};
use tubedesk_server::{
    api::create_router,
    startup::{bind_first_available, open_browser_after},
    state::AppState,
};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // An explicitly named config file must exist; the default one is optional.
    let config = match std::env::var("TUBEDESK_CONFIG") {
        Ok(path) => {
            let path = PathBuf::from(path);
            info!("Loading configuration from {:?}", path);
            load_config(&path).with_context(|| format!("Failed to load config from {:?}", path))?
        }
        Err(_) => {
            let path = PathBuf::from("config.toml");
            info!("Loading configuration from {:?} (defaults if absent)", path);
            load_config_or_default(&path)
                .with_context(|| format!("Failed to load config from {:?}", path))?
        }
    };

    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Thumbnail cache: {:?}", config.cache.thumbnail_dir);
    info!("Backup file: {:?}", config.storage.backup_path);

    let tokens: Arc<dyn AccessTokenSource> = Arc::from(
        create_token_source(&config.credentials).context("Failed to set up credentials")?,
    );
    info!("Using token source: {}", tokens.source_name());

    let platform: Arc<dyn VideoPlatform> = Arc::new(
        YouTubeClient::new(&config.youtube, tokens).context("Failed to create YouTube client")?,
    );
    let thumbnail_source: Arc<dyn ThumbnailSource> = Arc::new(
        HttpThumbnailSource::new(config.youtube.timeout_secs as u64)
            .context("Failed to create thumbnail downloader")?,
    );

    let state = Arc::new(AppState::new(config.clone(), platform, thumbnail_source));
    state
        .thumbnails()
        .ensure_dir()
        .await
        .context("Failed to create thumbnail cache directory")?;

    let app = create_router(state);

    let listener = bind_first_available(
        config.server.host,
        config.server.port,
        config.server.port_scan_range,
    )
    .await?;
    let addr = listener.local_addr().context("Listener has no address")?;
    let url = format!("http://{}", addr);
    info!("Starting server on {}", url);

    if config.server.open_browser {
        tokio::spawn(open_browser_after(
            url,
            Duration::from_millis(config.server.browser_delay_ms),
        ));
    }

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
