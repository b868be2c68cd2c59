//! VoxBridge HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use infrastructure::{AppConfig, MediaStore};
use presentation_http::{routes, state::AppState};
use speech::{SpeechClientFactory, Transcoder};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voxbridge_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🎙️ VoxBridge v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    info!(
        host = %config.server.host,
        port = %config.server.port,
        storage = %config.storage.root,
        "Configuration loaded"
    );

    // Initialize speech clients
    let recognizer = SpeechClientFactory::recognizer(&config.speech)
        .map_err(|e| anyhow::anyhow!("Failed to initialize speech recognition: {e}"))?;
    let synthesizer = SpeechClientFactory::synthesizer(&config.speech)
        .map_err(|e| anyhow::anyhow!("Failed to initialize speech synthesis: {e}"))?;

    // Initialize the transcoder and media store
    let transcoder = Arc::new(Transcoder::new());
    if !transcoder.is_available().await {
        tracing::warn!("ffmpeg not found; recording conversions will fail");
    }

    let store = MediaStore::new(&config.storage.root)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open media store: {e}"))?;

    // Create app state
    let state = AppState {
        recognizer,
        synthesizer,
        transcoder,
        store: Arc::new(store),
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = routes::create_router(state);

    // Add middleware (order matters: first added = outermost)
    let mut app = app.layer(TraceLayer::new_for_http());

    if config.server.cors_enabled {
        let cors_layer = if config.server.allowed_origins.is_empty() {
            // Development mode: allow all origins
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            // Production mode: restrict to configured origins
            use axum::http::{HeaderValue, Method};
            let origins: Vec<HeaderValue> = config
                .server
                .allowed_origins
                .iter()
                .filter_map(|o| o.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any)
        };
        app = app.layer(cors_layer);
    }

    let app = app.layer(DefaultBodyLimit::max(config.server.max_body_size_bytes));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            // Keep serving; the SIGTERM branch can still end the select
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
