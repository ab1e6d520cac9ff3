// Main entry point for the claim verification API server

use std::sync::Arc;

use anyhow::{Context, Result};
use gemini_client::GeminiClient;
use server_core::domains::auth::JwtService;
use server_core::kernel::{
    ChromeBrowser, EvidenceSources, PostgresVerificationStore, ProgressHub, ServerDeps,
    COMPLETION_TIMEOUT,
};
use server_core::server::{build_app, AppState};
use server_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting claim verification API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Model client
    let mut gemini = GeminiClient::new(config.gemini_api_key.clone()).with_timeout(COMPLETION_TIMEOUT);
    if let Some(url) = &config.gemini_api_url {
        gemini = gemini.with_base_url(url);
    }
    if let Some(model) = &config.gemini_model {
        gemini = gemini.with_model(model);
    }
    tracing::info!(model = %gemini.model(), "Model client ready");

    // Headless browser
    let mut browser = ChromeBrowser::new();
    if let Some(path) = &config.chrome_executable {
        browser = browser.with_executable(path);
    }

    let progress_hub = ProgressHub::new();
    let deps = ServerDeps::new(
        Arc::new(gemini),
        Arc::new(browser),
        Arc::new(PostgresVerificationStore::new(pool)),
        Arc::new(progress_hub.clone()),
    )
    .with_sources(EvidenceSources {
        search_url: config.search_url.clone(),
        fact_check_url: config.fact_check_url.clone(),
        ..EvidenceSources::default()
    })
    .with_reused_trusted_domains(config.reuse_trusted_domains);

    let jwt_service = Arc::new(JwtService::new(&config.jwt_secret, config.jwt_issuer.clone()));
    let state = AppState::new(deps, jwt_service, progress_hub);

    // Build application
    let app = build_app(state, &config.allowed_origins);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Progress WebSocket: ws://localhost:{}/ws", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
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

    tracing::info!("Shutdown signal received, shutting down gracefully");
}
