//! Strata server: layered JSON web backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use tracing_subscriber::{EnvFilter, fmt};

use strata_api::{AppState, build_app};
use strata_auth::{JwtDecoder, JwtEncoder, PasswordHasher};
use strata_cache::CacheManager;
use strata_core::config::AppConfig;
use strata_core::error::AppError;
use strata_database::DatabasePool;
use strata_database::migration::run_migrations;
use strata_database::repositories::{AuthRepository, HealthRepository, SampleRepository};
use strata_messaging::{
    DisabledPublisher, PubSubClient, PubSubSamplePublisher, SamplePublisher, SampleReceiver,
    SubscriptionSource,
};
use strata_proxy::{HttpSampleProxy, HttpSampleXmlProxy};
use strata_service::{AuthService, HealthService, SampleReceiverHandler, SampleService};

#[tokio::main]
async fn main() {
    let env = std::env::var("STRATA_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env).and_then(|c| c.validate().map(|()| c)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    let hostname = hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_default();
    let root = tracing::info_span!(
        "app",
        os = std::env::consts::OS,
        arch = std::env::consts::ARCH,
        hostname = %hostname,
        environment = %config.server.environment,
        name = %config.server.name,
    );

    if let Err(e) = run(config).instrument(root).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_current_span(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Strata v{}", env!("CARGO_PKG_VERSION"));

    // ── Database ─────────────────────────────────────────────────
    let database = DatabasePool::connect(&config.database).await?;
    if config.database.run_migrations {
        tracing::info!("Running database migrations...");
        run_migrations(database.pool()).await?;
    }
    let pool = database.pool().clone();

    // ── Cache ────────────────────────────────────────────────────
    tracing::info!(
        "Initializing cache (provider: {})...",
        config.cache.provider
    );
    let cache = CacheManager::new(&config.cache).await?;

    // ── Outbound collaborators ───────────────────────────────────
    let proxy = Arc::new(HttpSampleProxy::new(&config.proxy)?);
    let xml_proxy = Arc::new(HttpSampleXmlProxy::new(&config.proxy)?);

    let pubsub_client = if config.pubsub.enabled || config.pubsub.receiver.enabled {
        Some(PubSubClient::new(
            &config.pubsub.endpoint,
            config.pubsub.access_token.clone(),
        )?)
    } else {
        None
    };

    let publisher: Arc<dyn SamplePublisher> = match (&pubsub_client, config.pubsub.enabled) {
        (Some(client), true) => Arc::new(PubSubSamplePublisher::new(
            client.clone(),
            &config.pubsub.publisher,
        )),
        _ => {
            tracing::info!("Pub/Sub publishing is disabled");
            Arc::new(DisabledPublisher)
        }
    };

    // ── Services ─────────────────────────────────────────────────
    let auth_service = AuthService::new(
        Arc::new(AuthRepository::new(
            pool.clone(),
            config.auth.refresh_token_ttl_days,
        )),
        Arc::new(JwtEncoder::new(&config.auth)),
        Arc::new(PasswordHasher::new()),
    );
    let sample_service = SampleService::new(
        proxy,
        xml_proxy,
        Arc::new(SampleRepository::new(pool.clone())),
        publisher,
        cache.clone(),
    );
    let health_service = HealthService::new(
        Arc::new(cache.clone()),
        Arc::new(HealthRepository::new(pool.clone())),
    );

    // ── Receiver ─────────────────────────────────────────────────
    let shutdown = CancellationToken::new();
    let receiver_handles: Vec<JoinHandle<()>> = match pubsub_client {
        Some(client) if config.pubsub.receiver.enabled => {
            let receiver_config = &config.pubsub.receiver;
            let receiver = Arc::new(SampleReceiver::new(
                Arc::new(SubscriptionSource::new(client, receiver_config)),
                Arc::new(SampleReceiverHandler::new(sample_service.clone())),
                cache.clone(),
                Duration::from_millis(receiver_config.restart_delay_ms),
            ));
            receiver.start(receiver_config.count, shutdown.clone())
        }
        _ => Vec::new(),
    };

    // ── HTTP server ──────────────────────────────────────────────
    let state = AppState {
        jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
        auth_service: Arc::new(auth_service),
        sample_service: Arc::new(sample_service),
        health_service: Arc::new(health_service),
    };
    let app = build_app(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Strata server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Shutdown ─────────────────────────────────────────────────
    tracing::info!("Stopping receivers...");
    shutdown.cancel();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    for handle in receiver_handles {
        if tokio::time::timeout(grace, handle).await.is_err() {
            tracing::warn!("Receiver did not stop within {:?}", grace);
        }
    }

    database.close().await;
    tracing::info!("Strata server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
