//! Example service binary.
//!
//! Loads configuration from the environment, wires the adapters selected by
//! that configuration into the application layer, and serves the HTTP API
//! until a shutdown signal arrives.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use example_service::adapters::events::{InMemoryEventPublisher, RedisEventPublisher};
use example_service::adapters::http::{app_router, ExampleAppState};
use example_service::adapters::memory::InMemoryExampleRepository;
use example_service::adapters::partner::{HttpPartnerApi, HttpPartnerConfig, MockPartnerApi};
use example_service::adapters::postgres::{connect_pool, PostgresExampleRepository};
use example_service::application::{ExampleService, ExampleUseCase};
use example_service::config::{AppConfig, EventBackend, StorageBackend};
use example_service::ports::{EventPublisher, ExampleRepository, PartnerApi};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    tracing::info!(
        environment = ?config.server.environment,
        version = env!("CARGO_PKG_VERSION"),
        "starting example-service"
    );

    if config.is_production() && config.partner.enable_mock {
        tracing::warn!("mock partner API enabled in production");
    }

    let repository = build_repository(&config).await?;
    let partner = build_partner(&config);
    let publisher = build_publisher(&config).await?;

    let service = Arc::new(ExampleService::new(repository, config.limits.clone()));
    let usecase = Arc::new(ExampleUseCase::new(
        service,
        partner,
        config.partner.timeout(),
        config.partner.notification_timeout(),
    ));

    let state = ExampleAppState::new(usecase, publisher);
    let app = app_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    let drain_window = Duration::from_secs(config.server.shutdown_timeout_secs);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(drain_window))
        .await?;

    tracing::info!("shutdown complete");
    Ok(())
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured filter applies.
/// The JSON formatter is opt-in for log aggregation pipelines.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.server.log_json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Build the repository selected by configuration.
///
/// An unreachable PostgreSQL server degrades to the in-memory repository so
/// a development instance still comes up; a failed migration is fatal because
/// continuing against an unknown schema would corrupt data.
async fn build_repository(
    config: &AppConfig,
) -> Result<Arc<dyn ExampleRepository>, Box<dyn std::error::Error>> {
    if config.database.backend == StorageBackend::Postgres {
        match connect_pool(&config.database).await {
            Ok(pool) => {
                if config.database.run_migrations {
                    sqlx::migrate!("./migrations").run(&pool).await?;
                    tracing::info!("database migrations applied");
                }
                tracing::info!("repository backend: postgres");
                return Ok(Arc::new(PostgresExampleRepository::new(pool)));
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "postgres unreachable, falling back to in-memory storage"
                );
            }
        }
    }

    tracing::info!("repository backend: memory");
    Ok(Arc::new(InMemoryExampleRepository::new()))
}

/// Build the partner API client selected by configuration.
fn build_partner(config: &AppConfig) -> Arc<dyn PartnerApi> {
    if config.partner.enable_mock {
        tracing::info!(
            delay_ms = config.partner.mock_delay_ms,
            should_fail = config.partner.mock_should_fail,
            "partner backend: mock"
        );
        Arc::new(MockPartnerApi::from_config(&config.partner))
    } else {
        tracing::info!(base_url = %config.partner.base_url, "partner backend: http");
        Arc::new(HttpPartnerApi::new(HttpPartnerConfig::from(&config.partner)))
    }
}

/// Build the event publisher selected by configuration.
///
/// Unlike the repository there is no silent fallback here: a configured but
/// unreachable Redis would drop every event without anyone noticing.
async fn build_publisher(
    config: &AppConfig,
) -> Result<Arc<dyn EventPublisher>, Box<dyn std::error::Error>> {
    match config.events.backend {
        EventBackend::Redis => {
            let publisher = RedisEventPublisher::connect(&config.events).await?;
            tracing::info!(channel_prefix = %config.events.channel_prefix, "event backend: redis");
            Ok(Arc::new(publisher))
        }
        EventBackend::Memory => {
            tracing::info!("event backend: memory");
            Ok(Arc::new(InMemoryEventPublisher::new()))
        }
    }
}

/// Resolve when a shutdown signal (Ctrl+C or SIGTERM) arrives.
///
/// Once the signal fires, a watchdog enforces the drain window: connections
/// that have not finished by then are abandoned and the process exits.
async fn shutdown_signal(drain_window: Duration) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!(
        drain_secs = drain_window.as_secs(),
        "shutdown signal received, draining connections"
    );

    tokio::spawn(async move {
        tokio::time::sleep(drain_window).await;
        tracing::error!("drain window elapsed, forcing exit");
        std::process::exit(1);
    });
}
