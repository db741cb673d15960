use book_search::config::{AppConfig, DEFAULT_CONFIG_PATH};
use book_search::models::storage::MySqlBackend;
use book_search::routes::{create_router, AppState, Store};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("book_search=info,tower_http=info")),
        )
        .init();

    let config_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = match AppConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let options = match config.connect_options() {
        Ok(options) => options,
        Err(e) => {
            error!("Invalid database configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Connecting to {}", config.redacted_dsn());
    let backend = match MySqlBackend::new(options, config.server.max_connections).await {
        Ok(backend) => backend,
        Err(e) => {
            error!("Failed to connect to MySQL: {}", e);
            std::process::exit(1);
        }
    };

    let store: Store = Arc::new(backend);
    if let Err(e) = store.test_connection().await {
        error!("Failed to connect to storage backend: {}", e);
        std::process::exit(1);
    }
    info!("Storage backend connection successful");

    let app = create_router(
        AppState::new(store, config.server.term_result_limit),
        config.request_timeout(),
    );

    let port = std::env::var("PORT")
        .ok()
        .and_then(|port| port.parse::<u16>().ok())
        .unwrap_or(config.server.port);
    let addr = format!("0.0.0.0:{}", port);

    info!("Book search service starting on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
