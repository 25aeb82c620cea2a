use books_service::config::ServiceConfig;
use books_service::models::storage::{BookStore, JsonFileStore};
use books_service::{app, AppState};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("books_service=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServiceConfig::from_env();

    let store = JsonFileStore::new(config.data_path.clone());
    store.ensure_exists().await?;
    if let Err(e) = store.test_connection().await {
        error!(
            "Book collection at {} is unreadable: {}",
            config.data_path.display(),
            e
        );
        std::process::exit(1);
    }
    info!("Using book collection at {}", config.data_path.display());

    let app = app(AppState::new(Arc::new(store)));

    let addr = config.addr();
    info!("Books service starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
