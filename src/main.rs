use product_search::config::Config;
use product_search::models::storage::SqliteBackend;
use product_search::{app, Backend};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("product_search=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    info!("Opening dataset {}", config.database_path.display());
    let backend: Backend = Arc::new(
        SqliteBackend::connect(&config.database_path, config.db_max_connections).await?,
    );

    backend.test_connection().await?;
    info!("Dataset connection successful");

    let app = app(backend, &config);

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Product search starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
