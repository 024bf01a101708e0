use axum::Router;
use serde_json::json;
use std::sync::Arc;

use flower_server::backend::BackendFactory;
use flower_server::config::{ApiConfig, AppConfig, DatabaseConfig, ServerConfig};
use flower_server::resource::build_router;

/// Configuration pointing at a fresh in-memory SQLite store.
pub fn create_test_app_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: ":memory:".to_string(),
            // In-memory SQLite is per-connection; the pool must stay at one.
            max_connections: 1,
        },
        api: ApiConfig::default(),
    }
}

/// Build the full application router over an in-memory store.
pub async fn setup_test_app(
    app_config: AppConfig,
) -> Result<Router, Box<dyn std::error::Error>> {
    let backend = BackendFactory::create(&app_config.database).await?;
    Ok(build_router(backend, Arc::new(app_config)))
}

/// A creation payload matching the documented record shape, without an id.
#[allow(dead_code)]
pub fn create_test_flower_json(species: &str) -> serde_json::Value {
    json!({
        "sepal": {"length": 5.1, "width": 3.5},
        "petal": {"length": 1.4, "width": 0.2},
        "species": species
    })
}
