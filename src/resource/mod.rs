use axum::{middleware, routing::get, Router};
use std::sync::Arc;

use crate::backend::FlowerBackend;
use crate::config::AppConfig;
use crate::logging::logging_middleware;

pub mod flower;

pub type AppState = (Arc<dyn FlowerBackend>, Arc<AppConfig>);

/// Build the application router. Shared by the binary and the integration
/// tests so both run the exact same route table and middleware.
pub fn build_router(backend: Arc<dyn FlowerBackend>, config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(flower::root))
        .route(
            "/flower",
            get(flower::list_flowers).post(flower::create_flower),
        )
        .route(
            "/flower/{id}",
            get(flower::find_flower)
                .put(flower::update_flower)
                .delete(flower::delete_flower),
        )
        .layer(middleware::from_fn(logging_middleware))
        .with_state((backend, config))
}
