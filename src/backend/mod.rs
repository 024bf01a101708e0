//! Storage abstraction for the flower collection.
//!
//! Handlers talk to a [`FlowerBackend`] trait object; the only concrete
//! implementation stores each record as a JSON document in SQLite. All
//! operations are single-document and rely on the store's own per-document
//! atomicity; there are no multi-document transactions.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};
use crate::models::Flower;
use crate::update::UpdateSet;

pub mod sqlite;

pub use sqlite::SqliteBackend;

/// The single conversion boundary between opaque id strings and the store's
/// native identifier. This is the only place allowed to fail with
/// [`AppError::InvalidId`]; "malformed id" stays distinct from "not found"
/// until the HTTP mapping collapses the two.
pub fn parse_flower_id(id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::InvalidId(id.to_string()))
}

/// Store operations for the flower collection.
#[async_trait]
pub trait FlowerBackend: Send + Sync {
    /// Check that the backing store is reachable.
    async fn health_check(&self) -> AppResult<()>;

    /// Persist a new flower, assigning its id, and return the stored record.
    /// Any id on the input is ignored; ids are always store-generated.
    async fn insert_flower(&self, flower: &Flower) -> AppResult<Flower>;

    /// Find a flower by its opaque id string.
    async fn find_flower_by_id(&self, id: &str) -> AppResult<Option<Flower>>;

    /// Return up to `limit` flowers; ordering is unspecified.
    async fn find_all_flowers(&self, limit: i64) -> AppResult<Vec<Flower>>;

    /// Apply a field-level update, returning whether a record matched.
    /// An empty [`UpdateSet`] reports no match without touching the store;
    /// callers are expected to skip the call entirely in that case.
    async fn update_flower_fields(&self, id: &str, update: &UpdateSet) -> AppResult<bool>;

    /// Delete a flower, returning whether anything was removed.
    async fn delete_flower(&self, id: &str) -> AppResult<bool>;
}

/// Factory for creating backend instances from configuration.
pub struct BackendFactory;

impl BackendFactory {
    pub async fn create(config: &DatabaseConfig) -> AppResult<Arc<dyn FlowerBackend>> {
        let backend = SqliteBackend::connect(config).await?;
        Ok(Arc::new(backend))
    }
}
