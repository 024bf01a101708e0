use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use uuid::Uuid;

use super::{parse_flower_id, FlowerBackend};
use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};
use crate::models::Flower;
use crate::update::UpdateSet;

/// SQLite-backed flower store.
///
/// Each record lives as one JSON document in the `doc` column, so a partial
/// update can be applied with `json_set` over dotted field paths without
/// rewriting the rest of the document.
pub struct SqliteBackend {
    pool: SqlitePool,
}

impl SqliteBackend {
    /// Open the connection pool and make sure the schema exists. This is the
    /// one long-lived resource of the process; it is acquired here at
    /// startup and released when the pool drops at shutdown.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| {
                AppError::Configuration(format!("Invalid database URL {}: {}", config.url, e))
            })?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)))?;

        init_schema(&pool).await?;

        Ok(Self { pool })
    }

    fn row_to_flower(&self, row: &sqlx::sqlite::SqliteRow) -> AppResult<Flower> {
        let doc: String = row.get("doc");
        let flower: Flower = serde_json::from_str(&doc)?;
        Ok(flower)
    }
}

async fn init_schema(pool: &SqlitePool) -> AppResult<()> {
    let sql = r#"
        CREATE TABLE IF NOT EXISTS flowers (
            id TEXT PRIMARY KEY,
            doc TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
    "#;

    sqlx::query(sql)
        .execute(pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create flowers table: {}", e)))?;

    Ok(())
}

#[async_trait]
impl FlowerBackend for SqliteBackend {
    async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    async fn insert_flower(&self, flower: &Flower) -> AppResult<Flower> {
        let mut stored = flower.clone();
        let id = Uuid::new_v4().to_string();
        stored.id = Some(id.clone());

        let doc = serde_json::to_string(&stored)?;
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO flowers (id, doc, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&id)
        .bind(&doc)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert flower: {}", e)))?;

        Ok(stored)
    }

    async fn find_flower_by_id(&self, id: &str) -> AppResult<Option<Flower>> {
        parse_flower_id(id)?;

        let row = sqlx::query("SELECT doc FROM flowers WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to find flower: {}", e)))?;

        match row {
            Some(row) => Ok(Some(self.row_to_flower(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_all_flowers(&self, limit: i64) -> AppResult<Vec<Flower>> {
        let rows = sqlx::query("SELECT doc FROM flowers LIMIT ?1")
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to list flowers: {}", e)))?;

        rows.iter().map(|row| self.row_to_flower(row)).collect()
    }

    async fn update_flower_fields(&self, id: &str, update: &UpdateSet) -> AppResult<bool> {
        // Callers skip empty updates; if invoked anyway, report no match
        // deterministically instead of issuing an UPDATE with no effect.
        if update.is_empty() {
            return Ok(false);
        }

        parse_flower_id(id)?;

        // Field paths come from the closed set produced by the update
        // builder, never from request input, so they can be spliced into the
        // SQL text. Values are always bound.
        let mut set_expr = String::from("json_set(doc");
        for path in update.paths() {
            set_expr.push_str(&format!(", '$.{}', ?", path));
        }
        set_expr.push(')');

        let sql = format!(
            "UPDATE flowers SET doc = {}, updated_at = ? WHERE id = ?",
            set_expr
        );

        let mut query = sqlx::query(&sql);
        for (path, value) in update.entries() {
            query = match value {
                Value::Number(n) => query.bind(n.as_f64()),
                Value::String(s) => query.bind(s.as_str()),
                other => {
                    return Err(AppError::Internal(format!(
                        "Non-scalar update value for {}: {}",
                        path, other
                    )))
                }
            };
        }

        let result = query
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to update flower: {}", e)))?;

        // rows_affected counts matched rows even when the new values equal
        // the old ones, so this is a matched signal, not a modified signal.
        Ok(result.rows_affected() > 0)
    }

    async fn delete_flower(&self, id: &str) -> AppResult<bool> {
        parse_flower_id(id)?;

        let result = sqlx::query("DELETE FROM flowers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete flower: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
