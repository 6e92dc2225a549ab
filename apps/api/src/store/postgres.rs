use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::models::{EstimationHistory, ProjectExample};
use crate::store::{DocumentStore, StoreError};

const TABLE_EXAMPLES: &str = "knowledge_base";
const TABLE_HISTORY: &str = "estimation_history";

/// Postgres-backed document store: one table per collection, each row a
/// string id plus the full record as a `jsonb` document.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Connects a pool and ensures both collection tables exist.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        info!("Connecting to PostgreSQL...");
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        for table in [TABLE_EXAMPLES, TABLE_HISTORY] {
            sqlx::query(&format!(
                "CREATE TABLE IF NOT EXISTS {table} (id TEXT PRIMARY KEY, doc JSONB NOT NULL)"
            ))
            .execute(&pool)
            .await?;
        }

        info!("PostgreSQL document store ready");
        Ok(Self { pool })
    }

    async fn list_docs<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>, StoreError> {
        let docs: Vec<Value> =
            sqlx::query_scalar(&format!("SELECT doc FROM {table}"))
                .fetch_all(&self.pool)
                .await?;
        docs.into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(StoreError::from))
            .collect()
    }

    async fn put_doc(&self, table: &str, id: &str, doc: Value) -> Result<(), StoreError> {
        sqlx::query(&format!(
            "INSERT INTO {table} (id, doc) VALUES ($1, $2) \
             ON CONFLICT (id) DO UPDATE SET doc = EXCLUDED.doc"
        ))
        .bind(id)
        .bind(doc)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn list_examples(&self) -> Result<Vec<ProjectExample>, StoreError> {
        self.list_docs(TABLE_EXAMPLES).await
    }

    async fn save_example(&self, example: &ProjectExample) -> Result<(), StoreError> {
        let doc = serde_json::to_value(example)?;
        self.put_doc(TABLE_EXAMPLES, &example.id, doc).await
    }

    async fn delete_example(&self, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(&format!("DELETE FROM {TABLE_EXAMPLES} WHERE id = $1"))
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_history(&self) -> Result<Vec<EstimationHistory>, StoreError> {
        self.list_docs(TABLE_HISTORY).await
    }

    async fn save_history(&self, entry: &EstimationHistory) -> Result<(), StoreError> {
        let doc = serde_json::to_value(entry)?;
        self.put_doc(TABLE_HISTORY, &entry.id, doc).await
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        // Intentionally two independent statements, not one transaction:
        // a failure after the first leaves the collections inconsistent
        // until the user retries, which is the documented behavior.
        sqlx::query(&format!("DELETE FROM {TABLE_EXAMPLES}"))
            .execute(&self.pool)
            .await?;
        sqlx::query(&format!("DELETE FROM {TABLE_HISTORY}"))
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
