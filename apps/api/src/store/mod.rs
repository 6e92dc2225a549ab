//! Document store — two independent collections of JSON documents keyed by
//! string id: the knowledge base of past projects and the estimation
//! history. The store guarantees atomicity only per record; there are no
//! cross-collection transactions. Callers never rely on store order and
//! re-sort after every `list`.

pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{EstimationHistory, ProjectExample};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("stored document is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Contract for the remote document store. Every operation returns an
/// explicit result; callers apply local state changes only after a write
/// or delete has been confirmed.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list_examples(&self) -> Result<Vec<ProjectExample>, StoreError>;

    /// Upserts by id. The record is serialized to plain JSON; absent
    /// optional fields are omitted from the document.
    async fn save_example(&self, example: &ProjectExample) -> Result<(), StoreError>;

    /// Returns `false` when no record with that id existed.
    async fn delete_example(&self, id: &str) -> Result<bool, StoreError>;

    async fn list_history(&self) -> Result<Vec<EstimationHistory>, StoreError>;

    async fn save_history(&self, entry: &EstimationHistory) -> Result<(), StoreError>;

    /// Wipes both collections. Destructive; the caller is responsible for
    /// confirming with the user first. No rollback is attempted — a partial
    /// failure can leave one collection cleared and the other intact.
    async fn clear_all(&self) -> Result<(), StoreError>;
}
