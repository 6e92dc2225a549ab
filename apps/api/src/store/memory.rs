//! In-memory store used by handler and generator tests. Mirrors the
//! per-record semantics of the Postgres store, including unordered lists.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::{EstimationHistory, ProjectExample};
use crate::store::{DocumentStore, StoreError};

#[derive(Default)]
pub struct MemoryStore {
    examples: Mutex<HashMap<String, ProjectExample>>,
    history: Mutex<HashMap<String, EstimationHistory>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_examples(examples: Vec<ProjectExample>) -> Self {
        let store = Self::new();
        {
            let mut map = store.examples.lock().unwrap();
            for example in examples {
                map.insert(example.id.clone(), example);
            }
        }
        store
    }

    pub fn history_len(&self) -> usize {
        self.history.lock().unwrap().len()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_examples(&self) -> Result<Vec<ProjectExample>, StoreError> {
        Ok(self.examples.lock().unwrap().values().cloned().collect())
    }

    async fn save_example(&self, example: &ProjectExample) -> Result<(), StoreError> {
        self.examples
            .lock()
            .unwrap()
            .insert(example.id.clone(), example.clone());
        Ok(())
    }

    async fn delete_example(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.examples.lock().unwrap().remove(id).is_some())
    }

    async fn list_history(&self) -> Result<Vec<EstimationHistory>, StoreError> {
        Ok(self.history.lock().unwrap().values().cloned().collect())
    }

    async fn save_history(&self, entry: &EstimationHistory) -> Result<(), StoreError> {
        self.history
            .lock()
            .unwrap()
            .insert(entry.id.clone(), entry.clone());
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        self.examples.lock().unwrap().clear();
        self.history.lock().unwrap().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attachment, EstimationConfig, EstimationResult};

    fn example(id: &str) -> ProjectExample {
        ProjectExample {
            id: id.to_string(),
            title: "E-commerce store".to_string(),
            requirements: "Catalog, cart, Stripe checkout".to_string(),
            budget: "$3,000".to_string(),
            timeline: "4 weeks".to_string(),
            success_reason: None,
            attachment: Some(Attachment {
                name: "mockup.png".to_string(),
                mime_type: "image/png".to_string(),
                data: "iVBORw0KGgo=".to_string(),
            }),
        }
    }

    #[tokio::test]
    async fn test_saved_example_round_trips_all_fields() {
        let store = MemoryStore::new();
        let ex = example("a");
        store.save_example(&ex).await.unwrap();

        let listed = store.list_examples().await.unwrap();
        assert_eq!(listed, vec![ex]);
    }

    #[tokio::test]
    async fn test_save_is_upsert_by_id() {
        let store = MemoryStore::new();
        store.save_example(&example("a")).await.unwrap();

        let mut updated = example("a");
        updated.budget = "$3,500".to_string();
        store.save_example(&updated).await.unwrap();

        let listed = store.list_examples().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].budget, "$3,500");
    }

    #[tokio::test]
    async fn test_delete_reports_whether_record_existed() {
        let store = MemoryStore::new();
        store.save_example(&example("a")).await.unwrap();

        assert!(store.delete_example("a").await.unwrap());
        assert!(!store.delete_example("a").await.unwrap());
        assert!(store.list_examples().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_all_empties_both_collections() {
        let store = MemoryStore::new();
        store.save_example(&example("a")).await.unwrap();
        store
            .save_history(&EstimationHistory {
                id: "h1".to_string(),
                project_name: "Shop...".to_string(),
                timestamp: 1,
                result: EstimationResult::parse_failure(),
                config: Some(EstimationConfig::default()),
                attachment: None,
            })
            .await
            .unwrap();

        store.clear_all().await.unwrap();
        assert!(store.list_examples().await.unwrap().is_empty());
        assert!(store.list_history().await.unwrap().is_empty());
    }
}
