use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use mongodb::{
    bson::{doc, Document},
    options::ReturnDocument,
    Collection,
};
use tokio::sync::Mutex;

use crate::{
    db::Database,
    errors::{AppError, AppResult},
};

/// Allocates surrogate integer ids per entity type.
#[async_trait]
pub trait SequenceRepository: Send + Sync {
    async fn next_id(&self, name: &str) -> AppResult<i64>;
}

pub struct MongoSequenceRepository {
    collection: Collection<Document>,
}

impl MongoSequenceRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("counters"),
        }
    }
}

#[async_trait]
impl SequenceRepository for MongoSequenceRepository {
    async fn next_id(&self, name: &str) -> AppResult<i64> {
        let counter = self
            .collection
            .find_one_and_update(doc! { "_id": name }, doc! { "$inc": { "seq": 1_i64 } })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| AppError::DatabaseError(format!("counter '{}' was not created", name)))?;

        counter
            .get_i64("seq")
            .map_err(|e| AppError::DatabaseError(format!("counter '{}' is malformed: {}", name, e)))
    }
}

#[derive(Default)]
pub struct InMemorySequenceRepository {
    counters: Arc<Mutex<HashMap<String, i64>>>,
}

#[async_trait]
impl SequenceRepository for InMemorySequenceRepository {
    async fn next_id(&self, name: &str) -> AppResult<i64> {
        let mut counters = self.counters.lock().await;
        let seq = counters.entry(name.to_string()).or_insert(0);
        *seq += 1;
        Ok(*seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_sequences_are_independent_per_name() {
        let sequences = InMemorySequenceRepository::default();

        assert_eq!(sequences.next_id("folders").await.unwrap(), 1);
        assert_eq!(sequences.next_id("folders").await.unwrap(), 2);
        assert_eq!(sequences.next_id("modules").await.unwrap(), 1);
    }
}
