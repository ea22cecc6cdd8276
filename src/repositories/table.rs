//! Generic storage helpers shared by the per-entity repositories.
//!
//! [`MongoTable`] wraps a typed collection keyed by `id`/`public_id`;
//! [`MemoryTable`] mirrors the same operations over an in-process map.

use std::{collections::BTreeMap, sync::Arc};

use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Collection, IndexModel,
};
use tokio::sync::RwLock;

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Record,
};

pub struct MongoTable<T: Record> {
    collection: Collection<T>,
}

impl<T: Record> MongoTable<T> {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.records::<T>(),
        }
    }

    pub fn collection(&self) -> &Collection<T> {
        &self.collection
    }

    pub async fn insert(&self, item: T) -> AppResult<T> {
        self.collection.insert_one(&item).await?;
        Ok(item)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<T>> {
        Ok(self.collection.find_one(doc! { "id": id }).await?)
    }

    pub async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<T>> {
        Ok(self
            .collection
            .find_one(doc! { "public_id": public_id })
            .await?)
    }

    pub async fn find_many(&self, filter: Document) -> AppResult<Vec<T>> {
        let cursor = self.collection.find(filter).sort(doc! { "id": 1 }).await?;
        let items: Vec<T> = cursor.try_collect().await?;
        Ok(items)
    }

    pub async fn find_in(&self, field: &str, ids: &[i64]) -> AppResult<Vec<T>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.find_many(doc! { field: { "$in": ids.to_vec() } }).await
    }

    pub async fn replace(&self, item: T) -> AppResult<T> {
        let result = self
            .collection
            .replace_one(doc! { "id": item.id() }, &item)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "{} record {} not found",
                T::COLLECTION,
                item.public_id()
            )));
        }
        Ok(item)
    }

    pub async fn delete_ids(&self, ids: &[i64]) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = self
            .collection
            .delete_many(doc! { "id": { "$in": ids.to_vec() } })
            .await?;
        Ok(result.deleted_count)
    }

    pub async fn ensure_key_indexes(&self) -> AppResult<()> {
        for key in ["id", "public_id"] {
            let model = IndexModel::builder()
                .keys(doc! { key: 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name(format!("{}_unique", key))
                        .build(),
                )
                .build();
            self.collection.create_index(model).await?;
        }
        log::info!("Created key indexes for {} collection", T::COLLECTION);
        Ok(())
    }

    pub async fn ensure_index(&self, field: &str) -> AppResult<()> {
        let model = IndexModel::builder().keys(doc! { field: 1 }).build();
        self.collection.create_index(model).await?;
        Ok(())
    }
}

pub struct MemoryTable<T: Record> {
    rows: Arc<RwLock<BTreeMap<i64, T>>>,
}

impl<T: Record> Default for MemoryTable<T> {
    fn default() -> Self {
        Self {
            rows: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }
}

impl<T: Record> MemoryTable<T> {
    pub async fn insert(&self, item: T) -> AppResult<T> {
        self.insert_unless(item, |_| false, String::new).await
    }

    /// Inserts `item` unless an existing row matches `clashes`, checked under
    /// the same write lock as the insert.
    pub async fn insert_unless<F, M>(&self, item: T, clashes: F, message: M) -> AppResult<T>
    where
        F: Fn(&T) -> bool,
        M: FnOnce() -> String,
    {
        let mut rows = self.rows.write().await;
        if rows.values().any(|row| clashes(row)) {
            return Err(AppError::Conflict(message()));
        }
        let duplicate = rows.contains_key(&item.id())
            || rows.values().any(|row| row.public_id() == item.public_id());
        if duplicate {
            return Err(AppError::Conflict(format!(
                "{} record {} already exists",
                T::COLLECTION,
                item.public_id()
            )));
        }
        rows.insert(item.id(), item.clone());
        Ok(item)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<T>> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    pub async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<T>> {
        Ok(self.find_one(|row| row.public_id() == public_id).await)
    }

    pub async fn find_one<F>(&self, predicate: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        self.rows.read().await.values().find(|row| predicate(row)).cloned()
    }

    /// Rows matching `predicate`, ordered by id.
    pub async fn find_many<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.rows
            .read()
            .await
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }

    pub async fn replace(&self, item: T) -> AppResult<T> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&item.id()) {
            Some(row) => {
                *row = item.clone();
                Ok(item)
            }
            None => Err(AppError::NotFound(format!(
                "{} record {} not found",
                T::COLLECTION,
                item.public_id()
            ))),
        }
    }

    pub async fn delete_ids(&self, ids: &[i64]) -> u64 {
        let mut rows = self.rows.write().await;
        ids.iter().filter(|id| rows.remove(id).is_some()).count() as u64
    }
}
