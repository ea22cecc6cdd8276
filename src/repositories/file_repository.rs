use async_trait::async_trait;
use mongodb::bson::doc;

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::File,
    repositories::table::{MemoryTable, MongoTable},
};

#[async_trait]
pub trait FileRepository: Send + Sync {
    async fn create(&self, file: File) -> AppResult<File>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<File>>;
    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<File>>;
    async fn find_all(&self) -> AppResult<Vec<File>>;
    async fn find_by_modules(&self, module_ids: &[i64]) -> AppResult<Vec<File>>;
    async fn update(&self, file: File) -> AppResult<File>;
    async fn delete_many(&self, ids: &[i64]) -> AppResult<u64>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoFileRepository {
    table: MongoTable<File>,
}

impl MongoFileRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            table: MongoTable::new(db),
        }
    }
}

#[async_trait]
impl FileRepository for MongoFileRepository {
    async fn create(&self, file: File) -> AppResult<File> {
        self.table.insert(file).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<File>> {
        self.table.find_by_id(id).await
    }

    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<File>> {
        self.table.find_by_public_id(public_id).await
    }

    async fn find_all(&self) -> AppResult<Vec<File>> {
        self.table.find_many(doc! {}).await
    }

    async fn find_by_modules(&self, module_ids: &[i64]) -> AppResult<Vec<File>> {
        self.table.find_in("module_id", module_ids).await
    }

    async fn update(&self, file: File) -> AppResult<File> {
        self.table.replace(file).await
    }

    async fn delete_many(&self, ids: &[i64]) -> AppResult<u64> {
        self.table.delete_ids(ids).await
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        self.table.ensure_key_indexes().await?;
        self.table.ensure_index("module_id").await
    }
}

#[derive(Default)]
pub struct InMemoryFileRepository {
    table: MemoryTable<File>,
}

#[async_trait]
impl FileRepository for InMemoryFileRepository {
    async fn create(&self, file: File) -> AppResult<File> {
        self.table.insert(file).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<File>> {
        self.table.find_by_id(id).await
    }

    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<File>> {
        self.table.find_by_public_id(public_id).await
    }

    async fn find_all(&self) -> AppResult<Vec<File>> {
        Ok(self.table.find_many(|_| true).await)
    }

    async fn find_by_modules(&self, module_ids: &[i64]) -> AppResult<Vec<File>> {
        Ok(self.table.find_many(|row| module_ids.contains(&row.module_id)).await)
    }

    async fn update(&self, file: File) -> AppResult<File> {
        self.table.replace(file).await
    }

    async fn delete_many(&self, ids: &[i64]) -> AppResult<u64> {
        Ok(self.table.delete_ids(ids).await)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}
