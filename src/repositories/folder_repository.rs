use async_trait::async_trait;
use mongodb::bson::doc;

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::Folder,
    repositories::table::{MemoryTable, MongoTable},
};

#[async_trait]
pub trait FolderRepository: Send + Sync {
    async fn create(&self, folder: Folder) -> AppResult<Folder>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Folder>>;
    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<Folder>>;
    async fn find_all(&self) -> AppResult<Vec<Folder>>;
    async fn find_by_user(&self, user_id: i64) -> AppResult<Vec<Folder>>;
    async fn update(&self, folder: Folder) -> AppResult<Folder>;
    async fn delete_many(&self, ids: &[i64]) -> AppResult<u64>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoFolderRepository {
    table: MongoTable<Folder>,
}

impl MongoFolderRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            table: MongoTable::new(db),
        }
    }
}

#[async_trait]
impl FolderRepository for MongoFolderRepository {
    async fn create(&self, folder: Folder) -> AppResult<Folder> {
        self.table.insert(folder).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Folder>> {
        self.table.find_by_id(id).await
    }

    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<Folder>> {
        self.table.find_by_public_id(public_id).await
    }

    async fn find_all(&self) -> AppResult<Vec<Folder>> {
        self.table.find_many(doc! {}).await
    }

    async fn find_by_user(&self, user_id: i64) -> AppResult<Vec<Folder>> {
        self.table.find_many(doc! { "user_id": user_id }).await
    }

    async fn update(&self, folder: Folder) -> AppResult<Folder> {
        self.table.replace(folder).await
    }

    async fn delete_many(&self, ids: &[i64]) -> AppResult<u64> {
        self.table.delete_ids(ids).await
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        self.table.ensure_key_indexes().await?;
        self.table.ensure_index("user_id").await
    }
}

#[derive(Default)]
pub struct InMemoryFolderRepository {
    table: MemoryTable<Folder>,
}

#[async_trait]
impl FolderRepository for InMemoryFolderRepository {
    async fn create(&self, folder: Folder) -> AppResult<Folder> {
        self.table.insert(folder).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Folder>> {
        self.table.find_by_id(id).await
    }

    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<Folder>> {
        self.table.find_by_public_id(public_id).await
    }

    async fn find_all(&self) -> AppResult<Vec<Folder>> {
        Ok(self.table.find_many(|_| true).await)
    }

    async fn find_by_user(&self, user_id: i64) -> AppResult<Vec<Folder>> {
        Ok(self.table.find_many(|f| f.user_id == user_id).await)
    }

    async fn update(&self, folder: Folder) -> AppResult<Folder> {
        self.table.replace(folder).await
    }

    async fn delete_many(&self, ids: &[i64]) -> AppResult<u64> {
        Ok(self.table.delete_ids(ids).await)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}
