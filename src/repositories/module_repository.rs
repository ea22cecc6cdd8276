use async_trait::async_trait;
use mongodb::bson::doc;

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::Module,
    repositories::table::{MemoryTable, MongoTable},
};

#[async_trait]
pub trait ModuleRepository: Send + Sync {
    async fn create(&self, module: Module) -> AppResult<Module>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Module>>;
    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<Module>>;
    async fn find_all(&self) -> AppResult<Vec<Module>>;
    async fn find_by_folders(&self, folder_ids: &[i64]) -> AppResult<Vec<Module>>;
    async fn update(&self, module: Module) -> AppResult<Module>;
    async fn delete_many(&self, ids: &[i64]) -> AppResult<u64>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoModuleRepository {
    table: MongoTable<Module>,
}

impl MongoModuleRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            table: MongoTable::new(db),
        }
    }
}

#[async_trait]
impl ModuleRepository for MongoModuleRepository {
    async fn create(&self, module: Module) -> AppResult<Module> {
        self.table.insert(module).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Module>> {
        self.table.find_by_id(id).await
    }

    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<Module>> {
        self.table.find_by_public_id(public_id).await
    }

    async fn find_all(&self) -> AppResult<Vec<Module>> {
        self.table.find_many(doc! {}).await
    }

    async fn find_by_folders(&self, folder_ids: &[i64]) -> AppResult<Vec<Module>> {
        self.table.find_in("folder_id", folder_ids).await
    }

    async fn update(&self, module: Module) -> AppResult<Module> {
        self.table.replace(module).await
    }

    async fn delete_many(&self, ids: &[i64]) -> AppResult<u64> {
        self.table.delete_ids(ids).await
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        self.table.ensure_key_indexes().await?;
        self.table.ensure_index("folder_id").await
    }
}

#[derive(Default)]
pub struct InMemoryModuleRepository {
    table: MemoryTable<Module>,
}

#[async_trait]
impl ModuleRepository for InMemoryModuleRepository {
    async fn create(&self, module: Module) -> AppResult<Module> {
        self.table.insert(module).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Module>> {
        self.table.find_by_id(id).await
    }

    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<Module>> {
        self.table.find_by_public_id(public_id).await
    }

    async fn find_all(&self) -> AppResult<Vec<Module>> {
        Ok(self.table.find_many(|_| true).await)
    }

    async fn find_by_folders(&self, folder_ids: &[i64]) -> AppResult<Vec<Module>> {
        Ok(self.table.find_many(|row| folder_ids.contains(&row.folder_id)).await)
    }

    async fn update(&self, module: Module) -> AppResult<Module> {
        self.table.replace(module).await
    }

    async fn delete_many(&self, ids: &[i64]) -> AppResult<u64> {
        Ok(self.table.delete_ids(ids).await)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}
