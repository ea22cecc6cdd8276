use async_trait::async_trait;
use mongodb::bson::doc;

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Choice,
    repositories::table::{MemoryTable, MongoTable},
};

#[async_trait]
pub trait ChoiceRepository: Send + Sync {
    async fn create(&self, choice: Choice) -> AppResult<Choice>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Choice>>;
    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<Choice>>;
    async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Choice>>;
    async fn find_all(&self) -> AppResult<Vec<Choice>>;
    async fn update(&self, choice: Choice) -> AppResult<Choice>;
    async fn delete(&self, id: i64) -> AppResult<()>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Choice with id '{}' not found", id))
}

pub struct MongoChoiceRepository {
    table: MongoTable<Choice>,
}

impl MongoChoiceRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            table: MongoTable::new(db),
        }
    }
}

#[async_trait]
impl ChoiceRepository for MongoChoiceRepository {
    async fn create(&self, choice: Choice) -> AppResult<Choice> {
        self.table.insert(choice).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Choice>> {
        self.table.find_by_id(id).await
    }

    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<Choice>> {
        self.table.find_by_public_id(public_id).await
    }

    async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Choice>> {
        self.table.find_in("id", ids).await
    }

    async fn find_all(&self) -> AppResult<Vec<Choice>> {
        self.table.find_many(doc! {}).await
    }

    async fn update(&self, choice: Choice) -> AppResult<Choice> {
        self.table.replace(choice).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        if self.table.delete_ids(&[id]).await? == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        self.table.ensure_key_indexes().await
    }
}

#[derive(Default)]
pub struct InMemoryChoiceRepository {
    table: MemoryTable<Choice>,
}

#[async_trait]
impl ChoiceRepository for InMemoryChoiceRepository {
    async fn create(&self, choice: Choice) -> AppResult<Choice> {
        self.table.insert(choice).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Choice>> {
        self.table.find_by_id(id).await
    }

    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<Choice>> {
        self.table.find_by_public_id(public_id).await
    }

    async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Choice>> {
        Ok(self.table.find_many(|c| ids.contains(&c.id)).await)
    }

    async fn find_all(&self) -> AppResult<Vec<Choice>> {
        Ok(self.table.find_many(|_| true).await)
    }

    async fn update(&self, choice: Choice) -> AppResult<Choice> {
        self.table.replace(choice).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        if self.table.delete_ids(&[id]).await == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}
