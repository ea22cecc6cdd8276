use async_trait::async_trait;
use mongodb::bson::doc;

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::Comment,
    repositories::table::{MemoryTable, MongoTable},
};

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: Comment) -> AppResult<Comment>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Comment>>;
    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<Comment>>;
    async fn find_all(&self) -> AppResult<Vec<Comment>>;
    async fn find_by_files(&self, file_ids: &[i64]) -> AppResult<Vec<Comment>>;
    async fn update(&self, comment: Comment) -> AppResult<Comment>;
    async fn delete_many(&self, ids: &[i64]) -> AppResult<u64>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoCommentRepository {
    table: MongoTable<Comment>,
}

impl MongoCommentRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            table: MongoTable::new(db),
        }
    }
}

#[async_trait]
impl CommentRepository for MongoCommentRepository {
    async fn create(&self, comment: Comment) -> AppResult<Comment> {
        self.table.insert(comment).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Comment>> {
        self.table.find_by_id(id).await
    }

    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<Comment>> {
        self.table.find_by_public_id(public_id).await
    }

    async fn find_all(&self) -> AppResult<Vec<Comment>> {
        self.table.find_many(doc! {}).await
    }

    async fn find_by_files(&self, file_ids: &[i64]) -> AppResult<Vec<Comment>> {
        self.table.find_in("file_id", file_ids).await
    }

    async fn update(&self, comment: Comment) -> AppResult<Comment> {
        self.table.replace(comment).await
    }

    async fn delete_many(&self, ids: &[i64]) -> AppResult<u64> {
        self.table.delete_ids(ids).await
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        self.table.ensure_key_indexes().await?;
        self.table.ensure_index("file_id").await
    }
}

#[derive(Default)]
pub struct InMemoryCommentRepository {
    table: MemoryTable<Comment>,
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn create(&self, comment: Comment) -> AppResult<Comment> {
        self.table.insert(comment).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Comment>> {
        self.table.find_by_id(id).await
    }

    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<Comment>> {
        self.table.find_by_public_id(public_id).await
    }

    async fn find_all(&self) -> AppResult<Vec<Comment>> {
        Ok(self.table.find_many(|_| true).await)
    }

    async fn find_by_files(&self, file_ids: &[i64]) -> AppResult<Vec<Comment>> {
        Ok(self.table.find_many(|row| file_ids.contains(&row.file_id)).await)
    }

    async fn update(&self, comment: Comment) -> AppResult<Comment> {
        self.table.replace(comment).await
    }

    async fn delete_many(&self, ids: &[i64]) -> AppResult<u64> {
        Ok(self.table.delete_ids(ids).await)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}
