use async_trait::async_trait;
use mongodb::bson::doc;

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::ProfilePicture,
    repositories::table::{MemoryTable, MongoTable},
};

#[async_trait]
pub trait ProfilePictureRepository: Send + Sync {
    async fn create(&self, picture: ProfilePicture) -> AppResult<ProfilePicture>;
    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<ProfilePicture>>;
    async fn find_by_user(&self, user_id: i64) -> AppResult<Vec<ProfilePicture>>;
    async fn delete_many(&self, ids: &[i64]) -> AppResult<u64>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoProfilePictureRepository {
    table: MongoTable<ProfilePicture>,
}

impl MongoProfilePictureRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            table: MongoTable::new(db),
        }
    }
}

#[async_trait]
impl ProfilePictureRepository for MongoProfilePictureRepository {
    async fn create(&self, picture: ProfilePicture) -> AppResult<ProfilePicture> {
        self.table.insert(picture).await
    }

    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<ProfilePicture>> {
        self.table.find_by_public_id(public_id).await
    }

    async fn find_by_user(&self, user_id: i64) -> AppResult<Vec<ProfilePicture>> {
        self.table.find_many(doc! { "user_id": user_id }).await
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
pub struct InMemoryProfilePictureRepository {
    table: MemoryTable<ProfilePicture>,
}

#[async_trait]
impl ProfilePictureRepository for InMemoryProfilePictureRepository {
    async fn create(&self, picture: ProfilePicture) -> AppResult<ProfilePicture> {
        self.table.insert(picture).await
    }

    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<ProfilePicture>> {
        self.table.find_by_public_id(public_id).await
    }

    async fn find_by_user(&self, user_id: i64) -> AppResult<Vec<ProfilePicture>> {
        Ok(self.table.find_many(|p| p.user_id == user_id).await)
    }

    async fn delete_many(&self, ids: &[i64]) -> AppResult<u64> {
        Ok(self.table.delete_ids(ids).await)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}
