use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_bson},
    options::IndexOptions,
    IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{User, UserRole},
    repositories::table::{MemoryTable, MongoTable},
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> AppResult<User>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;
    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn find_all(&self) -> AppResult<Vec<User>>;
    async fn find_by_role(&self, role: UserRole) -> AppResult<Vec<User>>;
    async fn update_password(&self, id: i64, password_hash: &str) -> AppResult<()>;
    async fn delete(&self, id: i64) -> AppResult<()>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("User with id '{}' not found", id))
}

pub struct MongoUserRepository {
    table: MongoTable<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            table: MongoTable::new(db),
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        self.table.insert(user).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        self.table.find_by_id(id).await
    }

    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<User>> {
        self.table.find_by_public_id(public_id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = self
            .table
            .collection()
            .find_one(doc! { "email": email.trim().to_lowercase() })
            .await?;
        Ok(user)
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        self.table.find_many(doc! {}).await
    }

    async fn find_by_role(&self, role: UserRole) -> AppResult<Vec<User>> {
        let role = to_bson(&role)
            .map_err(|e| AppError::InternalError(format!("BSON serialization error: {}", e)))?;
        self.table.find_many(doc! { "role": role }).await
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> AppResult<()> {
        let now = to_bson(&chrono::Utc::now())
            .map_err(|e| AppError::InternalError(format!("BSON serialization error: {}", e)))?;
        let result = self
            .table
            .collection()
            .update_one(
                doc! { "id": id },
                doc! { "$set": { "password_hash": password_hash, "audit.date_modified": now } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        if self.table.delete_ids(&[id]).await? == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        self.table.ensure_key_indexes().await?;

        let options = IndexOptions::builder().unique(true).build();
        let model = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(options)
            .build();
        self.table.collection().create_index(model).await?;
        log::info!("Created unique index on users.email");

        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    table: MemoryTable<User>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let email = user.email.clone();
        self.table
            .insert_unless(
                user,
                |row| row.email == email,
                || format!("User with email '{email}' already exists"),
            )
            .await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        self.table.find_by_id(id).await
    }

    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<User>> {
        self.table.find_by_public_id(public_id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = email.trim().to_lowercase();
        Ok(self.table.find_one(|u| u.email == email).await)
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.table.find_many(|_| true).await)
    }

    async fn find_by_role(&self, role: UserRole) -> AppResult<Vec<User>> {
        Ok(self.table.find_many(|u| u.role == role).await)
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> AppResult<()> {
        let mut user = self.table.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
        user.password_hash = password_hash.to_string();
        user.audit.touch(None);
        self.table.replace(user).await?;
        Ok(())
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
