use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{password::hash_password, require_admin, require_owner_or_admin, Claims},
    errors::{AppError, AppResult},
    models::{
        domain::{ProfilePicture, User, UserRole},
        dto::CreateUserRequest,
    },
    repositories::Repositories,
    services::{
        cascade::{Cascade, CascadeReport},
        next_id,
    },
    storage::BlobStore,
};

fn user_not_found() -> AppError {
    AppError::NotFound("User not found!".to_string())
}

pub struct UserService {
    repos: Repositories,
    blobs: Arc<dyn BlobStore>,
    cascade: Cascade,
}

impl UserService {
    pub fn new(repos: Repositories, blobs: Arc<dyn BlobStore>, cascade: Cascade) -> Self {
        Self {
            repos,
            blobs,
            cascade,
        }
    }

    /// Public sign-up. Always produces a regular user.
    pub async fn create_user(&self, request: CreateUserRequest) -> AppResult<User> {
        self.register(request, UserRole::User, None).await
    }

    pub async fn create_admin(&self, actor: &Claims, request: CreateUserRequest) -> AppResult<User> {
        require_admin(actor)?;
        self.register(request, UserRole::Admin, actor.actor_name()).await
    }

    async fn register(
        &self,
        mut request: CreateUserRequest,
        role: UserRole,
        modified_by: Option<String>,
    ) -> AppResult<User> {
        request.email = request.email.trim().to_lowercase();
        request.validate()?;

        let email = request.email.clone();
        if self.repos.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }

        let password_hash = hash_password(&request.password)?;
        let id = next_id::<User>(&self.repos).await?;
        let mut user = User::new(id, &email, password_hash, role);
        user.first_name = request.first_name;
        user.last_name = request.last_name;
        user.address = request.address;
        user.contact = request.contact;
        if let Some(modified_by) = modified_by {
            user.audit.modified_by = modified_by;
        }

        let user = self.repos.users.create(user).await?;
        log::info!("Created {} account {}", role.as_str(), user.public_id);
        Ok(user)
    }

    pub async fn list_users(&self, actor: &Claims) -> AppResult<Vec<User>> {
        require_admin(actor)?;
        self.repos.users.find_all().await
    }

    pub async fn list_admins(&self, actor: &Claims) -> AppResult<Vec<User>> {
        require_admin(actor)?;
        self.repos.users.find_by_role(UserRole::Admin).await
    }

    pub async fn delete_user(&self, actor: &Claims, public_id: &str) -> AppResult<CascadeReport> {
        let user = self
            .repos
            .users
            .find_by_public_id(public_id)
            .await?
            .ok_or_else(user_not_found)?;
        require_owner_or_admin(actor, user.id)?;
        self.cascade.delete_user(&user).await
    }

    /// Stores a profile picture for `user_id` (the caller when absent). The
    /// blob is removed again if the record cannot be written.
    pub async fn upload_picture(
        &self,
        actor: &Claims,
        user_id: Option<i64>,
        desc: &str,
        file_name: &str,
        data: &[u8],
    ) -> AppResult<ProfilePicture> {
        let user_id = user_id.unwrap_or_else(|| actor.user_id());
        require_owner_or_admin(actor, user_id)?;
        if self.repos.users.find_by_id(user_id).await?.is_none() {
            return Err(user_not_found());
        }
        if data.is_empty() {
            return Err(AppError::ValidationError("uploaded file is empty".to_string()));
        }

        let id = next_id::<ProfilePicture>(&self.repos).await?;
        let blob_key = self.blobs.put(file_name, data).await?;
        let picture = ProfilePicture::new(id, user_id, desc, file_name, blob_key.clone(), actor.actor_name());

        match self.repos.profile_pictures.create(picture).await {
            Ok(picture) => {
                log::info!("Stored profile picture {} for user {}", picture.public_id, user_id);
                Ok(picture)
            }
            Err(err) => {
                if let Err(cleanup) = self.blobs.delete(&blob_key).await {
                    log::warn!("Failed to remove orphaned blob {}: {}", blob_key, cleanup);
                }
                Err(err)
            }
        }
    }

    pub async fn profile_pictures(&self, actor: &Claims, user_id: i64) -> AppResult<Vec<ProfilePicture>> {
        require_owner_or_admin(actor, user_id)?;
        self.repos.profile_pictures.find_by_user(user_id).await
    }

    pub async fn download_picture(
        &self,
        actor: &Claims,
        public_id: &str,
    ) -> AppResult<(ProfilePicture, Vec<u8>)> {
        let picture = self
            .repos
            .profile_pictures
            .find_by_public_id(public_id)
            .await?
            .ok_or_else(|| AppError::NotFound("No profile picture found!".to_string()))?;
        require_owner_or_admin(actor, picture.user_id)?;
        let data = self.blobs.get(&picture.blob_key).await?;
        Ok((picture, data))
    }
}
