use validator::Validate;

use crate::{
    auth::{require_owner_or_admin, Claims},
    errors::{AppError, AppResult},
    models::{
        domain::{Folder, FolderPatch},
        dto::{CreateFolderRequest, UpdateFolderRequest},
    },
    repositories::Repositories,
    services::{
        cascade::{Cascade, CascadeReport},
        next_id,
        ownership::folder_not_found,
    },
};

pub struct FolderService {
    repos: Repositories,
    cascade: Cascade,
}

impl FolderService {
    pub fn new(repos: Repositories, cascade: Cascade) -> Self {
        Self { repos, cascade }
    }

    pub async fn create_folder(&self, actor: &Claims, request: CreateFolderRequest) -> AppResult<Folder> {
        request.validate()?;
        let owner_id = request.user_id.unwrap_or_else(|| actor.user_id());
        self.check_owner(actor, owner_id).await?;

        let id = next_id::<Folder>(&self.repos).await?;
        let modified_by = request.modified_by.or_else(|| actor.actor_name());
        let folder = Folder::new(id, owner_id, &request.name, &request.desc, modified_by);

        let folder = self.repos.folders.create(folder).await?;
        log::info!("Created folder {} for user {}", folder.public_id, owner_id);
        Ok(folder)
    }

    pub async fn list_folders(&self, actor: &Claims) -> AppResult<Vec<Folder>> {
        if actor.is_admin() {
            self.repos.folders.find_all().await
        } else {
            self.repos.folders.find_by_user(actor.user_id()).await
        }
    }

    pub async fn get_folder(&self, actor: &Claims, public_id: &str) -> AppResult<Folder> {
        let folder = self
            .repos
            .folders
            .find_by_public_id(public_id)
            .await?
            .ok_or_else(folder_not_found)?;
        require_owner_or_admin(actor, folder.user_id)?;
        Ok(folder)
    }

    pub async fn update_folder(
        &self,
        actor: &Claims,
        public_id: &str,
        request: UpdateFolderRequest,
    ) -> AppResult<Folder> {
        request.validate()?;
        let mut folder = self.get_folder(actor, public_id).await?;

        let mut patch = FolderPatch::from(request);
        if let Some(owner_id) = patch.user_id {
            self.check_owner(actor, owner_id).await?;
        }
        if patch.modified_by.is_none() {
            patch.modified_by = actor.actor_name();
        }
        patch.apply(&mut folder);

        let folder = self.repos.folders.update(folder).await?;
        log::info!("Updated folder {}", folder.public_id);
        Ok(folder)
    }

    pub async fn delete_folder(&self, actor: &Claims, public_id: &str) -> AppResult<CascadeReport> {
        let folder = self.get_folder(actor, public_id).await?;
        let report = self.cascade.delete_folders(&[folder.id]).await?;
        log::info!("Deleted folder {} with {:?}", folder.public_id, report);
        Ok(report)
    }

    async fn check_owner(&self, actor: &Claims, owner_id: i64) -> AppResult<()> {
        require_owner_or_admin(actor, owner_id)?;
        if self.repos.users.find_by_id(owner_id).await?.is_none() {
            return Err(AppError::NotFound("User not found!".to_string()));
        }
        Ok(())
    }
}
