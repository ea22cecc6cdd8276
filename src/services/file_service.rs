use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
    models::{
        domain::{File, FilePatch},
        dto::UpdateFileRequest,
    },
    repositories::Repositories,
    services::{
        cascade::{Cascade, CascadeReport},
        next_id,
        ownership::{file_not_found, owned_module, visible_module_ids},
    },
    storage::BlobStore,
};

/// Fields of a file upload once the multipart body has been read.
#[derive(Debug, Clone)]
pub struct NewFile {
    pub module_id: i64,
    pub name: String,
    pub desc: String,
    pub file_name: String,
    pub data: Vec<u8>,
    pub modified_by: Option<String>,
}

pub struct FileService {
    repos: Repositories,
    blobs: Arc<dyn BlobStore>,
    cascade: Cascade,
    max_upload_bytes: usize,
}

impl FileService {
    pub fn new(
        repos: Repositories,
        blobs: Arc<dyn BlobStore>,
        cascade: Cascade,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            repos,
            blobs,
            cascade,
            max_upload_bytes,
        }
    }

    /// Writes the payload first and the record second; a failed insert
    /// removes the payload again so no half-created file is visible.
    pub async fn insert_file(&self, actor: &Claims, upload: NewFile) -> AppResult<File> {
        if upload.name.trim().is_empty() {
            return Err(AppError::ValidationError("name is required".to_string()));
        }
        if upload.data.len() > self.max_upload_bytes {
            return Err(AppError::ValidationError(format!(
                "file exceeds the {} byte upload limit",
                self.max_upload_bytes
            )));
        }
        let module = owned_module(&self.repos, actor, upload.module_id).await?;

        let id = next_id::<File>(&self.repos).await?;
        let blob_key = self.blobs.put(&upload.file_name, &upload.data).await?;
        let file = File::new(
            id,
            module.id,
            &upload.name,
            &upload.desc,
            &upload.file_name,
            blob_key.clone(),
            upload.data.len() as u64,
            upload.modified_by.or_else(|| actor.actor_name()),
        );

        match self.repos.files.create(file).await {
            Ok(file) => {
                log::info!(
                    "Stored file {} ({} bytes) in module {}",
                    file.public_id,
                    file.size,
                    module.public_id
                );
                Ok(file)
            }
            Err(err) => {
                if let Err(cleanup) = self.blobs.delete(&blob_key).await {
                    log::warn!("Failed to remove orphaned blob {}: {}", blob_key, cleanup);
                }
                Err(err)
            }
        }
    }

    pub async fn list_files(&self, actor: &Claims) -> AppResult<Vec<File>> {
        match visible_module_ids(&self.repos, actor).await? {
            None => self.repos.files.find_all().await,
            Some(module_ids) => self.repos.files.find_by_modules(&module_ids).await,
        }
    }

    pub async fn list_by_module(&self, actor: &Claims, module_id: i64) -> AppResult<Vec<File>> {
        owned_module(&self.repos, actor, module_id).await?;
        self.repos.files.find_by_modules(&[module_id]).await
    }

    pub async fn get_file(&self, actor: &Claims, public_id: &str) -> AppResult<File> {
        let file = self
            .repos
            .files
            .find_by_public_id(public_id)
            .await?
            .ok_or_else(file_not_found)?;
        owned_module(&self.repos, actor, file.module_id).await?;
        Ok(file)
    }

    pub async fn download_file(&self, actor: &Claims, public_id: &str) -> AppResult<(File, Vec<u8>)> {
        let file = self.get_file(actor, public_id).await?;
        let data = self.blobs.get(&file.blob_key).await?;
        Ok((file, data))
    }

    pub async fn update_file(
        &self,
        actor: &Claims,
        public_id: &str,
        request: UpdateFileRequest,
    ) -> AppResult<File> {
        request.validate()?;
        let mut file = self.get_file(actor, public_id).await?;

        let mut patch = FilePatch::from(request);
        if let Some(module_id) = patch.module_id {
            owned_module(&self.repos, actor, module_id).await?;
        }
        if patch.modified_by.is_none() {
            patch.modified_by = actor.actor_name();
        }
        patch.apply(&mut file);

        let file = self.repos.files.update(file).await?;
        log::info!("Updated file {}", file.public_id);
        Ok(file)
    }

    pub async fn delete_file(&self, actor: &Claims, public_id: &str) -> AppResult<CascadeReport> {
        let file = self.get_file(actor, public_id).await?;
        let report = self.cascade.delete_files(std::slice::from_ref(&file)).await?;
        log::info!("Deleted file {} with {:?}", file.public_id, report);
        Ok(report)
    }
}
