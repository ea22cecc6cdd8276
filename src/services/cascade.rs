use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::domain::{File, User},
    repositories::Repositories,
    storage::BlobStore,
};

/// What a cascading delete removed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CascadeReport {
    pub folders: u64,
    pub modules: u64,
    pub files: u64,
    pub comments: u64,
    pub quizzes: u64,
    pub profile_pictures: u64,
}

/// Deletes entities together with everything that depends on them. Children
/// go first, so a failure part way through never leaves an orphan behind.
#[derive(Clone)]
pub struct Cascade {
    repos: Repositories,
    blobs: Arc<dyn BlobStore>,
}

impl Cascade {
    pub fn new(repos: Repositories, blobs: Arc<dyn BlobStore>) -> Self {
        Self { repos, blobs }
    }

    pub async fn delete_files(&self, files: &[File]) -> AppResult<CascadeReport> {
        let mut report = CascadeReport::default();
        if files.is_empty() {
            return Ok(report);
        }

        let file_ids: Vec<i64> = files.iter().map(|f| f.id).collect();
        let comments = self.repos.comments.find_by_files(&file_ids).await?;
        let comment_ids: Vec<i64> = comments.iter().map(|c| c.id).collect();
        report.comments = self.repos.comments.delete_many(&comment_ids).await?;

        report.files = self.repos.files.delete_many(&file_ids).await?;
        for file in files {
            self.remove_blob(&file.blob_key).await;
        }
        Ok(report)
    }

    pub async fn delete_modules(&self, module_ids: &[i64]) -> AppResult<CascadeReport> {
        if module_ids.is_empty() {
            return Ok(CascadeReport::default());
        }
        let files = self.repos.files.find_by_modules(module_ids).await?;
        let mut report = self.delete_files(&files).await?;
        report.modules = self.repos.modules.delete_many(module_ids).await?;
        Ok(report)
    }

    /// Removes folders, their modules (and everything below) and their quizzes.
    /// Questions referenced by those quizzes stay in the pool.
    pub async fn delete_folders(&self, folder_ids: &[i64]) -> AppResult<CascadeReport> {
        if folder_ids.is_empty() {
            return Ok(CascadeReport::default());
        }
        let modules = self.repos.modules.find_by_folders(folder_ids).await?;
        let module_ids: Vec<i64> = modules.iter().map(|m| m.id).collect();
        let mut report = self.delete_modules(&module_ids).await?;

        let quizzes = self.repos.quizzes.find_by_folders(folder_ids).await?;
        let quiz_ids: Vec<i64> = quizzes.iter().map(|q| q.id).collect();
        report.quizzes = self.repos.quizzes.delete_many(&quiz_ids).await?;

        report.folders = self.repos.folders.delete_many(folder_ids).await?;
        Ok(report)
    }

    pub async fn delete_user(&self, user: &User) -> AppResult<CascadeReport> {
        let folders = self.repos.folders.find_by_user(user.id).await?;
        let folder_ids: Vec<i64> = folders.iter().map(|f| f.id).collect();
        let mut report = self.delete_folders(&folder_ids).await?;

        let pictures = self.repos.profile_pictures.find_by_user(user.id).await?;
        let picture_ids: Vec<i64> = pictures.iter().map(|p| p.id).collect();
        report.profile_pictures = self.repos.profile_pictures.delete_many(&picture_ids).await?;
        for picture in &pictures {
            self.remove_blob(&picture.blob_key).await;
        }

        self.repos.users.delete(user.id).await?;
        log::info!("Deleted user {} with {:?}", user.public_id, report);
        Ok(report)
    }

    async fn remove_blob(&self, key: &str) {
        if let Err(err) = self.blobs.delete(key).await {
            log::warn!("Failed to remove blob {}: {}", key, err);
        }
    }
}
