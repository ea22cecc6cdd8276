//! Resolves the owning user of a content entity by walking up the tree
//! (Comment -> File -> Module -> Folder -> User, Quiz -> Folder -> User) and
//! checks it against the caller.

use crate::{
    auth::{require_owner_or_admin, Claims},
    errors::{AppError, AppResult},
    models::domain::{File, Folder, Module},
    repositories::Repositories,
};

pub(crate) fn folder_not_found() -> AppError {
    AppError::NotFound("Folder not found!".to_string())
}

pub(crate) fn module_not_found() -> AppError {
    AppError::NotFound("Module not found!".to_string())
}

pub(crate) fn file_not_found() -> AppError {
    AppError::NotFound("File not found!".to_string())
}

pub(crate) async fn owned_folder(
    repos: &Repositories,
    actor: &Claims,
    folder_id: i64,
) -> AppResult<Folder> {
    let folder = repos
        .folders
        .find_by_id(folder_id)
        .await?
        .ok_or_else(folder_not_found)?;
    require_owner_or_admin(actor, folder.user_id)?;
    Ok(folder)
}

pub(crate) async fn owned_module(
    repos: &Repositories,
    actor: &Claims,
    module_id: i64,
) -> AppResult<Module> {
    let module = repos
        .modules
        .find_by_id(module_id)
        .await?
        .ok_or_else(module_not_found)?;
    owned_folder(repos, actor, module.folder_id).await?;
    Ok(module)
}

pub(crate) async fn owned_file(repos: &Repositories, actor: &Claims, file_id: i64) -> AppResult<File> {
    let file = repos
        .files
        .find_by_id(file_id)
        .await?
        .ok_or_else(file_not_found)?;
    owned_module(repos, actor, file.module_id).await?;
    Ok(file)
}

/// `None` means every folder is visible (admin callers).
pub(crate) async fn visible_folder_ids(
    repos: &Repositories,
    actor: &Claims,
) -> AppResult<Option<Vec<i64>>> {
    if actor.is_admin() {
        return Ok(None);
    }
    let folders = repos.folders.find_by_user(actor.user_id()).await?;
    Ok(Some(folders.into_iter().map(|f| f.id).collect()))
}

pub(crate) async fn visible_module_ids(
    repos: &Repositories,
    actor: &Claims,
) -> AppResult<Option<Vec<i64>>> {
    match visible_folder_ids(repos, actor).await? {
        None => Ok(None),
        Some(folder_ids) => {
            let modules = repos.modules.find_by_folders(&folder_ids).await?;
            Ok(Some(modules.into_iter().map(|m| m.id).collect()))
        }
    }
}

pub(crate) async fn visible_file_ids(
    repos: &Repositories,
    actor: &Claims,
) -> AppResult<Option<Vec<i64>>> {
    match visible_module_ids(repos, actor).await? {
        None => Ok(None),
        Some(module_ids) => {
            let files = repos.files.find_by_modules(&module_ids).await?;
            Ok(Some(files.into_iter().map(|f| f.id).collect()))
        }
    }
}
