pub mod auth_service;
pub mod cascade;
pub mod comment_service;
pub mod file_service;
pub mod folder_service;
pub mod module_service;
pub(crate) mod ownership;
pub mod quiz_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use cascade::{Cascade, CascadeReport};
pub use comment_service::CommentService;
pub use file_service::{FileService, NewFile};
pub use folder_service::FolderService;
pub use module_service::ModuleService;
pub use quiz_service::QuizService;
pub use user_service::UserService;

use crate::{errors::AppResult, models::domain::Record, repositories::Repositories};

/// Allocates the next surrogate id for `T`, one counter per collection.
pub(crate) async fn next_id<T: Record>(repos: &Repositories) -> AppResult<i64> {
    repos.sequences.next_id(T::COLLECTION).await
}
