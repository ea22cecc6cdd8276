use validator::Validate;

use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
    models::{
        domain::{Comment, CommentPatch},
        dto::{CreateCommentRequest, UpdateCommentRequest},
    },
    repositories::Repositories,
    services::{
        next_id,
        ownership::{owned_file, visible_file_ids},
    },
};

fn comment_not_found() -> AppError {
    AppError::NotFound("Comment not found!".to_string())
}

pub struct CommentService {
    repos: Repositories,
}

impl CommentService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub async fn create_comment(&self, actor: &Claims, request: CreateCommentRequest) -> AppResult<Comment> {
        request.validate()?;
        let file = owned_file(&self.repos, actor, request.file_id).await?;

        let id = next_id::<Comment>(&self.repos).await?;
        let modified_by = request.modified_by.or_else(|| actor.actor_name());
        let comment = Comment::new(id, file.id, &request.comment, &request.desc, modified_by);

        let comment = self.repos.comments.create(comment).await?;
        log::info!("Created comment {} on file {}", comment.public_id, file.public_id);
        Ok(comment)
    }

    pub async fn list_comments(&self, actor: &Claims) -> AppResult<Vec<Comment>> {
        match visible_file_ids(&self.repos, actor).await? {
            None => self.repos.comments.find_all().await,
            Some(file_ids) => self.repos.comments.find_by_files(&file_ids).await,
        }
    }

    pub async fn list_by_file(&self, actor: &Claims, file_id: i64) -> AppResult<Vec<Comment>> {
        owned_file(&self.repos, actor, file_id).await?;
        self.repos.comments.find_by_files(&[file_id]).await
    }

    pub async fn delete_by_file(&self, actor: &Claims, file_id: i64) -> AppResult<u64> {
        owned_file(&self.repos, actor, file_id).await?;
        let comments = self.repos.comments.find_by_files(&[file_id]).await?;
        let ids: Vec<i64> = comments.iter().map(|c| c.id).collect();
        let deleted = self.repos.comments.delete_many(&ids).await?;
        log::info!("Deleted {} comments of file {}", deleted, file_id);
        Ok(deleted)
    }

    pub async fn get_comment(&self, actor: &Claims, public_id: &str) -> AppResult<Comment> {
        let comment = self
            .repos
            .comments
            .find_by_public_id(public_id)
            .await?
            .ok_or_else(comment_not_found)?;
        owned_file(&self.repos, actor, comment.file_id).await?;
        Ok(comment)
    }

    pub async fn update_comment(
        &self,
        actor: &Claims,
        public_id: &str,
        request: UpdateCommentRequest,
    ) -> AppResult<Comment> {
        request.validate()?;
        let mut comment = self.get_comment(actor, public_id).await?;

        let mut patch = CommentPatch::from(request);
        if let Some(file_id) = patch.file_id {
            owned_file(&self.repos, actor, file_id).await?;
        }
        if patch.modified_by.is_none() {
            patch.modified_by = actor.actor_name();
        }
        patch.apply(&mut comment);

        let comment = self.repos.comments.update(comment).await?;
        log::info!("Updated comment {}", comment.public_id);
        Ok(comment)
    }

    pub async fn delete_comment(&self, actor: &Claims, public_id: &str) -> AppResult<()> {
        let comment = self.get_comment(actor, public_id).await?;
        self.repos.comments.delete_many(&[comment.id]).await?;
        log::info!("Deleted comment {}", comment.public_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::domain::{File, UserRole},
        test_utils::fixtures::{seed_folder, seed_module, seed_user},
    };

    async fn seed_file(repos: &Repositories, owner_id: i64) -> File {
        let folder = seed_folder(repos, 100 + owner_id, owner_id).await;
        let module = seed_module(repos, 100 + owner_id, folder.id).await;
        repos
            .files
            .create(File::new(
                100 + owner_id,
                module.id,
                "notes",
                "",
                "notes.txt",
                "files/notes.txt".to_string(),
                5,
                None,
            ))
            .await
            .unwrap()
    }

    fn request(file_id: i64, text: &str) -> CreateCommentRequest {
        CreateCommentRequest {
            file_id,
            comment: text.to_string(),
            desc: String::new(),
            modified_by: None,
        }
    }

    #[tokio::test]
    async fn test_bulk_delete_by_file() {
        let repos = Repositories::in_memory();
        let service = CommentService::new(repos.clone());
        let (user, claims) = seed_user(&repos, 100, "ana@example.com", UserRole::User).await;
        let file = seed_file(&repos, user.id).await;

        service.create_comment(&claims, request(file.id, "first")).await.unwrap();
        service.create_comment(&claims, request(file.id, "second")).await.unwrap();
        assert_eq!(service.list_by_file(&claims, file.id).await.unwrap().len(), 2);

        let deleted = service.delete_by_file(&claims, file.id).await.unwrap();
        assert_eq!(deleted, 2);
        assert!(service.list_by_file(&claims, file.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_comment_on_foreign_file_is_forbidden() {
        let repos = Repositories::in_memory();
        let service = CommentService::new(repos.clone());
        let (_, claims) = seed_user(&repos, 100, "ana@example.com", UserRole::User).await;
        let (bob, _) = seed_user(&repos, 101, "bob@example.com", UserRole::User).await;
        let file = seed_file(&repos, bob.id).await;

        let result = service.create_comment(&claims, request(file.id, "hi")).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_empty_comment_is_rejected() {
        let repos = Repositories::in_memory();
        let service = CommentService::new(repos.clone());
        let (user, claims) = seed_user(&repos, 100, "ana@example.com", UserRole::User).await;
        let file = seed_file(&repos, user.id).await;

        let result = service.create_comment(&claims, request(file.id, "")).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repos = Repositories::in_memory();
        let service = CommentService::new(repos.clone());
        let (user, claims) = seed_user(&repos, 100, "ana@example.com", UserRole::User).await;
        let file = seed_file(&repos, user.id).await;
        let comment = service.create_comment(&claims, request(file.id, "draft")).await.unwrap();

        let updated = service
            .update_comment(
                &claims,
                &comment.public_id,
                UpdateCommentRequest {
                    comment: Some("final".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.comment, "final");

        service.delete_comment(&claims, &comment.public_id).await.unwrap();
        let result = service.get_comment(&claims, &comment.public_id).await;
        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "Comment not found!"));
    }
}
