pub mod choice_repository;
pub mod comment_repository;
pub mod file_repository;
pub mod folder_repository;
pub mod module_repository;
pub mod profile_picture_repository;
pub mod question_repository;
pub mod quiz_repository;
pub mod sequence_repository;
pub mod table;
pub mod user_repository;

use std::sync::Arc;

pub use choice_repository::{ChoiceRepository, InMemoryChoiceRepository, MongoChoiceRepository};
pub use comment_repository::{CommentRepository, InMemoryCommentRepository, MongoCommentRepository};
pub use file_repository::{FileRepository, InMemoryFileRepository, MongoFileRepository};
pub use folder_repository::{FolderRepository, InMemoryFolderRepository, MongoFolderRepository};
pub use module_repository::{InMemoryModuleRepository, ModuleRepository, MongoModuleRepository};
pub use profile_picture_repository::{
    InMemoryProfilePictureRepository, MongoProfilePictureRepository, ProfilePictureRepository,
};
pub use question_repository::{
    InMemoryQuestionRepository, MongoQuestionRepository, QuestionRepository,
};
pub use quiz_repository::{InMemoryQuizRepository, MongoQuizRepository, QuizRepository};
pub use sequence_repository::{
    InMemorySequenceRepository, MongoSequenceRepository, SequenceRepository,
};
pub use user_repository::{InMemoryUserRepository, MongoUserRepository, UserRepository};

use crate::{db::Database, errors::AppResult};

/// Every repository the services need, behind trait objects so the Mongo
/// and in-memory backends are interchangeable.
#[derive(Clone)]
pub struct Repositories {
    pub sequences: Arc<dyn SequenceRepository>,
    pub users: Arc<dyn UserRepository>,
    pub profile_pictures: Arc<dyn ProfilePictureRepository>,
    pub folders: Arc<dyn FolderRepository>,
    pub modules: Arc<dyn ModuleRepository>,
    pub files: Arc<dyn FileRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub choices: Arc<dyn ChoiceRepository>,
    pub questions: Arc<dyn QuestionRepository>,
    pub quizzes: Arc<dyn QuizRepository>,
}

impl Repositories {
    pub async fn mongo(db: &Database) -> AppResult<Self> {
        let repositories = Self {
            sequences: Arc::new(MongoSequenceRepository::new(db)),
            users: Arc::new(MongoUserRepository::new(db)),
            profile_pictures: Arc::new(MongoProfilePictureRepository::new(db)),
            folders: Arc::new(MongoFolderRepository::new(db)),
            modules: Arc::new(MongoModuleRepository::new(db)),
            files: Arc::new(MongoFileRepository::new(db)),
            comments: Arc::new(MongoCommentRepository::new(db)),
            choices: Arc::new(MongoChoiceRepository::new(db)),
            questions: Arc::new(MongoQuestionRepository::new(db)),
            quizzes: Arc::new(MongoQuizRepository::new(db)),
        };
        repositories.ensure_indexes().await?;
        Ok(repositories)
    }

    pub fn in_memory() -> Self {
        Self {
            sequences: Arc::new(InMemorySequenceRepository::default()),
            users: Arc::new(InMemoryUserRepository::default()),
            profile_pictures: Arc::new(InMemoryProfilePictureRepository::default()),
            folders: Arc::new(InMemoryFolderRepository::default()),
            modules: Arc::new(InMemoryModuleRepository::default()),
            files: Arc::new(InMemoryFileRepository::default()),
            comments: Arc::new(InMemoryCommentRepository::default()),
            choices: Arc::new(InMemoryChoiceRepository::default()),
            questions: Arc::new(InMemoryQuestionRepository::default()),
            quizzes: Arc::new(InMemoryQuizRepository::default()),
        }
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        self.users.ensure_indexes().await?;
        self.profile_pictures.ensure_indexes().await?;
        self.folders.ensure_indexes().await?;
        self.modules.ensure_indexes().await?;
        self.files.ensure_indexes().await?;
        self.comments.ensure_indexes().await?;
        self.choices.ensure_indexes().await?;
        self.questions.ensure_indexes().await?;
        self.quizzes.ensure_indexes().await?;
        log::info!("Repository indexes are in place");
        Ok(())
    }
}
