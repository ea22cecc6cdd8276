use std::sync::Arc;

use actix_web::web;

use crate::{
    auth::{JwtService, TokenVerifier},
    config::{Config, StorageBackend},
    db::Database,
    errors::AppResult,
    notifications::{DisabledMailer, Mailer, SmtpMailer},
    repositories::Repositories,
    services::{
        AuthService, Cascade, CommentService, FileService, FolderService, ModuleService,
        QuizService, UserService,
    },
    storage::{BlobStore, LocalBlobStore, MemoryBlobStore},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Option<Database>,
    pub jwt: Arc<JwtService>,
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub folder_service: Arc<FolderService>,
    pub module_service: Arc<ModuleService>,
    pub file_service: Arc<FileService>,
    pub comment_service: Arc<CommentService>,
    pub quiz_service: Arc<QuizService>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let mailer: Arc<dyn Mailer> = match config.smtp.clone() {
            Some(smtp) => Arc::new(SmtpMailer::new(smtp)?),
            None => {
                log::warn!("SMTP_HOST is not set; password reset emails are disabled");
                Arc::new(DisabledMailer)
            }
        };

        match config.storage_backend {
            StorageBackend::Mongo => {
                let db = Database::connect(&config).await?;
                let repos = Repositories::mongo(&db).await?;
                let blobs: Arc<dyn BlobStore> = Arc::new(LocalBlobStore::new(&config.upload_dir).await?);
                Ok(Self::from_parts(config, Some(db), repos, blobs, mailer))
            }
            StorageBackend::Memory => {
                log::warn!("Using the in-memory storage backend; nothing will be persisted");
                let blobs: Arc<dyn BlobStore> = Arc::new(MemoryBlobStore::default());
                Ok(Self::from_parts(config, None, Repositories::in_memory(), blobs, mailer))
            }
        }
    }

    pub fn from_parts(
        config: Config,
        db: Option<Database>,
        repos: Repositories,
        blobs: Arc<dyn BlobStore>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let jwt = Arc::new(JwtService::new(&config.jwt_secret, config.jwt_expiration_hours));
        let cascade = Cascade::new(repos.clone(), blobs.clone());

        Self {
            auth_service: Arc::new(AuthService::new(repos.users.clone(), jwt.clone(), mailer)),
            user_service: Arc::new(UserService::new(repos.clone(), blobs.clone(), cascade.clone())),
            folder_service: Arc::new(FolderService::new(repos.clone(), cascade.clone())),
            module_service: Arc::new(ModuleService::new(repos.clone(), cascade.clone())),
            file_service: Arc::new(FileService::new(
                repos.clone(),
                blobs,
                cascade,
                config.max_upload_bytes,
            )),
            comment_service: Arc::new(CommentService::new(repos.clone())),
            quiz_service: Arc::new(QuizService::new(repos)),
            jwt,
            db,
            config: Arc::new(config),
        }
    }

    /// In-memory state with mail delivery switched off.
    pub fn in_memory(config: Config) -> Self {
        Self::from_parts(
            config,
            None,
            Repositories::in_memory(),
            Arc::new(MemoryBlobStore::default()),
            Arc::new(DisabledMailer),
        )
    }

    pub fn token_verifier(&self) -> web::Data<dyn TokenVerifier> {
        let verifier: Arc<dyn TokenVerifier> = self.jwt.clone();
        web::Data::from(verifier)
    }

    pub fn storage_name(&self) -> &'static str {
        match self.config.storage_backend {
            StorageBackend::Mongo => "mongo",
            StorageBackend::Memory => "memory",
        }
    }
}
