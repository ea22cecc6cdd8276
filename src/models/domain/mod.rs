pub mod audit;
pub mod choice;
pub mod comment;
pub mod file;
pub mod folder;
pub mod links;
pub mod module;
pub mod profile_picture;
pub mod question;
pub mod quiz;
pub mod user;

pub use audit::Audit;
pub use choice::{Choice, ChoicePatch};
pub use comment::{Comment, CommentPatch};
pub use file::{File, FilePatch};
pub use folder::{Folder, FolderPatch};
pub use links::{QuestionChoiceLink, QuizQuestionLink};
pub use module::{Module, ModulePatch};
pub use profile_picture::ProfilePicture;
pub use question::{Question, QuestionPatch};
pub use quiz::{Quiz, QuizPatch};
pub use user::{User, UserRole};

use serde::{de::DeserializeOwned, Serialize};

/// A persisted entity with a surrogate integer key and an external UUID.
pub trait Record: Clone + Send + Sync + Unpin + Serialize + DeserializeOwned + 'static {
    const COLLECTION: &'static str;

    fn id(&self) -> i64;
    fn public_id(&self) -> &str;
}

macro_rules! impl_record {
    ($ty:ty, $collection:literal) => {
        impl $crate::models::domain::Record for $ty {
            const COLLECTION: &'static str = $collection;

            fn id(&self) -> i64 {
                self.id
            }

            fn public_id(&self) -> &str {
                &self.public_id
            }
        }
    };
}

impl_record!(User, "users");
impl_record!(Folder, "folders");
impl_record!(Module, "modules");
impl_record!(File, "files");
impl_record!(Comment, "comments");
impl_record!(Choice, "choices");
impl_record!(Question, "questions");
impl_record!(Quiz, "quizzes");
impl_record!(ProfilePicture, "profile_pictures");

pub(crate) fn new_public_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
