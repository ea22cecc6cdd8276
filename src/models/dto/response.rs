use serde::Serialize;

use crate::models::domain::{
    Audit, Choice, Comment, File, Folder, Module, ProfilePicture, Question, Quiz, User, UserRole,
};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: u64,
}

#[derive(Debug, Serialize)]
pub struct LoginUserInfo {
    pub id: i64,
    pub public_id: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access: String,
    pub user: LoginUserInfo,
}

impl LoginResponse {
    pub fn new(access: String, user: &User) -> Self {
        Self {
            access,
            user: LoginUserInfo {
                id: user.id,
                public_id: user.public_id.clone(),
                email: user.email.clone(),
                role: user.role,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub storage: String,
}

/// Never carries the password hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub public_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub contact: String,
    pub role: UserRole,
    pub auth_provider: String,
    #[serde(flatten)]
    pub audit: Audit,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            public_id: user.public_id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            address: user.address,
            contact: user.contact,
            role: user.role,
            auth_provider: user.auth_provider,
            audit: user.audit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfilePictureResponse {
    pub id: i64,
    pub public_id: String,
    pub user_id: i64,
    pub desc: String,
    pub file_name: String,
    #[serde(flatten)]
    pub audit: Audit,
}

impl From<ProfilePicture> for ProfilePictureResponse {
    fn from(picture: ProfilePicture) -> Self {
        ProfilePictureResponse {
            id: picture.id,
            public_id: picture.public_id,
            user_id: picture.user_id,
            desc: picture.desc,
            file_name: picture.file_name,
            audit: picture.audit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FolderResponse {
    pub id: i64,
    pub public_id: String,
    pub user_id: i64,
    pub name: String,
    pub desc: String,
    #[serde(flatten)]
    pub audit: Audit,
}

impl From<Folder> for FolderResponse {
    fn from(folder: Folder) -> Self {
        FolderResponse {
            id: folder.id,
            public_id: folder.public_id,
            user_id: folder.user_id,
            name: folder.name,
            desc: folder.desc,
            audit: folder.audit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ModuleResponse {
    pub id: i64,
    pub public_id: String,
    pub folder_id: i64,
    pub name: String,
    pub desc: String,
    #[serde(flatten)]
    pub audit: Audit,
}

impl From<Module> for ModuleResponse {
    fn from(module: Module) -> Self {
        ModuleResponse {
            id: module.id,
            public_id: module.public_id,
            folder_id: module.folder_id,
            name: module.name,
            desc: module.desc,
            audit: module.audit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FileResponse {
    pub id: i64,
    pub public_id: String,
    pub module_id: i64,
    pub name: String,
    pub desc: String,
    pub file_name: String,
    pub size: u64,
    #[serde(flatten)]
    pub audit: Audit,
}

impl From<File> for FileResponse {
    fn from(file: File) -> Self {
        FileResponse {
            id: file.id,
            public_id: file.public_id,
            module_id: file.module_id,
            name: file.name,
            desc: file.desc,
            file_name: file.file_name,
            size: file.size,
            audit: file.audit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub public_id: String,
    pub file_id: i64,
    pub comment: String,
    pub desc: String,
    #[serde(flatten)]
    pub audit: Audit,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        CommentResponse {
            id: comment.id,
            public_id: comment.public_id,
            file_id: comment.file_id,
            comment: comment.comment,
            desc: comment.desc,
            audit: comment.audit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChoiceResponse {
    pub id: i64,
    pub public_id: String,
    pub choice: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub audit: Audit,
}

impl From<Choice> for ChoiceResponse {
    fn from(choice: Choice) -> Self {
        ChoiceResponse {
            id: choice.id,
            public_id: choice.public_id,
            choice: choice.choice,
            kind: choice.kind,
            audit: choice.audit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub id: i64,
    pub public_id: String,
    pub question: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub choices: Vec<ChoiceResponse>,
    #[serde(flatten)]
    pub audit: Audit,
}

impl QuestionResponse {
    pub fn new(question: Question, choices: Vec<Choice>) -> Self {
        QuestionResponse {
            id: question.id,
            public_id: question.public_id,
            question: question.question,
            kind: question.kind,
            choices: choices.into_iter().map(ChoiceResponse::from).collect(),
            audit: question.audit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub id: i64,
    pub public_id: String,
    pub folder_id: i64,
    pub name: String,
    pub desc: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Internal ids of the member questions, ascending.
    pub questions: Vec<i64>,
    #[serde(flatten)]
    pub audit: Audit,
}

impl QuizResponse {
    pub fn new(quiz: Quiz, questions: Vec<i64>) -> Self {
        QuizResponse {
            id: quiz.id,
            public_id: quiz.public_id,
            folder_id: quiz.folder_id,
            name: quiz.name,
            desc: quiz.desc,
            kind: quiz.kind,
            questions,
            audit: quiz.audit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_hides_password_hash() {
        let user = User::new(1, "john@example.com", "secret-hash".to_string(), UserRole::User);
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();

        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "john@example.com");
        assert_eq!(json["role"], "USER");
        assert_eq!(json["active_status"], true);
    }

    #[test]
    fn test_file_response_hides_blob_key() {
        let file = File::new(1, 2, "Notes", "", "notes.pdf", "files/abc-notes.pdf".to_string(), 10, None);
        let json = serde_json::to_value(FileResponse::from(file)).unwrap();

        assert!(json.get("blob_key").is_none());
        assert_eq!(json["file_name"], "notes.pdf");
        assert!(json.get("date_created").is_some());
    }

    #[test]
    fn test_login_response_shape() {
        let user = User::new(9, "admin@example.com", "hash".to_string(), UserRole::Admin);
        let json = serde_json::to_value(LoginResponse::new("tok".to_string(), &user)).unwrap();

        assert_eq!(json["access"], "tok");
        assert_eq!(json["user"]["id"], 9);
        assert_eq!(json["user"]["role"], "ADMIN");
    }
}
