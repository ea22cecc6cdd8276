use serde::Deserialize;
use validator::Validate;

use crate::models::domain::{
    ChoicePatch, CommentPatch, FilePatch, FolderPatch, ModulePatch, QuestionPatch, QuizPatch,
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Checked in the service, where the order of the checks is significant.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub old_password: String,

    #[serde(default)]
    pub new_password: String,

    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "password must be at least 6 characters long"))]
    pub password: String,

    #[validate(length(max = 100))]
    #[serde(default)]
    pub first_name: String,

    #[validate(length(max = 100))]
    #[serde(default)]
    pub last_name: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub contact: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Defaults to the caller. Only admins may create folders for someone else.
    #[serde(default, alias = "user_id_id")]
    pub user_id: Option<i64>,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[serde(default)]
    pub desc: String,

    pub modified_by: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateFolderRequest {
    #[serde(default, alias = "user_id_id")]
    pub user_id: Option<i64>,

    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    pub desc: Option<String>,
    pub modified_by: Option<String>,
}

impl From<UpdateFolderRequest> for FolderPatch {
    fn from(req: UpdateFolderRequest) -> Self {
        FolderPatch {
            user_id: req.user_id,
            name: req.name,
            desc: req.desc,
            modified_by: req.modified_by,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateModuleRequest {
    #[serde(alias = "folder_id_id")]
    pub folder_id: i64,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[serde(default)]
    pub desc: String,

    pub modified_by: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateModuleRequest {
    #[serde(default, alias = "folder_id_id")]
    pub folder_id: Option<i64>,

    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    pub desc: Option<String>,
    pub modified_by: Option<String>,
}

impl From<UpdateModuleRequest> for ModulePatch {
    fn from(req: UpdateModuleRequest) -> Self {
        ModulePatch {
            folder_id: req.folder_id,
            name: req.name,
            desc: req.desc,
            modified_by: req.modified_by,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateFileRequest {
    #[serde(default, alias = "module_id_id")]
    pub module_id: Option<i64>,

    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    pub desc: Option<String>,
    pub modified_by: Option<String>,
}

impl From<UpdateFileRequest> for FilePatch {
    fn from(req: UpdateFileRequest) -> Self {
        FilePatch {
            module_id: req.module_id,
            name: req.name,
            desc: req.desc,
            modified_by: req.modified_by,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[serde(alias = "file_id_id")]
    pub file_id: i64,

    #[validate(length(min = 1))]
    pub comment: String,

    #[serde(default)]
    pub desc: String,

    pub modified_by: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[serde(default, alias = "file_id_id")]
    pub file_id: Option<i64>,

    #[validate(length(min = 1))]
    pub comment: Option<String>,

    pub desc: Option<String>,
    pub modified_by: Option<String>,
}

impl From<UpdateCommentRequest> for CommentPatch {
    fn from(req: UpdateCommentRequest) -> Self {
        CommentPatch {
            file_id: req.file_id,
            comment: req.comment,
            desc: req.desc,
            modified_by: req.modified_by,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateChoiceRequest {
    #[validate(length(min = 1))]
    pub choice: String,

    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    pub modified_by: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateChoiceRequest {
    #[validate(length(min = 1))]
    pub choice: Option<String>,

    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    pub modified_by: Option<String>,
}

impl From<UpdateChoiceRequest> for ChoicePatch {
    fn from(req: UpdateChoiceRequest) -> Self {
        ChoicePatch {
            choice: req.choice,
            kind: req.kind,
            modified_by: req.modified_by,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1))]
    pub question: String,

    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// Internal ids of the choices this question offers.
    #[serde(default)]
    pub choices: Vec<i64>,

    pub modified_by: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateQuestionRequest {
    #[validate(length(min = 1))]
    pub question: Option<String>,

    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    pub choices: Option<Vec<i64>>,
    pub modified_by: Option<String>,
}

impl From<UpdateQuestionRequest> for QuestionPatch {
    fn from(req: UpdateQuestionRequest) -> Self {
        QuestionPatch {
            question: req.question,
            kind: req.kind,
            choices: req.choices,
            modified_by: req.modified_by,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[serde(alias = "folder_id_id")]
    pub folder_id: i64,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[serde(default)]
    pub desc: String,

    #[serde(default)]
    pub questions: Vec<i64>,

    pub modified_by: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateQuizRequest {
    #[serde(default, alias = "folder_id_id")]
    pub folder_id: Option<i64>,

    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    pub desc: Option<String>,
    pub questions: Option<Vec<i64>>,
    pub modified_by: Option<String>,
}

impl From<UpdateQuizRequest> for QuizPatch {
    fn from(req: UpdateQuizRequest) -> Self {
        QuizPatch {
            folder_id: req.folder_id,
            name: req.name,
            desc: req.desc,
            questions: req.questions,
            modified_by: req.modified_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_rejects_bad_email() {
        let req = CreateUserRequest {
            email: "not-an-email".to_string(),
            password: "secret1".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            address: String::new(),
            contact: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_folder_request_accepts_legacy_owner_key() {
        let req: CreateFolderRequest =
            serde_json::from_str(r#"{"user_id_id": 4, "name": "Math"}"#).unwrap();
        assert_eq!(req.user_id, Some(4));
        assert_eq!(req.desc, "");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_request_leaves_unsent_fields_empty() {
        let req: UpdateModuleRequest = serde_json::from_str(r#"{"desc": "new"}"#).unwrap();
        let patch: ModulePatch = req.into();
        assert_eq!(patch.desc.as_deref(), Some("new"));
        assert!(patch.name.is_none());
        assert!(patch.folder_id.is_none());
    }

    #[test]
    fn test_question_request_type_key() {
        let req: CreateQuestionRequest =
            serde_json::from_str(r#"{"question": "2+2?", "type": "MCQ", "choices": [1, 2, 2]}"#)
                .unwrap();
        assert_eq!(req.kind.as_deref(), Some("MCQ"));
        assert_eq!(req.choices, vec![1, 2, 2]);
    }

    #[test]
    fn test_empty_update_name_is_invalid() {
        let req = UpdateFolderRequest {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }
}
