use serde::{Deserialize, Serialize};

use crate::models::domain::{new_public_id, Audit};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Comment {
    pub id: i64,
    pub public_id: String,
    pub file_id: i64,
    pub comment: String,
    pub desc: String,
    pub audit: Audit,
}

impl Comment {
    pub fn new(id: i64, file_id: i64, comment: &str, desc: &str, modified_by: Option<String>) -> Self {
        Comment {
            id,
            public_id: new_public_id(),
            file_id,
            comment: comment.to_string(),
            desc: desc.to_string(),
            audit: Audit::new(modified_by),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CommentPatch {
    pub file_id: Option<i64>,
    pub comment: Option<String>,
    pub desc: Option<String>,
    pub modified_by: Option<String>,
}

impl CommentPatch {
    pub fn apply(self, comment: &mut Comment) {
        if let Some(file_id) = self.file_id {
            comment.file_id = file_id;
        }
        if let Some(text) = self.comment {
            comment.comment = text;
        }
        if let Some(desc) = self.desc {
            comment.desc = desc;
        }
        comment.audit.touch(self.modified_by);
    }
}
