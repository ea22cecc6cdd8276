use serde::{Deserialize, Serialize};

use crate::models::domain::{new_public_id, Audit};

pub const QUESTION_TYPE: &str = "QUESTIONS";

/// Question text. Its choice set is stored as edges, not inline.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: i64,
    pub public_id: String,
    pub question: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub audit: Audit,
}

impl Question {
    pub fn new(id: i64, question: &str, kind: Option<String>, modified_by: Option<String>) -> Self {
        Question {
            id,
            public_id: new_public_id(),
            question: question.to_string(),
            kind: kind.unwrap_or_else(|| QUESTION_TYPE.to_string()),
            audit: Audit::new(modified_by),
        }
    }
}

/// `choices`, when supplied, replaces the whole membership set.
#[derive(Clone, Debug, Default)]
pub struct QuestionPatch {
    pub question: Option<String>,
    pub kind: Option<String>,
    pub choices: Option<Vec<i64>>,
    pub modified_by: Option<String>,
}

impl QuestionPatch {
    pub fn apply(&mut self, question: &mut Question) {
        if let Some(text) = self.question.take() {
            question.question = text;
        }
        if let Some(kind) = self.kind.take() {
            question.kind = kind;
        }
        question.audit.touch(self.modified_by.take());
    }
}
