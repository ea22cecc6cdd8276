use serde::{Deserialize, Serialize};

use crate::models::domain::{new_public_id, Audit};

pub const QUIZ_TYPE: &str = "QUIZ";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: i64,
    pub public_id: String,
    pub folder_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub audit: Audit,
}

impl Quiz {
    pub fn new(id: i64, folder_id: i64, name: &str, desc: &str, modified_by: Option<String>) -> Self {
        Quiz {
            id,
            public_id: new_public_id(),
            folder_id,
            name: name.to_string(),
            desc: desc.to_string(),
            kind: QUIZ_TYPE.to_string(),
            audit: Audit::new(modified_by),
        }
    }
}

/// `questions`, when supplied, replaces the whole membership set.
#[derive(Clone, Debug, Default)]
pub struct QuizPatch {
    pub folder_id: Option<i64>,
    pub name: Option<String>,
    pub desc: Option<String>,
    pub questions: Option<Vec<i64>>,
    pub modified_by: Option<String>,
}

impl QuizPatch {
    pub fn apply(&mut self, quiz: &mut Quiz) {
        if let Some(folder_id) = self.folder_id.take() {
            quiz.folder_id = folder_id;
        }
        if let Some(name) = self.name.take() {
            quiz.name = name;
        }
        if let Some(desc) = self.desc.take() {
            quiz.desc = desc;
        }
        quiz.audit.touch(self.modified_by.take());
    }
}
