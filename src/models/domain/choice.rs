use serde::{Deserialize, Serialize};

use crate::models::domain::{new_public_id, Audit};

pub const CHOICE_TYPE: &str = "CHOICES";

/// Shared answer option. Questions reference choices through the
/// `question_choices` join collection; a choice has no owner.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Choice {
    pub id: i64,
    pub public_id: String,
    pub choice: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub audit: Audit,
}

impl Choice {
    pub fn new(id: i64, choice: &str, kind: Option<String>, modified_by: Option<String>) -> Self {
        Choice {
            id,
            public_id: new_public_id(),
            choice: choice.to_string(),
            kind: kind.unwrap_or_else(|| CHOICE_TYPE.to_string()),
            audit: Audit::new(modified_by),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ChoicePatch {
    pub choice: Option<String>,
    pub kind: Option<String>,
    pub modified_by: Option<String>,
}

impl ChoicePatch {
    pub fn apply(self, choice: &mut Choice) {
        if let Some(text) = self.choice {
            choice.choice = text;
        }
        if let Some(kind) = self.kind {
            choice.kind = kind;
        }
        choice.audit.touch(self.modified_by);
    }
}
