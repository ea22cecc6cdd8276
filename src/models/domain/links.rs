use serde::{Deserialize, Serialize};

/// Edge row of the `question_choices` join collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct QuestionChoiceLink {
    pub question_id: i64,
    pub choice_id: i64,
}

/// Edge row of the `quiz_questions` join collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct QuizQuestionLink {
    pub quiz_id: i64,
    pub question_id: i64,
}

/// Order-preserving dedup of a membership id list.
pub fn unique_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = std::collections::HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_ids_collapses_duplicates() {
        assert_eq!(unique_ids(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
        assert!(unique_ids(&[]).is_empty());
    }
}
