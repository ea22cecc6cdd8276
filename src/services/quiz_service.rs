use std::collections::HashSet;

use validator::Validate;

use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
    models::{
        domain::{
            links::unique_ids, Choice, ChoicePatch, Question, QuestionPatch, Quiz, QuizPatch,
        },
        dto::{
            CreateChoiceRequest, CreateQuestionRequest, CreateQuizRequest, UpdateChoiceRequest,
            UpdateQuestionRequest, UpdateQuizRequest,
        },
    },
    repositories::Repositories,
    services::{
        next_id,
        ownership::{owned_folder, visible_folder_ids},
    },
};

fn choice_not_found() -> AppError {
    AppError::NotFound("Choice not found!".to_string())
}

fn question_not_found() -> AppError {
    AppError::NotFound("Question not found!".to_string())
}

fn quiz_not_found() -> AppError {
    AppError::NotFound("Quiz not found!".to_string())
}

/// Fails unless every requested id is present in `found`.
fn ensure_all_exist(kind: &str, requested: &[i64], found: &[i64]) -> AppResult<()> {
    let found: HashSet<i64> = found.iter().copied().collect();
    let missing: Vec<String> = requested
        .iter()
        .filter(|id| !found.contains(id))
        .map(|id| id.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::ValidationError(format!(
            "unknown {} id(s): {}",
            kind,
            missing.join(", ")
        )))
    }
}

/// Choices and questions form a shared pool open to every authenticated
/// user; quizzes belong to a folder and follow its owner.
pub struct QuizService {
    repos: Repositories,
}

impl QuizService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    // Choices

    pub async fn create_choice(&self, actor: &Claims, request: CreateChoiceRequest) -> AppResult<Choice> {
        request.validate()?;
        let id = next_id::<Choice>(&self.repos).await?;
        let modified_by = request.modified_by.or_else(|| actor.actor_name());
        let choice = Choice::new(id, &request.choice, request.kind, modified_by);

        let choice = self.repos.choices.create(choice).await?;
        log::info!("Created choice {}", choice.public_id);
        Ok(choice)
    }

    pub async fn list_choices(&self) -> AppResult<Vec<Choice>> {
        self.repos.choices.find_all().await
    }

    pub async fn get_choice(&self, public_id: &str) -> AppResult<Choice> {
        self.repos
            .choices
            .find_by_public_id(public_id)
            .await?
            .ok_or_else(choice_not_found)
    }

    pub async fn update_choice(
        &self,
        actor: &Claims,
        public_id: &str,
        request: UpdateChoiceRequest,
    ) -> AppResult<Choice> {
        request.validate()?;
        let mut choice = self.get_choice(public_id).await?;
        let mut patch = ChoicePatch::from(request);
        if patch.modified_by.is_none() {
            patch.modified_by = actor.actor_name();
        }
        patch.apply(&mut choice);

        let choice = self.repos.choices.update(choice).await?;
        log::info!("Updated choice {}", choice.public_id);
        Ok(choice)
    }

    /// Drops the choice from every question that offered it.
    pub async fn delete_choice(&self, public_id: &str) -> AppResult<()> {
        let choice = self.get_choice(public_id).await?;
        let unlinked = self.repos.questions.remove_choice_links(choice.id).await?;
        self.repos.choices.delete(choice.id).await?;
        log::info!("Deleted choice {} (unlinked from {} questions)", choice.public_id, unlinked);
        Ok(())
    }

    // Questions

    pub async fn create_question(
        &self,
        actor: &Claims,
        request: CreateQuestionRequest,
    ) -> AppResult<(Question, Vec<Choice>)> {
        request.validate()?;
        let choice_ids = unique_ids(&request.choices);
        self.check_choices(&choice_ids).await?;

        let id = next_id::<Question>(&self.repos).await?;
        let modified_by = request.modified_by.or_else(|| actor.actor_name());
        let question = Question::new(id, &request.question, request.kind, modified_by);

        let question = self.repos.questions.create(question).await?;
        self.repos.questions.set_choices(question.id, &choice_ids).await?;
        log::info!(
            "Created question {} with {} choices",
            question.public_id,
            choice_ids.len()
        );
        self.with_choices(question).await
    }

    pub async fn list_questions(&self) -> AppResult<Vec<(Question, Vec<Choice>)>> {
        let questions = self.repos.questions.find_all().await?;
        let mut result = Vec::with_capacity(questions.len());
        for question in questions {
            result.push(self.with_choices(question).await?);
        }
        Ok(result)
    }

    pub async fn get_question(&self, public_id: &str) -> AppResult<(Question, Vec<Choice>)> {
        let question = self.find_question(public_id).await?;
        self.with_choices(question).await
    }

    pub async fn choices_by_question(&self, question_id: i64) -> AppResult<Vec<Choice>> {
        let question = self
            .repos
            .questions
            .find_by_id(question_id)
            .await?
            .ok_or_else(question_not_found)?;
        let (_, choices) = self.with_choices(question).await?;
        Ok(choices)
    }

    pub async fn update_question(
        &self,
        actor: &Claims,
        public_id: &str,
        request: UpdateQuestionRequest,
    ) -> AppResult<(Question, Vec<Choice>)> {
        request.validate()?;
        let mut question = self.find_question(public_id).await?;

        let mut patch = QuestionPatch::from(request);
        let choice_ids = patch.choices.take().map(|ids| unique_ids(&ids));
        if let Some(ids) = &choice_ids {
            self.check_choices(ids).await?;
        }
        if patch.modified_by.is_none() {
            patch.modified_by = actor.actor_name();
        }
        patch.apply(&mut question);

        let question = self.repos.questions.update(question).await?;
        if let Some(ids) = choice_ids {
            self.repos.questions.set_choices(question.id, &ids).await?;
        }
        log::info!("Updated question {}", question.public_id);
        self.with_choices(question).await
    }

    /// Removes the question and its edges. Its choices stay in the pool and
    /// quizzes that used it simply lose the membership.
    pub async fn delete_question(&self, public_id: &str) -> AppResult<()> {
        let question = self.find_question(public_id).await?;
        self.repos.quizzes.remove_question_links(question.id).await?;
        self.repos.questions.delete(question.id).await?;
        log::info!("Deleted question {}", question.public_id);
        Ok(())
    }

    // Quizzes

    pub async fn create_quiz(&self, actor: &Claims, request: CreateQuizRequest) -> AppResult<(Quiz, Vec<i64>)> {
        request.validate()?;
        let folder = owned_folder(&self.repos, actor, request.folder_id).await?;
        let question_ids = unique_ids(&request.questions);
        self.check_questions(&question_ids).await?;

        let id = next_id::<Quiz>(&self.repos).await?;
        let modified_by = request.modified_by.or_else(|| actor.actor_name());
        let quiz = Quiz::new(id, folder.id, &request.name, &request.desc, modified_by);

        let quiz = self.repos.quizzes.create(quiz).await?;
        self.repos.quizzes.set_questions(quiz.id, &question_ids).await?;
        log::info!("Created quiz {} in folder {}", quiz.public_id, folder.public_id);
        self.with_questions(quiz).await
    }

    pub async fn list_quizzes(&self, actor: &Claims) -> AppResult<Vec<(Quiz, Vec<i64>)>> {
        let quizzes = match visible_folder_ids(&self.repos, actor).await? {
            None => self.repos.quizzes.find_all().await?,
            Some(folder_ids) => self.repos.quizzes.find_by_folders(&folder_ids).await?,
        };
        self.all_with_questions(quizzes).await
    }

    pub async fn quizzes_by_folder(&self, actor: &Claims, folder_id: i64) -> AppResult<Vec<(Quiz, Vec<i64>)>> {
        owned_folder(&self.repos, actor, folder_id).await?;
        let quizzes = self.repos.quizzes.find_by_folders(&[folder_id]).await?;
        self.all_with_questions(quizzes).await
    }

    pub async fn get_quiz(&self, actor: &Claims, public_id: &str) -> AppResult<(Quiz, Vec<i64>)> {
        let quiz = self.find_quiz(actor, public_id).await?;
        self.with_questions(quiz).await
    }

    pub async fn questions_by_quiz(
        &self,
        actor: &Claims,
        quiz_id: i64,
    ) -> AppResult<Vec<(Question, Vec<Choice>)>> {
        let quiz = self
            .repos
            .quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(quiz_not_found)?;
        owned_folder(&self.repos, actor, quiz.folder_id).await?;

        let ids = self.repos.quizzes.question_ids(quiz.id).await?;
        let questions = self.repos.questions.find_by_ids(&ids).await?;
        let mut result = Vec::with_capacity(questions.len());
        for question in questions {
            result.push(self.with_choices(question).await?);
        }
        Ok(result)
    }

    pub async fn update_quiz(
        &self,
        actor: &Claims,
        public_id: &str,
        request: UpdateQuizRequest,
    ) -> AppResult<(Quiz, Vec<i64>)> {
        request.validate()?;
        let mut quiz = self.find_quiz(actor, public_id).await?;

        let mut patch = QuizPatch::from(request);
        if let Some(folder_id) = patch.folder_id {
            owned_folder(&self.repos, actor, folder_id).await?;
        }
        let question_ids = patch.questions.take().map(|ids| unique_ids(&ids));
        if let Some(ids) = &question_ids {
            self.check_questions(ids).await?;
        }
        if patch.modified_by.is_none() {
            patch.modified_by = actor.actor_name();
        }
        patch.apply(&mut quiz);

        let quiz = self.repos.quizzes.update(quiz).await?;
        if let Some(ids) = question_ids {
            self.repos.quizzes.set_questions(quiz.id, &ids).await?;
        }
        log::info!("Updated quiz {}", quiz.public_id);
        self.with_questions(quiz).await
    }

    /// Removes the quiz and its edges; member questions are left alone.
    pub async fn delete_quiz(&self, actor: &Claims, public_id: &str) -> AppResult<()> {
        let quiz = self.find_quiz(actor, public_id).await?;
        self.repos.quizzes.delete_many(&[quiz.id]).await?;
        log::info!("Deleted quiz {}", quiz.public_id);
        Ok(())
    }

    async fn find_question(&self, public_id: &str) -> AppResult<Question> {
        self.repos
            .questions
            .find_by_public_id(public_id)
            .await?
            .ok_or_else(question_not_found)
    }

    async fn find_quiz(&self, actor: &Claims, public_id: &str) -> AppResult<Quiz> {
        let quiz = self
            .repos
            .quizzes
            .find_by_public_id(public_id)
            .await?
            .ok_or_else(quiz_not_found)?;
        owned_folder(&self.repos, actor, quiz.folder_id).await?;
        Ok(quiz)
    }

    async fn check_choices(&self, ids: &[i64]) -> AppResult<()> {
        let found: Vec<i64> = self
            .repos
            .choices
            .find_by_ids(ids)
            .await?
            .iter()
            .map(|c| c.id)
            .collect();
        ensure_all_exist("choice", ids, &found)
    }

    async fn check_questions(&self, ids: &[i64]) -> AppResult<()> {
        let found: Vec<i64> = self
            .repos
            .questions
            .find_by_ids(ids)
            .await?
            .iter()
            .map(|q| q.id)
            .collect();
        ensure_all_exist("question", ids, &found)
    }

    async fn with_choices(&self, question: Question) -> AppResult<(Question, Vec<Choice>)> {
        let ids = self.repos.questions.choice_ids(question.id).await?;
        let choices = self.repos.choices.find_by_ids(&ids).await?;
        Ok((question, choices))
    }

    async fn with_questions(&self, quiz: Quiz) -> AppResult<(Quiz, Vec<i64>)> {
        let ids = self.repos.quizzes.question_ids(quiz.id).await?;
        Ok((quiz, ids))
    }

    async fn all_with_questions(&self, quizzes: Vec<Quiz>) -> AppResult<Vec<(Quiz, Vec<i64>)>> {
        let mut result = Vec::with_capacity(quizzes.len());
        for quiz in quizzes {
            result.push(self.with_questions(quiz).await?);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::{Folder, User, UserRole};

    struct Fixture {
        service: QuizService,
        repos: Repositories,
        owner: Claims,
        stranger: Claims,
        folder: Folder,
    }

    async fn fixture() -> Fixture {
        let repos = Repositories::in_memory();
        let owner = User::new(1, "owner@example.com", "h".to_string(), UserRole::User);
        let stranger = User::new(2, "stranger@example.com", "h".to_string(), UserRole::User);
        let folder = repos
            .folders
            .create(Folder::new(1, owner.id, "Math", "", None))
            .await
            .unwrap();
        Fixture {
            service: QuizService::new(repos.clone()),
            owner: Claims::new(&owner, 1),
            stranger: Claims::new(&stranger, 1),
            repos,
            folder,
        }
    }

    async fn choice(fx: &Fixture, text: &str) -> Choice {
        fx.service
            .create_choice(
                &fx.owner,
                CreateChoiceRequest {
                    choice: text.to_string(),
                    kind: None,
                    modified_by: None,
                },
            )
            .await
            .unwrap()
    }

    async fn question(fx: &Fixture, choices: Vec<i64>) -> Question {
        fx.service
            .create_question(
                &fx.owner,
                CreateQuestionRequest {
                    question: "2+2?".to_string(),
                    kind: None,
                    choices,
                    modified_by: None,
                },
            )
            .await
            .unwrap()
            .0
    }

    #[tokio::test]
    async fn test_question_choice_set_is_deduplicated() {
        let fx = fixture().await;
        let c1 = choice(&fx, "3").await;
        let c2 = choice(&fx, "4").await;

        let q = question(&fx, vec![c2.id, c1.id, c2.id]).await;
        let (_, choices) = fx.service.get_question(&q.public_id).await.unwrap();

        let mut ids: Vec<i64> = choices.iter().map(|c| c.id).collect();
        ids.sort();
        assert_eq!(ids, vec![c1.id, c2.id]);
        assert_eq!(choices[0].kind, "CHOICES");
    }

    #[tokio::test]
    async fn test_unknown_choice_rejects_question() {
        let fx = fixture().await;
        let err = fx
            .service
            .create_question(
                &fx.owner,
                CreateQuestionRequest {
                    question: "?".to_string(),
                    kind: None,
                    choices: vec![99],
                    modified_by: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(ref m) if m.contains("99")));
        assert!(fx.repos.questions.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleting_question_keeps_shared_choices() {
        let fx = fixture().await;
        let shared = choice(&fx, "shared").await;
        let q1 = question(&fx, vec![shared.id]).await;
        let q2 = question(&fx, vec![shared.id]).await;

        fx.service.delete_question(&q1.public_id).await.unwrap();

        assert!(fx.repos.choices.find_by_id(shared.id).await.unwrap().is_some());
        let (_, remaining) = fx.service.get_question(&q2.public_id).await.unwrap();
        assert_eq!(remaining.len(), 1);
    }

    #[tokio::test]
    async fn test_deleting_choice_unlinks_it() {
        let fx = fixture().await;
        let c1 = choice(&fx, "a").await;
        let c2 = choice(&fx, "b").await;
        let q = question(&fx, vec![c1.id, c2.id]).await;

        fx.service.delete_choice(&c1.public_id).await.unwrap();

        let choices = fx.service.choices_by_question(q.id).await.unwrap();
        assert_eq!(choices.len(), 1);
        assert_eq!(choices[0].id, c2.id);
    }

    #[tokio::test]
    async fn test_quiz_membership_and_update() {
        let fx = fixture().await;
        let q1 = question(&fx, vec![]).await;
        let q2 = question(&fx, vec![]).await;

        let (quiz, ids) = fx
            .service
            .create_quiz(
                &fx.owner,
                CreateQuizRequest {
                    folder_id: fx.folder.id,
                    name: "Weekly".to_string(),
                    desc: String::new(),
                    questions: vec![q1.id, q1.id],
                    modified_by: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(ids, vec![q1.id]);
        assert_eq!(quiz.kind, "QUIZ");

        let (_, ids) = fx
            .service
            .update_quiz(
                &fx.owner,
                &quiz.public_id,
                UpdateQuizRequest {
                    questions: Some(vec![q2.id]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(ids, vec![q2.id]);

        // untouched fields survive a partial update
        let (stored, _) = fx.service.get_quiz(&fx.owner, &quiz.public_id).await.unwrap();
        assert_eq!(stored.name, "Weekly");
    }

    #[tokio::test]
    async fn test_quiz_in_foreign_folder_is_forbidden() {
        let fx = fixture().await;
        let err = fx
            .service
            .create_quiz(
                &fx.stranger,
                CreateQuizRequest {
                    folder_id: fx.folder.id,
                    name: "Nope".to_string(),
                    desc: String::new(),
                    questions: vec![],
                    modified_by: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert!(fx.service.list_quizzes(&fx.stranger).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleting_quiz_keeps_questions() {
        let fx = fixture().await;
        let q = question(&fx, vec![]).await;
        let (quiz, _) = fx
            .service
            .create_quiz(
                &fx.owner,
                CreateQuizRequest {
                    folder_id: fx.folder.id,
                    name: "Weekly".to_string(),
                    desc: String::new(),
                    questions: vec![q.id],
                    modified_by: None,
                },
            )
            .await
            .unwrap();

        fx.service.delete_quiz(&fx.owner, &quiz.public_id).await.unwrap();

        assert!(fx.repos.questions.find_by_id(q.id).await.unwrap().is_some());
        assert!(fx.repos.quizzes.quiz_ids_for_question(q.id).await.unwrap().is_empty());
    }
}
