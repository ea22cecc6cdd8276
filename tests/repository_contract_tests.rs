use learnhub_server::{
    errors::AppError,
    models::domain::{Choice, Comment, File, Folder, Module, Question, Quiz, User, UserRole},
    repositories::{
        ChoiceRepository, CommentRepository, FileRepository, FolderRepository,
        InMemoryChoiceRepository, InMemoryCommentRepository, InMemoryFileRepository,
        InMemoryFolderRepository, InMemoryModuleRepository, InMemoryQuestionRepository,
        InMemoryQuizRepository, InMemorySequenceRepository, InMemoryUserRepository,
        ModuleRepository, QuestionRepository, QuizRepository, SequenceRepository, UserRepository,
    },
};

#[tokio::test]
async fn test_user_email_is_unique() {
    let users = InMemoryUserRepository::default();
    users
        .create(User::new(1, "ana@example.com", "h".to_string(), UserRole::User))
        .await
        .unwrap();

    let duplicate = users
        .create(User::new(2, "ana@example.com", "h".to_string(), UserRole::User))
        .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let found = users.find_by_email("ana@example.com").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(1));
}

#[tokio::test]
async fn test_users_by_role() {
    let users = InMemoryUserRepository::default();
    users
        .create(User::new(1, "ana@example.com", "h".to_string(), UserRole::User))
        .await
        .unwrap();
    users
        .create(User::new(2, "root@example.com", "h".to_string(), UserRole::Admin))
        .await
        .unwrap();

    let admins = users.find_by_role(UserRole::Admin).await.unwrap();
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].email, "root@example.com");
}

#[tokio::test]
async fn test_password_update_and_delete() {
    let users = InMemoryUserRepository::default();
    let user = users
        .create(User::new(1, "ana@example.com", "old".to_string(), UserRole::User))
        .await
        .unwrap();

    users.update_password(user.id, "new").await.unwrap();
    let stored = users.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.password_hash, "new");

    users.delete(user.id).await.unwrap();
    assert!(users.find_by_public_id(&user.public_id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_sequences_count_per_collection() {
    let sequences = InMemorySequenceRepository::default();
    assert_eq!(sequences.next_id("folders").await.unwrap(), 1);
    assert_eq!(sequences.next_id("folders").await.unwrap(), 2);
    assert_eq!(sequences.next_id("quizzes").await.unwrap(), 1);
}

#[tokio::test]
async fn test_content_tree_parent_queries() {
    let folders = InMemoryFolderRepository::default();
    let modules = InMemoryModuleRepository::default();
    let files = InMemoryFileRepository::default();
    let comments = InMemoryCommentRepository::default();

    folders.create(Folder::new(1, 10, "Math", "", None)).await.unwrap();
    folders.create(Folder::new(2, 20, "Art", "", None)).await.unwrap();
    modules.create(Module::new(1, 1, "Algebra", "", None)).await.unwrap();
    modules.create(Module::new(2, 2, "Drawing", "", None)).await.unwrap();
    files
        .create(File::new(1, 1, "notes", "", "notes.pdf", "files/a".to_string(), 3, None))
        .await
        .unwrap();
    comments.create(Comment::new(1, 1, "nice", "", None)).await.unwrap();
    comments.create(Comment::new(2, 1, "thanks", "", None)).await.unwrap();

    assert_eq!(folders.find_by_user(10).await.unwrap().len(), 1);
    assert_eq!(modules.find_by_folders(&[1, 2]).await.unwrap().len(), 2);
    assert_eq!(files.find_by_modules(&[2]).await.unwrap().len(), 0);
    assert_eq!(comments.find_by_files(&[1]).await.unwrap().len(), 2);
    assert!(modules.find_by_folders(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_missing_row_is_not_found() {
    let folders = InMemoryFolderRepository::default();
    let result = folders.update(Folder::new(7, 1, "Ghost", "", None)).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_many_counts_removed_rows() {
    let modules = InMemoryModuleRepository::default();
    modules.create(Module::new(1, 1, "A", "", None)).await.unwrap();
    modules.create(Module::new(2, 1, "B", "", None)).await.unwrap();

    assert_eq!(modules.delete_many(&[1, 2, 3]).await.unwrap(), 2);
    assert!(modules.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_question_choice_edges() {
    let choices = InMemoryChoiceRepository::default();
    let questions = InMemoryQuestionRepository::default();
    for id in 1..=3 {
        choices
            .create(Choice::new(id, &id.to_string(), None, None))
            .await
            .unwrap();
    }
    questions.create(Question::new(1, "pick", None, None)).await.unwrap();
    questions.create(Question::new(2, "again", None, None)).await.unwrap();

    questions.set_choices(1, &[3, 1]).await.unwrap();
    questions.set_choices(2, &[1]).await.unwrap();
    assert_eq!(questions.choice_ids(1).await.unwrap(), vec![1, 3]);
    assert_eq!(questions.question_ids_for_choice(1).await.unwrap(), vec![1, 2]);

    questions.set_choices(1, &[2]).await.unwrap();
    assert_eq!(questions.choice_ids(1).await.unwrap(), vec![2]);

    assert_eq!(questions.remove_choice_links(1).await.unwrap(), 1);
    assert!(questions.choice_ids(2).await.unwrap().is_empty());

    questions.delete(1).await.unwrap();
    assert!(questions.question_ids_for_choice(2).await.unwrap().is_empty());
    assert_eq!(choices.find_by_ids(&[1, 2, 3]).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_quiz_question_edges() {
    let quizzes = InMemoryQuizRepository::default();
    quizzes.create(Quiz::new(1, 1, "Warm-up", "", None)).await.unwrap();
    quizzes.create(Quiz::new(2, 2, "Final", "", None)).await.unwrap();

    quizzes.set_questions(1, &[5, 4]).await.unwrap();
    quizzes.set_questions(2, &[4]).await.unwrap();
    assert_eq!(quizzes.question_ids(1).await.unwrap(), vec![4, 5]);
    assert_eq!(quizzes.quiz_ids_for_question(4).await.unwrap(), vec![1, 2]);
    assert_eq!(quizzes.find_by_folders(&[2]).await.unwrap().len(), 1);

    assert_eq!(quizzes.delete_many(&[1]).await.unwrap(), 1);
    assert_eq!(quizzes.quiz_ids_for_question(4).await.unwrap(), vec![2]);
    assert_eq!(quizzes.remove_question_links(4).await.unwrap(), 1);
    assert!(quizzes.question_ids(2).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_signups_with_same_email_keep_one_user() {
    let users = InMemoryUserRepository::default();
    let (first, second) = tokio::join!(
        users.create(User::new(1, "race@example.com", "h".to_string(), UserRole::User)),
        users.create(User::new(2, "race@example.com", "h".to_string(), UserRole::User)),
    );

    assert_eq!(
        [first.is_ok(), second.is_ok()].iter().filter(|ok| **ok).count(),
        1
    );
    assert!(matches!(
        first.and(second),
        Err(AppError::Conflict(_))
    ));
    assert_eq!(users.find_by_role(UserRole::User).await.unwrap().len(), 1);
}
