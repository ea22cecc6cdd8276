use actix_web::{delete, get, post, put, web, HttpResponse};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::{
        domain::{Choice, Question, Quiz},
        dto::{
            ChoiceResponse, CreateChoiceRequest, CreateQuestionRequest, CreateQuizRequest,
            QuestionResponse, QuizResponse, SuccessResponse, UpdateChoiceRequest,
            UpdateQuestionRequest, UpdateQuizRequest,
        },
    },
};

fn choices_response(choices: Vec<Choice>) -> Vec<ChoiceResponse> {
    choices.into_iter().map(ChoiceResponse::from).collect()
}

fn questions_response(questions: Vec<(Question, Vec<Choice>)>) -> Vec<QuestionResponse> {
    questions
        .into_iter()
        .map(|(question, choices)| QuestionResponse::new(question, choices))
        .collect()
}

fn quizzes_response(quizzes: Vec<(Quiz, Vec<i64>)>) -> Vec<QuizResponse> {
    quizzes
        .into_iter()
        .map(|(quiz, questions)| QuizResponse::new(quiz, questions))
        .collect()
}

// Choices

#[post("/create-choice")]
pub async fn create_choice(
    state: web::Data<AppState>,
    request: web::Json<CreateChoiceRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let choice = state
        .quiz_service
        .create_choice(&auth.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ChoiceResponse::from(choice)))
}

#[get("/get-choices-lists")]
pub async fn list_choices(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let choices = state.quiz_service.list_choices().await?;
    Ok(HttpResponse::Ok().json(choices_response(choices)))
}

#[get("/get-specific-choice/{public_id}")]
pub async fn get_choice(
    state: web::Data<AppState>,
    public_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let choice = state.quiz_service.get_choice(&public_id.to_string()).await?;
    Ok(HttpResponse::Ok().json(ChoiceResponse::from(choice)))
}

#[get("/get-choices-by-question/{question_id}")]
pub async fn choices_by_question(
    state: web::Data<AppState>,
    question_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let choices = state
        .quiz_service
        .choices_by_question(question_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(choices_response(choices)))
}

#[put("/update-choice/{public_id}")]
pub async fn update_choice(
    state: web::Data<AppState>,
    public_id: web::Path<Uuid>,
    request: web::Json<UpdateChoiceRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let choice = state
        .quiz_service
        .update_choice(&auth.0, &public_id.to_string(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ChoiceResponse::from(choice)))
}

#[delete("/delete-choice/{public_id}")]
pub async fn delete_choice(
    state: web::Data<AppState>,
    public_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    state
        .quiz_service
        .delete_choice(&public_id.to_string())
        .await?;
    Ok(HttpResponse::Ok().json(SuccessResponse { success: true }))
}

// Questions

#[post("/create-question")]
pub async fn create_question(
    state: web::Data<AppState>,
    request: web::Json<CreateQuestionRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (question, choices) = state
        .quiz_service
        .create_question(&auth.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(QuestionResponse::new(question, choices)))
}

#[get("/get-question-lists")]
pub async fn list_questions(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let questions = state.quiz_service.list_questions().await?;
    Ok(HttpResponse::Ok().json(questions_response(questions)))
}

#[get("/get-specific-question/{public_id}")]
pub async fn get_question(
    state: web::Data<AppState>,
    public_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let (question, choices) = state
        .quiz_service
        .get_question(&public_id.to_string())
        .await?;
    Ok(HttpResponse::Ok().json(QuestionResponse::new(question, choices)))
}

#[get("/get-questions-by-quiz/{quiz_id}")]
pub async fn questions_by_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<i64>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let questions = state
        .quiz_service
        .questions_by_quiz(&auth.0, quiz_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(questions_response(questions)))
}

#[put("/update-question/{public_id}")]
pub async fn update_question(
    state: web::Data<AppState>,
    public_id: web::Path<Uuid>,
    request: web::Json<UpdateQuestionRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (question, choices) = state
        .quiz_service
        .update_question(&auth.0, &public_id.to_string(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(QuestionResponse::new(question, choices)))
}

#[delete("/delete-question/{public_id}")]
pub async fn delete_question(
    state: web::Data<AppState>,
    public_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    state
        .quiz_service
        .delete_question(&public_id.to_string())
        .await?;
    Ok(HttpResponse::Ok().json(SuccessResponse { success: true }))
}

// Quizzes

#[post("/create-quiz")]
pub async fn create_quiz(
    state: web::Data<AppState>,
    request: web::Json<CreateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (quiz, questions) = state
        .quiz_service
        .create_quiz(&auth.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(QuizResponse::new(quiz, questions)))
}

#[get("/get-quiz-lists")]
pub async fn list_quizzes(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quizzes = state.quiz_service.list_quizzes(&auth.0).await?;
    Ok(HttpResponse::Ok().json(quizzes_response(quizzes)))
}

#[get("/get-specific-quiz/{public_id}")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    public_id: web::Path<Uuid>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (quiz, questions) = state
        .quiz_service
        .get_quiz(&auth.0, &public_id.to_string())
        .await?;
    Ok(HttpResponse::Ok().json(QuizResponse::new(quiz, questions)))
}

#[get("/get-quizzes-by-folder/{folder_id}")]
pub async fn quizzes_by_folder(
    state: web::Data<AppState>,
    folder_id: web::Path<i64>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quizzes = state
        .quiz_service
        .quizzes_by_folder(&auth.0, folder_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(quizzes_response(quizzes)))
}

#[put("/update-quiz/{public_id}")]
pub async fn update_quiz(
    state: web::Data<AppState>,
    public_id: web::Path<Uuid>,
    request: web::Json<UpdateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (quiz, questions) = state
        .quiz_service
        .update_quiz(&auth.0, &public_id.to_string(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(QuizResponse::new(quiz, questions)))
}

#[delete("/delete-quiz/{public_id}")]
pub async fn delete_quiz(
    state: web::Data<AppState>,
    public_id: web::Path<Uuid>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .quiz_service
        .delete_quiz(&auth.0, &public_id.to_string())
        .await?;
    Ok(HttpResponse::Ok().json(SuccessResponse { success: true }))
}
