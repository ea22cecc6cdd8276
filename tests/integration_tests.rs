use std::sync::{Arc, Mutex};

use actix_web::{
    http::{header, StatusCode},
    test, App,
};
use async_trait::async_trait;
use serde_json::{json, Value};

use learnhub_server::{
    app_state::AppState,
    auth::password::hash_password,
    config::Config,
    errors::AppResult,
    handlers,
    models::domain::{User, UserRole},
    notifications::Mailer,
    repositories::Repositories,
    storage::MemoryBlobStore,
};

const BOUNDARY: &str = "learnhub-test-boundary";

/// Keeps every reset mail so tests can log in with the generated password.
#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_password_reset(&self, to: &str, new_password: &str) -> AppResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), new_password.to_string()));
        Ok(())
    }
}

macro_rules! app_with {
    ($state:expr) => {
        test::init_service(App::new().configure(handlers::app_config($state))).await
    };
}

async fn seed_admin(repos: &Repositories) {
    let hash = hash_password("admin-pass").unwrap();
    repos
        .users
        .create(User::new(1000, "root@example.com", hash, UserRole::Admin))
        .await
        .unwrap();
}

fn multipart_body(fields: &[(&str, &str)], file_name: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

macro_rules! call_json {
    ($app:expr, $req:expr) => {{
        let res = test::call_service($app, $req.to_request()).await;
        let status = res.status();
        let body = test::read_body(res).await;
        let json: Value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }};
}

macro_rules! login {
    ($app:expr, $email:expr, $password:expr) => {{
        let (status, body) = call_json!(
            $app,
            test::TestRequest::post()
                .uri("/authentication/login")
                .set_json(json!({ "username": $email, "password": $password }))
        );
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        let token = body["access"].as_str().unwrap().to_string();
        let public_id = body["user"]["public_id"].as_str().unwrap().to_string();
        let id = body["user"]["id"].as_i64().unwrap();
        (token, public_id, id)
    }};
}

macro_rules! signup_and_login {
    ($app:expr, $email:expr, $password:expr) => {{
        let (status, _) = call_json!(
            $app,
            test::TestRequest::post()
                .uri("/users/create-user")
                .set_json(json!({ "email": $email, "password": $password }))
        );
        assert_eq!(status, StatusCode::OK);
        login!($app, $email, $password)
    }};
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

#[actix_web::test]
async fn test_health_is_public() {
    let app = app_with!(AppState::in_memory(Config::test_config()));

    let (status, body) = call_json!(&app, test::TestRequest::get().uri("/health"));

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "memory");
}

#[actix_web::test]
async fn test_signup_login_and_duplicate_email() {
    let app = app_with!(AppState::in_memory(Config::test_config()));

    let (token, public_id, _) = signup_and_login!(&app, "ana@example.com", "secret1");
    assert!(!token.is_empty());
    assert!(!public_id.is_empty());

    let (status, body) = call_json!(
        &app,
        test::TestRequest::post()
            .uri("/users/create-user")
            .set_json(json!({ "email": "ANA@example.com", "password": "another" }))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email already exists");
}

#[actix_web::test]
async fn test_login_failure_message() {
    let app = app_with!(AppState::in_memory(Config::test_config()));
    signup_and_login!(&app, "ana@example.com", "secret1");

    for (username, password) in [("ana@example.com", "wrong-one"), ("nobody@example.com", "secret1")] {
        let (status, body) = call_json!(
            &app,
            test::TestRequest::post()
                .uri("/authentication/login")
                .set_json(json!({ "username": username, "password": password }))
        );
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "invalid username or password!");
    }
}

#[actix_web::test]
async fn test_protected_routes_need_a_token() {
    let app = app_with!(AppState::in_memory(Config::test_config()));

    for uri in ["/folders/get-folder-lists", "/users/", "/quizzes/get-quiz-lists"] {
        let (status, _) = call_json!(&app, test::TestRequest::get().uri(uri));
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
    }

    let (status, _) = call_json!(
        &app,
        test::TestRequest::get()
            .uri("/folders/get-folder-lists")
            .insert_header(bearer("not-a-jwt"))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_malformed_extractor_input_answers_with_message() {
    let app = app_with!(AppState::in_memory(Config::test_config()));
    let (token, _, _) = signup_and_login!(&app, "ana@example.com", "secret1");

    let (status, body) = call_json!(
        &app,
        test::TestRequest::get()
            .uri("/folders/not-a-uuid")
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].is_string(), "{body}");

    let (status, body) = call_json!(
        &app,
        test::TestRequest::post()
            .uri("/users/upload-picture")
            .insert_header(bearer(&token))
            .insert_header((header::CONTENT_TYPE, "multipart/form-data"))
            .set_payload("not a multipart body")
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string(), "{body}");
}

#[actix_web::test]
async fn test_admin_gate() {
    let repos = Repositories::in_memory();
    seed_admin(&repos).await;
    let state = AppState::from_parts(
        Config::test_config(),
        None,
        repos,
        Arc::new(MemoryBlobStore::default()),
        Arc::new(RecordingMailer::default()),
    );
    let app = app_with!(state);

    let (user_token, _, _) = signup_and_login!(&app, "ana@example.com", "secret1");
    let (status, _) = call_json!(
        &app,
        test::TestRequest::get()
            .uri("/users/")
            .insert_header(bearer(&user_token))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (admin_token, _, _) = login!(&app, "root@example.com", "admin-pass");
    let (status, body) = call_json!(
        &app,
        test::TestRequest::get()
            .uri("/users/")
            .insert_header(bearer(&admin_token))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert!(body[0].get("password_hash").is_none());

    let (status, _) = call_json!(
        &app,
        test::TestRequest::post()
            .uri("/users/create-admin")
            .insert_header(bearer(&admin_token))
            .set_json(json!({ "email": "ops@example.com", "password": "ops-pass" }))
    );
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call_json!(
        &app,
        test::TestRequest::get()
            .uri("/users/admin")
            .insert_header(bearer(&admin_token))
    );
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_content_tree_cascade() {
    let app = app_with!(AppState::in_memory(Config::test_config()));
    let (token, _, _) = signup_and_login!(&app, "ana@example.com", "secret1");

    let (status, folder) = call_json!(
        &app,
        test::TestRequest::post()
            .uri("/folders/create-folder")
            .insert_header(bearer(&token))
            .set_json(json!({ "name": "Math", "desc": "first year" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(folder["modified_by"], "ana@example.com");
    let folder_id = folder["id"].as_i64().unwrap();
    let folder_public = folder["public_id"].as_str().unwrap().to_string();

    let (status, module) = call_json!(
        &app,
        test::TestRequest::post()
            .uri("/modules/create-module")
            .insert_header(bearer(&token))
            .set_json(json!({ "folder_id_id": folder_id, "name": "Algebra" }))
    );
    assert_eq!(status, StatusCode::OK);
    let module_id = module["id"].as_i64().unwrap();
    let module_public = module["public_id"].as_str().unwrap().to_string();

    let module_field = module_id.to_string();
    let body = multipart_body(
        &[("module_id", module_field.as_str()), ("name", "Lecture 1")],
        "lecture.pdf",
        b"%PDF-1.7 fake",
    );
    let (status, file) = call_json!(
        &app,
        test::TestRequest::post()
            .uri("/files/insert-file")
            .insert_header(bearer(&token))
            .insert_header((header::CONTENT_TYPE, multipart_content_type()))
            .set_payload(body)
    );
    assert_eq!(status, StatusCode::OK, "{file}");
    assert!(file.get("blob_key").is_none());
    let file_id = file["id"].as_i64().unwrap();
    let file_public = file["public_id"].as_str().unwrap().to_string();

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/files/{file_public}/download"))
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let disposition = res
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("lecture.pdf"));
    assert_eq!(test::read_body(res).await.as_ref(), b"%PDF-1.7 fake");

    let (status, comment) = call_json!(
        &app,
        test::TestRequest::post()
            .uri("/comments/create-comment")
            .insert_header(bearer(&token))
            .set_json(json!({ "file_id": file_id, "comment": "great notes" }))
    );
    assert_eq!(status, StatusCode::OK);
    let comment_public = comment["public_id"].as_str().unwrap().to_string();

    let (status, body) = call_json!(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/folders/{folder_public}"))
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    for uri in [
        format!("/folders/{folder_public}"),
        format!("/modules/{module_public}"),
        format!("/files/{file_public}"),
        format!("/comments/{comment_public}"),
    ] {
        let (status, _) = call_json!(
            &app,
            test::TestRequest::get().uri(&uri).insert_header(bearer(&token))
        );
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    }
}

#[actix_web::test]
async fn test_other_users_content_is_forbidden() {
    let app = app_with!(AppState::in_memory(Config::test_config()));
    let (ana, _, _) = signup_and_login!(&app, "ana@example.com", "secret1");
    let (bob, _, _) = signup_and_login!(&app, "bob@example.com", "secret2");

    let (_, folder) = call_json!(
        &app,
        test::TestRequest::post()
            .uri("/folders/create-folder")
            .insert_header(bearer(&ana))
            .set_json(json!({ "name": "Private" }))
    );
    let folder_public = folder["public_id"].as_str().unwrap();

    let (status, _) = call_json!(
        &app,
        test::TestRequest::get()
            .uri(&format!("/folders/{folder_public}"))
            .insert_header(bearer(&bob))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, listed) = call_json!(
        &app,
        test::TestRequest::get()
            .uri("/folders/get-folder-lists")
            .insert_header(bearer(&bob))
    );
    assert!(listed.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_change_password_check_order() {
    let app = app_with!(AppState::in_memory(Config::test_config()));
    let (token, public_id, _) = signup_and_login!(&app, "ana@example.com", "secret1");
    let uri = format!("/authentication/change-password/{public_id}");

    let (status, body) = call_json!(
        &app,
        test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(&token))
            .set_json(json!({
                "old_password": "wrong",
                "new_password": "abc",
                "confirm_password": "xyz"
            }))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "the password is not matched!");

    let (status, body) = call_json!(
        &app,
        test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(&token))
            .set_json(json!({
                "old_password": "wrong",
                "new_password": "newsecret",
                "confirm_password": "newsecret"
            }))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "the password is incorrect!");

    let (status, body) = call_json!(
        &app,
        test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(&token))
            .set_json(json!({
                "old_password": "secret1",
                "new_password": "newsecret",
                "confirm_password": "newsecret"
            }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "password successfully changed.");

    login!(&app, "ana@example.com", "newsecret");
}

#[actix_web::test]
async fn test_forgot_password_without_mail_keeps_old_password() {
    let app = app_with!(AppState::in_memory(Config::test_config()));
    signup_and_login!(&app, "ana@example.com", "secret1");

    let (status, body) = call_json!(
        &app,
        test::TestRequest::post()
            .uri("/authentication/forgot-password")
            .set_json(json!({ "username": "ana@example.com" }))
    );
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "error on sending email!");

    login!(&app, "ana@example.com", "secret1");
}

#[actix_web::test]
async fn test_forgot_password_delivers_new_password() {
    let mailer = Arc::new(RecordingMailer::default());
    let state = AppState::from_parts(
        Config::test_config(),
        None,
        Repositories::in_memory(),
        Arc::new(MemoryBlobStore::default()),
        mailer.clone(),
    );
    let app = app_with!(state);
    signup_and_login!(&app, "ana@example.com", "secret1");

    let (status, body) = call_json!(
        &app,
        test::TestRequest::post()
            .uri("/authentication/forgot-password")
            .set_json(json!({ "username": "ana@example.com" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "password has been reset, please check your email.");

    let (to, new_password) = mailer.sent.lock().unwrap()[0].clone();
    assert_eq!(to, "ana@example.com");
    assert_eq!(new_password.len(), 6);
    assert!(new_password.chars().all(|c| c.is_ascii_uppercase()));

    login!(&app, "ana@example.com", new_password.as_str());
}

#[actix_web::test]
async fn test_quiz_lineage_deduplicates_membership() {
    let app = app_with!(AppState::in_memory(Config::test_config()));
    let (token, _, _) = signup_and_login!(&app, "ana@example.com", "secret1");

    let mut choice_ids = Vec::new();
    for text in ["3", "4"] {
        let (status, choice) = call_json!(
            &app,
            test::TestRequest::post()
                .uri("/quizzes/create-choice")
                .insert_header(bearer(&token))
                .set_json(json!({ "choice": text, "type": "single" }))
        );
        assert_eq!(status, StatusCode::OK);
        choice_ids.push(choice["id"].as_i64().unwrap());
    }

    let (status, question) = call_json!(
        &app,
        test::TestRequest::post()
            .uri("/quizzes/create-question")
            .insert_header(bearer(&token))
            .set_json(json!({
                "question": "2 + 2?",
                "choices": [choice_ids[0], choice_ids[1], choice_ids[1]]
            }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(question["choices"].as_array().unwrap().len(), 2);
    let question_id = question["id"].as_i64().unwrap();

    let (status, body) = call_json!(
        &app,
        test::TestRequest::post()
            .uri("/quizzes/create-question")
            .insert_header(bearer(&token))
            .set_json(json!({ "question": "orphan", "choices": [9999] }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    let (_, folder) = call_json!(
        &app,
        test::TestRequest::post()
            .uri("/folders/create-folder")
            .insert_header(bearer(&token))
            .set_json(json!({ "name": "Math" }))
    );
    let folder_id = folder["id"].as_i64().unwrap();

    let (status, quiz) = call_json!(
        &app,
        test::TestRequest::post()
            .uri("/quizzes/create-quiz")
            .insert_header(bearer(&token))
            .set_json(json!({
                "folder_id": folder_id,
                "name": "Warm-up",
                "questions": [question_id, question_id]
            }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quiz["questions"], json!([question_id]));
    let quiz_id = quiz["id"].as_i64().unwrap();

    let (_, by_folder) = call_json!(
        &app,
        test::TestRequest::get()
            .uri(&format!("/quizzes/get-quizzes-by-folder/{folder_id}"))
            .insert_header(bearer(&token))
    );
    assert_eq!(by_folder.as_array().unwrap().len(), 1);

    let (_, questions) = call_json!(
        &app,
        test::TestRequest::get()
            .uri(&format!("/quizzes/get-questions-by-quiz/{quiz_id}"))
            .insert_header(bearer(&token))
    );
    assert_eq!(questions[0]["question"], "2 + 2?");

    let (_, choices) = call_json!(
        &app,
        test::TestRequest::get()
            .uri(&format!("/quizzes/get-choices-by-question/{question_id}"))
            .insert_header(bearer(&token))
    );
    assert_eq!(choices.as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_profile_picture_upload_and_download() {
    let app = app_with!(AppState::in_memory(Config::test_config()));
    let (token, _, user_id) = signup_and_login!(&app, "ana@example.com", "secret1");

    let (status, pictures_before) = call_json!(
        &app,
        test::TestRequest::get()
            .uri(&format!("/users/profile-picture/{user_id}"))
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::OK);
    assert!(pictures_before.as_array().unwrap().is_empty());

    let body = multipart_body(&[("desc", "avatar")], "me.png", b"\x89PNG");
    let (status, picture) = call_json!(
        &app,
        test::TestRequest::post()
            .uri("/users/upload-picture")
            .insert_header(bearer(&token))
            .insert_header((header::CONTENT_TYPE, multipart_content_type()))
            .set_payload(body)
    );
    assert_eq!(status, StatusCode::OK, "{picture}");
    let picture_public = picture["public_id"].as_str().unwrap().to_string();

    let (_, pictures) = call_json!(
        &app,
        test::TestRequest::get()
            .uri(&format!("/users/profile-picture/{user_id}"))
            .insert_header(bearer(&token))
    );
    assert_eq!(pictures.as_array().unwrap().len(), 1);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/users/profile-picture/download/{picture_public}"))
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(test::read_body(res).await.as_ref(), b"\x89PNG");
}

#[actix_web::test]
async fn test_request_id_header() {
    let app = test::init_service(
        App::new()
            .wrap(learnhub_server::middleware::RequestIdMiddleware)
            .configure(handlers::app_config(AppState::in_memory(Config::test_config()))),
    )
    .await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert!(res.headers().contains_key("x-request-id"));
}
