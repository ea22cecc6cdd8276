pub mod auth_handler;
pub mod comment_handler;
pub mod file_handler;
pub mod folder_handler;
pub mod health_handler;
pub mod module_handler;
pub mod quiz_handler;
pub mod user_handler;

use actix_multipart::form::MultipartFormConfig;
use actix_web::{
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    web, HttpResponse,
};

use crate::{app_state::AppState, auth::AuthMiddleware, errors::AppError};

/// Binary download response carrying the stored file name.
pub fn attachment(file_name: String, data: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/octet-stream")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file_name)],
        })
        .body(data)
}

/// Registers shared state, extractor limits and every route of the API.
pub fn app_config(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        let upload_limit = state.config.max_upload_bytes;

        cfg.app_data(web::Data::new(state.clone()))
            .app_data(state.token_verifier())
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::ValidationError(err.to_string()).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                AppError::NotFound(err.to_string()).into()
            }))
            .app_data(
                MultipartFormConfig::default()
                    .total_limit(upload_limit)
                    .memory_limit(upload_limit)
                    .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
            )
            .service(health_handler::health)
            .service(health_handler::ready)
            .service(
                web::scope("/authentication")
                    .service(auth_handler::login)
                    .service(auth_handler::forgot_password)
                    .service(auth_handler::change_password),
            )
            .service(
                web::scope("/users")
                    .service(user_handler::create_user)
                    .service(user_handler::create_admin)
                    .service(user_handler::list_users)
                    .service(user_handler::list_admins)
                    .service(user_handler::upload_picture)
                    .service(user_handler::download_picture)
                    .service(user_handler::profile_pictures)
                    .service(user_handler::delete_user),
            )
            .service(
                web::scope("/folders")
                    .wrap(AuthMiddleware)
                    .service(folder_handler::create_folder)
                    .service(folder_handler::list_folders)
                    .service(folder_handler::get_folder)
                    .service(folder_handler::update_folder)
                    .service(folder_handler::delete_folder),
            )
            .service(
                web::scope("/modules")
                    .wrap(AuthMiddleware)
                    .service(module_handler::create_module)
                    .service(module_handler::list_modules)
                    .service(module_handler::list_by_folder)
                    .service(module_handler::get_module)
                    .service(module_handler::update_module)
                    .service(module_handler::delete_module),
            )
            .service(
                web::scope("/files")
                    .wrap(AuthMiddleware)
                    .service(file_handler::insert_file)
                    .service(file_handler::list_files)
                    .service(file_handler::list_by_module)
                    .service(file_handler::download_file)
                    .service(file_handler::get_file)
                    .service(file_handler::update_file)
                    .service(file_handler::delete_file),
            )
            .service(
                web::scope("/comments")
                    .wrap(AuthMiddleware)
                    .service(comment_handler::create_comment)
                    .service(comment_handler::list_comments)
                    .service(comment_handler::list_by_file)
                    .service(comment_handler::delete_by_file)
                    .service(comment_handler::get_comment)
                    .service(comment_handler::update_comment)
                    .service(comment_handler::delete_comment),
            )
            .service(
                web::scope("/quizzes")
                    .wrap(AuthMiddleware)
                    .service(quiz_handler::create_choice)
                    .service(quiz_handler::list_choices)
                    .service(quiz_handler::get_choice)
                    .service(quiz_handler::choices_by_question)
                    .service(quiz_handler::update_choice)
                    .service(quiz_handler::delete_choice)
                    .service(quiz_handler::create_question)
                    .service(quiz_handler::list_questions)
                    .service(quiz_handler::get_question)
                    .service(quiz_handler::questions_by_quiz)
                    .service(quiz_handler::update_question)
                    .service(quiz_handler::delete_question)
                    .service(quiz_handler::create_quiz)
                    .service(quiz_handler::list_quizzes)
                    .service(quiz_handler::get_quiz)
                    .service(quiz_handler::quizzes_by_folder)
                    .service(quiz_handler::update_quiz)
                    .service(quiz_handler::delete_quiz),
            );
    }
}
