use actix_multipart::form::{bytes::Bytes, text::Text, MultipartForm};
use actix_web::{delete, get, post, web, HttpResponse};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    auth::{AuthMiddleware, AuthenticatedUser},
    errors::AppError,
    handlers::attachment,
    models::dto::{
        CreateUserRequest, MessageResponse, ProfilePictureResponse, SuccessResponse, UserResponse,
    },
};

#[derive(Debug, MultipartForm)]
pub struct UploadPictureForm {
    /// Admins may upload on behalf of another user.
    pub user_id: Option<Text<i64>>,
    pub desc: Option<Text<String>>,
    pub file: Bytes,
}

#[post("/create-user")]
pub async fn create_user(
    state: web::Data<AppState>,
    request: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    state.user_service.create_user(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("successfully created account.")))
}

#[post("/create-admin", wrap = "AuthMiddleware")]
pub async fn create_admin(
    state: web::Data<AppState>,
    request: web::Json<CreateUserRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .user_service
        .create_admin(&auth.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("successfully created admin account.")))
}

#[get("/", wrap = "AuthMiddleware")]
pub async fn list_users(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let users = state.user_service.list_users(&auth.0).await?;
    let response: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

#[get("/admin", wrap = "AuthMiddleware")]
pub async fn list_admins(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let admins = state.user_service.list_admins(&auth.0).await?;
    let response: Vec<UserResponse> = admins.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

#[post("/upload-picture", wrap = "AuthMiddleware")]
pub async fn upload_picture(
    state: web::Data<AppState>,
    MultipartForm(form): MultipartForm<UploadPictureForm>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let file_name = form
        .file
        .file_name
        .clone()
        .unwrap_or_else(|| "picture".to_string());
    let desc = form.desc.map(|d| d.into_inner()).unwrap_or_default();

    let picture = state
        .user_service
        .upload_picture(
            &auth.0,
            form.user_id.map(|id| id.into_inner()),
            &desc,
            &file_name,
            &form.file.data,
        )
        .await?;
    Ok(HttpResponse::Ok().json(ProfilePictureResponse::from(picture)))
}

#[get("/profile-picture/{user_id}", wrap = "AuthMiddleware")]
pub async fn profile_pictures(
    state: web::Data<AppState>,
    user_id: web::Path<i64>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let pictures = state
        .user_service
        .profile_pictures(&auth.0, user_id.into_inner())
        .await?;
    let response: Vec<ProfilePictureResponse> =
        pictures.into_iter().map(ProfilePictureResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

#[get("/profile-picture/download/{public_id}", wrap = "AuthMiddleware")]
pub async fn download_picture(
    state: web::Data<AppState>,
    public_id: web::Path<Uuid>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (picture, data) = state
        .user_service
        .download_picture(&auth.0, &public_id.to_string())
        .await?;
    Ok(attachment(picture.file_name, data))
}

#[delete("/{public_id}", wrap = "AuthMiddleware")]
pub async fn delete_user(
    state: web::Data<AppState>,
    public_id: web::Path<Uuid>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .user_service
        .delete_user(&auth.0, &public_id.to_string())
        .await?;
    Ok(HttpResponse::Ok().json(SuccessResponse { success: true }))
}
