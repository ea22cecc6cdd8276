use actix_web::{delete, get, post, put, web, HttpResponse};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{CreateFolderRequest, FolderResponse, SuccessResponse, UpdateFolderRequest},
};

#[post("/create-folder")]
pub async fn create_folder(
    state: web::Data<AppState>,
    request: web::Json<CreateFolderRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let folder = state
        .folder_service
        .create_folder(&auth.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(FolderResponse::from(folder)))
}

#[get("/get-folder-lists")]
pub async fn list_folders(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let folders = state.folder_service.list_folders(&auth.0).await?;
    let response: Vec<FolderResponse> = folders.into_iter().map(FolderResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

#[get("/{public_id}")]
pub async fn get_folder(
    state: web::Data<AppState>,
    public_id: web::Path<Uuid>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let folder = state
        .folder_service
        .get_folder(&auth.0, &public_id.to_string())
        .await?;
    Ok(HttpResponse::Ok().json(FolderResponse::from(folder)))
}

#[put("/{public_id}")]
pub async fn update_folder(
    state: web::Data<AppState>,
    public_id: web::Path<Uuid>,
    request: web::Json<UpdateFolderRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let folder = state
        .folder_service
        .update_folder(&auth.0, &public_id.to_string(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(FolderResponse::from(folder)))
}

#[delete("/{public_id}")]
pub async fn delete_folder(
    state: web::Data<AppState>,
    public_id: web::Path<Uuid>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .folder_service
        .delete_folder(&auth.0, &public_id.to_string())
        .await?;
    Ok(HttpResponse::Ok().json(SuccessResponse { success: true }))
}
