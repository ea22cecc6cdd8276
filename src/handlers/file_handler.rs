use actix_multipart::form::{bytes::Bytes, text::Text, MultipartForm};
use actix_web::{delete, get, post, put, web, HttpResponse};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    handlers::attachment,
    models::dto::{FileResponse, SuccessResponse, UpdateFileRequest},
    services::NewFile,
};

#[derive(Debug, MultipartForm)]
pub struct InsertFileForm {
    pub module_id: Text<i64>,
    pub name: Text<String>,
    pub desc: Option<Text<String>>,
    pub modified_by: Option<Text<String>>,
    pub file: Bytes,
}

impl From<InsertFileForm> for NewFile {
    fn from(form: InsertFileForm) -> Self {
        NewFile {
            module_id: form.module_id.into_inner(),
            name: form.name.into_inner(),
            desc: form.desc.map(|d| d.into_inner()).unwrap_or_default(),
            file_name: form
                .file
                .file_name
                .unwrap_or_else(|| "upload".to_string()),
            data: form.file.data.to_vec(),
            modified_by: form.modified_by.map(|m| m.into_inner()),
        }
    }
}

#[post("/insert-file")]
pub async fn insert_file(
    state: web::Data<AppState>,
    MultipartForm(form): MultipartForm<InsertFileForm>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let file = state.file_service.insert_file(&auth.0, form.into()).await?;
    Ok(HttpResponse::Ok().json(FileResponse::from(file)))
}

#[get("/get-file-lists")]
pub async fn list_files(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let files = state.file_service.list_files(&auth.0).await?;
    let response: Vec<FileResponse> = files.into_iter().map(FileResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

#[get("/by-module/{module_id}")]
pub async fn list_by_module(
    state: web::Data<AppState>,
    module_id: web::Path<i64>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let files = state
        .file_service
        .list_by_module(&auth.0, module_id.into_inner())
        .await?;
    let response: Vec<FileResponse> = files.into_iter().map(FileResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

#[get("/{public_id}/download")]
pub async fn download_file(
    state: web::Data<AppState>,
    public_id: web::Path<Uuid>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (file, data) = state
        .file_service
        .download_file(&auth.0, &public_id.to_string())
        .await?;
    Ok(attachment(file.file_name, data))
}

#[get("/{public_id}")]
pub async fn get_file(
    state: web::Data<AppState>,
    public_id: web::Path<Uuid>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let file = state
        .file_service
        .get_file(&auth.0, &public_id.to_string())
        .await?;
    Ok(HttpResponse::Ok().json(FileResponse::from(file)))
}

#[put("/{public_id}")]
pub async fn update_file(
    state: web::Data<AppState>,
    public_id: web::Path<Uuid>,
    request: web::Json<UpdateFileRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let file = state
        .file_service
        .update_file(&auth.0, &public_id.to_string(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(FileResponse::from(file)))
}

#[delete("/{public_id}")]
pub async fn delete_file(
    state: web::Data<AppState>,
    public_id: web::Path<Uuid>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .file_service
        .delete_file(&auth.0, &public_id.to_string())
        .await?;
    Ok(HttpResponse::Ok().json(SuccessResponse { success: true }))
}
