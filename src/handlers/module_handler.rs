use actix_web::{delete, get, post, put, web, HttpResponse};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{CreateModuleRequest, ModuleResponse, SuccessResponse, UpdateModuleRequest},
};

fn to_response(modules: Vec<crate::models::domain::Module>) -> Vec<ModuleResponse> {
    modules.into_iter().map(ModuleResponse::from).collect()
}

#[post("/create-module")]
pub async fn create_module(
    state: web::Data<AppState>,
    request: web::Json<CreateModuleRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let module = state
        .module_service
        .create_module(&auth.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ModuleResponse::from(module)))
}

#[get("/get-module-lists")]
pub async fn list_modules(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let modules = state.module_service.list_modules(&auth.0).await?;
    Ok(HttpResponse::Ok().json(to_response(modules)))
}

#[get("/by-folder/{folder_id}")]
pub async fn list_by_folder(
    state: web::Data<AppState>,
    folder_id: web::Path<i64>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let modules = state
        .module_service
        .list_by_folder(&auth.0, folder_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(to_response(modules)))
}

#[get("/{public_id}")]
pub async fn get_module(
    state: web::Data<AppState>,
    public_id: web::Path<Uuid>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let module = state
        .module_service
        .get_module(&auth.0, &public_id.to_string())
        .await?;
    Ok(HttpResponse::Ok().json(ModuleResponse::from(module)))
}

#[put("/{public_id}")]
pub async fn update_module(
    state: web::Data<AppState>,
    public_id: web::Path<Uuid>,
    request: web::Json<UpdateModuleRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let module = state
        .module_service
        .update_module(&auth.0, &public_id.to_string(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ModuleResponse::from(module)))
}

#[delete("/{public_id}")]
pub async fn delete_module(
    state: web::Data<AppState>,
    public_id: web::Path<Uuid>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .module_service
        .delete_module(&auth.0, &public_id.to_string())
        .await?;
    Ok(HttpResponse::Ok().json(SuccessResponse { success: true }))
}
