use actix_web::{delete, get, post, put, web, HttpResponse};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::{
        domain::Comment,
        dto::{
            CommentResponse, CreateCommentRequest, DeletedResponse, SuccessResponse,
            UpdateCommentRequest,
        },
    },
};

fn to_response(comments: Vec<Comment>) -> Vec<CommentResponse> {
    comments.into_iter().map(CommentResponse::from).collect()
}

#[post("/create-comment")]
pub async fn create_comment(
    state: web::Data<AppState>,
    request: web::Json<CreateCommentRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let comment = state
        .comment_service
        .create_comment(&auth.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(CommentResponse::from(comment)))
}

#[get("/get-comment-lists")]
pub async fn list_comments(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let comments = state.comment_service.list_comments(&auth.0).await?;
    Ok(HttpResponse::Ok().json(to_response(comments)))
}

#[get("/by-file/{file_id}")]
pub async fn list_by_file(
    state: web::Data<AppState>,
    file_id: web::Path<i64>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let comments = state
        .comment_service
        .list_by_file(&auth.0, file_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(to_response(comments)))
}

#[delete("/by-file/{file_id}")]
pub async fn delete_by_file(
    state: web::Data<AppState>,
    file_id: web::Path<i64>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let deleted = state
        .comment_service
        .delete_by_file(&auth.0, file_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(DeletedResponse {
        success: true,
        deleted,
    }))
}

#[get("/{public_id}")]
pub async fn get_comment(
    state: web::Data<AppState>,
    public_id: web::Path<Uuid>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let comment = state
        .comment_service
        .get_comment(&auth.0, &public_id.to_string())
        .await?;
    Ok(HttpResponse::Ok().json(CommentResponse::from(comment)))
}

#[put("/{public_id}")]
pub async fn update_comment(
    state: web::Data<AppState>,
    public_id: web::Path<Uuid>,
    request: web::Json<UpdateCommentRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let comment = state
        .comment_service
        .update_comment(&auth.0, &public_id.to_string(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(CommentResponse::from(comment)))
}

#[delete("/{public_id}")]
pub async fn delete_comment(
    state: web::Data<AppState>,
    public_id: web::Path<Uuid>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .comment_service
        .delete_comment(&auth.0, &public_id.to_string())
        .await?;
    Ok(HttpResponse::Ok().json(SuccessResponse { success: true }))
}
