use actix_web::{post, put, web, HttpResponse};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    auth::{AuthMiddleware, AuthenticatedUser},
    errors::AppError,
    models::dto::{ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, MessageResponse},
};

#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.auth_service.login(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[put("/change-password/{public_id}", wrap = "AuthMiddleware")]
pub async fn change_password(
    state: web::Data<AppState>,
    public_id: web::Path<Uuid>,
    request: web::Json<ChangePasswordRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .auth_service
        .change_password(&auth.0, &public_id.to_string(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("password successfully changed.")))
}

#[post("/forgot-password")]
pub async fn forgot_password(
    state: web::Data<AppState>,
    request: web::Json<ForgotPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    state.auth_service.forgot_password(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "password has been reset, please check your email.",
    )))
}
