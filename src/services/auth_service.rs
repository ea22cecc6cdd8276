use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{
        password::{generate_reset_password, hash_password, verify_password, UNMATCHABLE_HASH},
        require_owner_or_admin, Claims, JwtService,
    },
    errors::{AppError, AppResult},
    models::dto::{ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, LoginResponse},
    notifications::Mailer,
    repositories::UserRepository,
};

pub const INVALID_CREDENTIALS: &str = "invalid username or password!";
pub const PASSWORD_NOT_MATCHED: &str = "the password is not matched!";
pub const PASSWORD_INCORRECT: &str = "the password is incorrect!";
pub(crate) const MIN_PASSWORD_LEN: usize = 6;

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt: Arc<JwtService>,
    mailer: Arc<dyn Mailer>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt: Arc<JwtService>, mailer: Arc<dyn Mailer>) -> Self {
        Self { users, jwt, mailer }
    }

    /// Every failure mode answers with the same message, and an unknown email
    /// still pays for one password verification.
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        request.validate()?;
        let invalid = || AppError::Unauthorized(INVALID_CREDENTIALS.to_string());

        let email = request.username.trim().to_lowercase();
        let user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                let _ = verify_password(&request.password, UNMATCHABLE_HASH);
                return Err(invalid());
            }
        };

        if !user.audit.active_status {
            log::info!("Rejected login for inactive user {}", user.public_id);
            return Err(invalid());
        }
        if !verify_password(&request.password, &user.password_hash)? {
            return Err(invalid());
        }

        let token = self.jwt.create_token(&user)?;
        log::info!("User {} logged in", user.public_id);
        Ok(LoginResponse::new(token, &user))
    }

    /// The confirmation check runs before the old password is verified.
    pub async fn change_password(
        &self,
        actor: &Claims,
        public_id: &str,
        request: ChangePasswordRequest,
    ) -> AppResult<()> {
        let user = self
            .users
            .find_by_public_id(public_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found!".to_string()))?;
        require_owner_or_admin(actor, user.id)?;

        if request.new_password != request.confirm_password {
            return Err(AppError::Conflict(PASSWORD_NOT_MATCHED.to_string()));
        }
        if !verify_password(&request.old_password, &user.password_hash)? {
            return Err(AppError::Conflict(PASSWORD_INCORRECT.to_string()));
        }
        if request.new_password.len() < MIN_PASSWORD_LEN {
            return Err(AppError::ValidationError(format!(
                "password must be at least {} characters long",
                MIN_PASSWORD_LEN
            )));
        }

        let hash = hash_password(&request.new_password)?;
        self.users.update_password(user.id, &hash).await?;
        log::info!("Password changed for user {}", user.public_id);
        Ok(())
    }

    /// The new password is stored only after the email carrying it was sent.
    pub async fn forgot_password(&self, request: ForgotPasswordRequest) -> AppResult<()> {
        request.validate()?;
        let email = request.username.trim().to_lowercase();
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found!".to_string()))?;

        let new_password = generate_reset_password();
        self.mailer
            .send_password_reset(&user.email, &new_password)
            .await?;

        let hash = hash_password(&new_password)?;
        self.users.update_password(user.id, &hash).await?;
        log::info!("Password reset for user {}", user.public_id);
        Ok(())
    }
}
