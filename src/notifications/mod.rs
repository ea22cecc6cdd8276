//! Outbound email. Password resets are the only message the server sends.

pub mod smtp;

pub use smtp::SmtpMailer;

use async_trait::async_trait;

use crate::errors::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_password_reset(&self, to: &str, new_password: &str) -> AppResult<()>;
}

/// Used when no SMTP host is configured. Every send fails, so callers never
/// commit a state change that depends on the email having gone out.
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send_password_reset(&self, to: &str, _new_password: &str) -> AppResult<()> {
        log::warn!("Email delivery is not configured; dropping reset mail for {}", to);
        Err(AppError::EmailError("SMTP is not configured".to_string()))
    }
}

pub(crate) fn password_reset_body(new_password: &str) -> String {
    format!(
        "Your password has been reset.\n\nYour new password is: {}\n\nPlease log in and change it as soon as possible.",
        new_password
    )
}
