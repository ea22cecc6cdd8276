use async_trait::async_trait;
use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use secrecy::ExposeSecret;

use crate::{
    config::SmtpConfig,
    errors::{AppError, AppResult},
    notifications::{password_reset_body, Mailer},
};

const RESET_SUBJECT: &str = "LearnHub password reset";

pub struct SmtpMailer {
    config: SmtpConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> AppResult<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| AppError::EmailError(e.to_string()))?
            .port(config.port);

        if let (Some(user), Some(password)) = (&config.user, &config.password) {
            builder = builder.credentials(Credentials::new(
                user.clone(),
                password.expose_secret().to_string(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            config,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_password_reset(&self, to: &str, new_password: &str) -> AppResult<()> {
        let from = self
            .config
            .from_address
            .parse()
            .map_err(|e: lettre::address::AddressError| AppError::EmailError(e.to_string()))?;
        let recipient = to
            .parse()
            .map_err(|e: lettre::address::AddressError| AppError::EmailError(e.to_string()))?;

        let email = Message::builder()
            .from(from)
            .to(recipient)
            .subject(RESET_SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(password_reset_body(new_password))
            .map_err(|e| AppError::EmailError(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| AppError::EmailError(e.to_string()))?;

        log::info!("Password reset email sent to {}", to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 2525,
            from_address: "not an address".to_string(),
            user: None,
            password: None,
        }
    }

    #[tokio::test]
    async fn test_bad_sender_address_is_an_email_error() {
        let mailer = SmtpMailer::new(config()).unwrap();
        let err = mailer
            .send_password_reset("user@example.com", "ABCDEF")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmailError(_)));
    }
}
