//! Outbound email via SMTP (verification codes).

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;

/// SMTP mailer for transactional mail.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: String,
}

/// Errors raised while building or sending mail.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("smtp error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

impl Mailer {
    /// Build a mailer from SMTP settings (STARTTLS relay).
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();
        Ok(Self {
            transport,
            sender: config.sender.clone(),
        })
    }

    /// Send an HTML email.
    pub async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.sender.parse()?)
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())?;

        self.transport.send(message).await?;
        tracing::info!(%to, %subject, "email sent");
        Ok(())
    }

    /// Send the standard verification-code email.
    pub async fn send_verification_code(&self, to: &str, code: &str) -> Result<(), MailError> {
        let body = verification_email_body(code);
        self.send(to, "Your verification code", &body).await
    }
}

/// HTML body for a verification-code email.
fn verification_email_body(code: &str) -> String {
    format!(
        "<html>\
            <body>\
                <h2>Verification Code</h2>\
                <p>Your verification code is: <strong>{code}</strong></p>\
                <p>This code will expire in 2 minutes.</p>\
            </body>\
        </html>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_contains_code() {
        let body = verification_email_body("123456");
        assert!(body.contains("123456"));
        assert!(body.contains("expire in 2 minutes"));
    }
}
