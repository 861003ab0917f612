use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
    message::{Mailbox, Message, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use shared::{
    abstract_trait::{EmailRequest, EmailServiceTrait},
    config::EmailConfig,
    errors::ServiceError,
    utils::render_email,
};
use tracing::{error, info};

type SmtpTransport = AsyncSmtpTransport<Tokio1Executor>;

/// Sends rendered transactional mail over STARTTLS.
#[derive(Clone)]
pub struct SmtpMailer {
    mailer: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig) -> Result<Self, ServiceError> {
        let creds = Credentials::new(config.smtp_user.clone(), config.smtp_pass.clone());

        let mailer = SmtpTransport::starttls_relay(&config.smtp_server)
            .map_err(|e| {
                error!("❌ Failed to create SMTP relay: {e}");
                ServiceError::Internal(format!("Failed to create SMTP relay: {e}"))
            })?
            .credentials(creds)
            .port(config.smtp_port)
            .build();

        let from: Mailbox = config.from.parse().map_err(|e| {
            error!("❌ Invalid sender address {}: {e}", config.from);
            ServiceError::Internal(format!("Invalid sender address: {e}"))
        })?;

        Ok(Self { mailer, from })
    }

    fn compose(&self, req: &EmailRequest) -> Result<Message, ServiceError> {
        let body = render_email(&req.data).map_err(|e| {
            ServiceError::Custom(format!("Failed to render email template: {e}"))
        })?;

        let to: Mailbox = req.to.parse().map_err(|e| {
            error!("❌ Invalid recipient email: {e}");
            ServiceError::Custom(format!("Invalid recipient email: {e}"))
        })?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&req.data.subject)
            .header(ContentType::TEXT_HTML)
            .body(body)
            .map_err(|e| {
                error!("❌ Failed to build email: {e}");
                ServiceError::Custom(format!("Failed to build email: {e}"))
            })
    }
}

#[async_trait]
impl EmailServiceTrait for SmtpMailer {
    async fn send(&self, req: &EmailRequest) -> Result<(), ServiceError> {
        let email = self.compose(req)?;

        match self.mailer.send(email).await {
            Ok(_) => {
                info!("✅ Email sent to {}", req.to);
                Ok(())
            }
            Err(e) => {
                error!("❌ Failed to send email to {}: {e}", req.to);
                Err(ServiceError::Custom(format!("Failed to send email: {e}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::utils::EmailTemplateData;

    fn config(from: &str) -> EmailConfig {
        EmailConfig {
            smtp_server: "smtp.example.com".to_string(),
            smtp_port: 587,
            smtp_user: "mailer".to_string(),
            smtp_pass: "secret".to_string(),
            from: from.to_string(),
        }
    }

    #[tokio::test]
    async fn rejects_malformed_sender() {
        assert!(SmtpMailer::new(&config("not an address")).is_err());
    }

    #[tokio::test]
    async fn composes_html_message_with_subject() {
        let mailer = SmtpMailer::new(&config("shop@example.com")).unwrap();
        let req = EmailRequest {
            to: "lan@example.com".to_string(),
            data: EmailTemplateData::password_otp("Lan", "123456", 5),
        };

        let message = mailer.compose(&req).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("To: lan@example.com"));
        assert!(raw.contains("text/html"));
    }

    #[tokio::test]
    async fn rejects_malformed_recipient() {
        let mailer = SmtpMailer::new(&config("shop@example.com")).unwrap();
        let req = EmailRequest {
            to: "nobody".to_string(),
            data: EmailTemplateData::password_otp("Lan", "123456", 5),
        };

        assert!(matches!(mailer.compose(&req), Err(ServiceError::Custom(_))));
    }
}
