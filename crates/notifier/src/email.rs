use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
    message::{Mailbox, Message, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use shared::{
    abstract_trait::EmailServiceTrait,
    config::EmailConfig,
    errors::NotifyError,
    utils::{EmailTemplateData, render_email},
};
use tracing::{error, info};

type SmtpTransport = AsyncSmtpTransport<Tokio1Executor>;

#[derive(Clone)]
pub struct EmailService {
    mailer: SmtpTransport,
    from: Mailbox,
}

impl EmailService {
    pub fn new(config: &EmailConfig) -> Result<Self, NotifyError> {
        let creds = Credentials::new(config.smtp_user.clone(), config.smtp_pass.clone());

        let mailer = SmtpTransport::starttls_relay(&config.smtp_server)
            .map_err(|e| NotifyError::Smtp(format!("Failed to create SMTP relay: {e}")))?
            .credentials(creds)
            .port(config.smtp_port)
            .build();

        let from: Mailbox = config
            .from_address
            .parse()
            .map_err(|e| NotifyError::Smtp(format!("Invalid sender email: {e}")))?;

        Ok(Self { mailer, from })
    }
}

#[async_trait]
impl EmailServiceTrait for EmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        data: &EmailTemplateData,
    ) -> Result<(), NotifyError> {
        let body = render_email(data)?;

        let to: Mailbox = to
            .parse()
            .map_err(|e| NotifyError::Smtp(format!("Invalid recipient email: {e}")))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to.clone())
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(body)
            .map_err(|e| NotifyError::Smtp(format!("Failed to build email: {e}")))?;

        match self.mailer.send(email).await {
            Ok(_) => {
                info!("✅ Email sent to {to}");
                Ok(())
            }
            Err(e) => {
                error!("❌ Failed to send email to {to}: {e}");
                Err(NotifyError::Smtp(format!("Failed to send email: {e}")))
            }
        }
    }
}
