pub mod templates;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message as Email, Tokio1Executor};

use crate::config::{SmtpConfig, TlsMode};
use crate::models::Message;
use crate::notify::{NotifyError, Notifier};

const SENDER_NAME: &str = "Portfolio Contact";
const SUBJECT_PREFIX: &str = "Portfolio Contact";

/// Relays contact messages to the operator mailbox over authenticated SMTP.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpNotifier {
    pub fn new(config: &SmtpConfig) -> Result<Self, NotifyError> {
        let from = Mailbox::new(Some(SENDER_NAME.to_string()), config.user.parse()?);
        let to = Mailbox::new(None, config.to.parse()?);
        let transport = build_transport(config)?;

        Ok(Self {
            transport,
            from,
            to,
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, message: &Message) -> Result<(), NotifyError> {
        let email = compose(&self.from, &self.to, message)?;
        self.transport.send(email).await?;
        Ok(())
    }
}

/// Build the notification email: plain-text and HTML alternatives.
pub fn compose(from: &Mailbox, to: &Mailbox, message: &Message) -> Result<Email, NotifyError> {
    let text = templates::render_contact_text(message)?;
    let html = templates::render_contact_html(message)?;

    let email = Email::builder()
        .from(from.clone())
        .to(to.clone())
        .subject(format!("{SUBJECT_PREFIX}: {}", message.name))
        .multipart(MultiPart::alternative_plain_html(text, html))?;

    Ok(email)
}

/// The timeout bounds connect, greeting and every socket operation.
pub fn build_transport(
    config: &SmtpConfig,
) -> Result<AsyncSmtpTransport<Tokio1Executor>, NotifyError> {
    let creds = Credentials::new(config.user.clone(), config.pass.clone());

    let builder = match config.tls {
        TlsMode::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?,
        TlsMode::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?,
        TlsMode::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host),
    };

    Ok(builder
        .port(config.port)
        .credentials(creds)
        .timeout(Some(config.timeout))
        .build())
}
