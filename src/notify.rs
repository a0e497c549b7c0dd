use async_trait::async_trait;

use crate::models::Message;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("mail relay is not configured")]
    NotConfigured,
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to render email: {0}")]
    Render(#[from] askama::Error),
    #[error("failed to build email: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("failed to send email: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Best-effort delivery of a stored message to the operator.
///
/// Implementations make exactly one attempt and report the outcome. Callers
/// decide what a failure means; the contact flow only logs it.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &Message) -> Result<(), NotifyError>;
}

/// Installed when no mail credentials are configured.
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify(&self, _message: &Message) -> Result<(), NotifyError> {
        Err(NotifyError::NotConfigured)
    }
}
