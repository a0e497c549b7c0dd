use crate::models::{Message, NewMessage};
use crate::notify::Notifier;
use crate::store::{MessageStore, StoreError};

/// Store a validated submission, then try to relay it by email.
///
/// The store write decides the outcome. The notification runs once after a
/// successful write, and its result is logged and dropped.
pub async fn run(
    store: &dyn MessageStore,
    notifier: &dyn Notifier,
    draft: NewMessage,
) -> Result<Message, StoreError> {
    let message = store.create(&draft).await?;
    tracing::info!(id = %message.id, "Message saved to database");

    match notifier.notify(&message).await {
        Ok(()) => tracing::info!(id = %message.id, "Notification email sent"),
        Err(e) => tracing::warn!(id = %message.id, "Email notification failed (message saved): {e}"),
    }

    Ok(message)
}
