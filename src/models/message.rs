use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored contact-form submission.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated, normalized submission that has not been stored yet.
///
/// Only `submission::validate` builds one, so every draft handed to a
/// store already has a trimmed non-empty name, a trimmed lowercase email
/// and a non-blank message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    name: String,
    email: String,
    message: String,
}

impl NewMessage {
    pub(crate) fn new(name: String, email: String, message: String) -> Self {
        Self {
            name,
            email,
            message,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
