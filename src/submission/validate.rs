use serde::Deserialize;

use crate::models::NewMessage;

/// Raw contact-form body. Absent and `null` fields both land as `None`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingField(&'static str),
}

/// Check that every field is present and non-blank, then normalize.
///
/// Name and email are trimmed and the email is lowercased. The message body
/// is kept as submitted.
pub fn validate(request: ContactRequest) -> Result<NewMessage, ValidationError> {
    let name = required(request.name, "name")?;
    let email = required(request.email, "email")?;
    let message = required(request.message, "message")?;

    Ok(NewMessage::new(
        name.trim().to_string(),
        email.trim().to_lowercase(),
        message,
    ))
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ValidationError::MissingField(field))
}
