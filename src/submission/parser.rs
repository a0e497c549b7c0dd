use super::ContactRequest;

/// Parse a contact body based on its Content-Type header.
///
/// Only JSON bodies are read. A non-JSON content type or an empty body
/// yields an empty request, which validation then rejects field by field.
pub fn parse_body(content_type: Option<&str>, body: &[u8]) -> Result<ContactRequest, serde_json::Error> {
    let is_json = content_type.is_some_and(|ct| ct.contains("application/json"));

    if !is_json || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ContactRequest::default());
    }

    serde_json::from_slice(body)
}
