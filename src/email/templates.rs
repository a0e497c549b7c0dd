use askama::Template;

use crate::models::Message;

#[derive(Template)]
#[template(path = "email/contact.html")]
struct ContactHtml<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

#[derive(Template)]
#[template(path = "email/contact.txt")]
struct ContactText<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

/// HTML body. Submitted values are escaped.
pub fn render_contact_html(message: &Message) -> Result<String, askama::Error> {
    ContactHtml {
        name: &message.name,
        email: &message.email,
        message: &message.message,
    }
    .render()
}

pub fn render_contact_text(message: &Message) -> Result<String, askama::Error> {
    ContactText {
        name: &message.name,
        email: &message.email,
        message: &message.message,
    }
    .render()
}
