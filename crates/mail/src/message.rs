//! Order notification composition.

use std::borrow::Cow;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::Message;
use moos_core::Order;

use crate::error::MailError;

pub const SUBJECT_PREFIX: &str = "Новая заявка с сайта МООС от ";

/// Shown in place of a comment the submitter left empty.
pub const COMMENT_PLACEHOLDER: &str = "Не указан";

/// A fully composed notification, ready for a [`MailRelay`](crate::MailRelay).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

impl OutboundEmail {
    /// Compose the notification for one order. `mailbox` is both sender and
    /// recipient.
    pub fn for_order(order: &Order, mailbox: &str) -> Self {
        let comment = order.comment.as_deref().unwrap_or(COMMENT_PLACEHOLDER);

        let html_body = format!(
            "<h2>Новая заявка с сайта</h2>\n\
             <p><strong>Имя:</strong> {name}</p>\n\
             <p><strong>Телефон:</strong> {phone}</p>\n\
             <p><strong>Email:</strong> {email}</p>\n\
             <p><strong>Комментарий:</strong> {comment}</p>\n\
             <hr>\n\
             <p><em>Отправлено с сайта МООС</em></p>\n",
            name = escape_html(&order.name),
            phone = escape_html(&order.phone),
            email = escape_html(&order.email),
            comment = escape_html(comment),
        );

        Self {
            from: mailbox.to_string(),
            to: mailbox.to_string(),
            subject: format!("{SUBJECT_PREFIX}{}", order.name),
            html_body,
        }
    }

    /// Assemble the MIME message.
    pub fn to_message(&self) -> Result<Message, MailError> {
        let from: Mailbox = self.from.parse()?;
        let to: Mailbox = self.to.parse()?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(self.subject.as_str())
            .header(ContentType::TEXT_HTML)
            .body(self.html_body.clone())
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

fn escape_html(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 16);
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn order(comment: Option<&str>) -> Order {
        Order {
            name: "Иван".into(),
            phone: "+7 999 123-45-67".into(),
            email: "ivan@example.com".into(),
            comment: comment.map(str::to_string),
        }
    }

    #[test]
    fn subject_embeds_name() {
        let email = OutboundEmail::for_order(&order(None), "orders@example.com");
        assert_eq!(email.subject, "Новая заявка с сайта МООС от Иван");
    }

    #[test]
    fn sender_and_recipient_are_the_mailbox() {
        let email = OutboundEmail::for_order(&order(None), "orders@example.com");
        assert_eq!(email.from, "orders@example.com");
        assert_eq!(email.to, "orders@example.com");
    }

    #[test]
    fn body_lists_every_field() {
        let email = OutboundEmail::for_order(&order(Some("Нужен тонометр")), "o@example.com");
        assert!(email.html_body.contains("<strong>Имя:</strong> Иван"));
        assert!(email.html_body.contains("<strong>Телефон:</strong> +7 999 123-45-67"));
        assert!(email.html_body.contains("<strong>Email:</strong> ivan@example.com"));
        assert!(email.html_body.contains("<strong>Комментарий:</strong> Нужен тонометр"));
        assert!(!email.html_body.contains(COMMENT_PLACEHOLDER));
    }

    #[test]
    fn missing_comment_uses_placeholder() {
        let email = OutboundEmail::for_order(&order(None), "o@example.com");
        assert!(email
            .html_body
            .contains("<strong>Комментарий:</strong> Не указан"));
    }

    #[test]
    fn submitted_values_are_escaped() {
        let email = OutboundEmail::for_order(&order(Some("<script>alert('x')</script>")), "o@example.com");
        assert!(!email.html_body.contains("<script>"));
        assert!(email.html_body.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }

    #[test]
    fn to_message_builds_with_valid_mailbox() {
        let email = OutboundEmail::for_order(&order(None), "orders@example.com");
        let message = email.to_message().unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Content-Type: text/html"));
    }

    #[test]
    fn to_message_rejects_empty_mailbox() {
        let email = OutboundEmail::for_order(&order(None), "");
        assert_matches!(email.to_message(), Err(MailError::Address(_)));
    }
}
