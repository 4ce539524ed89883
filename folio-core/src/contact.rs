//! Contact-form messages and the mail relay seam.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::form_urlencoded;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Failure to hand an email to the mail provider
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Relay is misconfigured: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Mail provider rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("All fields are required")]
    MissingFields,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Failed to render email: {0}")]
    Render(String),

    #[error(transparent)]
    Relay(#[from] RelayError),
}

impl ContactError {
    /// Whether the sender can fix this by editing the form
    pub fn is_client_error(&self) -> bool {
        matches!(self, ContactError::MissingFields | ContactError::InvalidEmail)
    }
}

/// A contact-form submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactMessage {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Check required fields, then the email shape
    pub fn validate(&self) -> Result<(), ContactError> {
        let fields = [&self.name, &self.email, &self.subject, &self.message];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ContactError::MissingFields);
        }
        if !is_valid_email(&self.email) {
            return Err(ContactError::InvalidEmail);
        }
        Ok(())
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// A fully composed email ready for the relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Addresses of the two emails sent for one submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    pub notified: String,
    pub confirmed: String,
}

/// Hands composed emails to a mail provider
#[async_trait]
pub trait ContactRelay: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), RelayError>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Relay that only logs; used when no provider is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct LogRelay;

#[async_trait]
impl ContactRelay for LogRelay {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), RelayError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            "Contact email (log relay, not sent)"
        );
        tracing::debug!("{}", email.text);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// `mailto:` draft link used when the form cannot be delivered
pub fn mailto_fallback(admin_email: &str, message: &ContactMessage) -> String {
    let body = format!(
        "Name: {}\nEmail: {}\n\nMessage:\n{}",
        message.name, message.email, message.message
    );
    format!(
        "mailto:{}?subject={}&body={}",
        admin_email,
        encode_component(&message.subject),
        encode_component(&body)
    )
}

fn encode_component(value: &str) -> String {
    // byte_serialize escapes a literal '+' as %2B, so every '+' left is a space
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> ContactMessage {
        ContactMessage::new("Ada", "ada@example.com", "Hello there", "Line one\nLine two")
    }

    #[test]
    fn test_valid_message() {
        assert!(message().validate().is_ok());
    }

    #[test]
    fn test_missing_fields() {
        let mut msg = message();
        msg.subject = "   ".to_string();
        assert!(matches!(msg.validate(), Err(ContactError::MissingFields)));

        let empty = ContactMessage::default();
        assert!(matches!(empty.validate(), Err(ContactError::MissingFields)));
    }

    #[test]
    fn test_invalid_email() {
        for bad in ["ada", "ada@example", "ada @example.com", "@example.com"] {
            let mut msg = message();
            msg.email = bad.to_string();
            assert!(
                matches!(msg.validate(), Err(ContactError::InvalidEmail)),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_client_error_classification() {
        assert!(ContactError::MissingFields.is_client_error());
        assert!(ContactError::InvalidEmail.is_client_error());
        assert!(!ContactError::Relay(RelayError::Transport("down".into())).is_client_error());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ContactError::MissingFields.to_string(), "All fields are required");
        assert_eq!(ContactError::InvalidEmail.to_string(), "Invalid email address");
    }

    #[test]
    fn test_mailto_fallback() {
        let link = mailto_fallback("me@example.com", &message());
        assert_eq!(
            link,
            "mailto:me@example.com?subject=Hello%20there&body=Name%3A%20Ada%0AEmail%3A%20ada%40example.com%0A%0AMessage%3A%0ALine%20one%0ALine%20two"
        );
    }

    #[test]
    fn test_mailto_keeps_literal_plus() {
        let mut msg = message();
        msg.subject = "C++ & Rust".to_string();
        let link = mailto_fallback("me@example.com", &msg);
        assert!(link.contains("subject=C%2B%2B%20%26%20Rust&"));
    }

    #[test]
    fn test_missing_json_fields_deserialize_empty() {
        let msg: ContactMessage = serde_json::from_str(r#"{"name": "Ada"}"#).unwrap();
        assert_eq!(msg.email, "");
        assert!(matches!(msg.validate(), Err(ContactError::MissingFields)));
    }

    #[tokio::test]
    async fn test_log_relay_accepts_everything() {
        let email = OutgoingEmail {
            from: "noreply@example.com".into(),
            to: "me@example.com".into(),
            subject: "s".into(),
            text: "t".into(),
            html: "<p>t</p>".into(),
        };
        assert!(LogRelay.send(&email).await.is_ok());
        assert_eq!(LogRelay.name(), "log");
    }
}
