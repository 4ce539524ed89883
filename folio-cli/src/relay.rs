//! Mail relays and the contact submission flow.

use async_trait::async_trait;
use folio_core::config::RelayConfig;
use folio_core::{
    Config, ContactError, ContactMessage, ContactRelay, Delivery, LogRelay, OutgoingEmail,
    RelayError, RelayKind,
};
use folio_render::EmailContext;
use std::sync::Arc;
use std::time::Duration;

/// Relay that POSTs each email as JSON to a hosted mail API
pub struct HttpRelay {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpRelay {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RelayError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    pub fn from_config(relay: &RelayConfig) -> Result<Self, RelayError> {
        let endpoint = relay
            .endpoint
            .clone()
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| RelayError::Config("contact.relay.endpoint is required".into()))?;

        let api_key = match &relay.api_key_env {
            Some(var) => Some(std::env::var(var).map_err(|_| {
                RelayError::Config(format!("environment variable {} is not set", var))
            })?),
            None => None,
        };

        Self::new(endpoint, api_key, Duration::from_secs(relay.timeout_secs))
    }
}

#[async_trait]
impl ContactRelay for HttpRelay {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), RelayError> {
        let mut request = self.client.post(&self.endpoint).json(email);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(to = %email.to, "Mail provider accepted message");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Build the relay selected by `contact.relay.kind`
pub fn relay_from_config(config: &Config) -> Result<Arc<dyn ContactRelay>, RelayError> {
    match config.contact.relay.kind {
        RelayKind::Log => Ok(Arc::new(LogRelay)),
        RelayKind::Http => Ok(Arc::new(HttpRelay::from_config(&config.contact.relay)?)),
    }
}

/// Validate a submission, then send the owner notification and the
/// sender confirmation concurrently.
pub async fn send_contact_message(
    relay: &dyn ContactRelay,
    emails: &EmailContext,
    message: &ContactMessage,
) -> Result<Delivery, ContactError> {
    message.validate()?;

    let notification = emails
        .notification(message)
        .map_err(|e| ContactError::Render(e.to_string()))?;
    let confirmation = emails
        .confirmation(message)
        .map_err(|e| ContactError::Render(e.to_string()))?;

    tokio::try_join!(relay.send(&notification), relay.send(&confirmation))?;

    tracing::info!(
        relay = relay.name(),
        from = %message.email,
        "Contact message delivered"
    );

    Ok(Delivery {
        notified: notification.to,
        confirmed: confirmation.to,
    })
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingRelay;
    use super::*;

    fn emails() -> EmailContext {
        EmailContext {
            website_name: "janedoe.com".into(),
            author: "Jane Doe".into(),
            admin_email: "jane@janedoe.com".into(),
            from_email: "noreply@janedoe.com".into(),
        }
    }

    #[tokio::test]
    async fn test_sends_notification_and_confirmation() {
        let relay = RecordingRelay::default();
        let message = ContactMessage::new("Ada", "ada@example.com", "Hi", "Hello!");

        let delivery = send_contact_message(&relay, &emails(), &message)
            .await
            .unwrap();

        assert_eq!(delivery.notified, "jane@janedoe.com");
        assert_eq!(delivery.confirmed, "ada@example.com");

        let mut recipients: Vec<String> = relay.sent().into_iter().map(|e| e.to).collect();
        recipients.sort();
        assert_eq!(recipients, ["ada@example.com", "jane@janedoe.com"]);
    }

    #[tokio::test]
    async fn test_invalid_message_sends_nothing() {
        let relay = RecordingRelay::default();
        let message = ContactMessage::new("Ada", "not-an-email", "Hi", "Hello!");

        let err = send_contact_message(&relay, &emails(), &message)
            .await
            .unwrap_err();
        assert!(matches!(err, ContactError::InvalidEmail));
        assert!(relay.sent().is_empty());
    }

    #[tokio::test]
    async fn test_relay_failure_surfaces() {
        let relay = RecordingRelay::failing();
        let message = ContactMessage::new("Ada", "ada@example.com", "Hi", "Hello!");

        let err = send_contact_message(&relay, &emails(), &message)
            .await
            .unwrap_err();
        assert!(matches!(err, ContactError::Relay(RelayError::Transport(_))));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_http_relay_requires_endpoint() {
        let relay = RelayConfig {
            kind: RelayKind::Http,
            endpoint: None,
            api_key_env: None,
            timeout_secs: 5,
        };
        assert!(matches!(
            HttpRelay::from_config(&relay),
            Err(RelayError::Config(_))
        ));
    }

    #[test]
    fn test_http_relay_requires_key_variable() {
        let relay = RelayConfig {
            kind: RelayKind::Http,
            endpoint: Some("https://mail.example/send".into()),
            api_key_env: Some("FOLIO_TEST_KEY_THAT_IS_NEVER_SET".into()),
            timeout_secs: 5,
        };
        assert!(matches!(
            HttpRelay::from_config(&relay),
            Err(RelayError::Config(_))
        ));
    }

    #[test]
    fn test_http_relay_from_valid_config() {
        let relay = RelayConfig {
            kind: RelayKind::Http,
            endpoint: Some("https://mail.example/send".into()),
            api_key_env: None,
            timeout_secs: 3,
        };
        let built = HttpRelay::from_config(&relay).unwrap();
        assert_eq!(built.endpoint, "https://mail.example/send");
        assert!(built.api_key.is_none());
        assert_eq!(built.name(), "http");
    }
}
